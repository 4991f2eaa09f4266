//! HTTP API handlers for paxreg-api

pub mod contacts;
pub mod external;
pub mod health;
pub mod passengers;
pub mod views;

pub use contacts::add_contact;
pub use external::get_external_data;
pub use health::health_routes;
pub use passengers::{
    create_passenger, delete_passenger, get_passenger, list_passengers, update_passenger,
};
