//! Outbound service clients

pub mod verify_client;

pub use verify_client::{VerifyClient, VerifyError, VerifyResult};
