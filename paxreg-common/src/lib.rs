//! paxreg-common - shared library for the passenger registry service
//!
//! Holds the error taxonomy, configuration loading, and the SQLite
//! data-access layer used by paxreg-api.

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
