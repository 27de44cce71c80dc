//! Core - configuration and process setup
//!
//! - [`Config`] - settings read from the environment
//! - [`setup_environment`] - `.env` loading and logger initialization

pub mod config;

pub use config::{Config, setup_environment};
