//! # argus-core
//!
//! Core types, traits, configuration, and error handling for the Argus relay.

pub mod config;
pub mod error;
pub mod message;
pub mod traits;
