//! Utility modules
//!
//! This module contains common utilities used throughout the client,
//! including error handling, logging setup, data URI conversion and helper functions.

pub mod errors;
pub mod logging;
pub mod helpers;
pub mod data_uri;

pub use errors::{GatePassError, Result};
