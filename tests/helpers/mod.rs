//! Test helpers module
//!
//! Mock backend/relay server, test data builders and the shared test context.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_context;
pub mod test_data;

pub use backend_mock::*;
pub use test_context::*;
pub use test_data::*;
