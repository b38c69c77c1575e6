//! Common test utilities for nbia-cart tests

pub mod fixtures;
pub mod mock_service;

// Re-exports for convenience - not all test binaries use all exports
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_service::{Call, MockCartService};
