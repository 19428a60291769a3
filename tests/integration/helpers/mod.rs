//! Helper utilities for integration tests.


pub use assertions::*;
pub use transports::*;
