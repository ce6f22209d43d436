//! vidwall-core: pure types (display-server classification, cache naming, errors).

pub mod cache;
pub mod display;
pub mod error;

pub use error::{Error, Result};
