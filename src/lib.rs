//! vidwall: shared pieces of the `vidwall` and `vidwall-resolve` binaries.

pub mod args;
pub mod output;
