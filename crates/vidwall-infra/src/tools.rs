//! External tool checks.

use std::ffi::OsStr;
use std::path::Path;

use vidwall_core::Error;

/// Fail with every missing tool listed, not just the first.
///
/// Names are looked up on `PATH`; anything containing a `/` is checked as a path.
pub fn require<S: AsRef<OsStr>>(tools: &[S]) -> Result<(), Error> {
    let missing: Vec<String> = tools
        .iter()
        .filter(|tool| which::which(tool).is_err())
        .map(|tool| Path::new(tool).display().to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    for tool in &missing {
        tracing::warn!(%tool, "not found in PATH");
    }
    Err(Error::MissingDependency { tools: missing })
}
