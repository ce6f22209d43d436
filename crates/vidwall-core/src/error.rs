//! Error taxonomy shared by the resolver, detector and launcher.
//!
//! Every `Display` is a single line. Tool output belongs in logs, never here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input path '{}' is not a valid file", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not determine the home directory for the conversion cache")]
    NoHome,

    #[error("could not create cache directory '{}'", .path.display())]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conversion of '{}' failed: {message}", .input.display())]
    Conversion {
        input: PathBuf,
        message: String,
        /// Captured transcoder stderr, for logging only.
        diagnostic: String,
    },

    #[error("could not determine display server type")]
    UnknownDisplayServer,

    #[error("wallpaper did not start: could not run '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required system dependencies: {}", .tools.join(", "))]
    MissingDependency { tools: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
