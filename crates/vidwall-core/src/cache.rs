//! Cache naming rules.
//!
//! Entries live flat in `<home>/.ccache`, keyed by the source base name with the
//! extension swapped for `.mp4`. There is no content hashing, so `a/clip.mkv` and
//! `b/clip.webm` share the entry `clip.mp4`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const CACHE_DIR_NAME: &str = ".ccache";

pub const MP4_EXTENSION: &str = "mp4";

pub fn cache_dir_in(home: &Path) -> PathBuf {
    home.join(CACHE_DIR_NAME)
}

/// True when the extension is `mp4`, ignoring case.
pub fn is_mp4(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(MP4_EXTENSION))
}

/// File name of the cache entry for `input`, e.g. `clip.mkv` -> `clip.mp4`.
pub fn cache_entry_name(input: &Path) -> Option<OsString> {
    let name = input.file_name()?;
    Path::new(name)
        .with_extension(MP4_EXTENSION)
        .file_name()
        .map(|n| n.to_os_string())
}

/// Whether an existing cache entry may stand in for a fresh transcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Transcode on every request, overwriting any previous entry.
    #[default]
    AlwaysReconvert,
    /// Use a non-empty entry with the same name if one exists.
    ReuseIfPresent,
}
