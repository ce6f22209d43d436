//! Path resolver and conversion cache.
//!
//! Turns any input video into a path a player can loop: MP4 files pass through,
//! everything else is transcoded into `<home>/.ccache/<stem>.mp4`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use vidwall_core::cache::{cache_dir_in, cache_entry_name, is_mp4, CachePolicy};
use vidwall_core::Error;

use crate::transcode::Ffmpeg;

#[derive(Debug, Clone)]
pub struct ConversionCache {
    dir: PathBuf,
    policy: CachePolicy,
    ffmpeg: Ffmpeg,
}

impl ConversionCache {
    pub fn new(dir: impl Into<PathBuf>, policy: CachePolicy, ffmpeg: Ffmpeg) -> Self {
        Self {
            dir: dir.into(),
            policy,
            ffmpeg,
        }
    }

    /// Cache in `<home>/.ccache`, transcoding with the ffmpeg from the environment.
    pub fn from_home(policy: CachePolicy) -> Result<Self, Error> {
        let home = dirs::home_dir().ok_or(Error::NoHome)?;
        Ok(Self::new(cache_dir_in(&home), policy, Ffmpeg::from_env()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn ffmpeg(&self) -> &Ffmpeg {
        &self.ffmpeg
    }

    /// Where the transcode of `input` lands.
    pub fn entry_path(&self, input: &Path) -> Option<PathBuf> {
        cache_entry_name(input).map(|name| self.dir.join(name))
    }

    /// Resolve `input` to an absolute MP4 path, transcoding when needed.
    pub fn resolve(&self, input: &Path) -> Result<PathBuf, Error> {
        let not_found = || Error::NotFound {
            path: input.to_path_buf(),
        };

        if !input.is_file() {
            return Err(not_found());
        }

        if !needs_conversion(input) {
            let abs = fs::canonicalize(input).map_err(|_| not_found())?;
            debug!(path = %abs.display(), "already mp4");
            return Ok(abs);
        }

        let target = self.entry_path(input).ok_or_else(not_found)?;

        fs::create_dir_all(&self.dir).map_err(|source| Error::CacheDir {
            path: self.dir.clone(),
            source,
        })?;

        if self.policy == CachePolicy::ReuseIfPresent && is_usable_entry(&target) {
            info!(entry = %target.display(), "reusing cached conversion");
        } else {
            self.ffmpeg.transcode(input, &target)?;
        }

        fs::canonicalize(&target).map_err(|err| Error::Conversion {
            input: input.to_path_buf(),
            message: format!("converted file {} is missing", target.display()),
            diagnostic: err.to_string(),
        })
    }
}

/// Everything but `.mp4` (any case) goes through the transcoder.
pub fn needs_conversion(input: &Path) -> bool {
    !is_mp4(input)
}

fn is_usable_entry(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}
