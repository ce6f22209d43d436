//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use vidwall_core::cache::CachePolicy;

#[derive(Debug, Parser)]
#[command(name = "vidwall")]
#[command(about = "Loop a video as the desktop wallpaper (Wayland/X11)", long_about = None)]
pub struct Cli {
    /// Path to the video file. Anything but MP4 is converted first.
    pub video: PathBuf,

    /// Extra mpv options, quoted as one argument (e.g. "--panscan=1.0 --hwdec=auto").
    #[arg(allow_hyphen_values = true)]
    pub extra: Option<String>,

    #[arg(long, value_enum, default_value_t = PolicyArg::Always)]
    pub cache_policy: PolicyArg,
}

#[derive(Debug, Parser)]
#[command(name = "vidwall-resolve")]
#[command(about = "Convert a video to a cached MP4 and print the usable path", long_about = None)]
pub struct ResolveCli {
    /// Path to the video file.
    pub video: PathBuf,

    #[arg(long, value_enum, default_value_t = PolicyArg::Always)]
    pub cache_policy: PolicyArg,
}

/// When to transcode a file that already has a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Convert again on every run.
    Always,
    /// Reuse an existing cached conversion with the same name.
    Reuse,
}

impl From<PolicyArg> for CachePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Always => CachePolicy::AlwaysReconvert,
            PolicyArg::Reuse => CachePolicy::ReuseIfPresent,
        }
    }
}
