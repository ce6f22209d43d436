//! Transcode arbitrary video into MP4 (H.264 + AAC) via ffmpeg.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use vidwall_core::Error;

pub const FFMPEG_BIN_ENV: &str = "VIDWALL_FFMPEG_BIN";

/// Handle on the ffmpeg executable.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    bin: OsString,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Ffmpeg {
    pub fn new(bin: impl Into<OsString>) -> Self {
        Self { bin: bin.into() }
    }

    /// `$VIDWALL_FFMPEG_BIN`, falling back to `ffmpeg` on `PATH`.
    pub fn from_env() -> Self {
        std::env::var_os(FFMPEG_BIN_ENV)
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn bin(&self) -> &OsString {
        &self.bin
    }

    /// Re-encode `input` into an MP4 at `output`.
    ///
    /// The audio stream is mapped optionally, so sources without audio produce a
    /// video-only file. Output is staged in a hidden sibling and renamed into place,
    /// which means `output` is either the old file or a complete new one.
    pub fn transcode(&self, input: &Path, output: &Path) -> Result<(), Error> {
        let staging = staging_path(output).ok_or_else(|| Error::Conversion {
            input: input.to_path_buf(),
            message: format!("invalid output path {}", output.display()),
            diagnostic: String::new(),
        })?;

        info!(input = %input.display(), output = %output.display(), "transcoding");

        let result = self.run(input, &staging).and_then(|()| {
            fs::rename(&staging, output).map_err(|err| Error::Conversion {
                input: input.to_path_buf(),
                message: format!("could not move output into {}", output.display()),
                diagnostic: err.to_string(),
            })
        });

        if let Err(Error::Conversion { message, diagnostic, .. }) = &result {
            let _ = fs::remove_file(&staging);
            warn!(
                input = %input.display(),
                reason = %message,
                diagnostic = %diagnostic.trim_end(),
                "conversion failed"
            );
        }
        result
    }

    fn run(&self, input: &Path, staging: &Path) -> Result<(), Error> {
        let conversion_error = |message: String, diagnostic: String| Error::Conversion {
            input: input.to_path_buf(),
            message,
            diagnostic,
        };

        // `-v error` keeps ffmpeg's banner and progress off every stream; only real
        // failures reach stderr, and that is captured rather than inherited.
        let child = Command::new(&self.bin)
            .arg("-hide_banner")
            .arg("-nostdin")
            .arg("-v")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-map")
            .arg("0:v:0")
            .arg("-map")
            .arg("0:a:0?")
            .arg("-c:v")
            .arg("libx264")
            .arg("-pix_fmt")
            .arg("yuv420p")
            .arg("-vf")
            .arg("scale=trunc(iw/2)*2:trunc(ih/2)*2")
            .arg("-c:a")
            .arg("aac")
            .arg("-movflags")
            .arg("+faststart")
            .arg("-f")
            .arg("mp4")
            .arg(staging)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                conversion_error(
                    format!("could not run {}", Path::new(&self.bin).display()),
                    err.to_string(),
                )
            })?;

        let output = child
            .wait_with_output()
            .map_err(|err| conversion_error("wait for ffmpeg".into(), err.to_string()))?;
        let diagnostic = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(conversion_error(
                format!("ffmpeg exited with {}", output.status),
                diagnostic,
            ));
        }

        let written = fs::metadata(staging).map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            return Err(conversion_error("ffmpeg produced no output".into(), diagnostic));
        }

        debug!(bytes = written, "ffmpeg finished");
        Ok(())
    }
}

fn staging_path(output: &Path) -> Option<PathBuf> {
    let dir = output.parent()?;
    let mut name = OsString::from(".");
    name.push(output.file_name()?);
    name.push(".tmp");
    Some(dir.join(name))
}
