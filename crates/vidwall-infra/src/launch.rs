//! Wallpaper player launch (mpvpaper on Wayland, mpv on the X11 root window).
//!
//! The player is started detached and never supervised: no wait, no restart.
//! Reaping it is left to init once this process exits.

use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use vidwall_core::display::DisplayServer;
use vidwall_core::Error;

pub const MPV_BIN_ENV: &str = "VIDWALL_MPV_BIN";
pub const MPVPAPER_BIN_ENV: &str = "VIDWALL_MPVPAPER_BIN";

/// mpv options handed to mpvpaper through `-o`.
const MPVPAPER_MPV_OPTS: [&str; 5] = [
    "--no-audio",
    "--loop=inf",
    "--fs",
    "--no-stop-screensaver",
    "--player-operation-mode=pseudo-gui",
];

/// mpv options after `--wid=0` for the X11 root window.
const X11_MPV_OPTS: [&str; 4] = [
    "--loop=inf",
    "--no-audio",
    "--no-stop-screensaver",
    "--player-operation-mode=pseudo-gui",
];

#[derive(Debug, Clone)]
pub struct Player {
    mpv: OsString,
    mpvpaper: OsString,
}

impl Default for Player {
    fn default() -> Self {
        Self::new("mpv", "mpvpaper")
    }
}

impl Player {
    pub fn new(mpv: impl Into<OsString>, mpvpaper: impl Into<OsString>) -> Self {
        Self {
            mpv: mpv.into(),
            mpvpaper: mpvpaper.into(),
        }
    }

    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.into())
        };
        Self::new(var(MPV_BIN_ENV, "mpv"), var(MPVPAPER_BIN_ENV, "mpvpaper"))
    }

    /// The executable that serves `server`, if any.
    pub fn program_for(&self, server: DisplayServer) -> Option<&OsString> {
        match server {
            DisplayServer::Wayland => Some(&self.mpvpaper),
            DisplayServer::X11 => Some(&self.mpv),
            DisplayServer::Unknown => None,
        }
    }

    /// Build the player invocation. `extra` is split on whitespace and passed to mpv.
    pub fn command(
        &self,
        video: &Path,
        server: DisplayServer,
        extra: Option<&str>,
    ) -> Result<Command, Error> {
        let extra = extra.into_iter().flat_map(str::split_whitespace);

        let cmd = match server {
            DisplayServer::Wayland => {
                // mpvpaper takes every mpv option as one `-o` string.
                let opts: Vec<&str> = MPVPAPER_MPV_OPTS.into_iter().chain(extra).collect();

                let mut cmd = Command::new(&self.mpvpaper);
                cmd.arg("ALL")
                    .arg("-l")
                    .arg("background")
                    .arg("-o")
                    .arg(opts.join(" "))
                    .arg(video);
                cmd
            }
            DisplayServer::X11 => {
                let mut cmd = Command::new(&self.mpv);
                cmd.arg("--wid=0").args(X11_MPV_OPTS).args(extra).arg(video);
                cmd
            }
            DisplayServer::Unknown => return Err(Error::UnknownDisplayServer),
        };

        Ok(cmd)
    }

    /// Spawn the player detached and return its pid.
    pub fn launch(
        &self,
        video: &Path,
        server: DisplayServer,
        extra: Option<&str>,
    ) -> Result<u32, Error> {
        let mut cmd = self.command(video, server, extra)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0);

        let program = Path::new(cmd.get_program()).display().to_string();
        let child = cmd.spawn().map_err(|source| Error::Launch {
            program: program.clone(),
            source,
        })?;

        let pid = child.id();
        info!(%program, pid, video = %video.display(), %server, "wallpaper started");
        Ok(pid)
    }
}
