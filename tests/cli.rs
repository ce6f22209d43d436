use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

const SESSION_VARS: [&str; 3] = ["XDG_SESSION_TYPE", "WAYLAND_DISPLAY", "DISPLAY"];

fn write_exe(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    let mut perm = std::fs::metadata(path).unwrap().permissions();
    perm.set_mode(0o755);
    std::fs::set_permissions(path, perm).unwrap();
}

/// A sandbox with its own HOME and fake ffmpeg/mpv/mpvpaper.
struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("home")).unwrap();

        // Chatty on both streams, like the real thing without `-v error`.
        write_exe(
            &dir.path().join("ffmpeg"),
            &format!(
                "#!/bin/sh\n\n# fake ffmpeg\necho run >> '{}'\necho 'frame=1 fps=0.0' \necho 'frame=2' 1>&2\nfor a; do out=\"$a\"; done\nprintf 'mp4' > \"$out\"\n",
                dir.path().join("ffmpeg.log").display()
            ),
        );
        for player in ["mpv", "mpvpaper"] {
            write_exe(
                &dir.path().join(player),
                &format!(
                    "#!/bin/sh\n\n# fake {player}\nprintf '%s\\n' \"$@\" > '{}'\n",
                    dir.path().join(format!("{player}.args")).display()
                ),
            );
        }

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn home(&self) -> PathBuf {
        std::fs::canonicalize(self.path().join("home")).unwrap()
    }

    fn video(&self, name: &str) -> PathBuf {
        let p = self.path().join(name);
        std::fs::write(&p, b"video").unwrap();
        p
    }

    fn ffmpeg_runs(&self) -> usize {
        std::fs::read_to_string(self.path().join("ffmpeg.log"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    fn player_args(&self, player: &str) -> Vec<String> {
        let file = self.path().join(format!("{player}.args"));
        let deadline = Instant::now() + Duration::from_secs(2);
        while !file.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        // The file may exist before the fake player finishes writing it.
        std::thread::sleep(Duration::from_millis(50));
        std::fs::read_to_string(file)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn command(&self, bin: &str) -> Command {
        let mut cmd = Command::new(bin);
        cmd.env("HOME", self.path().join("home"))
            .env("VIDWALL_FFMPEG_BIN", self.path().join("ffmpeg"))
            .env("VIDWALL_MPV_BIN", self.path().join("mpv"))
            .env("VIDWALL_MPVPAPER_BIN", self.path().join("mpvpaper"))
            .env_remove("VIDWALL_DEBUG")
            .env_remove("VIDWALL_LOG");
        for var in SESSION_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    fn resolve(&self, video: &Path) -> Output {
        self.command(env!("CARGO_BIN_EXE_vidwall-resolve"))
            .arg(video)
            .output()
            .unwrap()
    }

    fn vidwall(&self) -> Command {
        self.command(env!("CARGO_BIN_EXE_vidwall"))
    }
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn resolver_prints_mp4_path_untouched() {
    let sb = Sandbox::new();
    let movie = sb.video("movie.mp4");

    let out = sb.resolve(&movie);
    assert!(out.status.success(), "{out:?}");
    assert_eq!(
        stdout_lines(&out),
        [std::fs::canonicalize(&movie).unwrap().display().to_string()]
    );
    assert!(!sb.home().join(".ccache").exists());
    assert_eq!(sb.ffmpeg_runs(), 0);
}

#[test]
fn resolver_prints_only_the_cache_entry() {
    let sb = Sandbox::new();
    let clip = sb.video("clip.mkv");

    let out = sb.resolve(&clip);
    assert!(out.status.success(), "{out:?}");

    let expected = sb.home().join(".ccache").join("clip.mp4");
    assert_eq!(stdout_lines(&out), [expected.display().to_string()]);
    assert!(expected.is_file());
    assert_eq!(sb.ffmpeg_runs(), 1);
}

#[test]
fn resolver_reports_missing_file_on_stderr() {
    let sb = Sandbox::new();

    let out = sb.resolve(&sb.path().join("missing.mkv"));
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("is not a valid file"), "{stderr}");
    assert_eq!(stderr.trim_end().lines().count(), 1);
    assert!(!sb.home().join(".ccache").exists());
}

#[test]
fn unknown_display_server_stops_before_conversion() {
    let sb = Sandbox::new();
    let clip = sb.video("clip.mkv");

    let out = sb.vidwall().arg(&clip).output().unwrap();
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("display server"), "{stderr}");
    assert!(!sb.home().join(".ccache").exists());
    assert_eq!(sb.ffmpeg_runs(), 0);
    assert!(sb.player_args("mpv").is_empty());
}

#[test]
fn missing_video_is_reported() {
    let sb = Sandbox::new();

    let out = sb
        .vidwall()
        .env("DISPLAY", ":0")
        .arg(sb.path().join("nope.webm"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("is not a valid file"));
}

#[test]
fn x11_converts_then_launches_mpv_on_root_window() {
    let sb = Sandbox::new();
    let clip = sb.video("clip.mkv");

    let out = sb
        .vidwall()
        .env("DISPLAY", ":0")
        .arg(&clip)
        .arg("--hwdec=auto --panscan=1.0")
        .output()
        .unwrap();
    assert!(out.status.success(), "{out:?}");
    assert!(out.stdout.is_empty());

    let entry = sb.home().join(".ccache").join("clip.mp4");
    let args = sb.player_args("mpv");
    assert_eq!(args.first().map(String::as_str), Some("--wid=0"));
    assert!(args.iter().any(|a| a == "--hwdec=auto"));
    assert!(args.iter().any(|a| a == "--panscan=1.0"));
    assert_eq!(args.last(), Some(&entry.display().to_string()));
}

#[test]
fn wayland_launches_mpvpaper_with_mp4_as_is() {
    let sb = Sandbox::new();
    let movie = sb.video("movie.MP4");

    let out = sb
        .vidwall()
        .env("XDG_SESSION_TYPE", "wayland")
        .arg(&movie)
        .output()
        .unwrap();
    assert!(out.status.success(), "{out:?}");
    assert_eq!(sb.ffmpeg_runs(), 0);

    let args = sb.player_args("mpvpaper");
    assert_eq!(args[..4], ["ALL", "-l", "background", "-o"]);
    assert!(args[4].contains("--loop=inf"));
    assert_eq!(
        args.last(),
        Some(&std::fs::canonicalize(&movie).unwrap().display().to_string())
    );
}

#[test]
fn missing_player_is_reported_before_conversion() {
    let sb = Sandbox::new();
    let clip = sb.video("clip.avi");

    let out = sb
        .vidwall()
        .env("DISPLAY", ":0")
        .env("VIDWALL_MPV_BIN", sb.path().join("no-such-mpv"))
        .arg(&clip)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing required system dependencies"));
    assert_eq!(sb.ffmpeg_runs(), 0);
}

#[test]
fn failed_conversion_logs_diagnostic_apart_from_error() {
    let sb = Sandbox::new();
    let broken = sb.path().join("broken-ffmpeg");
    write_exe(
        &broken,
        "#!/bin/sh\n\n# fake ffmpeg\necho 'moov atom not found' 1>&2\nexit 1\n",
    );
    let clip = sb.video("broken.mov");

    let out = sb
        .command(env!("CARGO_BIN_EXE_vidwall-resolve"))
        .env("VIDWALL_FFMPEG_BIN", &broken)
        .arg(&clip)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("moov atom not found"), "{stderr}");
    let last = stderr.trim_end().lines().last().unwrap_or_default();
    assert!(last.starts_with("conversion of"), "{stderr}");
    assert!(!last.contains("moov atom"));
    assert!(!sb.home().join(".ccache").join("broken.mp4").exists());
}

#[test]
fn debug_log_shows_usable_path() {
    let sb = Sandbox::new();
    let clip = sb.video("clip.webm");

    let out = sb
        .vidwall()
        .env("DISPLAY", ":0")
        .env("VIDWALL_LOG", "debug")
        .arg(&clip)
        .output()
        .unwrap();
    assert!(out.status.success(), "{out:?}");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("launching wallpaper"), "{stderr}");
    assert!(stderr.contains("clip.mp4"), "{stderr}");
}
