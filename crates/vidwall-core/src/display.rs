//! Display-server classification.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
    Unknown,
}

impl fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Wayland => "Wayland",
            Self::X11 => "X11",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Classify the session from `XDG_SESSION_TYPE` and the display markers.
///
/// An explicit session type wins. Anything else it may hold ("tty", "mir", empty)
/// falls through to `WAYLAND_DISPLAY`, then `DISPLAY`.
pub fn classify(
    session_type: Option<&str>,
    has_wayland_display: bool,
    has_display: bool,
) -> DisplayServer {
    if let Some(kind) = session_type.map(str::trim) {
        if kind.eq_ignore_ascii_case("wayland") {
            return DisplayServer::Wayland;
        }
        if kind.eq_ignore_ascii_case("x11") {
            return DisplayServer::X11;
        }
    }

    if has_wayland_display {
        return DisplayServer::Wayland;
    }
    if has_display {
        return DisplayServer::X11;
    }

    DisplayServer::Unknown
}
