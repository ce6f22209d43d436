//! Environment detection (Wayland/X11).

use vidwall_core::display::{classify, DisplayServer};
use vidwall_core::Error;

pub fn detect_display_server() -> DisplayServer {
    let session_type = std::env::var("XDG_SESSION_TYPE").ok();
    let has_wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    let has_x11 = std::env::var_os("DISPLAY").is_some();

    classify(session_type.as_deref(), has_wayland, has_x11)
}

/// Like [`detect_display_server`], but `Unknown` is an error.
pub fn require_display_server() -> Result<DisplayServer, Error> {
    match detect_display_server() {
        DisplayServer::Unknown => Err(Error::UnknownDisplayServer),
        known => {
            tracing::debug!(server = %known, "detected display server");
            Ok(known)
        }
    }
}
