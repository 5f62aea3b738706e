use std::fmt;

/// Error returned by host-facing platform side-effect APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformServicesError {
    Window(String),
    Capture(String),
    Clipboard(String),
    Other(String),
}

impl fmt::Display for PlatformServicesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformServicesError::Window(msg) => write!(f, "window error: {msg}"),
            PlatformServicesError::Capture(msg) => write!(f, "capture error: {msg}"),
            PlatformServicesError::Clipboard(msg) => write!(f, "clipboard error: {msg}"),
            PlatformServicesError::Other(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformServicesError {}

/// Minimal host-facing platform API.
///
/// This is the boundary where the host can request platform side effects
/// (window ops, redraws, clipboard writes) without reaching into a platform
/// backend's internal helpers.
pub trait HostPlatform {
    type WindowHandle: Copy;

    fn hide_window(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    fn request_redraw(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    /// Request that the platform closes the window gracefully.
    ///
    /// On Win32 this posts a `WM_CLOSE` message so teardown runs on a later
    /// message-loop iteration, never inside the current handler frame.
    fn request_close(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    fn destroy_window(&self, window: Self::WindowHandle) -> Result<(), PlatformServicesError>;

    fn copy_text_to_clipboard(&self, text: &str) -> Result<(), PlatformServicesError>;
}
