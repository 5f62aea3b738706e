use snaptex_platform::{HostPlatform, PlatformServicesError, WindowId};

use crate::win32::WM_CLOSE;
use crate::win_api;

use super::{clipboard, hwnd};

fn window_err(e: windows::core::Error) -> PlatformServicesError {
    PlatformServicesError::Window(format!("{e:?}"))
}

/// Win32 implementation of the host-facing platform API.
#[derive(Debug, Default)]
pub struct WindowsHostPlatform;

impl WindowsHostPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl HostPlatform for WindowsHostPlatform {
    type WindowHandle = WindowId;

    fn hide_window(&self, window: WindowId) -> Result<(), PlatformServicesError> {
        win_api::hide_window(hwnd(window)).map_err(window_err)
    }

    fn request_redraw(&self, window: WindowId) -> Result<(), PlatformServicesError> {
        win_api::request_redraw(hwnd(window)).map_err(window_err)
    }

    fn request_close(&self, window: WindowId) -> Result<(), PlatformServicesError> {
        win_api::post_message(hwnd(window), WM_CLOSE, 0, 0).map_err(window_err)
    }

    fn destroy_window(&self, window: WindowId) -> Result<(), PlatformServicesError> {
        win_api::destroy_window(hwnd(window)).map_err(window_err)
    }

    fn copy_text_to_clipboard(&self, text: &str) -> Result<(), PlatformServicesError> {
        clipboard::copy_text_to_clipboard(text)
            .map_err(|e| PlatformServicesError::Clipboard(e.to_string()))
    }
}
