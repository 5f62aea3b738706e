pub mod app_runner;
pub mod capture;
pub mod clipboard;
pub mod host_platform;
pub mod message_box;
pub mod overlay_paint;
pub mod system;

pub use app_runner::{UserEventSender, run_fullscreen_overlay_app};
pub use capture::{ScreenBackground, capture_screen_region};
pub use host_platform::WindowsHostPlatform;
pub use overlay_paint::paint_overlay;

use std::ffi::c_void;

use snaptex_platform::WindowId;
use windows::Win32::Foundation::HWND;

#[inline]
pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId::from_raw(hwnd.0 as usize)
}

#[inline]
pub fn hwnd(window: WindowId) -> HWND {
    HWND(window.raw() as *mut c_void)
}
