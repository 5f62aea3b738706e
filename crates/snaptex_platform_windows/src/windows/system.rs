use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Screen size in pixels (width, height).
pub fn get_screen_size() -> (i32, i32) {
    // SAFETY: GetSystemMetrics is a thread-safe read-only API and the
    // SM_CXSCREEN/SM_CYSCREEN metrics are always valid.
    let w = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let h = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    (w, h)
}
