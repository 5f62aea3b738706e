use std::ffi::c_void;

use windows::Win32::Foundation::COLORREF;
use windows::Win32::Graphics::Gdi::*;

use super::capture::ScreenBackground;

// COLORREF is 0x00BBGGRR.
const OUTLINE_COLOR: COLORREF = COLORREF(0x0000_00FF);
const OUTLINE_WIDTH: i32 = 2;

/// Paint the overlay: the frozen screen snapshot as background, plus the
/// selection outline if one is active.
///
/// `surface` is the raw BeginPaint HDC handed to the host's paint handler;
/// it is already clipped to the update region.
pub fn paint_overlay(
    surface: usize,
    background: &ScreenBackground,
    outline: Option<(i32, i32, i32, i32)>,
) {
    let dc = HDC(surface as *mut c_void);
    if dc.is_invalid() {
        return;
    }

    unsafe {
        background.blit_to(dc);

        if let Some((left, top, right, bottom)) = outline {
            let pen = CreatePen(PS_SOLID, OUTLINE_WIDTH, OUTLINE_COLOR);
            let old_pen = SelectObject(dc, pen.into());
            // Hollow rectangle; the snapshot already fills the interior.
            let old_brush = SelectObject(dc, GetStockObject(NULL_BRUSH));

            let _ = Rectangle(dc, left, top, right, bottom);

            SelectObject(dc, old_brush);
            SelectObject(dc, old_pen);
            let _ = DeleteObject(pen.into());
        }
    }
}
