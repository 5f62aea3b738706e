use std::{ffi::OsStr, ffi::c_void, iter::once, os::windows::ffi::OsStrExt};

use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{PROCESS_PER_MONITOR_DPI_AWARE, SetProcessDpiAwareness};
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

#[inline]
pub fn set_process_per_monitor_dpi_aware() -> windows::core::Result<()> {
    unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) }
}

#[inline]
pub fn get_window_user_data(hwnd: HWND) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) }
}

#[inline]
pub fn set_window_user_data(hwnd: HWND, data: isize) -> isize {
    unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, data) }
}

#[inline]
pub fn def_window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

#[inline]
pub fn get_module_handle() -> windows::core::Result<HMODULE> {
    unsafe { GetModuleHandleW(None) }
}

#[inline]
pub fn load_cursor(cursor: PCWSTR) -> windows::core::Result<HCURSOR> {
    unsafe { LoadCursorW(Some(HINSTANCE(std::ptr::null_mut())), cursor) }
}

#[inline]
pub fn register_class(window_class: &WNDCLASSW) -> u16 {
    unsafe { RegisterClassW(window_class) }
}

/// Register a window class and create a hidden fullscreen popup tool window
/// for it, passing `create_params` through to `WM_CREATE`.
pub fn create_hidden_toolwindow_with_params(
    window_class_name: &str,
    window_proc: unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT,
    width: i32,
    height: i32,
    class_style: WNDCLASS_STYLES,
    cursor: PCWSTR,
    create_params: Option<*const c_void>,
) -> windows::core::Result<HWND> {
    let instance = get_module_handle()?;
    let class_name = to_wide_chars(window_class_name);

    let window_class = WNDCLASSW {
        lpfnWndProc: Some(window_proc),
        hInstance: instance.into(),
        lpszClassName: PCWSTR(class_name.as_ptr()),
        hbrBackground: HBRUSH(std::ptr::null_mut()),
        hCursor: load_cursor(cursor)?,
        style: class_style,
        ..Default::default()
    };

    register_class(&window_class);

    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_TOOLWINDOW | WS_EX_TOPMOST,
            PCWSTR(class_name.as_ptr()),
            PCWSTR::null(),
            WS_POPUP,
            0,
            0,
            width,
            height,
            Some(HWND(std::ptr::null_mut())),
            Some(HMENU(std::ptr::null_mut())),
            Some(instance.into()),
            create_params,
        )?
    };
    let _ = hide_window(hwnd);
    let _ = update_window(hwnd);
    Ok(hwnd)
}

#[inline]
pub fn hide_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
    Ok(())
}

#[inline]
pub fn show_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }
    Ok(())
}

/// Request a repaint of the whole client area.
#[inline]
pub fn request_redraw(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = InvalidateRect(Some(hwnd), None, FALSE.into());
    }
    Ok(())
}

#[inline]
pub fn update_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        let _ = UpdateWindow(hwnd);
    }
    Ok(())
}

/// Begin a WM_PAINT cycle and return the PAINTSTRUCT.
///
/// The returned PAINTSTRUCT must be passed to [`end_paint`].
#[inline]
pub fn begin_paint(hwnd: HWND) -> PAINTSTRUCT {
    let mut ps = PAINTSTRUCT::default();
    unsafe {
        BeginPaint(hwnd, &mut ps);
    }
    ps
}

/// End a WM_PAINT cycle started by [`begin_paint`].
#[inline]
pub fn end_paint(hwnd: HWND, ps: &PAINTSTRUCT) {
    unsafe {
        let _ = EndPaint(hwnd, ps);
    }
}

/// Show a window topmost at the given bounds.
#[inline]
pub fn set_window_topmost(
    hwnd: HWND,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> windows::core::Result<()> {
    unsafe {
        SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            x,
            y,
            width,
            height,
            SWP_SHOWWINDOW,
        )?;
    }
    Ok(())
}

#[inline]
pub fn destroy_window(hwnd: HWND) -> windows::core::Result<()> {
    unsafe {
        DestroyWindow(hwnd)?;
    }
    Ok(())
}

#[inline]
pub fn quit_message_loop(exit_code: i32) {
    unsafe {
        PostQuitMessage(exit_code);
    }
}

#[inline]
pub fn run_message_loop() {
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, Some(HWND(std::ptr::null_mut())), 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[inline]
pub fn post_message(
    hwnd: HWND,
    msg: u32,
    wparam: usize,
    lparam: isize,
) -> windows::core::Result<()> {
    unsafe {
        PostMessageW(Some(hwnd), msg, WPARAM(wparam), LPARAM(lparam))?;
    }
    Ok(())
}

#[inline]
pub fn get_client_rect(hwnd: HWND) -> windows::core::Result<RECT> {
    let mut rect = RECT::default();
    unsafe {
        GetClientRect(hwnd, &mut rect)?;
    }
    Ok(rect)
}

/// Read the full text of a window (e.g. an EDIT control) as a Rust string.
pub fn get_window_text(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}

/// Convert a Rust string to a NUL-terminated UTF-16 buffer for Win32 APIs.
#[inline]
pub fn to_wide_chars(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(once(0)).collect()
}
