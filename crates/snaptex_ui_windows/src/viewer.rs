use std::ffi::c_void;

use snaptex_platform::WindowId;
use snaptex_platform_windows::win_api;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{DEFAULT_GUI_FONT, GetStockObject, HBRUSH};
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

const VIEWER_CLASS_NAME: &str = "SnaptexViewerWindow";

const VIEWER_WIDTH: i32 = 520;
const VIEWER_HEIGHT: i32 = 240;

const ID_COPY: usize = 1001;
const ID_CLOSE: usize = 1002;

/// Handle to an open viewer window.
#[derive(Debug, Clone, Copy)]
pub struct ViewerHandle {
    pub window: WindowId,
}

struct ViewerInit {
    text: String,
    on_copy: Box<dyn Fn(String)>,
    on_close: Option<Box<dyn FnOnce()>>,
}

struct ViewerState {
    edit: HWND,
    on_copy: Box<dyn Fn(String)>,
    on_close: Option<Box<dyn FnOnce()>>,
}

/// Open the result viewer: a small always-on-top tool window with an editable
/// text area and Copy/Close buttons.
///
/// `on_copy` receives the current (possibly user-edited) text-area contents
/// each time Copy is pressed; `on_close` fires once when the window goes away,
/// regardless of how it was dismissed.
pub fn open_viewer(
    screen_size: (i32, i32),
    title: &str,
    text: &str,
    on_copy: impl Fn(String) + 'static,
    on_close: impl FnOnce() + 'static,
) -> windows::core::Result<ViewerHandle> {
    let instance = win_api::get_module_handle()?;
    let class_name = win_api::to_wide_chars(VIEWER_CLASS_NAME);

    let window_class = WNDCLASSW {
        lpfnWndProc: Some(viewer_window_proc),
        hInstance: instance.into(),
        lpszClassName: PCWSTR(class_name.as_ptr()),
        hbrBackground: HBRUSH((COLOR_WINDOW.0 as usize + 1) as *mut c_void),
        hCursor: win_api::load_cursor(IDC_ARROW)?,
        style: CS_HREDRAW | CS_VREDRAW,
        ..Default::default()
    };
    // Re-registration on a second viewer is harmless; the class already exists.
    win_api::register_class(&window_class);

    let (screen_width, screen_height) = screen_size;
    let x = (screen_width - VIEWER_WIDTH).max(0) / 2;
    let y = (screen_height - VIEWER_HEIGHT).max(0) / 2;

    // Ownership of the init data moves into the window in WM_CREATE.
    let init = Box::into_raw(Box::new(ViewerInit {
        text: text.to_string(),
        on_copy: Box::new(on_copy),
        on_close: Some(Box::new(on_close)),
    }));

    let title_w = win_api::to_wide_chars(title);
    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
            PCWSTR(class_name.as_ptr()),
            PCWSTR(title_w.as_ptr()),
            WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_VISIBLE,
            x,
            y,
            VIEWER_WIDTH,
            VIEWER_HEIGHT,
            Some(HWND(std::ptr::null_mut())),
            Some(HMENU(std::ptr::null_mut())),
            Some(instance.into()),
            Some(init.cast::<c_void>() as *const c_void),
        )?
    };

    let _ = win_api::show_window(hwnd);
    let _ = win_api::update_window(hwnd);

    Ok(ViewerHandle {
        window: snaptex_platform_windows::window_id(hwnd),
    })
}

fn create_child(
    parent: HWND,
    class: PCWSTR,
    text: PCWSTR,
    style: WINDOW_STYLE,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    id: usize,
) -> windows::core::Result<HWND> {
    let instance = win_api::get_module_handle()?;
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            class,
            text,
            style,
            x,
            y,
            width,
            height,
            Some(parent),
            Some(HMENU(id as *mut c_void)),
            Some(instance.into()),
            None,
        )?
    };

    // Plain controls come up with the ugly system font by default.
    unsafe {
        let font = GetStockObject(DEFAULT_GUI_FONT);
        SendMessageW(
            hwnd,
            WM_SETFONT,
            Some(WPARAM(font.0 as usize)),
            Some(LPARAM(1)),
        );
    }
    Ok(hwnd)
}

unsafe extern "system" fn viewer_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
            let init = create_struct.lpCreateParams as *mut ViewerInit;
            if init.is_null() {
                return LRESULT(-1);
            }
            let init = unsafe { Box::from_raw(init) };

            let client = match win_api::get_client_rect(hwnd) {
                Ok(rect) => rect,
                Err(_) => return LRESULT(-1),
            };
            let width = client.right - client.left;
            let height = client.bottom - client.top;

            let text_w = win_api::to_wide_chars(&init.text);
            let edit_style = WINDOW_STYLE(
                WS_CHILD.0
                    | WS_VISIBLE.0
                    | WS_BORDER.0
                    | WS_VSCROLL.0
                    | ES_MULTILINE as u32
                    | ES_AUTOVSCROLL as u32,
            );
            let Ok(edit) = create_child(
                hwnd,
                windows::core::w!("EDIT"),
                PCWSTR(text_w.as_ptr()),
                edit_style,
                10,
                10,
                width - 20,
                height - 58,
                0,
            ) else {
                return LRESULT(-1);
            };

            let button_style = WINDOW_STYLE(WS_CHILD.0 | WS_VISIBLE.0 | BS_PUSHBUTTON as u32);
            let copy_ok = create_child(
                hwnd,
                windows::core::w!("BUTTON"),
                windows::core::w!("Copy"),
                button_style,
                width - 180,
                height - 40,
                80,
                30,
                ID_COPY,
            )
            .is_ok();
            let close_ok = create_child(
                hwnd,
                windows::core::w!("BUTTON"),
                windows::core::w!("Close"),
                button_style,
                width - 92,
                height - 40,
                80,
                30,
                ID_CLOSE,
            )
            .is_ok();
            if !copy_ok || !close_ok {
                return LRESULT(-1);
            }

            let state = Box::new(ViewerState {
                edit,
                on_copy: init.on_copy,
                on_close: init.on_close,
            });
            win_api::set_window_user_data(hwnd, Box::into_raw(state) as isize);
            LRESULT(0)
        }

        WM_COMMAND => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut ViewerState;
            if ptr.is_null() {
                return win_api::def_window_proc(hwnd, msg, wparam, lparam);
            }
            let state = unsafe { &mut *ptr };

            match wparam.0 & 0xFFFF {
                ID_COPY => {
                    let text = win_api::get_window_text(state.edit);
                    (state.on_copy)(text);
                    LRESULT(0)
                }
                ID_CLOSE => {
                    let _ = win_api::destroy_window(hwnd);
                    LRESULT(0)
                }
                _ => win_api::def_window_proc(hwnd, msg, wparam, lparam),
            }
        }

        WM_CLOSE => {
            let _ = win_api::destroy_window(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut ViewerState;
            win_api::set_window_user_data(hwnd, 0);
            if !ptr.is_null() {
                let mut state = unsafe { Box::from_raw(ptr) };
                if let Some(on_close) = state.on_close.take() {
                    on_close();
                }
            }
            LRESULT(0)
        }

        _ => win_api::def_window_proc(hwnd, msg, wparam, lparam),
    }
}
