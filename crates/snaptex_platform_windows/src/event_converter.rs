use snaptex_platform::{InputEvent, KeyCode, Modifiers, MouseButton};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, VK_CONTROL, VK_MENU, VK_SHIFT};
use windows::Win32::UI::WindowsAndMessaging::*;

#[inline]
fn current_modifiers() -> Modifiers {
    unsafe {
        Modifiers {
            ctrl: (GetKeyState(VK_CONTROL.0 as i32) as u16 & 0x8000) != 0,
            shift: (GetKeyState(VK_SHIFT.0 as i32) as u16 & 0x8000) != 0,
            alt: (GetKeyState(VK_MENU.0 as i32) as u16 & 0x8000) != 0,
        }
    }
}

/// Extract mouse coordinates from Win32 `LPARAM`.
#[inline]
fn extract_mouse_coords(lparam: LPARAM) -> (i32, i32) {
    let x = (lparam.0 as i16) as i32;
    let y = ((lparam.0 >> 16) as i16) as i32;
    (x, y)
}

/// Convert Win32 window messages to platform-agnostic [`InputEvent`].
pub struct EventConverter;

impl EventConverter {
    /// Returns `None` if the message is not an input event.
    pub fn convert(msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<InputEvent> {
        match msg {
            WM_MOUSEMOVE => {
                let (x, y) = extract_mouse_coords(lparam);
                Some(InputEvent::MouseMove { x, y })
            }

            WM_LBUTTONDOWN => {
                let (x, y) = extract_mouse_coords(lparam);
                Some(InputEvent::MouseDown {
                    x,
                    y,
                    button: MouseButton::Left,
                })
            }

            WM_LBUTTONUP => {
                let (x, y) = extract_mouse_coords(lparam);
                Some(InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButton::Left,
                })
            }

            WM_RBUTTONDOWN => {
                let (x, y) = extract_mouse_coords(lparam);
                Some(InputEvent::MouseDown {
                    x,
                    y,
                    button: MouseButton::Right,
                })
            }

            WM_RBUTTONUP => {
                let (x, y) = extract_mouse_coords(lparam);
                Some(InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButton::Right,
                })
            }

            WM_KEYDOWN => {
                let key = KeyCode(wparam.0 as u32);
                let modifiers = current_modifiers();
                Some(InputEvent::KeyDown { key, modifiers })
            }

            WM_KEYUP => {
                let key = KeyCode(wparam.0 as u32);
                let modifiers = current_modifiers();
                Some(InputEvent::KeyUp { key, modifiers })
            }

            _ => None,
        }
    }
}
