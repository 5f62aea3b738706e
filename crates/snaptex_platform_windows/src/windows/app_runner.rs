use std::ffi::c_void;
use std::fmt;
use std::sync::mpsc;

use snaptex_platform::{WindowId, WindowMessageHandler};
use windows::Win32::UI::WindowsAndMessaging::{CREATESTRUCTW, IDC_CROSS, WM_APP, WNDCLASS_STYLES};

use crate::EventConverter;
use crate::win_api;
use crate::win32::{HWND, LPARAM, LRESULT, WM_CLOSE, WM_CREATE, WM_DESTROY, WM_PAINT, WM_SETCURSOR, WPARAM};

use super::message_box;
use super::system::get_screen_size;

const USER_EVENT_MESSAGE: u32 = WM_APP + 17;

/// Handle for delivering user events onto the window thread from anywhere.
pub struct UserEventSender<E> {
    /// Opaque window id (avoids `HWND` being !Send while still allowing
    /// PostMessage from any thread).
    window: WindowId,
    sender: mpsc::Sender<E>,
}

impl<E> Clone for UserEventSender<E> {
    fn clone(&self) -> Self {
        Self {
            window: self.window,
            sender: self.sender.clone(),
        }
    }
}

impl<E> UserEventSender<E> {
    pub fn send(&self, event: E) -> Result<(), mpsc::SendError<E>> {
        self.sender.send(event)?;
        let hwnd = super::hwnd(self.window);
        let _ = win_api::post_message(hwnd, USER_EVENT_MESSAGE, 0, 0);
        Ok(())
    }
}

struct CreateParams<F, E> {
    factory: Option<F>,
    user_events: Option<mpsc::Receiver<E>>,
    user_event_sender: mpsc::Sender<E>,
}

struct AppState<A, E> {
    app: A,
    user_events: mpsc::Receiver<E>,
}

/// Create a fullscreen topmost overlay window with a crosshair cursor, build
/// the app inside `WM_CREATE`, show the overlay, and run the message loop
/// until the overlay window is destroyed.
pub fn run_fullscreen_overlay_app<A, F, E>(
    window_class_name: &str,
    class_style: WNDCLASS_STYLES,
    create_app: F,
) -> windows::core::Result<()>
where
    A: WindowMessageHandler<WindowHandle = WindowId> + 'static,
    F: FnOnce(WindowId, (i32, i32), UserEventSender<A::UserEvent>) -> std::result::Result<A, E>,
    E: fmt::Display,
{
    let (width, height) = get_screen_size();

    run_overlay_app(
        window_class_name,
        width,
        height,
        class_style,
        |window, events| create_app(window, (width, height), events),
    )
}

fn run_overlay_app<A, F, E>(
    window_class_name: &str,
    width: i32,
    height: i32,
    class_style: WNDCLASS_STYLES,
    create_app: F,
) -> windows::core::Result<()>
where
    A: WindowMessageHandler<WindowHandle = WindowId> + 'static,
    F: FnOnce(WindowId, UserEventSender<A::UserEvent>) -> std::result::Result<A, E>,
    E: fmt::Display,
{
    let _ = win_api::set_process_per_monitor_dpi_aware();

    let (tx, rx) = mpsc::channel::<A::UserEvent>();

    let mut create_params = CreateParams {
        factory: Some(create_app),
        user_events: Some(rx),
        user_event_sender: tx,
    };

    let hwnd = win_api::create_hidden_toolwindow_with_params(
        window_class_name,
        window_proc::<A, F, E>,
        width,
        height,
        class_style,
        IDC_CROSS,
        Some(
            (&mut create_params as *mut CreateParams<F, A::UserEvent>).cast::<c_void>()
                as *const c_void,
        ),
    )?;

    // The overlay goes up immediately; the program is single-shot.
    win_api::set_window_topmost(hwnd, 0, 0, width, height)?;
    let _ = win_api::update_window(hwnd);

    win_api::run_message_loop();
    Ok(())
}

unsafe extern "system" fn window_proc<A, F, E>(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT
where
    A: WindowMessageHandler<WindowHandle = WindowId> + 'static,
    F: FnOnce(WindowId, UserEventSender<A::UserEvent>) -> std::result::Result<A, E>,
    E: fmt::Display,
{
    match msg {
        WM_CREATE => {
            let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
            let create_params = create_struct.lpCreateParams as *mut CreateParams<F, A::UserEvent>;

            if create_params.is_null() {
                return LRESULT(-1);
            }

            let Some(factory) = (unsafe { (&mut *create_params).factory.take() }) else {
                return LRESULT(-1);
            };
            let Some(user_events) = (unsafe { (&mut *create_params).user_events.take() }) else {
                return LRESULT(-1);
            };

            let event_sender = UserEventSender {
                window: super::window_id(hwnd),
                sender: unsafe { (&mut *create_params).user_event_sender.clone() },
            };

            match factory(super::window_id(hwnd), event_sender) {
                Ok(app) => {
                    let state = Box::new(AppState { app, user_events });
                    win_api::set_window_user_data(hwnd, Box::into_raw(state) as isize);
                    LRESULT(0)
                }
                Err(e) => {
                    let msg = format!("Application failed to initialize: {e}");
                    message_box::show_error(hwnd, "snaptex", &msg);
                    LRESULT(-1)
                }
            }
        }

        WM_DESTROY => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, A::UserEvent>;
            if !ptr.is_null() {
                let _ = unsafe { Box::from_raw(ptr) };
            }
            win_api::set_window_user_data(hwnd, 0);

            win_api::quit_message_loop(0);
            LRESULT(0)
        }

        val if val == USER_EVENT_MESSAGE => {
            // A handler may destroy the window (freeing the state) from
            // inside the callback, so the pointer must be re-read on every
            // iteration and the borrow must not outlive a single dispatch.
            loop {
                let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, A::UserEvent>;
                if ptr.is_null() {
                    break;
                }

                let state = unsafe { &mut *ptr };
                match state.user_events.try_recv() {
                    Ok(event) => {
                        let _ = state.app.handle_user_event(super::window_id(hwnd), event);
                    }
                    Err(_) => break,
                }
            }

            LRESULT(0)
        }

        WM_PAINT => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, A::UserEvent>;
            if ptr.is_null() {
                return win_api::def_window_proc(hwnd, msg, wparam, lparam);
            }

            let state = unsafe { &mut *ptr };

            // The runner owns the WM_PAINT cycle; the handler paints through
            // the BeginPaint DC so the update region applies.
            let ps = win_api::begin_paint(hwnd);
            let result = state
                .app
                .handle_paint(super::window_id(hwnd), ps.hdc.0 as usize)
                .unwrap_or(0);
            win_api::end_paint(hwnd, &ps);

            LRESULT(result)
        }

        WM_CLOSE => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, A::UserEvent>;
            if !ptr.is_null() {
                let state = unsafe { &mut *ptr };
                if let Some(result) = state.app.handle_close_requested(super::window_id(hwnd)) {
                    return LRESULT(result);
                }
            }

            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }

        // Keep the class crosshair cursor.
        WM_SETCURSOR => LRESULT(1),

        _ => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, A::UserEvent>;
            if !ptr.is_null() {
                let state = unsafe { &mut *ptr };
                let window = super::window_id(hwnd);

                if let Some(result) = state.app.handle_window_message(window, msg, wparam.0, lparam.0)
                {
                    return LRESULT(result);
                }

                if let Some(event) = EventConverter::convert(msg, wparam, lparam)
                    && let Some(result) = state.app.handle_input_event(window, event)
                {
                    return LRESULT(result);
                }
            }

            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }
    }
}
