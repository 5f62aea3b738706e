use snaptex_app::{Action, AppModel, Effect, JobId, RectI32, selection};
use snaptex_mathpix::MathpixClient;
use snaptex_platform::{
    HostPlatform, InputEvent, KeyCode, MouseButton, WindowId, WindowMessageHandler,
};
use snaptex_platform_windows::windows::{
    ScreenBackground, UserEventSender, capture_screen_region, paint_overlay,
};
use snaptex_ui_windows::{ViewerHandle, open_viewer};
use tracing::{debug, error, warn};

use crate::HostEvent;
use crate::constants::{VIEWER_TITLE, VIEWER_TITLE_FAILED};
use crate::error::{AppError, AppResult};

/// One-shot latch for the overlay close request.
///
/// The overlay is never torn down with `DestroyWindow` from inside a message
/// handler: `WM_DESTROY` re-enters the window procedure and frees the app
/// state while the handler still borrows it. Shutdown instead posts a
/// `WM_CLOSE` and lets the default window procedure destroy the overlay on a
/// later message-loop iteration. The latch makes sure only the first quit
/// posts it and that a close request arriving afterwards does no extra work.
#[derive(Debug, Default)]
struct CloseLatch {
    closing: bool,
}

impl CloseLatch {
    /// Arm the latch. Returns true exactly once.
    fn arm(&mut self) -> bool {
        !std::mem::replace(&mut self.closing, true)
    }
}

/// Application host.
///
/// Owns the pure core model plus everything effectful: the platform services
/// boundary, the frozen screen snapshot the overlay paints, the recognition
/// client, and the async runtime the recognition task runs on.
pub struct App {
    /// Core state/actions/effects (platform-neutral).
    core: AppModel,

    /// Host-facing platform side effects (window ops, clipboard).
    host_platform: Box<dyn HostPlatform<WindowHandle = WindowId>>,

    /// Delivers background-task and viewer events onto the overlay thread.
    events: UserEventSender<HostEvent>,

    /// The fullscreen overlay window.
    overlay: WindowId,
    /// Screen snapshot taken at startup; painted as the overlay background so
    /// the screen appears frozen while the user drags.
    background: ScreenBackground,
    /// The result viewer, once recognition has completed.
    viewer: Option<ViewerHandle>,

    client: MathpixClient,
    runtime: tokio::runtime::Runtime,

    /// Cached screen size (width, height).
    screen_size: (i32, i32),

    close_latch: CloseLatch,
}

impl App {
    pub fn new(
        overlay: WindowId,
        screen_size: (i32, i32),
        events: UserEventSender<HostEvent>,
        host_platform: Box<dyn HostPlatform<WindowHandle = WindowId>>,
        client: MathpixClient,
    ) -> AppResult<Self> {
        let (width, height) = screen_size;
        let background = ScreenBackground::snapshot(width, height)
            .map_err(|e| AppError::Init(format!("screen snapshot failed: {e}")))?;

        // One worker is plenty; there is at most one recognition in flight.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| AppError::Init(format!("async runtime failed: {e}")))?;

        Ok(Self {
            core: AppModel::new(),
            host_platform,
            events,
            overlay,
            background,
            viewer: None,
            client,
            runtime,
            screen_size,
            close_latch: CloseLatch::default(),
        })
    }

    fn dispatch(&mut self, action: Action) {
        for effect in self.core.reduce(action) {
            if let Err(e) = self.execute(effect) {
                error!("effect failed: {e}");
            }
        }
    }

    fn execute(&mut self, effect: Effect) -> AppResult<()> {
        match effect {
            Effect::RedrawOverlay => self.host_platform.request_redraw(self.overlay)?,
            Effect::HideOverlay => self.host_platform.hide_window(self.overlay)?,
            Effect::CaptureAndRecognize { selection, job } => {
                self.start_recognition(selection, job)?;
            }
            Effect::ShowViewer { text, failed } => self.show_viewer(text, failed)?,
            Effect::CopyTextToClipboard { text } => {
                self.host_platform.copy_text_to_clipboard(&text)?;
            }
            Effect::Quit => self.quit(),
        }
        Ok(())
    }

    /// Grab the selected region from the live screen and hand it to the
    /// recognition task.
    ///
    /// Runs after the overlay has been hidden, so the grab sees what is
    /// actually on screen rather than the frozen snapshot.
    fn start_recognition(&mut self, selection: RectI32, job: JobId) -> AppResult<()> {
        let image = capture_screen_region(
            selection.left,
            selection.top,
            selection.width(),
            selection.height(),
        )?;

        debug!(
            ?job,
            width = image.width(),
            height = image.height(),
            "starting recognition"
        );

        let client = self.client.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let (text, failed) = match client.recognize(&image).await {
                Ok(text) => (text, false),
                Err(e) => {
                    warn!("recognition failed: {e:#}");
                    (String::new(), true)
                }
            };
            // Send failure means the overlay thread is gone; nothing to do.
            let _ = events.send(HostEvent::RecognitionFinished { job, text, failed });
        });

        Ok(())
    }

    fn show_viewer(&mut self, text: String, failed: bool) -> AppResult<()> {
        let title = if failed {
            warn!("recognition failed; opening the viewer with an empty result");
            VIEWER_TITLE_FAILED
        } else {
            VIEWER_TITLE
        };

        let copy_events = self.events.clone();
        let close_events = self.events.clone();
        let handle = open_viewer(
            self.screen_size,
            title,
            &text,
            move |text| {
                let _ = copy_events.send(HostEvent::ViewerCopy { text });
            },
            move || {
                let _ = close_events.send(HostEvent::ViewerClosed);
            },
        )
        .map_err(|e| AppError::Viewer(format!("{e:?}")))?;

        self.viewer = Some(handle);
        Ok(())
    }

    fn quit(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            // Already gone if the user closed it; the error is expected then.
            let _ = self.host_platform.destroy_window(viewer.window);
        }
        // The overlay must outlive the current handler frame; request a
        // close and let the default window procedure destroy it. Destroying
        // the overlay ends the message loop.
        if self.close_latch.arm() {
            let _ = self.host_platform.request_close(self.overlay);
        }
    }
}

impl WindowMessageHandler for App {
    type WindowHandle = WindowId;
    type UserEvent = HostEvent;

    fn handle_input_event(&mut self, _window: WindowId, event: InputEvent) -> Option<isize> {
        let action = match event {
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => Action::Selection(selection::Action::MouseDown { x, y }),
            InputEvent::MouseMove { x, y } => {
                Action::Selection(selection::Action::MouseMove { x, y })
            }
            InputEvent::MouseUp {
                x,
                y,
                button: MouseButton::Left,
            } => Action::Selection(selection::Action::MouseUp { x, y }),
            InputEvent::KeyDown {
                key: KeyCode::ESCAPE,
                ..
            } => Action::Cancel,
            _ => return None,
        };

        self.dispatch(action);
        Some(0)
    }

    fn handle_user_event(&mut self, _window: WindowId, event: HostEvent) -> Option<isize> {
        match event {
            HostEvent::RecognitionFinished { job, text, failed } => {
                self.dispatch(Action::RecognitionFinished { job, text, failed });
            }
            HostEvent::ViewerCopy { text } => self.dispatch(Action::CopyResult { text }),
            HostEvent::ViewerClosed => self.dispatch(Action::CloseViewer),
        }
        Some(0)
    }

    fn handle_window_message(
        &mut self,
        _window: WindowId,
        _msg: u32,
        _wparam: usize,
        _lparam: isize,
    ) -> Option<isize> {
        None
    }

    fn handle_paint(&mut self, _window: WindowId, surface: usize) -> Option<isize> {
        let outline = self
            .core
            .selection()
            .outline()
            .map(|r| (r.left, r.top, r.right, r.bottom));
        paint_overlay(surface, &self.background, outline);
        Some(0)
    }

    fn handle_close_requested(&mut self, _window: WindowId) -> Option<isize> {
        // An external close (e.g. Alt+F4) abandons any in-flight job first.
        // With the latch armed, `quit` does not post a second close.
        if self.close_latch.arm() {
            self.dispatch(Action::Cancel);
        }
        // Fall through to the default procedure, which destroys the overlay
        // after this handler's borrow of the app state has ended.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::CloseLatch;

    #[test]
    fn close_latch_arms_exactly_once() {
        let mut latch = CloseLatch::default();
        assert!(latch.arm());
        assert!(!latch.arm());
        assert!(!latch.arm());
    }

    #[test]
    fn close_request_after_quit_does_no_further_work() {
        // Quit arms the latch and posts the close; when the close request
        // comes back around, arming again must report already-armed so the
        // handler neither cancels again nor posts another close.
        let mut latch = CloseLatch::default();
        let posted = latch.arm();
        assert!(posted);

        let cancel_on_close = latch.arm();
        assert!(!cancel_on_close);
    }
}
