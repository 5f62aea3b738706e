pub mod ocr;
pub mod selection;

pub use ocr::JobId;
pub use selection::RectI32;

/// Top-level application actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Selection(selection::Action),
    /// A recognition job finished (delivered from the background task).
    RecognitionFinished {
        job: JobId,
        text: String,
        failed: bool,
    },
    /// User pressed Copy in the viewer; `text` is the current (possibly
    /// user-edited) viewer contents.
    CopyResult { text: String },
    /// User closed the viewer window.
    CloseViewer,
    /// Cancel the current flow (e.g. ESC on the overlay).
    Cancel,
}

/// Top-level application effects (executed by the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Repaint the overlay.
    RedrawOverlay,
    /// Hide the overlay window. Ordered before any capture effect.
    HideOverlay,
    /// Grab the selected screen region and start recognition job `job` on it.
    CaptureAndRecognize {
        selection: RectI32,
        job: JobId,
    },
    /// Open the result viewer with the recognized text (may be empty).
    ShowViewer { text: String, failed: bool },
    /// Copy text to the system clipboard.
    CopyTextToClipboard { text: String },
    /// Tear down windows and exit the event loop.
    Quit,
}

/// Core app model.
///
/// Control flow is single-shot: overlay selection feeds one capture, one
/// recognition job, one viewer.
#[derive(Debug, Default)]
pub struct AppModel {
    selection: selection::Model,
    ocr: ocr::Model,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &selection::Model {
        &self.selection
    }

    pub fn ocr(&self) -> &ocr::Model {
        &self.ocr
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Selection(action) => {
                let effects = self.selection.reduce(action);
                effects
                    .into_iter()
                    .map(|effect| match effect {
                        selection::Effect::Redraw => Effect::RedrawOverlay,
                        selection::Effect::HideOverlay => Effect::HideOverlay,
                        selection::Effect::Capture { selection } => {
                            let job = self.ocr.start();
                            Effect::CaptureAndRecognize { selection, job }
                        }
                    })
                    .collect()
            }

            Action::RecognitionFinished { job, text, failed } => {
                // Stale completions (cancelled or superseded jobs) are dropped.
                if !self.ocr.finish(job) {
                    return Vec::new();
                }
                vec![Effect::ShowViewer { text, failed }]
            }

            Action::CopyResult { text } => vec![Effect::CopyTextToClipboard { text }],

            Action::CloseViewer => vec![Effect::Quit],

            Action::Cancel => {
                let _ = self.selection.reduce(selection::Action::Reset);
                self.ocr.cancel();
                vec![Effect::HideOverlay, Effect::Quit]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, AppModel, Effect, RectI32, selection};

    fn drive_selection(m: &mut AppModel, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<Effect> {
        m.reduce(Action::Selection(selection::Action::MouseDown { x: x1, y: y1 }));
        m.reduce(Action::Selection(selection::Action::MouseMove { x: x2, y: y2 }));
        m.reduce(Action::Selection(selection::Action::MouseUp { x: x2, y: y2 }))
    }

    #[test]
    fn release_starts_recognition_after_hiding_overlay() {
        let mut m = AppModel::new();
        let eff = drive_selection(&mut m, 300, 40, 100, 90);

        assert_eq!(eff.len(), 2);
        assert_eq!(eff[0], Effect::HideOverlay);
        match &eff[1] {
            Effect::CaptureAndRecognize { selection, .. } => {
                assert_eq!(
                    *selection,
                    RectI32 {
                        left: 100,
                        top: 40,
                        right: 300,
                        bottom: 90,
                    }
                );
            }
            other => panic!("expected capture effect, got {other:?}"),
        }
        assert!(m.ocr().is_running());
    }

    #[test]
    fn completion_opens_viewer_exactly_once() {
        let mut m = AppModel::new();
        let eff = drive_selection(&mut m, 0, 0, 10, 10);
        let job = match eff[1] {
            Effect::CaptureAndRecognize { job, .. } => job,
            _ => panic!("expected capture effect"),
        };

        let eff = m.reduce(Action::RecognitionFinished {
            job,
            text: "x^2+y^2=z^2".to_string(),
            failed: false,
        });
        assert_eq!(
            eff,
            vec![Effect::ShowViewer {
                text: "x^2+y^2=z^2".to_string(),
                failed: false,
            }]
        );
        assert!(!m.ocr().is_running());

        // A duplicate completion is stale.
        let eff = m.reduce(Action::RecognitionFinished {
            job,
            text: "x^2+y^2=z^2".to_string(),
            failed: false,
        });
        assert!(eff.is_empty());
    }

    #[test]
    fn zero_area_selection_still_reaches_the_viewer() {
        let mut m = AppModel::new();
        m.reduce(Action::Selection(selection::Action::MouseDown { x: 7, y: 7 }));
        let eff = m.reduce(Action::Selection(selection::Action::MouseUp { x: 7, y: 7 }));

        let job = match eff[1] {
            Effect::CaptureAndRecognize { selection, job } => {
                assert!(selection.is_empty());
                job
            }
            _ => panic!("expected capture effect"),
        };

        let eff = m.reduce(Action::RecognitionFinished {
            job,
            text: String::new(),
            failed: false,
        });
        assert_eq!(
            eff,
            vec![Effect::ShowViewer {
                text: String::new(),
                failed: false,
            }]
        );
    }

    #[test]
    fn cancel_drops_inflight_completion() {
        let mut m = AppModel::new();
        let eff = drive_selection(&mut m, 0, 0, 50, 50);
        let job = match eff[1] {
            Effect::CaptureAndRecognize { job, .. } => job,
            _ => panic!("expected capture effect"),
        };

        let eff = m.reduce(Action::Cancel);
        assert_eq!(eff, vec![Effect::HideOverlay, Effect::Quit]);

        let eff = m.reduce(Action::RecognitionFinished {
            job,
            text: "late".to_string(),
            failed: false,
        });
        assert!(eff.is_empty());
    }

    #[test]
    fn copy_passes_viewer_text_through_verbatim() {
        let mut m = AppModel::new();
        let eff = m.reduce(Action::CopyResult {
            text: "\\frac{a}{b}".to_string(),
        });
        assert_eq!(
            eff,
            vec![Effect::CopyTextToClipboard {
                text: "\\frac{a}{b}".to_string(),
            }]
        );
    }

    #[test]
    fn closing_viewer_quits() {
        let mut m = AppModel::new();
        assert_eq!(m.reduce(Action::CloseViewer), vec![Effect::Quit]);
    }
}
