/// Platform-neutral integer rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Construct a normalized rectangle from two corner points.
    ///
    /// The result satisfies `left <= right` and `top <= bottom` regardless of
    /// drag direction. Coincident points yield a legal zero-area rectangle.
    #[inline]
    pub fn from_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    /// True if the rectangle encloses no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Selection phase.
///
/// `Dragging` keeps the raw anchor and free corner; normalization happens on
/// release so the outline can track the pointer in any direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Dragging {
        anchor: (i32, i32),
        current: (i32, i32),
    },
    Captured {
        selection: RectI32,
    },
}

/// Input actions (pure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Mouse down on the overlay. Records the anchor corner.
    MouseDown { x: i32, y: i32 },
    /// Mouse move. Updates the free corner while dragging.
    MouseMove { x: i32, y: i32 },
    /// Mouse up. Finalizes and normalizes the selection rectangle.
    MouseUp { x: i32, y: i32 },
    /// Host reset back to idle.
    Reset,
}

/// Effects requested by the selection model (executed by the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Repaint the overlay so the outline tracks the pointer.
    Redraw,
    /// Hide the overlay window.
    ///
    /// Always emitted before `Capture` so the overlay (and its outline) can
    /// never appear in the captured pixels.
    HideOverlay,
    /// Grab the screen pixels bounded by the normalized selection.
    Capture { selection: RectI32 },
}

/// Selection state machine model.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
}

impl Model {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Rectangle outline to draw on the overlay, if any.
    ///
    /// While dragging this is the normalized rectangle between the anchor and
    /// the current pointer position.
    pub fn outline(&self) -> Option<RectI32> {
        match self.phase {
            Phase::Idle => None,
            Phase::Dragging {
                anchor: (ax, ay),
                current: (cx, cy),
            } => Some(RectI32::from_points(ax, ay, cx, cy)),
            Phase::Captured { selection } => Some(selection),
        }
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::MouseDown { x, y } => {
                // Only meaningful while idle; a second press during an active
                // drag is ignored (single button gesture).
                if let Phase::Idle = self.phase {
                    self.phase = Phase::Dragging {
                        anchor: (x, y),
                        current: (x, y),
                    };
                    return vec![Effect::Redraw];
                }
                Vec::new()
            }

            Action::MouseMove { x, y } => {
                if let Phase::Dragging { anchor, .. } = self.phase {
                    self.phase = Phase::Dragging {
                        anchor,
                        current: (x, y),
                    };
                    return vec![Effect::Redraw];
                }
                Vec::new()
            }

            Action::MouseUp { x, y } => {
                let Phase::Dragging {
                    anchor: (ax, ay), ..
                } = self.phase
                else {
                    return Vec::new();
                };

                // A release at the press point is a legal zero-area selection,
                // not an error.
                let selection = RectI32::from_points(ax, ay, x, y);
                self.phase = Phase::Captured { selection };

                vec![Effect::HideOverlay, Effect::Capture { selection }]
            }

            Action::Reset => {
                self.phase = Phase::Idle;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Effect, Model, Phase, RectI32};

    #[test]
    fn from_points_normalizes_all_drag_directions() {
        let expected = RectI32 {
            left: 10,
            top: 20,
            right: 110,
            bottom: 220,
        };

        assert_eq!(RectI32::from_points(10, 20, 110, 220), expected);
        assert_eq!(RectI32::from_points(110, 220, 10, 20), expected);
        assert_eq!(RectI32::from_points(10, 220, 110, 20), expected);
        assert_eq!(RectI32::from_points(110, 20, 10, 220), expected);
    }

    #[test]
    fn drag_updates_outline_and_requests_redraw() {
        let mut m = Model::default();

        let eff = m.reduce(Action::MouseDown { x: 50, y: 60 });
        assert_eq!(eff, vec![Effect::Redraw]);
        assert_eq!(m.outline(), Some(RectI32::from_points(50, 60, 50, 60)));

        let eff = m.reduce(Action::MouseMove { x: 20, y: 90 });
        assert_eq!(eff, vec![Effect::Redraw]);
        assert_eq!(
            m.outline(),
            Some(RectI32 {
                left: 20,
                top: 60,
                right: 50,
                bottom: 90,
            })
        );
    }

    #[test]
    fn release_hides_overlay_before_capture() {
        let mut m = Model::default();
        m.reduce(Action::MouseDown { x: 0, y: 0 });
        m.reduce(Action::MouseMove { x: 200, y: 100 });

        let eff = m.reduce(Action::MouseUp { x: 200, y: 100 });

        let selection = RectI32 {
            left: 0,
            top: 0,
            right: 200,
            bottom: 100,
        };
        // The overlay must be gone before the pixel grab runs, otherwise the
        // outline captures itself.
        assert_eq!(eff, vec![Effect::HideOverlay, Effect::Capture { selection }]);
        assert_eq!(m.phase(), &Phase::Captured { selection });
    }

    #[test]
    fn click_without_drag_is_a_legal_zero_area_capture() {
        let mut m = Model::default();
        m.reduce(Action::MouseDown { x: 33, y: 44 });
        let eff = m.reduce(Action::MouseUp { x: 33, y: 44 });

        let selection = RectI32 {
            left: 33,
            top: 44,
            right: 33,
            bottom: 44,
        };
        assert!(selection.is_empty());
        assert_eq!(eff, vec![Effect::HideOverlay, Effect::Capture { selection }]);
    }

    #[test]
    fn move_and_release_without_press_are_ignored() {
        let mut m = Model::default();
        assert!(m.reduce(Action::MouseMove { x: 5, y: 5 }).is_empty());
        assert!(m.reduce(Action::MouseUp { x: 5, y: 5 }).is_empty());
        assert_eq!(m.phase(), &Phase::Idle);
        assert_eq!(m.outline(), None);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut m = Model::default();
        m.reduce(Action::MouseDown { x: 0, y: 0 });
        m.reduce(Action::Reset);
        assert_eq!(m.phase(), &Phase::Idle);
    }
}
