// src/gesture.rs

//! The pointer-event state machine that disambiguates a click-to-paint
//! gesture from a drag-to-pan gesture.
//!
//! A gesture is only classified in retrospect: painting feedback starts on
//! press, but the paint is committed only if the pointer is released without
//! the gesture ever reaching `Dragging`.

use crate::mapper::ViewTransform;
use log::debug;

/// Pointer buttons as reported by the host. Only `Left` starts a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

/// Pointer events delivered by the host view.
///
/// Coordinates are in screen pixels, in the same space as the canvas origin
/// passed to the orchestrator. `Leave` must be delivered when the pointer
/// exits the surface; it behaves exactly like `Release`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f64, y: f64, button: PointerButton },
    Move { x: f64, y: f64 },
    Release { x: f64, y: f64 },
    Leave { x: f64, y: f64 },
}

/// The classification state of the current pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Button is down; displacement has stayed under the drag threshold.
    PotentialDrag,
    /// Displacement exceeded the threshold; the view pans with the pointer.
    Dragging,
}

/// How a pointer sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    /// Released without ever dragging; the paint candidate may be committed.
    Click,
    /// The gesture was a pan; any paint candidate must be discarded.
    Pan,
}

/// Position and pan offset captured at press time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: (f64, f64),
    pan: (f64, f64),
}

/// Explicit-state gesture controller.
///
/// Holds no rendering or surface reference so the state machine is
/// deterministically testable on its own. The view transform is borrowed per
/// transition; pan is the only field this controller ever writes.
#[derive(Debug, Default)]
pub struct GestureController {
    phase: GesturePhase,
    anchor: Option<DragAnchor>,
    threshold_px: f64,
}

impl GestureController {
    pub fn new(threshold_px: f64) -> Self {
        GestureController {
            phase: GesturePhase::Idle,
            anchor: None,
            threshold_px,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Pointer-down: capture the pointer position and the committed pan
    /// offset as the drag anchor and enter `PotentialDrag`.
    pub fn press(&mut self, pointer: (f64, f64), transform: &ViewTransform) {
        self.anchor = Some(DragAnchor {
            pointer,
            pan: transform.pan,
        });
        self.phase = GesturePhase::PotentialDrag;
        debug!("gesture: press at {:?}, anchor pan {:?}", pointer, transform.pan);
    }

    /// Pointer-move: compute the candidate pan from the anchor displacement.
    ///
    /// Once the Euclidean distance from the last-committed pan exceeds the
    /// threshold the gesture becomes `Dragging` and the pan is committed
    /// continuously. Below the threshold nothing moves, so a slightly jittery
    /// click cannot pan the view. Returns `true` when the pan was updated.
    pub fn motion(&mut self, pointer: (f64, f64), transform: &mut ViewTransform) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };

        let candidate = (
            anchor.pan.0 + (pointer.0 - anchor.pointer.0),
            anchor.pan.1 + (pointer.1 - anchor.pointer.1),
        );

        match self.phase {
            GesturePhase::Dragging => {
                transform.pan = candidate;
                true
            }
            GesturePhase::PotentialDrag => {
                let dx = candidate.0 - transform.pan.0;
                let dy = candidate.1 - transform.pan.1;
                if (dx * dx + dy * dy).sqrt() > self.threshold_px {
                    debug!("gesture: threshold crossed, panning");
                    self.phase = GesturePhase::Dragging;
                    transform.pan = candidate;
                    true
                } else {
                    false
                }
            }
            GesturePhase::Idle => false,
        }
    }

    /// Pointer-up: classify the finished sequence, reset to `Idle` and clear
    /// the anchor. Returns `None` when no gesture was in progress.
    pub fn release(&mut self) -> Option<GestureEnd> {
        let end = match (self.phase, self.anchor) {
            (GesturePhase::Dragging, _) => Some(GestureEnd::Pan),
            (GesturePhase::PotentialDrag, Some(_)) => Some(GestureEnd::Click),
            _ => None,
        };
        self.phase = GesturePhase::Idle;
        self.anchor = None;
        if let Some(end) = end {
            debug!("gesture: ended as {:?}", end);
        }
        end
    }

    /// Pointer-leave: identical to `release`, so a gesture can never stay
    /// stuck in `Dragging` after the pointer exits the surface.
    pub fn leave(&mut self) -> Option<GestureEnd> {
        self.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (GestureController, ViewTransform) {
        (GestureController::new(2.0), ViewTransform::new(1.0))
    }

    #[test]
    fn press_release_without_motion_is_a_click() {
        let (mut g, mut t) = controller();
        g.press((10.0, 10.0), &t);
        assert_eq!(g.phase(), GesturePhase::PotentialDrag);
        assert!(!g.motion((10.5, 10.5), &mut t));
        assert_eq!(g.release(), Some(GestureEnd::Click));
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert_eq!(t.pan, (0.0, 0.0));
    }

    #[test]
    fn jitter_below_threshold_does_not_pan() {
        let (mut g, mut t) = controller();
        g.press((10.0, 10.0), &t);
        assert!(!g.motion((11.0, 11.0), &mut t));
        assert_eq!(g.phase(), GesturePhase::PotentialDrag);
        assert_eq!(t.pan, (0.0, 0.0));
    }

    #[test]
    fn crossing_the_threshold_pans_by_net_displacement() {
        let (mut g, mut t) = controller();
        g.press((10.0, 10.0), &t);
        assert!(g.motion((20.0, 10.0), &mut t));
        assert_eq!(g.phase(), GesturePhase::Dragging);
        assert_eq!(t.pan, (10.0, 0.0));
        // Further motion keeps tracking, even back under the threshold.
        assert!(g.motion((11.0, 10.0), &mut t));
        assert_eq!(t.pan, (1.0, 0.0));
        assert_eq!(g.release(), Some(GestureEnd::Pan));
        assert_eq!(t.pan, (1.0, 0.0));
    }

    #[test]
    fn drag_resumes_from_committed_pan() {
        let (mut g, mut t) = controller();
        g.press((0.0, 0.0), &t);
        g.motion((10.0, 0.0), &mut t);
        g.release();
        assert_eq!(t.pan, (10.0, 0.0));

        // A second drag anchors at the committed pan, not at zero.
        g.press((5.0, 5.0), &t);
        g.motion((5.0, 15.0), &mut t);
        assert_eq!(t.pan, (10.0, 10.0));
    }

    #[test]
    fn leave_behaves_like_release() {
        let (mut g, mut t) = controller();
        g.press((0.0, 0.0), &t);
        g.motion((30.0, 0.0), &mut t);
        assert_eq!(g.leave(), Some(GestureEnd::Pan));
        assert_eq!(g.phase(), GesturePhase::Idle);

        g.press((0.0, 0.0), &t);
        assert_eq!(g.leave(), Some(GestureEnd::Click));
    }

    #[test]
    fn motion_and_release_without_press_are_noops() {
        let (mut g, mut t) = controller();
        assert!(!g.motion((100.0, 100.0), &mut t));
        assert_eq!(g.release(), None);
        assert_eq!(t.pan, (0.0, 0.0));
    }
}
