//! Per-pointer drag session state.
//!
//! One session per active pointer ID, held in an explicit registry by the
//! controller. Sessions for distinct pointers are fully isolated: nothing
//! here is shared. A session is created when a press first moves past the
//! dead zone and destroyed when the pointer lifts or the interaction
//! context is lost.

use serde::{Deserialize, Serialize};

use crate::core::{PointerId, ProxyId, Vec2};

/// Displacement below which a press-release resolves as a click, not a
/// drag.
pub const DEAD_ZONE: f32 = 4.0;

/// Lifecycle phase of a drag session. `End` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Begin,
    Drag,
    End,
}

/// Which button a pointer represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    /// Secondary-button drags bypass movement and run the secondary
    /// action (rotate) instead.
    Secondary,
}

/// State for one pointer's interaction with one card proxy.
#[derive(Clone, Debug)]
pub struct DragSession {
    /// Owning pointer.
    pub pointer: PointerId,
    /// Button the gesture started with.
    pub button: PointerButton,
    /// The proxy the pointer pressed on.
    pub origin: ProxyId,
    /// The proxy being moved: `origin` itself, or its clone when
    /// clone-on-drag is active.
    pub subject: ProxyId,
    /// Subject position minus pointer position at grab time.
    pub grab_offset: Vec2,
    /// Where the press happened, for dead-zone checks.
    pub press_position: Vec2,
    /// Latest pointer position seen.
    pub last_position: Vec2,
    /// Current phase.
    pub phase: DragPhase,
    /// Is the subject a transient clone?
    pub is_clone: bool,
}

impl DragSession {
    /// Begin a session for a pointer grabbing a subject.
    #[must_use]
    pub fn begin(
        pointer: PointerId,
        button: PointerButton,
        origin: ProxyId,
        subject: ProxyId,
        subject_position: Vec2,
        press_position: Vec2,
    ) -> Self {
        Self {
            pointer,
            button,
            origin,
            subject,
            grab_offset: subject_position - press_position,
            press_position,
            last_position: press_position,
            phase: DragPhase::Begin,
            is_clone: origin != subject,
        }
    }

    /// Record a pointer move and advance to the Drag phase.
    pub fn update(&mut self, position: Vec2) {
        self.last_position = position;
        if self.phase == DragPhase::Begin {
            self.phase = DragPhase::Drag;
        }
    }

    /// Where the subject should sit for the latest pointer position.
    #[must_use]
    pub fn target_position(&self) -> Vec2 {
        self.last_position + self.grab_offset
    }

    /// Total displacement since the press.
    #[must_use]
    pub fn displacement(&self) -> f32 {
        self.press_position.distance(self.last_position)
    }
}
