//! Docking motion: a released card travels to its placeholder over ticks.
//!
//! The original gesture ends when the pointer lifts, but the card still has
//! to reach its reserved slot. That travel is explicit multi-tick state
//! advanced by the tick driver; each tick moves the card a bounded step and
//! re-checks completion. Nothing blocks or waits.

use rustc_hash::FxHashMap;

use crate::container::CardContainer;
use crate::core::{ContainerId, ProxyId};

use super::proxy::CardProxy;

/// Card travel speed while docking, canvas units per second.
pub const DOCKING_SPEED: f32 = 600.0;

/// Ticks per second assumed by the tick driver.
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Distance at which the card is considered to have arrived.
const ARRIVE_EPSILON: f32 = 1.0;

/// One in-flight docking travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DockingMotion {
    pub proxy: ProxyId,
}

/// Result of advancing a motion by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionStatus {
    /// Still traveling.
    InFlight,
    /// Arrived and docked into the container at `index`.
    Docked {
        container: ContainerId,
        index: usize,
    },
    /// The placeholder or its container vanished mid-flight; the subject
    /// must be destroyed rather than left orphaned.
    Lost,
}

/// Advance one docking motion by one bounded step.
///
/// On arrival the card docks: it is inserted at the placeholder's index
/// (the container's `Added` hook fires), the placeholder is destroyed, and
/// rotation resets.
pub fn advance(
    proxy: &mut CardProxy,
    containers: &mut FxHashMap<ContainerId, CardContainer>,
    step: f32,
) -> MotionStatus {
    let Some(placeholder) = proxy.placeholder else {
        return MotionStatus::Lost;
    };
    let Some(container) = containers.get_mut(&placeholder.container) else {
        return MotionStatus::Lost;
    };

    proxy.position = proxy.position.move_toward(placeholder.position, step);
    if proxy.position.distance(placeholder.position) > ARRIVE_EPSILON {
        return MotionStatus::InFlight;
    }

    let index = placeholder.index.min(container.len());
    container.add(proxy.card.clone(), Some(index));
    proxy.container = Some(placeholder.container);
    proxy.placeholder = None;
    proxy.rotation_deg = 0.0;
    proxy.position = placeholder.position;

    MotionStatus::Docked {
        container: placeholder.container,
        index,
    }
}

/// Per-tick travel step.
#[must_use]
pub fn step_per_tick() -> f32 {
    DOCKING_SPEED / TICKS_PER_SECOND
}
