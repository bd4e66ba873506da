//! Placeholder slots: transient reflow markers for in-flight drags.
//!
//! While a card is being dragged out of (or hovered over) a container, a
//! placeholder reserves the slot it would dock into, so the container can
//! animate the gap. A placeholder exists only while its originating drag
//! or docking motion is in flight; session end, docking, and cancellation
//! all destroy it. It is never replicated.

use crate::core::{ContainerId, Vec2};

/// A reserved docking slot in a container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placeholder {
    /// The container that owns the gap.
    pub container: ContainerId,
    /// Sibling index the card would dock at.
    pub index: usize,
    /// Canvas position the card animates toward when docking.
    pub position: Vec2,
    /// Size hint for the gap, the dragged card's footprint.
    pub size: Vec2,
}

impl Placeholder {
    /// Reserve a slot in `container` at `index`.
    #[must_use]
    pub fn new(container: ContainerId, index: usize, position: Vec2, size: Vec2) -> Self {
        Self {
            container,
            index,
            position,
            size,
        }
    }
}
