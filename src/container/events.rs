//! Container mutation events, the add/remove hook stream.
//!
//! Every logical mutation of a container emits exactly one event, whether
//! it came from local interaction or from a replicated canonical update.
//! The view layer drains these once per tick to update counts and visuals;
//! it never drives core logic from them.
//!
//! A card move between containers is observed as `Removed` from the old
//! container strictly before `Added` to the new one.

use crate::core::{Card, ContainerId};

/// One observed container mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerEvent {
    /// A card entered the container at `index`.
    Added {
        container: ContainerId,
        card: Card,
        index: usize,
    },
    /// A card left the container.
    Removed { container: ContainerId, card: Card },
}

impl ContainerEvent {
    /// The container this event happened on.
    #[must_use]
    pub fn container(&self) -> ContainerId {
        match self {
            Self::Added { container, .. } | Self::Removed { container, .. } => *container,
        }
    }

    /// The card involved.
    #[must_use]
    pub fn card(&self) -> &Card {
        match self {
            Self::Added { card, .. } | Self::Removed { card, .. } => card,
        }
    }

    /// Is this an add?
    #[must_use]
    pub fn is_add(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}
