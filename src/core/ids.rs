//! Identifier newtypes for containers, proxies, and pointers.
//!
//! Containers and proxies get opaque numeric IDs allocated by the `Table`.
//! Pointer IDs come from the platform input layer and are only compared,
//! never allocated here.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u32);

impl ContainerId {
    /// Create a new container ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Container({})", self.0)
    }
}

/// Unique identifier for an on-canvas card proxy.
///
/// A proxy is one draggable instance of a card. Clones created by
/// clone-on-drag get fresh proxy IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyId(pub u32);

impl ProxyId {
    /// Create a new proxy ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProxyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Proxy({})", self.0)
    }
}

/// Platform pointer identifier (mouse, or one touch of a multi-touch gesture).
///
/// Negative values are legal; some platforms use them for mouse buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub i32);

impl PointerId {
    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pointer({})", self.0)
    }
}
