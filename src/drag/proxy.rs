//! On-canvas card proxies and their arena.
//!
//! A proxy is one draggable instance of a card on the play canvas. Proxies
//! are transient view-side objects: created when a card is dealt onto the
//! canvas or cloned by a drag, destroyed when discarded to nowhere or when
//! their dock target vanishes. The arena owns them and allocates their IDs.

use rustc_hash::FxHashMap;

use crate::core::{Card, ContainerId, ProxyId, Vec2};

use super::placeholder::Placeholder;

/// Default proxy footprint, a card face in canvas units.
pub const DEFAULT_PROXY_SIZE: Vec2 = Vec2 { x: 64.0, y: 89.0 };

/// One draggable card instance on the canvas.
#[derive(Clone, Debug)]
pub struct CardProxy {
    id: ProxyId,
    /// The card this proxy shows.
    pub card: Card,
    /// Canvas position (center).
    pub position: Vec2,
    /// Rotation applied by secondary drag, in degrees.
    pub rotation_deg: f32,
    /// Face footprint.
    pub size: Vec2,
    /// The container this proxy currently belongs to, if any.
    pub container: Option<ContainerId>,
    /// Reflow marker reserving this proxy's slot while a drag is in
    /// flight.
    pub placeholder: Option<Placeholder>,
    /// Is the card face hidden?
    pub face_down: bool,
    /// Does starting a drag on this proxy drag a fresh clone instead?
    pub clone_on_drag: bool,
}

impl CardProxy {
    fn new(id: ProxyId, card: Card, position: Vec2) -> Self {
        Self {
            id,
            card,
            position,
            rotation_deg: 0.0,
            size: DEFAULT_PROXY_SIZE,
            container: None,
            placeholder: None,
            face_down: false,
            clone_on_drag: false,
        }
    }

    /// Proxy ID.
    #[must_use]
    pub fn id(&self) -> ProxyId {
        self.id
    }

    /// Is this proxy loose on the canvas (no container)?
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.container.is_none()
    }
}

/// Owner and allocator of card proxies.
#[derive(Clone, Debug, Default)]
pub struct ProxyArena {
    proxies: FxHashMap<ProxyId, CardProxy>,
    next: u32,
}

impl ProxyArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a proxy for a card at a canvas position.
    pub fn spawn(&mut self, card: Card, position: Vec2) -> ProxyId {
        let id = ProxyId::new(self.next);
        self.next += 1;
        self.proxies.insert(id, CardProxy::new(id, card, position));
        id
    }

    /// Spawn a clone of an existing proxy at the same transform.
    ///
    /// The clone shares card identity but is free (no container) and never
    /// itself clones on drag. Returns `None` if the original is gone.
    pub fn spawn_clone(&mut self, of: ProxyId) -> Option<ProxyId> {
        let original = self.proxies.get(&of)?.clone();
        let id = ProxyId::new(self.next);
        self.next += 1;
        self.proxies.insert(
            id,
            CardProxy {
                id,
                container: None,
                placeholder: None,
                clone_on_drag: false,
                ..original
            },
        );
        Some(id)
    }

    /// Destroy a proxy. Returns it for final inspection.
    pub fn despawn(&mut self, id: ProxyId) -> Option<CardProxy> {
        self.proxies.remove(&id)
    }

    /// Look up a proxy.
    #[must_use]
    pub fn get(&self, id: ProxyId) -> Option<&CardProxy> {
        self.proxies.get(&id)
    }

    /// Look up a proxy mutably.
    pub fn get_mut(&mut self, id: ProxyId) -> Option<&mut CardProxy> {
        self.proxies.get_mut(&id)
    }

    /// Does the arena still hold this proxy?
    #[must_use]
    pub fn contains(&self, id: ProxyId) -> bool {
        self.proxies.contains_key(&id)
    }

    /// Iterate over live proxies.
    pub fn iter(&self) -> impl Iterator<Item = &CardProxy> {
        self.proxies.values()
    }

    /// Iterate mutably over live proxies.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardProxy> {
        self.proxies.values_mut()
    }

    /// Number of live proxies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Check if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
