//! The table: explicit context wiring every subsystem together.
//!
//! One `Table` is one process's view of a match. It owns the containers,
//! the proxy arena, the drag controller, the replication layer, the shuffle
//! scheduler, the RNG, and the card catalog, and passes them to each other
//! explicitly; nothing in the crate reaches for global state.
//!
//! The embedding application feeds it pointer events and transport
//! messages, calls [`Table::tick`] once per frame, and drains hook events
//! and outboxes afterwards. All methods are synchronous; anything that
//! takes longer than a frame (docking travel, shuffle cooldowns, image
//! resolution) is multi-tick state advanced by `tick`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::container::{CardContainer, ContainerEvent, LayoutKind, ShuffleScheduler};
use crate::core::{Card, CardCatalog, CardId, ContainerId, PointerId, ProxyId, Rect, TableRng, Vec2};
use crate::drag::{CardProxy, DockEvent, DragController, DragEffect, PointerButton, ProxyArena, SessionOutcome};
use crate::images::{FaceImage, ImageSource, NullImageSource};
use crate::replication::{
    Authority, CanonicalUpdate, MutationRequest, ReplicationLayer, Sequenced,
};

/// Lookup failure on the table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("no such container: {0}")]
    UnknownContainer(ContainerId),
    #[error("no such proxy: {0}")]
    UnknownProxy(ProxyId),
}

/// One process's complete match state.
pub struct Table {
    containers: FxHashMap<ContainerId, CardContainer>,
    proxies: ProxyArena,
    drag: DragController,
    replication: ReplicationLayer,
    scheduler: ShuffleScheduler,
    rng: TableRng,
    catalog: CardCatalog,
    images: Box<dyn ImageSource>,
    faces: FxHashMap<CardId, FaceImage>,
    next_container: u32,
}

impl Table {
    /// Create a table for one side of the authority boundary.
    #[must_use]
    pub fn new(authority: Authority, rng: TableRng) -> Self {
        Self {
            containers: FxHashMap::default(),
            proxies: ProxyArena::new(),
            drag: DragController::new(),
            replication: ReplicationLayer::new(authority),
            scheduler: ShuffleScheduler::default(),
            rng,
            catalog: CardCatalog::new(),
            images: Box::new(NullImageSource),
            faces: FxHashMap::default(),
            next_container: 0,
        }
    }

    /// Table for local play with no network.
    #[must_use]
    pub fn standalone(rng: TableRng) -> Self {
        Self::new(Authority::standalone(), rng)
    }

    /// Attach a card-face image source (builder pattern).
    #[must_use]
    pub fn with_image_source(mut self, source: Box<dyn ImageSource>) -> Self {
        self.images = source;
        self
    }

    /// Override the shuffle scheduler (builder pattern).
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: ShuffleScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// The authority predicate.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        self.replication.authority()
    }

    /// Mutable authority access for match setup.
    pub fn authority_mut(&mut self) -> &mut Authority {
        self.replication.authority_mut()
    }

    /// The card catalog.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Mutable catalog access for game setup.
    pub fn catalog_mut(&mut self) -> &mut CardCatalog {
        &mut self.catalog
    }

    /// The proxy arena.
    #[must_use]
    pub fn proxies(&self) -> &ProxyArena {
        &self.proxies
    }

    /// The drag controller.
    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    // ---- containers ------------------------------------------------------

    /// Spawn a new container at a position.
    ///
    /// A client spawning a container holds authority over it until the
    /// grant is revoked, mirroring decks a player brings to the match.
    pub fn create_container(
        &mut self,
        name: impl Into<String>,
        layout: LayoutKind,
        position: Vec2,
    ) -> ContainerId {
        let id = ContainerId::new(self.next_container);
        self.next_container += 1;
        self.containers
            .insert(id, CardContainer::new(id, name, layout).at(position));
        if !self.replication.authority().is_authoritative() {
            self.replication.authority_mut().grant(id);
        }
        id
    }

    /// Look up a container.
    pub fn container(&self, id: ContainerId) -> Result<&CardContainer, TableError> {
        self.containers.get(&id).ok_or(TableError::UnknownContainer(id))
    }

    /// Look up a container mutably.
    pub fn container_mut(&mut self, id: ContainerId) -> Result<&mut CardContainer, TableError> {
        self.containers
            .get_mut(&id)
            .ok_or(TableError::UnknownContainer(id))
    }

    /// Iterate over containers.
    pub fn containers(&self) -> impl Iterator<Item = &CardContainer> {
        self.containers.values()
    }

    /// Add a card to a container and broadcast the result.
    ///
    /// Without write authority over the container nothing changes and
    /// `false` is returned; card membership has no request path.
    pub fn add_card(
        &mut self,
        id: ContainerId,
        card: Card,
        at: Option<usize>,
    ) -> Result<bool, TableError> {
        if !self.replication.authority().may_mutate(id) {
            log::warn!("card add to {id} without authority; dropped");
            return Ok(false);
        }
        let container = self
            .containers
            .get_mut(&id)
            .ok_or(TableError::UnknownContainer(id))?;
        if !container.add(card.clone(), at) {
            return Ok(false);
        }
        let card_ids = container.card_ids();

        self.images.request(&card);
        self.replication.broadcast(CanonicalUpdate::ReplaceCards {
            container: id,
            card_ids,
        });
        Ok(true)
    }

    /// Draw the top card of a container and broadcast the result.
    ///
    /// The blank sentinel comes back when the container is empty or this
    /// side lacks write authority; neither case is an error.
    pub fn draw(&mut self, id: ContainerId) -> Result<Card, TableError> {
        if !self.replication.authority().may_mutate(id) {
            log::warn!("draw from {id} without authority; dropped");
            return Ok(Card::blank());
        }
        let container = self
            .containers
            .get_mut(&id)
            .ok_or(TableError::UnknownContainer(id))?;
        let card = container.pop();
        if card.is_blank() {
            return Ok(card);
        }
        let card_ids = container.card_ids();
        self.replication.broadcast(CanonicalUpdate::ReplaceCards {
            container: id,
            card_ids,
        });
        Ok(card)
    }

    /// Move a container on the canvas.
    ///
    /// With write authority the move applies and broadcasts; without it a
    /// `SetPosition` request is queued and `false` returned, the canonical
    /// position arriving later as an update.
    pub fn move_container(&mut self, id: ContainerId, position: Vec2) -> bool {
        if self.replication.authority().may_mutate(id) {
            self.replication
                .apply_set_position(id, position, &mut self.containers)
        } else {
            self.replication
                .submit(MutationRequest::SetPosition {
                    container: id,
                    position,
                });
            false
        }
    }

    /// Shuffle a container, or request it from authority.
    pub fn shuffle(&mut self, id: ContainerId) -> bool {
        let Some(container) = self.containers.get_mut(&id) else {
            log::warn!("shuffle of unknown {id}");
            return false;
        };
        self.scheduler
            .shuffle(container, &mut self.replication, &mut self.rng)
    }

    /// Delete a container, or request it from authority.
    ///
    /// A successful delete destroys every proxy still belonging to the
    /// container; docking motions toward it fail on their next tick.
    pub fn delete_container(&mut self, id: ContainerId) -> bool {
        if !self.scheduler.request_delete(id, &mut self.replication) {
            return false;
        }
        if !self.replication.apply_delete(id, &mut self.containers) {
            return false;
        }
        self.despawn_proxies_of(id);
        true
    }

    /// External drop-handler contract: a hit-testing layer dropped a proxy
    /// onto a container.
    ///
    /// The card leaves its previous container (`Removed` fires there
    /// first), joins the end of the target's order (`Added` fires), and
    /// the proxy re-parents immediately with no docking travel. Returns
    /// `false` when the proxy is already a member or this side lacks
    /// write authority.
    pub fn drop_on(&mut self, container: ContainerId, proxy: ProxyId) -> Result<bool, TableError> {
        let subject = self
            .proxies
            .get(proxy)
            .ok_or(TableError::UnknownProxy(proxy))?;
        let card = subject.card.clone();
        let previous = subject.container;

        if !self.containers.contains_key(&container) {
            return Err(TableError::UnknownContainer(container));
        }
        if previous == Some(container) {
            return Ok(false);
        }
        if !self.replication.authority().may_mutate(container) {
            log::warn!("drop onto {container} without authority; dropped");
            return Ok(false);
        }

        if let Some(prev) = previous.and_then(|id| self.containers.get_mut(&id)) {
            prev.remove(&card.id);
            let card_ids = prev.card_ids();
            let prev_id = prev.id();
            self.replication.broadcast(CanonicalUpdate::ReplaceCards {
                container: prev_id,
                card_ids,
            });
        }

        let Some(target) = self.containers.get_mut(&container) else {
            return Err(TableError::UnknownContainer(container));
        };
        if !target.add(card, None) {
            return Ok(false);
        }
        let position = target.position();
        let card_ids = target.card_ids();
        self.replication.broadcast(CanonicalUpdate::ReplaceCards {
            container,
            card_ids,
        });

        if let Some(subject) = self.proxies.get_mut(proxy) {
            subject.container = Some(container);
            subject.placeholder = None;
            subject.position = position;
            subject.rotation_deg = 0.0;
        }
        Ok(true)
    }

    // ---- proxies ---------------------------------------------------------

    /// Spawn a card proxy loose on the canvas.
    pub fn spawn_proxy(&mut self, card: Card, position: Vec2) -> ProxyId {
        self.images.request(&card);
        self.proxies.spawn(card, position)
    }

    /// Look up a proxy.
    pub fn proxy(&self, id: ProxyId) -> Result<&CardProxy, TableError> {
        self.proxies.get(id).ok_or(TableError::UnknownProxy(id))
    }

    /// Look up a proxy mutably.
    pub fn proxy_mut(&mut self, id: ProxyId) -> Result<&mut CardProxy, TableError> {
        self.proxies.get_mut(id).ok_or(TableError::UnknownProxy(id))
    }

    /// Set a proxy's face-down state. Purely presentational; no hook
    /// events fire.
    pub fn set_face_down(&mut self, id: ProxyId, face_down: bool) -> Result<(), TableError> {
        self.proxy_mut(id)?.face_down = face_down;
        Ok(())
    }

    /// Toggle a proxy's face-down state; returns the new state.
    pub fn flip(&mut self, id: ProxyId) -> Result<bool, TableError> {
        let proxy = self.proxy_mut(id)?;
        proxy.face_down = !proxy.face_down;
        Ok(proxy.face_down)
    }

    /// Resolved face image for a card, if any has arrived.
    #[must_use]
    pub fn face_image(&self, id: &CardId) -> Option<FaceImage> {
        self.faces.get(id).copied()
    }

    // ---- pointer input ---------------------------------------------------

    /// Feed a pointer press, hit-testing proxies under it.
    pub fn pointer_down(&mut self, pointer: PointerId, button: PointerButton, position: Vec2) {
        let hit = self.proxy_at(position);
        self.drag.pointer_down(pointer, button, position, hit);
    }

    /// Feed a pointer move, hit-testing the hovered container.
    pub fn pointer_move(&mut self, pointer: PointerId, position: Vec2) -> Vec<DragEffect> {
        let hover = self.container_at(position);
        self.drag
            .pointer_move(pointer, position, hover, &mut self.proxies, &mut self.containers)
    }

    /// Feed a pointer release.
    pub fn pointer_up(&mut self, pointer: PointerId, position: Vec2) -> Option<SessionOutcome> {
        self.drag
            .pointer_up(pointer, position, &mut self.proxies, &mut self.containers)
    }

    /// Forcibly end every interaction (application lost the input
    /// context). No placeholder, clone, or session survives the call.
    pub fn cancel_interactions(&mut self) {
        self.drag.cancel_all(&mut self.proxies, &mut self.containers);
    }

    /// The topmost proxy under a canvas point, nearest center winning.
    #[must_use]
    pub fn proxy_at(&self, position: Vec2) -> Option<ProxyId> {
        self.proxies
            .iter()
            .filter(|p| Rect::centered(p.position, p.size).contains(position))
            .min_by(|a, b| {
                a.position
                    .distance(position)
                    .total_cmp(&b.position.distance(position))
            })
            .map(CardProxy::id)
    }

    /// The container under a canvas point, nearest center winning.
    #[must_use]
    pub fn container_at(&self, position: Vec2) -> Option<ContainerId> {
        self.containers
            .values()
            .filter(|c| c.bounds().contains(position))
            .min_by(|a, b| {
                a.position()
                    .distance(position)
                    .total_cmp(&b.position().distance(position))
            })
            .map(CardContainer::id)
    }

    // ---- replication plumbing --------------------------------------------

    /// Apply a canonical update arriving from the transport.
    pub fn apply_remote(&mut self, message: &Sequenced) -> bool {
        let applied = self.replication.apply(
            message,
            &mut self.containers,
            &self.catalog,
            self.scheduler.cooldown_ticks(),
        );
        if applied {
            if let CanonicalUpdate::Delete { container } = message.update {
                self.despawn_proxies_of(container);
            }
        }
        applied
    }

    /// Handle a mutation request arriving from a non-authoritative side.
    pub fn handle_request(&mut self, request: &MutationRequest) -> bool {
        let applied = self.replication.handle_request(
            request,
            &mut self.containers,
            &mut self.rng,
            self.scheduler.cooldown_ticks(),
        );
        if applied {
            if let MutationRequest::Delete { container } = request {
                self.despawn_proxies_of(*container);
            }
        }
        applied
    }

    /// Drain queued mutation requests for the transport.
    pub fn take_requests(&mut self) -> Vec<MutationRequest> {
        self.replication.take_requests()
    }

    /// Drain queued canonical broadcasts for the transport.
    pub fn take_broadcasts(&mut self) -> Vec<Sequenced> {
        self.replication.take_broadcasts()
    }

    // ---- tick driver -----------------------------------------------------

    /// Advance one frame: docking motions, shuffle cooldowns, image
    /// resolution.
    pub fn tick(&mut self) -> Vec<DockEvent> {
        let docks = self.drag.tick(&mut self.proxies, &mut self.containers);
        self.scheduler.tick(self.containers.values_mut());
        for (id, image) in self.images.poll() {
            self.faces.insert(id, image);
        }
        docks
    }

    /// Drain the hook events of every container, grouped by container in
    /// ID order, mutation-ordered within each.
    pub fn drain_events(&mut self) -> Vec<ContainerEvent> {
        let mut ids: Vec<ContainerId> = self.containers.keys().copied().collect();
        ids.sort_by_key(|id| id.raw());

        let mut events = Vec::new();
        for id in ids {
            if let Some(container) = self.containers.get_mut(&id) {
                events.append(&mut container.drain_events());
            }
        }
        events
    }

    fn despawn_proxies_of(&mut self, id: ContainerId) {
        let doomed: SmallVec<[ProxyId; 8]> = self
            .proxies
            .iter()
            .filter(|p| p.container == Some(id))
            .map(CardProxy::id)
            .collect();
        for proxy in doomed {
            self.proxies.despawn(proxy);
        }
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("containers", &self.containers.len())
            .field("proxies", &self.proxies.len())
            .field("authority", &self.replication.authority().mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::StaticImageSource;

    fn table() -> Table {
        Table::standalone(TableRng::new(42))
    }

    #[test]
    fn test_create_and_lookup() {
        let mut table = table();
        let deck = table.create_container("deck", LayoutKind::Vertical, Vec2::ZERO);

        assert_eq!(table.container(deck).unwrap().name(), "deck");
        assert!(matches!(
            table.container(ContainerId(99)),
            Err(TableError::UnknownContainer(_))
        ));
    }

    #[test]
    fn test_draw_order() {
        let mut table = table();
        let deck = table.create_container("deck", LayoutKind::Vertical, Vec2::ZERO);
        for id in ["A", "B", "C"] {
            table.add_card(deck, Card::new(id), None).unwrap();
        }

        assert_eq!(table.draw(deck).unwrap().id, CardId::new("C"));
        assert_eq!(table.draw(deck).unwrap().id, CardId::new("B"));
        assert_eq!(table.draw(deck).unwrap().id, CardId::new("A"));
        assert!(table.draw(deck).unwrap().is_blank());
    }

    #[test]
    fn test_client_spawned_container_is_granted() {
        let mut table = Table::new(Authority::client(), TableRng::new(1));
        let deck = table.create_container("deck", LayoutKind::Vertical, Vec2::ZERO);

        assert!(table.authority().may_mutate(deck));
        assert!(table.add_card(deck, Card::new("A"), None).unwrap());
        assert_eq!(table.container(deck).unwrap().len(), 1);
    }

    #[test]
    fn test_client_move_of_foreign_container_becomes_request() {
        let mut table = Table::new(Authority::client(), TableRng::new(1));
        let deck = table.create_container("deck", LayoutKind::Vertical, Vec2::ZERO);
        table.authority_mut().revoke(deck);

        assert!(!table.move_container(deck, Vec2::new(5.0, 5.0)));

        // Local position untouched; the request is the only effect.
        assert_eq!(table.container(deck).unwrap().position(), Vec2::ZERO);
        assert_eq!(
            table.take_requests(),
            vec![MutationRequest::SetPosition {
                container: deck,
                position: Vec2::new(5.0, 5.0),
            }]
        );
    }

    #[test]
    fn test_delete_destroys_contained_proxies() {
        let mut table = table();
        let deck = table.create_container("deck", LayoutKind::Vertical, Vec2::ZERO);
        table.add_card(deck, Card::new("A"), None).unwrap();

        let contained = table.spawn_proxy(Card::new("A"), Vec2::ZERO);
        table.proxy_mut(contained).unwrap().container = Some(deck);
        let free = table.spawn_proxy(Card::new("B"), Vec2::new(50.0, 50.0));

        assert!(table.delete_container(deck));
        assert!(table.container(deck).is_err());
        assert!(table.proxy(contained).is_err());
        assert!(table.proxy(free).is_ok());
    }

    #[test]
    fn test_drop_on_moves_between_containers() {
        let mut table = table();
        let hand = table.create_container("hand", LayoutKind::Vertical, Vec2::ZERO);
        let pile = table.create_container("pile", LayoutKind::Area, Vec2::new(200.0, 0.0));
        table.add_card(hand, Card::new("A"), None).unwrap();
        table.drain_events();

        let proxy = table.spawn_proxy(Card::new("A"), Vec2::ZERO);
        table.proxy_mut(proxy).unwrap().container = Some(hand);

        assert!(table.drop_on(pile, proxy).unwrap());
        assert!(table.container(hand).unwrap().is_empty());
        assert_eq!(table.container(pile).unwrap().len(), 1);
        assert_eq!(table.proxy(proxy).unwrap().container, Some(pile));
        assert_eq!(table.proxy(proxy).unwrap().position, Vec2::new(200.0, 0.0));

        // Move is remove-then-add from the observer's perspective.
        let events = table.drain_events();
        assert_eq!(events.len(), 2);
        assert!(!events[0].is_add());
        assert!(events[1].is_add());

        // Dropping onto the current owner is a no-op.
        assert!(!table.drop_on(pile, proxy).unwrap());
    }

    #[test]
    fn test_tick_polls_images() {
        let mut source = StaticImageSource::new();
        source.register("A", FaceImage::new(11));
        let mut table = table().with_image_source(Box::new(source));

        table.spawn_proxy(Card::new("A"), Vec2::ZERO);
        assert!(table.face_image(&CardId::new("A")).is_none());

        table.tick();
        assert_eq!(table.face_image(&CardId::new("A")), Some(FaceImage::new(11)));
    }

    #[test]
    fn test_flip_is_silent() {
        let mut table = table();
        let deck = table.create_container("deck", LayoutKind::Vertical, Vec2::ZERO);
        table.add_card(deck, Card::new("A"), None).unwrap();
        table.drain_events();

        let proxy = table.spawn_proxy(Card::new("A"), Vec2::ZERO);
        assert!(table.flip(proxy).unwrap());
        assert!(!table.flip(proxy).unwrap());
        assert!(table.drain_events().is_empty());
    }

    #[test]
    fn test_hit_testing_prefers_nearest() {
        let mut table = table();
        let near = table.spawn_proxy(Card::new("A"), Vec2::new(2.0, 0.0));
        let _far = table.spawn_proxy(Card::new("B"), Vec2::new(20.0, 0.0));

        assert_eq!(table.proxy_at(Vec2::ZERO), Some(near));
        assert_eq!(table.proxy_at(Vec2::new(5000.0, 0.0)), None);
    }

    #[test]
    fn test_pointer_round_trip_selects() {
        let mut table = table();
        let proxy = table.spawn_proxy(Card::new("A"), Vec2::ZERO);

        table.pointer_down(PointerId(0), PointerButton::Primary, Vec2::ZERO);
        let outcome = table.pointer_up(PointerId(0), Vec2::new(1.0, 0.0));
        assert_eq!(outcome, Some(SessionOutcome::Selected(proxy)));
        assert_eq!(table.drag().selected(), Some(proxy));
    }
}
