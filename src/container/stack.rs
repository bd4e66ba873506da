//! The card container: an ordered, owned collection of card references.
//!
//! A container owns its card order exclusively. Mutations go through the
//! methods here so that every logical change emits exactly one hook event
//! (see [`super::events`]), including changes applied from a remote
//! canonical update.
//!
//! ## Ordering and duplicates
//!
//! Order is insertion order unless shuffled. Duplicate IDs are permitted;
//! the game rules decide how many physical copies of a card exist, not the
//! container.
//!
//! ## The shuffle lock
//!
//! After a shuffle the container is marked "shuffling" for a cooldown
//! measured in ticks. The lock is advisory: it only causes further shuffle
//! requests to be ignored (not queued); all other mutations proceed.

use rustc_hash::FxHashMap;

use crate::core::{Card, CardCatalog, CardId, ContainerId, Rect, TableRng, Vec2};

use super::events::ContainerEvent;
use super::layout::LayoutKind;

/// Default container size in canvas units, a card footprint.
pub const DEFAULT_SIZE: Vec2 = Vec2 { x: 64.0, y: 89.0 };

/// An ordered collection of cards with a layout tag and a canvas position.
#[derive(Clone, Debug)]
pub struct CardContainer {
    id: ContainerId,
    name: String,
    layout: LayoutKind,
    cards: Vec<Card>,
    position: Vec2,
    size: Vec2,
    shuffle_cooldown: u32,
    events: Vec<ContainerEvent>,
}

impl CardContainer {
    /// Create an empty container.
    pub fn new(id: ContainerId, name: impl Into<String>, layout: LayoutKind) -> Self {
        Self {
            id,
            name: name.into(),
            layout,
            cards: Vec::new(),
            position: Vec2::ZERO,
            size: DEFAULT_SIZE,
            shuffle_cooldown: 0,
            events: Vec::new(),
        }
    }

    /// Set the canvas position (builder pattern).
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the container footprint (builder pattern).
    #[must_use]
    pub fn sized(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Container ID.
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the container.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Layout tag.
    #[must_use]
    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    /// Cards in order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card IDs in order.
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the container holds no cards. Empty is a valid steady state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Canvas position (center point).
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the container. Position authority is enforced by the caller
    /// (see the replication layer); the container itself just stores it.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Container footprint.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Bounds rect centered on the container position.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    /// Insert a card at `at` (clamped) or append.
    ///
    /// Emits one `Added` event. Blank cards are rejected as a no-op and
    /// `false` is returned.
    pub fn add(&mut self, card: Card, at: Option<usize>) -> bool {
        if card.is_blank() {
            log::debug!("{}: ignoring blank card add", self.id);
            return false;
        }

        let index = at.unwrap_or(self.cards.len()).min(self.cards.len());
        self.cards.insert(index, card.clone());
        self.events.push(ContainerEvent::Added {
            container: self.id,
            card,
            index,
        });
        true
    }

    /// Remove the first card matching `id`.
    ///
    /// Emits one `Removed` event on success; absent IDs are a silent no-op.
    pub fn remove(&mut self, id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| &c.id == id)?;
        let card = self.cards.remove(index);
        self.events.push(ContainerEvent::Removed {
            container: self.id,
            card: card.clone(),
        });
        Some(card)
    }

    /// Remove and return the last card in order.
    ///
    /// Returns the blank sentinel without mutating or emitting when empty;
    /// an empty pop is not an error.
    pub fn pop(&mut self) -> Card {
        match self.cards.pop() {
            Some(card) => {
                self.events.push(ContainerEvent::Removed {
                    container: self.id,
                    card: card.clone(),
                });
                card
            }
            None => Card::blank(),
        }
    }

    /// The last card in order, or the blank sentinel when empty.
    #[must_use]
    pub fn top(&self) -> Card {
        self.cards.last().cloned().unwrap_or_else(Card::blank)
    }

    /// Randomly permute the card order, uniform over permutations.
    ///
    /// Sets the shuffle cooldown. Returns `false` without mutating if the
    /// cooldown from a previous shuffle is still running; such requests are
    /// ignored, not queued. Membership is unchanged, so no hook events fire.
    pub fn shuffle(&mut self, rng: &mut TableRng, cooldown_ticks: u32) -> bool {
        if self.is_shuffling() {
            log::debug!("{}: shuffle ignored during cooldown", self.id);
            return false;
        }
        rng.shuffle(&mut self.cards);
        self.shuffle_cooldown = cooldown_ticks;
        true
    }

    /// Is the presentation shuffle lock active?
    #[must_use]
    pub fn is_shuffling(&self) -> bool {
        self.shuffle_cooldown > 0
    }

    /// Mark the container as shuffling for `cooldown_ticks` without
    /// permuting. Observers apply this when a shuffle notice arrives.
    pub fn mark_shuffling(&mut self, cooldown_ticks: u32) {
        self.shuffle_cooldown = self.shuffle_cooldown.max(cooldown_ticks);
    }

    /// Advance the shuffle cooldown by one tick.
    pub fn tick_cooldown(&mut self) {
        self.shuffle_cooldown = self.shuffle_cooldown.saturating_sub(1);
    }

    /// Full replace of the card list, applied as a multiset diff.
    ///
    /// Hook events fire only for the delta: `Removed` for departures (in
    /// old order) strictly before `Added` for arrivals (in new order).
    /// Replaying an identical list emits nothing, so a replayed canonical
    /// update is observationally a no-op. Final order is exactly the new
    /// order even when no membership changed.
    pub fn set_cards(&mut self, new_cards: Vec<Card>) {
        let mut arriving: FxHashMap<&CardId, usize> = FxHashMap::default();
        for card in &new_cards {
            *arriving.entry(&card.id).or_insert(0) += 1;
        }

        let mut removed = Vec::new();
        for card in &self.cards {
            match arriving.get_mut(&card.id) {
                Some(count) if *count > 0 => *count -= 1,
                _ => removed.push(card.clone()),
            }
        }

        let mut departing: FxHashMap<&CardId, usize> = FxHashMap::default();
        for card in &self.cards {
            *departing.entry(&card.id).or_insert(0) += 1;
        }

        let mut added = Vec::new();
        for (index, card) in new_cards.iter().enumerate() {
            match departing.get_mut(&card.id) {
                Some(count) if *count > 0 => *count -= 1,
                _ => added.push((index, card.clone())),
            }
        }

        for card in removed {
            self.events.push(ContainerEvent::Removed {
                container: self.id,
                card,
            });
        }
        for (index, card) in added {
            self.events.push(ContainerEvent::Added {
                container: self.id,
                card,
                index,
            });
        }

        self.cards = new_cards;
    }

    /// Replace contents from a replicated ID list, materializing cards
    /// through the catalog. Diff semantics as [`Self::set_cards`].
    pub fn reconcile(&mut self, ids: &[CardId], catalog: &CardCatalog) {
        let cards = ids.iter().map(|id| catalog.materialize(id)).collect();
        self.set_cards(cards);
    }

    /// Take the pending hook events. The view layer calls this once per
    /// tick; events are in mutation order.
    pub fn drain_events(&mut self) -> Vec<ContainerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending hook events without consuming them.
    #[must_use]
    pub fn pending_events(&self) -> &[ContainerEvent] {
        &self.events
    }
}
