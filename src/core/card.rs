//! Card identity and game-rule metadata references.
//!
//! A `Card` is pure identity: an ID string plus an optional shared reference
//! into the external card catalog. All game-rule meaning (name, image, stats)
//! lives behind that reference; the core never interprets it.
//!
//! ## The blank sentinel
//!
//! Reads from an empty container return `Card::blank()` instead of erroring.
//! Empty is a valid steady state for a container, so popping from one is not
//! a failure.
//!
//! ```
//! use card_table::core::Card;
//!
//! let card = Card::blank();
//! assert!(card.is_blank());
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Card identifier. Equality and hashing are by ID string.
///
/// Duplicate physical cards share the same `CardId`; a container may hold
/// the same ID more than once.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    /// Create a card ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The blank sentinel ID (empty string).
    #[must_use]
    pub const fn blank() -> Self {
        Self(String::new())
    }

    /// Get the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the blank sentinel.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Game-rule metadata for a card, owned by the external catalog.
///
/// The core only carries it; the view layer reads `image_url` when
/// resolving card faces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    /// Display name.
    pub name: String,

    /// Where the card-face image can be fetched from, if known.
    pub image_url: Option<String>,
}

impl CardInfo {
    /// Create metadata with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: None,
        }
    }
}

/// A card reference: identity plus shared metadata.
///
/// Immutable once created. Equality is by ID only; two cards with the same
/// ID are the same card regardless of metadata resolution state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Identity.
    pub id: CardId,

    /// Shared reference to game-rule metadata, if resolved.
    pub info: Option<Arc<CardInfo>>,
}

impl Card {
    /// Create a card with unresolved metadata.
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            info: None,
        }
    }

    /// Create a card with resolved metadata.
    pub fn with_info(id: impl Into<CardId>, info: Arc<CardInfo>) -> Self {
        Self {
            id: id.into(),
            info: Some(info),
        }
    }

    /// The blank sentinel card returned by empty-container reads.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: CardId::blank(),
            info: None,
        }
    }

    /// Check whether this is the blank sentinel.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.id.is_blank()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl From<&str> for Card {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The external card catalog: ID to shared metadata.
///
/// Populated by game setup, read by the core when materializing cards from
/// replicated ID lists. Unknown IDs materialize as cards with unresolved
/// metadata rather than failing.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    entries: FxHashMap<CardId, Arc<CardInfo>>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for a card ID, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<CardId>, info: CardInfo) {
        self.entries.insert(id.into(), Arc::new(info));
    }

    /// Look up metadata for an ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<Arc<CardInfo>> {
        self.entries.get(id).cloned()
    }

    /// Materialize a card for an ID, attaching metadata when known.
    #[must_use]
    pub fn materialize(&self, id: &CardId) -> Card {
        Card {
            id: id.clone(),
            info: self.entries.get(id).cloned(),
        }
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
