//! Card-face image resolution interface.
//!
//! Fetching and decoding card faces is the embedding application's job; the
//! core only routes requests out and results back in. Resolution is always
//! asynchronous from the core's point of view: [`ImageSource::request`] must
//! not block, and results surface later through [`ImageSource::poll`],
//! drained once per tick by the table. A card whose face never resolves
//! stays fully functional; image state never gates mutation or drag logic.

use rustc_hash::FxHashMap;

use crate::core::{Card, CardId};

/// Opaque handle to a resolved card-face image.
///
/// The meaning of the value is owned by the rendering layer (a texture
/// slot, an atlas index); the core only stores and hands it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceImage(pub u64);

impl FaceImage {
    /// Create a face-image handle.
    #[must_use]
    pub const fn new(handle: u64) -> Self {
        Self(handle)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Asynchronous card-face resolution.
pub trait ImageSource {
    /// Ask for this card's face to be resolved. Must not block; duplicate
    /// requests for the same card are allowed and may be coalesced.
    fn request(&mut self, card: &Card);

    /// Results that resolved since the last poll.
    fn poll(&mut self) -> Vec<(CardId, FaceImage)>;
}

/// Image source that never resolves anything.
///
/// The default for tables without a rendering layer; cards simply keep
/// their backs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullImageSource;

impl ImageSource for NullImageSource {
    fn request(&mut self, _card: &Card) {}

    fn poll(&mut self) -> Vec<(CardId, FaceImage)> {
        Vec::new()
    }
}

/// Image source backed by a pre-registered handle map.
///
/// Resolves a request on the next poll if the card ID was registered,
/// silently drops it otherwise. Suits embeddings that load all faces up
/// front.
#[derive(Clone, Debug, Default)]
pub struct StaticImageSource {
    handles: FxHashMap<CardId, FaceImage>,
    pending: Vec<CardId>,
}

impl StaticImageSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handle for a card ID.
    pub fn register(&mut self, id: impl Into<CardId>, image: FaceImage) {
        self.handles.insert(id.into(), image);
    }
}

impl ImageSource for StaticImageSource {
    fn request(&mut self, card: &Card) {
        if card.is_blank() {
            return;
        }
        self.pending.push(card.id.clone());
    }

    fn poll(&mut self) -> Vec<(CardId, FaceImage)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .filter_map(|id| self.handles.get(&id).map(|image| (id, *image)))
            .collect()
    }
}
