//! Wire messages crossing the authority boundary.
//!
//! Two directions:
//!
//! - **Canonical updates** flow from the authoritative side to observers and
//!   are accepted unconditionally (but idempotently, see the layer).
//! - **Mutation requests** flow from non-authoritative sides to authority,
//!   which validates, applies, and rebroadcasts canonically.
//!
//! Messages are plain serde types encoded with bincode. All of them are
//! idempotent when replayed with an identical payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{CardId, ContainerId, Vec2};

/// Authoritative state broadcast for one container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CanonicalUpdate {
    /// Full replace of a container's ordered card IDs. Observers apply
    /// this as a diff against current state.
    ReplaceCards {
        container: ContainerId,
        card_ids: Vec<CardId>,
    },
    /// Container moved on the canvas.
    SetPosition {
        container: ContainerId,
        position: Vec2,
    },
    /// Container was shuffled; observers raise the presentation lock.
    /// The permuted order arrives separately as `ReplaceCards`.
    ShuffleNotice { container: ContainerId },
    /// Container was deleted.
    Delete { container: ContainerId },
}

impl CanonicalUpdate {
    /// The container this update targets.
    #[must_use]
    pub fn container(&self) -> ContainerId {
        match self {
            Self::ReplaceCards { container, .. }
            | Self::SetPosition { container, .. }
            | Self::ShuffleNotice { container }
            | Self::Delete { container } => *container,
        }
    }
}

/// Mutation request from a non-authoritative side.
///
/// Fire-and-forget: the requester does not block on a reply; state lands
/// later via the canonical broadcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MutationRequest {
    /// Ask authority to move a container.
    SetPosition {
        container: ContainerId,
        position: Vec2,
    },
    /// Ask authority to shuffle a container.
    Shuffle { container: ContainerId },
    /// Ask authority to delete a container.
    Delete { container: ContainerId },
}

impl MutationRequest {
    /// The container this request targets.
    #[must_use]
    pub fn container(&self) -> ContainerId {
        match self {
            Self::SetPosition { container, .. }
            | Self::Shuffle { container }
            | Self::Delete { container } => *container,
        }
    }
}

/// A canonical update stamped with its per-container sequence number.
///
/// Updates for a given container are applied in stamp order; a stale or
/// replayed stamp is skipped. No ordering is promised across containers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sequenced {
    pub seq: u64,
    pub update: CanonicalUpdate,
}

/// Wire codec failure.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("failed to encode wire message: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode wire message: {0}")]
    Decode(#[source] bincode::Error),
}

/// Encode a wire message with bincode.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, WireError> {
    bincode::serialize(message).map_err(WireError::Encode)
}

/// Decode a wire message with bincode.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
    bincode::deserialize(bytes).map_err(WireError::Decode)
}
