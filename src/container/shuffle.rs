//! Shuffle scheduling across the authority boundary.
//!
//! A shuffle request either executes locally (authoritative side: permute,
//! raise the cooldown lock, broadcast the result) or turns into a network
//! request and returns without mutating anything. The cooldown is a
//! presentation lock counted in ticks and decremented by the tick driver.

use crate::core::{ContainerId, TableRng};
use crate::replication::{MutationRequest, ReplicationLayer};

use super::stack::CardContainer;

/// Default shuffle cooldown: one second at 60 ticks per second.
pub const DEFAULT_COOLDOWN_TICKS: u32 = 60;

/// Applies shuffles where permitted and converts them to requests where
/// not.
#[derive(Clone, Copy, Debug)]
pub struct ShuffleScheduler {
    cooldown_ticks: u32,
}

impl ShuffleScheduler {
    /// Scheduler with a custom cooldown.
    #[must_use]
    pub fn new(cooldown_ticks: u32) -> Self {
        Self { cooldown_ticks }
    }

    /// Cooldown applied after each shuffle, in ticks.
    #[must_use]
    pub fn cooldown_ticks(&self) -> u32 {
        self.cooldown_ticks
    }

    /// Shuffle a container, or request it from authority.
    ///
    /// Lacking privilege, the call queues a `Shuffle` request and returns
    /// `false` with local order untouched; the permuted order arrives later
    /// as a canonical update. Holding privilege, the permutation and the
    /// cooldown apply immediately and the result is broadcast. Requests
    /// during an active cooldown are ignored.
    pub fn shuffle(
        &self,
        container: &mut CardContainer,
        layer: &mut ReplicationLayer,
        rng: &mut TableRng,
    ) -> bool {
        let id = container.id();
        if !layer.authority().may_privileged() {
            log::warn!("shuffle of {id} attempted without authority; requesting instead");
            layer.submit(MutationRequest::Shuffle { container: id });
            return false;
        }

        if !container.shuffle(rng, self.cooldown_ticks) {
            return false;
        }

        let card_ids = container.card_ids();
        layer.broadcast(crate::replication::CanonicalUpdate::ReplaceCards {
            container: id,
            card_ids,
        });
        layer.broadcast(crate::replication::CanonicalUpdate::ShuffleNotice { container: id });
        true
    }

    /// Request deletion of a container through the same authority gate.
    ///
    /// Returns `true` if the caller may delete directly; `false` means a
    /// request was queued instead.
    pub fn request_delete(&self, id: ContainerId, layer: &mut ReplicationLayer) -> bool {
        if layer.authority().may_privileged() {
            return true;
        }
        log::warn!("delete of {id} attempted without authority; requesting instead");
        layer.submit(MutationRequest::Delete { container: id });
        false
    }

    /// Advance shuffle cooldowns by one tick.
    pub fn tick<'a>(&self, containers: impl Iterator<Item = &'a mut CardContainer>) {
        for container in containers {
            container.tick_cooldown();
        }
    }
}

impl Default for ShuffleScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_TICKS)
    }
}
