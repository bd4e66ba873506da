//! The replication layer: reconciliation, outboxes, and ordering.
//!
//! Bridges container mutations across the authority boundary. The transport
//! itself is external; this layer produces messages into outboxes that the
//! transport drains, and consumes messages the transport hands it. Nothing
//! here blocks: requests are fire-and-forget, updates land whenever they
//! arrive.
//!
//! ## Reconciliation
//!
//! Incoming `ReplaceCards` updates go through the container's diff-based
//! `reconcile`, so observers see hook events only for the delta actually
//! applied. Replaying an identical update fires nothing: between the
//! per-container sequence guard here and the diff there, canonical updates
//! are idempotent twice over.

use rustc_hash::FxHashMap;

use crate::container::CardContainer;
use crate::core::{CardCatalog, ContainerId, TableRng, Vec2};

use super::authority::Authority;
use super::messages::{CanonicalUpdate, MutationRequest, Sequenced};

/// Replication state for one process.
#[derive(Debug, Default)]
pub struct ReplicationLayer {
    authority: Authority,

    /// Requests queued toward the authoritative side (client outbox).
    requests: Vec<MutationRequest>,

    /// Canonical updates queued toward observers (host outbox).
    broadcasts: Vec<Sequenced>,

    /// Next sequence number to stamp, per container (host side).
    next_seq: FxHashMap<ContainerId, u64>,

    /// Highest sequence number applied, per container (observer side).
    applied_seq: FxHashMap<ContainerId, u64>,
}

impl ReplicationLayer {
    /// Create a layer with the given authority.
    #[must_use]
    pub fn new(authority: Authority) -> Self {
        Self {
            authority,
            ..Self::default()
        }
    }

    /// The authority predicate.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Mutable authority access (for grants and mode changes at match
    /// setup).
    pub fn authority_mut(&mut self) -> &mut Authority {
        &mut self.authority
    }

    /// Stamp and queue a canonical update for broadcast.
    ///
    /// Call only on the authoritative side after the local mutation has
    /// been applied. In standalone mode this is a no-op: there is nobody
    /// to tell.
    pub fn broadcast(&mut self, update: CanonicalUpdate) {
        if !self.authority.is_networked() {
            return;
        }
        let seq = self.next_seq.entry(update.container()).or_insert(0);
        *seq += 1;
        log::trace!("broadcast #{} for {}", *seq, update.container());
        self.broadcasts.push(Sequenced { seq: *seq, update });
    }

    /// Queue a mutation request toward authority (fire-and-forget).
    pub fn submit(&mut self, request: MutationRequest) {
        log::trace!("request queued for {}", request.container());
        self.requests.push(request);
    }

    /// Drain the request outbox for the transport.
    pub fn take_requests(&mut self) -> Vec<MutationRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Drain the broadcast outbox for the transport.
    pub fn take_broadcasts(&mut self) -> Vec<Sequenced> {
        std::mem::take(&mut self.broadcasts)
    }

    /// Apply an incoming canonical update to local state.
    ///
    /// Observers accept canonical updates unconditionally, but idempotently:
    /// a sequence number at or below the last applied one for that container
    /// is skipped. Returns `true` if the update was applied.
    pub fn apply(
        &mut self,
        message: &Sequenced,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
        catalog: &CardCatalog,
        shuffle_cooldown: u32,
    ) -> bool {
        let target = message.update.container();

        let applied = self.applied_seq.entry(target).or_insert(0);
        if message.seq <= *applied {
            log::debug!(
                "stale update #{} for {} (applied #{})",
                message.seq,
                target,
                applied
            );
            return false;
        }
        *applied = message.seq;

        match &message.update {
            CanonicalUpdate::ReplaceCards { card_ids, .. } => {
                let Some(container) = containers.get_mut(&target) else {
                    log::warn!("update for unknown {target}");
                    return false;
                };
                container.reconcile(card_ids, catalog);
            }
            CanonicalUpdate::SetPosition { position, .. } => {
                let Some(container) = containers.get_mut(&target) else {
                    log::warn!("update for unknown {target}");
                    return false;
                };
                container.set_position(*position);
            }
            CanonicalUpdate::ShuffleNotice { .. } => {
                let Some(container) = containers.get_mut(&target) else {
                    log::warn!("update for unknown {target}");
                    return false;
                };
                container.mark_shuffling(shuffle_cooldown);
            }
            CanonicalUpdate::Delete { .. } => {
                if containers.remove(&target).is_none() {
                    log::debug!("delete for unknown {target}");
                    return false;
                }
                self.applied_seq.remove(&target);
            }
        }
        true
    }

    /// Handle a mutation request arriving at the authoritative side.
    ///
    /// Validates, applies locally, and rebroadcasts the canonical result.
    /// On a non-authoritative side the request is rejected with a log and
    /// nothing changes. Returns `true` if the mutation was applied.
    pub fn handle_request(
        &mut self,
        request: &MutationRequest,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
        rng: &mut TableRng,
        shuffle_cooldown: u32,
    ) -> bool {
        if !self.authority.is_authoritative() {
            log::warn!(
                "ignoring request for {}: this side lacks authority",
                request.container()
            );
            return false;
        }

        match request {
            MutationRequest::SetPosition {
                container,
                position,
            } => self.apply_set_position(*container, *position, containers),
            MutationRequest::Shuffle { container } => {
                self.apply_shuffle(*container, containers, rng, shuffle_cooldown)
            }
            MutationRequest::Delete { container } => self.apply_delete(*container, containers),
        }
    }

    /// Authoritative position write plus broadcast.
    pub fn apply_set_position(
        &mut self,
        id: ContainerId,
        position: Vec2,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
    ) -> bool {
        let Some(container) = containers.get_mut(&id) else {
            log::warn!("position request for unknown {id}");
            return false;
        };
        container.set_position(position);
        self.broadcast(CanonicalUpdate::SetPosition {
            container: id,
            position,
        });
        true
    }

    /// Authoritative shuffle plus broadcast of the permuted order.
    pub fn apply_shuffle(
        &mut self,
        id: ContainerId,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
        rng: &mut TableRng,
        shuffle_cooldown: u32,
    ) -> bool {
        let Some(container) = containers.get_mut(&id) else {
            log::warn!("shuffle request for unknown {id}");
            return false;
        };
        if !container.shuffle(rng, shuffle_cooldown) {
            return false;
        }
        let card_ids = container.card_ids();
        self.broadcast(CanonicalUpdate::ReplaceCards {
            container: id,
            card_ids,
        });
        self.broadcast(CanonicalUpdate::ShuffleNotice { container: id });
        true
    }

    /// Authoritative delete plus broadcast.
    pub fn apply_delete(
        &mut self,
        id: ContainerId,
        containers: &mut FxHashMap<ContainerId, CardContainer>,
    ) -> bool {
        if containers.remove(&id).is_none() {
            log::warn!("delete request for unknown {id}");
            return false;
        }
        self.broadcast(CanonicalUpdate::Delete { container: id });
        true
    }
}
