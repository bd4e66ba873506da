//! The authority predicate: who may mutate what.
//!
//! A container has at most one authoritative side at a time. The side
//! holding authority writes canonical state directly; everyone else goes
//! through the request path. This predicate is the only locking discipline
//! in the system.
//!
//! Three modes:
//!
//! - `Standalone`: no network; local code is authoritative for everything.
//! - `Host`: the authoritative side of a networked match.
//! - `Client`: an observer; may mutate only containers it has been granted
//!   (e.g. a deck it spawned), and never privileged operations.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::ContainerId;

/// Which side of the authority boundary this process is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorityMode {
    /// No network active; all mutation is local and direct.
    Standalone,
    /// Authoritative side of a networked match.
    Host,
    /// Non-authoritative observer.
    Client,
}

/// Authority state for one process: the mode plus per-container grants.
#[derive(Clone, Debug)]
pub struct Authority {
    mode: AuthorityMode,
    granted: FxHashSet<ContainerId>,
}

impl Authority {
    /// Authority for a process with no network active.
    #[must_use]
    pub fn standalone() -> Self {
        Self {
            mode: AuthorityMode::Standalone,
            granted: FxHashSet::default(),
        }
    }

    /// Authority for the host of a networked match.
    #[must_use]
    pub fn host() -> Self {
        Self {
            mode: AuthorityMode::Host,
            granted: FxHashSet::default(),
        }
    }

    /// Authority for a client observer.
    #[must_use]
    pub fn client() -> Self {
        Self {
            mode: AuthorityMode::Client,
            granted: FxHashSet::default(),
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> AuthorityMode {
        self.mode
    }

    /// Is a network authority boundary active?
    #[must_use]
    pub fn is_networked(&self) -> bool {
        self.mode != AuthorityMode::Standalone
    }

    /// Is this process the authoritative side?
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        matches!(self.mode, AuthorityMode::Standalone | AuthorityMode::Host)
    }

    /// Grant this process write authority over one container (a client
    /// owns containers it spawned until authority is revoked).
    pub fn grant(&mut self, container: ContainerId) {
        self.granted.insert(container);
    }

    /// Revoke a per-container grant.
    pub fn revoke(&mut self, container: ContainerId) {
        self.granted.remove(&container);
    }

    /// May this process mutate the given container's canonical state
    /// directly?
    #[must_use]
    pub fn may_mutate(&self, container: ContainerId) -> bool {
        match self.mode {
            AuthorityMode::Standalone | AuthorityMode::Host => true,
            AuthorityMode::Client => self.granted.contains(&container),
        }
    }

    /// May this process execute privileged operations (shuffle, delete)?
    ///
    /// Privileged operations run only on the authoritative side; container
    /// grants do not extend to them.
    #[must_use]
    pub fn may_privileged(&self) -> bool {
        self.is_authoritative()
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::standalone()
    }
}
