//! # card-table
//!
//! Interactive client core for a networked tabletop card game: replicated
//! card containers, drag interaction, and the authority model tying them
//! together. No rendering, no game rules; the embedding application owns
//! both and drives this crate through pointer events, transport messages,
//! and a per-frame tick.
//!
//! ## Design Principles
//!
//! 1. **Authority Over Locks**: A container has one authoritative side at a
//!    time. Everyone else sends requests and waits for canonical updates;
//!    there is no other mutation discipline.
//!
//! 2. **Diff, Don't Churn**: Full-state card replaces are reconciled as a
//!    multiset diff, so observers see hook events only for what actually
//!    changed and replayed updates are no-ops.
//!
//! 3. **Explicit Context**: The `Table` owns every subsystem and wires them
//!    together by hand. No globals, no singletons, no hidden registries.
//!
//! 4. **Cooperative Ticks**: Anything longer than a frame (docking travel,
//!    shuffle cooldowns, image resolution) is multi-tick state advanced by
//!    `Table::tick`. Nothing blocks.
//!
//! ## Modules
//!
//! - `core`: Card identity, ID newtypes, geometry, deterministic RNG
//! - `container`: Ordered card containers, hook events, shuffle scheduling
//! - `replication`: Wire messages, authority predicate, reconciliation
//! - `drag`: Per-pointer drag sessions, placement policy, docking motion
//! - `images`: Card-face resolution interface
//! - `table`: The explicit context and tick driver

pub mod container;
pub mod core;
pub mod drag;
pub mod images;
pub mod replication;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Card, CardCatalog, CardId, CardInfo, ContainerId, PointerId, ProxyId, Rect, TableRng, Vec2,
};

pub use crate::container::{
    CardContainer, ContainerEvent, LayoutKind, ShuffleScheduler, DEFAULT_COOLDOWN_TICKS,
};

pub use crate::replication::{
    decode, encode, Authority, AuthorityMode, CanonicalUpdate, MutationRequest, ReplicationLayer,
    Sequenced, WireError,
};

pub use crate::drag::{
    CardProxy, DockEvent, DragController, DragEffect, DragPhase, DragSession, PlacementDecision,
    Placeholder, PointerButton, ProxyArena, SessionOutcome, DEAD_ZONE,
};

pub use crate::images::{FaceImage, ImageSource, NullImageSource, StaticImageSource};

pub use crate::table::{Table, TableError};
