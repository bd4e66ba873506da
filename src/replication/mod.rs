//! Replicated container state: authority, wire messages, reconciliation.

pub mod authority;
pub mod layer;
pub mod messages;

pub use authority::{Authority, AuthorityMode};
pub use layer::ReplicationLayer;
pub use messages::{decode, encode, CanonicalUpdate, MutationRequest, Sequenced, WireError};
