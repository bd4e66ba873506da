//! Core types: identities, cards, geometry, and RNG.

pub mod card;
pub mod geom;
pub mod ids;
pub mod rng;

pub use card::{Card, CardCatalog, CardId, CardInfo};
pub use geom::{Rect, Vec2};
pub use ids::{ContainerId, PointerId, ProxyId};
pub use rng::TableRng;
