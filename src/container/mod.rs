//! Card containers: ordered card collections with layout tags and hooks.

pub mod events;
pub mod layout;
pub mod shuffle;
pub mod stack;

pub use events::ContainerEvent;
pub use layout::LayoutKind;
pub use shuffle::{ShuffleScheduler, DEFAULT_COOLDOWN_TICKS};
pub use stack::{CardContainer, DEFAULT_SIZE};
