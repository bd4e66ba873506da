//! Container layout kinds.
//!
//! A container carries a layout tag instead of subclassing per layout;
//! drag placement dispatches on the tag. The four kinds mirror how a
//! physical table is organized: loose piles, vertical lists, horizontal
//! scrolling rows, and stacked play areas.

use serde::{Deserialize, Serialize};

/// How a container arranges its cards, and therefore how a drag across it
/// behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Loose pile covering the whole surface; dragged cards always
    /// free-float at the pointer.
    Full,
    /// Vertical list; dragging previews the insertion point by reflowing
    /// the list.
    Vertical,
    /// Horizontal scrolling row (e.g. a hand); dragging near the edges
    /// drives auto-scroll.
    Horizontal,
    /// Stacked play area; cards follow the pointer with no reflow preview.
    Area,
}

impl LayoutKind {
    /// Does a drag inside bounds preview an insertion point by reflow?
    #[must_use]
    pub const fn reflows(self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// Does a drag inside bounds drive the container's scroll surface?
    #[must_use]
    pub const fn auto_scrolls(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Does leaving this container's vertical extent stop its scroll
    /// surface?
    #[must_use]
    pub const fn stops_scroll_on_eject(self) -> bool {
        matches!(self, Self::Vertical | Self::Horizontal)
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Full => "Full",
            Self::Vertical => "Vertical",
            Self::Horizontal => "Horizontal",
            Self::Area => "Area",
        };
        f.write_str(name)
    }
}
