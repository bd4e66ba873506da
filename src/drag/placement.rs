//! Placement policy: what a drag does to a contained card.
//!
//! A pure decision function re-evaluated every drag tick while the subject
//! belongs to a container. The decision depends only on the container's
//! layout kind, the drag target position, the container bounds, and the
//! card count; no state is read or written here.
//!
//! Ejection is judged against the container's vertical extent only, never
//! the horizontal extent, and the Vertical reflow preview always wins over
//! ejection while the pointer is inside bounds.

use crate::container::LayoutKind;
use crate::core::{Rect, Vec2};

/// Fraction of the container width near each edge that drives auto-scroll.
const SCROLL_EDGE_FRACTION: f32 = 0.25;

/// What the drag tick should do with a contained subject.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementDecision {
    /// Stay in the container and preview insertion at this index by
    /// reflowing the layout.
    PreviewInsert(usize),
    /// Stay in the container and drive its scroll surface; positive is
    /// toward `max.x`, magnitude in `0.0..=1.0`.
    AutoScroll(f32),
    /// Stay in the container, subject follows the pointer freely.
    FollowPointer,
    /// Leave the container and free-float on the canvas.
    Eject {
        /// Tell the container's scroll surface to stop auto-scrolling.
        stop_scroll: bool,
    },
}

/// Decide placement for one drag tick.
#[must_use]
pub fn decide(
    layout: LayoutKind,
    target: Vec2,
    bounds: Rect,
    card_count: usize,
) -> PlacementDecision {
    match layout {
        // A Full container is a loose pile: dragged cards always come
        // free and follow the pointer.
        LayoutKind::Full => PlacementDecision::Eject { stop_scroll: false },
        LayoutKind::Vertical if bounds.contains_y(target) => {
            PlacementDecision::PreviewInsert(insert_index(target, bounds, card_count))
        }
        LayoutKind::Horizontal if bounds.contains_y(target) => {
            PlacementDecision::AutoScroll(scroll_drive(target, bounds))
        }
        LayoutKind::Area if bounds.contains_y(target) => PlacementDecision::FollowPointer,
        _ => PlacementDecision::Eject {
            stop_scroll: layout.stops_scroll_on_eject(),
        },
    }
}

/// Insertion index for a vertical list from the pointer's fractional
/// position along the container's vertical extent. Index 0 is the top
/// (`max.y`); `card_count` is the bottom slot.
#[must_use]
pub fn insert_index(target: Vec2, bounds: Rect, card_count: usize) -> usize {
    let height = bounds.height();
    if height <= 0.0 || card_count == 0 {
        return 0;
    }
    let fraction = ((bounds.max.y - target.y) / height).clamp(0.0, 1.0);
    let slots = card_count + 1;
    ((fraction * slots as f32) as usize).min(card_count)
}

/// Auto-scroll drive from pointer proximity to the horizontal edges.
///
/// Zero in the middle band; ramps linearly to ±1.0 at the edges over the
/// outer [`SCROLL_EDGE_FRACTION`] of the width on each side.
#[must_use]
pub fn scroll_drive(target: Vec2, bounds: Rect) -> f32 {
    let width = bounds.width();
    if width <= 0.0 {
        return 0.0;
    }
    let edge = width * SCROLL_EDGE_FRACTION;
    if target.x < bounds.min.x + edge {
        -(((bounds.min.x + edge) - target.x) / edge).clamp(0.0, 1.0)
    } else if target.x > bounds.max.x - edge {
        ((target.x - (bounds.max.x - edge)) / edge).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::centered(Vec2::ZERO, Vec2::new(100.0, 200.0))
    }

    #[test]
    fn test_full_always_ejects() {
        let decision = decide(LayoutKind::Full, Vec2::ZERO, bounds(), 5);
        assert_eq!(decision, PlacementDecision::Eject { stop_scroll: false });
    }

    #[test]
    fn test_vertical_previews_inside_bounds() {
        // Near the top: first slot.
        let top = decide(LayoutKind::Vertical, Vec2::new(0.0, 99.0), bounds(), 4);
        assert_eq!(top, PlacementDecision::PreviewInsert(0));

        // Near the bottom: last slot.
        let bottom = decide(LayoutKind::Vertical, Vec2::new(0.0, -99.0), bounds(), 4);
        assert_eq!(bottom, PlacementDecision::PreviewInsert(4));

        // Middle lands in a middle slot.
        let middle = decide(LayoutKind::Vertical, Vec2::new(0.0, 0.0), bounds(), 4);
        assert_eq!(middle, PlacementDecision::PreviewInsert(2));
    }

    #[test]
    fn test_vertical_preview_wins_over_horizontal_exit() {
        // Far outside horizontally, but within the vertical extent: still
        // a preview, never an ejection.
        let decision = decide(LayoutKind::Vertical, Vec2::new(5000.0, 0.0), bounds(), 2);
        assert!(matches!(decision, PlacementDecision::PreviewInsert(_)));
    }

    #[test]
    fn test_vertical_ejects_past_vertical_bounds() {
        let decision = decide(LayoutKind::Vertical, Vec2::new(0.0, 150.0), bounds(), 2);
        assert_eq!(decision, PlacementDecision::Eject { stop_scroll: true });
    }

    #[test]
    fn test_horizontal_scroll_drive() {
        // Center: dead band.
        let center = decide(LayoutKind::Horizontal, Vec2::ZERO, bounds(), 3);
        assert_eq!(center, PlacementDecision::AutoScroll(0.0));

        // Left edge: full negative drive.
        match decide(LayoutKind::Horizontal, Vec2::new(-50.0, 0.0), bounds(), 3) {
            PlacementDecision::AutoScroll(drive) => assert!((drive + 1.0).abs() < 1e-4),
            other => panic!("expected AutoScroll, got {other:?}"),
        }

        // Right side, halfway into the edge band: partial positive drive.
        match decide(LayoutKind::Horizontal, Vec2::new(37.5, 0.0), bounds(), 3) {
            PlacementDecision::AutoScroll(drive) => {
                assert!(drive > 0.0 && drive < 1.0);
            }
            other => panic!("expected AutoScroll, got {other:?}"),
        }
    }

    #[test]
    fn test_horizontal_ejects_past_vertical_bounds() {
        let decision = decide(LayoutKind::Horizontal, Vec2::new(0.0, -150.0), bounds(), 3);
        assert_eq!(decision, PlacementDecision::Eject { stop_scroll: true });
    }

    #[test]
    fn test_area_follows_then_ejects() {
        let inside = decide(LayoutKind::Area, Vec2::new(500.0, 0.0), bounds(), 3);
        assert_eq!(inside, PlacementDecision::FollowPointer);

        let outside = decide(LayoutKind::Area, Vec2::new(0.0, 101.0), bounds(), 3);
        assert_eq!(outside, PlacementDecision::Eject { stop_scroll: false });
    }

    #[test]
    fn test_insert_index_empty_container() {
        assert_eq!(insert_index(Vec2::ZERO, bounds(), 0), 0);
    }
}
