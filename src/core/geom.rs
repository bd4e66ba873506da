//! Minimal 2D geometry for placement and docking.
//!
//! Just enough vector math for the core: pointer positions, container
//! bounds, bounded-step motion toward a dock target, and the signed angle
//! used by two-finger rotation. No rendering concerns.

use serde::{Deserialize, Serialize};

/// A 2D point or displacement in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Step from `self` toward `target` by at most `max_step`.
    ///
    /// Reaches `target` exactly once within `max_step`, never overshoots.
    #[must_use]
    pub fn move_toward(self, target: Self, max_step: f32) -> Self {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_step || dist == 0.0 {
            target
        } else {
            self + delta * (max_step / dist)
        }
    }

    /// Signed angle in degrees from `self` to `other`, counterclockwise
    /// positive. Zero if either vector is zero-length.
    #[must_use]
    pub fn signed_angle(self, other: Self) -> f32 {
        if self == Self::ZERO || other == Self::ZERO {
            return 0.0;
        }
        let cross = self.x * other.y - self.y * other.x;
        let dot = self.x * other.x + self.y * other.y;
        cross.atan2(dot).to_degrees()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, used for container bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build a rect from a center point and a size.
    #[must_use]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Width of the rect.
    #[must_use]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rect.
    #[must_use]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Full containment test.
    #[must_use]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && self.contains_y(point)
    }

    /// Vertical-extent test only. Ejection from a container is judged
    /// against this, never against the horizontal extent.
    #[must_use]
    pub fn contains_y(self, point: Vec2) -> bool {
        point.y >= self.min.y && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_toward_bounded() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(10.0, 0.0);

        let stepped = from.move_toward(to, 4.0);
        assert_eq!(stepped, Vec2::new(4.0, 0.0));

        // Within range: lands exactly on target, no overshoot.
        let arrived = Vec2::new(9.0, 0.0).move_toward(to, 4.0);
        assert_eq!(arrived, to);

        // Already there: stays.
        assert_eq!(to.move_toward(to, 4.0), to);
    }

    #[test]
    fn test_signed_angle() {
        let right = Vec2::new(1.0, 0.0);
        let up = Vec2::new(0.0, 1.0);

        assert!((right.signed_angle(up) - 90.0).abs() < 1e-4);
        assert!((up.signed_angle(right) + 90.0).abs() < 1e-4);
        assert_eq!(right.signed_angle(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_rect_containment() {
        let rect = Rect::centered(Vec2::new(0.0, 0.0), Vec2::new(10.0, 4.0));

        assert!(rect.contains(Vec2::new(4.0, 1.0)));
        assert!(!rect.contains(Vec2::new(6.0, 1.0)));

        // contains_y ignores x entirely.
        assert!(rect.contains_y(Vec2::new(1000.0, 1.0)));
        assert!(!rect.contains_y(Vec2::new(0.0, 3.0)));
    }
}
