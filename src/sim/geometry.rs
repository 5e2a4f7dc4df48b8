//! Axis-aligned boxes, the only collision shape in the game.
//!
//! Every entity and platform is an [`Aabb`] in world space. `pos` is the
//! top-left corner and +y points down, matching screen coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Box with its center at `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Strict-inequality overlap test. Boxes that merely share an edge do not
/// intersect, so an entity resting exactly on a platform top is not colliding
/// with it.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}
