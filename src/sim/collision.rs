//! Collision tests for axis-aligned boxes
//!
//! Everything in the world is a rectangle except coins, which are picked up
//! by distance. Resolution (snapping, velocity changes) happens in the tick;
//! these functions only answer yes/no questions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Strict horizontal overlap only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }
}

/// Whether a falling box should come to rest on top of a platform.
///
/// The box must overlap the platform horizontally, its bottom must sit in
/// the band from the platform top down to `land_band` below the platform's
/// underside, it must not be moving up, and its bottom on the previous tick
/// must have been at or above the platform top. This is a one-way platform
/// test, not a swept collision: a box moving faster than the band per tick
/// can pass through.
pub fn lands_on(body: &Rect, prev_bottom: f32, vy: f32, platform: &Rect, land_band: f32) -> bool {
    let bottom = body.bottom();
    body.overlaps_x(platform)
        && bottom > platform.y
        && bottom < platform.bottom() + land_band
        && vy >= 0.0
        && prev_bottom <= platform.y
}

/// Whether an overlap with an enemy is a stomp rather than a hit.
///
/// True when the body is descending and has sunk less than `stomp_depth`
/// past the enemy's top edge.
pub fn is_stomp(body: &Rect, vy: f32, enemy: &Rect, stomp_depth: f32) -> bool {
    vy > 0.0 && body.bottom() - enemy.y < stomp_depth
}

/// Whether a body's centre is within pickup range of a circle
pub fn within_pickup(body: &Rect, center: Vec2, radius: f32, margin: f32) -> bool {
    let reach = radius + margin;
    body.center().distance_squared(center) < reach * reach
}
