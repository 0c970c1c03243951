//! Geometry primitives
//!
//! Immutable value shapes used by the intersection tests. Coordinates follow
//! screen convention: x grows eastward, y grows southward. Dimensions are
//! validated at construction so the tick loop never sees a degenerate shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A circular body: centre point plus strictly positive radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre point, mutated every tick as the body moves
    pub centre: Vec2,
    radius: f32,
}

impl Circle {
    /// Build a circle, rejecting non-positive or non-finite radii
    pub fn new(centre: Vec2, radius: f32) -> Result<Self, SimError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidGeometry("radius must be > 0"));
        }
        Ok(Self { centre, radius })
    }

    /// Radius, fixed at construction
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// An axis-aligned rectangle: top-left position plus positive dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner; a paddle mutates its y under move commands
    pub pos: Vec2,
    width: f32,
    height: f32,
}

impl Rect {
    /// Build a rectangle, rejecting non-positive or non-finite dimensions
    pub fn new(pos: Vec2, width: f32, height: f32) -> Result<Self, SimError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(SimError::InvalidGeometry("width must be > 0"));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(SimError::InvalidGeometry("height must be > 0"));
        }
        Ok(Self { pos, width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// West edge x
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    /// East edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// North edge y
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// South edge y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Centre point
    pub fn centre(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) * 0.5
    }

    /// Closest point on the rectangle to `p`, clamping each axis
    /// independently to the rectangle's extents
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}
