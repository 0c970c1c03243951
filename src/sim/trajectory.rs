//! Trajectory model
//!
//! The canonical representation of motion is a velocity vector: sign encodes
//! direction, magnitude encodes speed. Bounces only flip signs; no reflection
//! ever changes speed. Speed changes (difficulty scaling at spawn) are
//! explicit, separate operations.
//!
//! A gradient/intercept line form is kept as a documented alternate
//! capability. Its perpendicular-bounce operation returns an explicit
//! `Vertical` case for a zero-gradient input instead of collapsing to a
//! horizontal line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::intersect::Axis;
use crate::error::SimError;

/// A moving body's velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    vel: Vec2,
}

impl Trajectory {
    /// Build a trajectory, rejecting a zero or non-finite velocity
    pub fn new(vel: Vec2) -> Result<Self, SimError> {
        if !vel.is_finite() || vel == Vec2::ZERO {
            return Err(SimError::DegenerateTrajectory);
        }
        Ok(Self { vel })
    }

    /// Build from a direction angle (radians) and magnitude
    pub fn from_angle(theta: f32, magnitude: f32) -> Result<Self, SimError> {
        Self::new(Vec2::new(theta.cos(), theta.sin()) * magnitude)
    }

    /// Unit eastward travel, the infallible fallback serve
    pub const fn eastward() -> Self {
        Self { vel: Vec2::X }
    }

    /// Current velocity vector
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Reflect off a surface aligned with the given axis: negate exactly that
    /// velocity component. Applying the same axis twice restores the original
    /// vector bit for bit.
    pub fn reflect_axis(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.vel.x = -self.vel.x,
            Axis::Y => self.vel.y = -self.vel.y,
        }
    }

    /// Alternate line-form bounce: turn the motion perpendicular to its
    /// current line of travel, preserving speed. In vector form this is a
    /// quarter rotation, well defined for every direction including vertical
    /// travel, which is exactly why the vector form is canonical.
    pub fn reflect_perpendicular(&mut self) {
        self.vel = Vec2::new(-self.vel.y, self.vel.x);
    }

    /// Express the current line of travel in slope/intercept form through
    /// `point`. Vertical travel has no finite gradient.
    pub fn as_line(&self, point: Vec2) -> Result<Line, SimError> {
        if self.vel.x == 0.0 {
            return Err(SimError::UndefinedLineReflection);
        }
        let gradient = self.vel.y / self.vel.x;
        Ok(Line::new(gradient, point.y - gradient * point.x))
    }
}

/// A line in slope/intercept form: `y = gradient * x + y_intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub gradient: f32,
    pub y_intercept: f32,
}

impl Line {
    pub fn new(gradient: f32, y_intercept: f32) -> Self {
        Self {
            gradient,
            y_intercept,
        }
    }

    /// y value at the given x
    #[inline]
    pub fn y_at(&self, x: f32) -> f32 {
        self.gradient * x + self.y_intercept
    }

    /// The line through `point` perpendicular to this one.
    ///
    /// The gradient becomes the negative reciprocal; a zero-gradient input
    /// yields the explicit `Vertical` case rather than a zero slope.
    pub fn perpendicular_through(&self, point: Vec2) -> Perpendicular {
        if self.gradient == 0.0 {
            return Perpendicular::Vertical { x: point.x };
        }
        let gradient = -1.0 / self.gradient;
        Perpendicular::Sloped(Line::new(gradient, point.y - gradient * point.x))
    }
}

/// Result of a perpendicular reflection in line form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Perpendicular {
    /// An ordinary line with finite gradient
    Sloped(Line),
    /// A vertical line `x = const`, which slope/intercept form cannot express
    Vertical { x: f32 },
}

impl Perpendicular {
    /// Unwrap to slope/intercept form; a vertical line is an error
    pub fn as_line(&self) -> Result<Line, SimError> {
        match *self {
            Perpendicular::Sloped(line) => Ok(line),
            Perpendicular::Vertical { .. } => Err(SimError::UndefinedLineReflection),
        }
    }
}
