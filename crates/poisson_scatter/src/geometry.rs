//! Minimal rectangle algebra for sampling domains.
//!
//! [`Rect`] is the float domain a run samples from. [`PixelArea`] is the integer
//! rectangle the spatial grid is laid over, obtained by flooring the minimum corner
//! and ceiling the maximum corner of a [`Rect`].
use glam::{I64Vec2, Vec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned rectangle given by its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Minimum (upper-left) corner.
    pub min: Vec2,
    /// Extent along each axis. May be zero or negative, in which case nothing is contained.
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its minimum corner and size.
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Create a rectangle spanning two corners.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self {
            min,
            size: max - min,
        }
    }

    /// Create a rectangle, rejecting non-finite or non-positive extents.
    pub fn try_new(min: Vec2, size: Vec2) -> Result<Self> {
        let rect = Self::new(min, size);
        if !rect.min.is_finite() || !rect.size.is_finite() {
            return Err(Error::InvalidBounds(format!(
                "non-finite rectangle min={} size={}",
                rect.min, rect.size
            )));
        }
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return Err(Error::InvalidBounds(format!(
                "size must be > 0 in both components, got {}",
                rect.size
            )));
        }
        Ok(rect)
    }

    /// Maximum (lower-right) corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Inclusive containment on all four edges. NaN coordinates are never contained.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Largest corner magnitude a [`PixelArea`] accepts. Keeps corner negation and
/// extents clear of `i64` overflow.
pub const MAX_PIXEL_COORD: f32 = (1u64 << 61) as f32;

/// Integer rectangle covering a [`Rect`], used to lay out the spatial grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelArea {
    pub min: I64Vec2,
    pub max: I64Vec2,
}

impl PixelArea {
    pub fn new(min: I64Vec2, max: I64Vec2) -> Self {
        Self { min, max }
    }

    /// Extent of the area, clamped to zero for inverted bounds.
    #[inline]
    pub fn size(&self) -> I64Vec2 {
        (self.max - self.min).max(I64Vec2::ZERO)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }
}

impl From<Rect> for PixelArea {
    fn from(rect: Rect) -> Self {
        let min = rect.min.floor();
        let max = rect.max().ceil();
        // Non-finite or out-of-range corners collapse to an empty area.
        let in_range = |v: Vec2| v.is_finite() && v.abs().max_element() < MAX_PIXEL_COORD;
        if !in_range(min) || !in_range(max) {
            return Self::new(I64Vec2::ZERO, I64Vec2::ZERO);
        }
        Self::new(min.as_i64vec2(), max.as_i64vec2())
    }
}
