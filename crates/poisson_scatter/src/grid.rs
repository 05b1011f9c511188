//! Uniform spatial grid for neighbor queries during sampling.
//!
//! [`SpatialGrid`] buckets points into square cells of `2^k` domain units laid over a
//! [`PixelArea`]. Points are only ever added; a query scans the cells overlapped by the
//! square bounding box of the query circle.
//!
//! Integer math runs in `i64` so domains far from the origin index without overflow.
//! When a layout would need more than [`MAX_CELLS`] cells the exponent is raised until
//! it fits, trading query speed for bounded memory.
use glam::{I64Vec2, Vec2};
use tracing::debug;

use crate::geometry::PixelArea;

/// Cell-size exponent used by the sampling entry points (cells of 8 units).
pub const DEFAULT_CELL_EXPONENT: u32 = 3;

/// Largest cell-size exponent accepted from callers.
pub const MAX_CELL_EXPONENT: u32 = 16;

/// Upper bound on the number of cells a grid allocates.
pub const MAX_CELLS: i64 = 1 << 22;

const MAX_GROWN_EXPONENT: u32 = 62;

type Cell = Vec<Vec2>;

/// Uniform grid of point buckets over an integer area.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cells: Vec<Cell>,
    bounds: PixelArea,
    num_cells: I64Vec2,
    offset: I64Vec2,
    exponent: u32,
    len: usize,
}

impl SpatialGrid {
    /// Create an empty grid over `bounds` with cells of `2^exponent` units.
    pub fn new(bounds: PixelArea, exponent: u32) -> Self {
        let mut grid = Self {
            cells: Vec::new(),
            bounds,
            num_cells: I64Vec2::ZERO,
            offset: I64Vec2::ZERO,
            exponent: 0,
            len: 0,
        };
        grid.resize(exponent);
        grid
    }

    /// Replace the bounds and re-derive the layout. All stored points are discarded.
    pub fn reset(&mut self, bounds: PixelArea, exponent: u32) {
        self.bounds = bounds;
        self.resize(exponent);
    }

    /// Re-derive cell counts for a new exponent. All stored points are discarded.
    ///
    /// The exponent is clamped to [`MAX_CELL_EXPONENT`], then raised further if the
    /// layout would exceed [`MAX_CELLS`].
    pub fn resize(&mut self, exponent: u32) {
        let requested = exponent.min(MAX_CELL_EXPONENT);
        self.exponent = requested;
        self.offset = -self.bounds.min;

        let size = self.bounds.size();
        self.num_cells = Self::cells_for(size, self.exponent);
        while Self::cell_count(self.num_cells).is_none_or(|n| n > MAX_CELLS)
            && self.exponent < MAX_GROWN_EXPONENT
        {
            self.exponent += 1;
            self.num_cells = Self::cells_for(size, self.exponent);
        }
        if self.exponent != requested {
            debug!(
                "Spatial grid over {:?} raised cell exponent from {} to {}.",
                self.bounds, requested, self.exponent
            );
        }

        self.cells.clear();
        self.cells
            .resize_with((self.num_cells.x * self.num_cells.y) as usize, Vec::new);
        self.len = 0;
    }

    fn cell_count(num_cells: I64Vec2) -> Option<i64> {
        num_cells.x.checked_mul(num_cells.y)
    }

    /// ceil(size / 2^exponent) per axis for non-negative sizes.
    fn cells_for(size: I64Vec2, exponent: u32) -> I64Vec2 {
        let round_up = I64Vec2::splat((1i64 << exponent) - 1);
        I64Vec2::new(
            (size.x + round_up.x) >> exponent,
            (size.y + round_up.y) >> exponent,
        )
    }

    /// Side length of a cell in domain units.
    #[inline]
    pub fn cell_size(&self) -> u64 {
        1 << self.exponent
    }

    #[inline]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn num_cells(&self) -> I64Vec2 {
        self.num_cells
    }

    /// Whether the grid has any cells at all. Queries on a grid without cells never
    /// find a neighbor.
    #[inline]
    pub fn has_cells(&self) -> bool {
        !self.cells.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> PixelArea {
        self.bounds
    }

    /// Number of points indexed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat index of the cell holding `p`, or `None` when `p` falls outside the grid.
    pub fn cell_of(&self, p: Vec2) -> Option<usize> {
        if !p.is_finite() {
            return None;
        }
        // Floor in f64 so the translation stays exact for far-away domains.
        let floored = p.as_dvec2().floor().as_i64vec2();
        let translated = floored.saturating_add(self.offset);
        let x = translated.x >> self.exponent;
        let y = translated.y >> self.exponent;
        let in_range = (0..self.num_cells.x).contains(&x) && (0..self.num_cells.y).contains(&y);
        in_range.then(|| (x + self.num_cells.x * y) as usize)
    }

    /// Index `p`. Returns `false` and leaves the grid untouched when `p` lies outside it.
    pub fn insert(&mut self, p: Vec2) -> bool {
        match self.cell_of(p) {
            Some(index) => {
                self.cells[index].push(p);
                self.len += 1;
                true
            }
            None => {
                debug!(
                    "Point {} lies outside the spatial grid {:?}; not indexed.",
                    p, self.bounds
                );
                false
            }
        }
    }

    /// Whether any indexed point lies strictly closer than `radius` to `p`.
    pub fn has_neighbor_within(&self, p: Vec2, radius: f32) -> bool {
        if self.cells.is_empty() || radius.is_nan() || radius <= 0.0 {
            return false;
        }

        let radius_squared = radius * radius;
        let lo = self.clamp_to_bounds(p - Vec2::splat(radius));
        let hi = self.clamp_to_bounds(p + Vec2::splat(radius));

        let min_cell = self.cell_coords(lo);
        let max_cell = (self.cell_coords(hi) + I64Vec2::ONE).min(self.num_cells);

        for y in min_cell.y..max_cell.y {
            for x in min_cell.x..max_cell.x {
                let cell = &self.cells[(x + self.num_cells.x * y) as usize];
                if cell
                    .iter()
                    .any(|&q| p.distance_squared(q) < radius_squared)
                {
                    return true;
                }
            }
        }

        false
    }

    /// Cell coordinates of an integer position inside the bounds.
    #[inline]
    fn cell_coords(&self, p: I64Vec2) -> I64Vec2 {
        let translated = p + self.offset;
        I64Vec2::new(translated.x >> self.exponent, translated.y >> self.exponent)
    }

    /// Floor `p` and clamp it to the last pixel inside the bounds.
    #[inline]
    fn clamp_to_bounds(&self, p: Vec2) -> I64Vec2 {
        let last = (self.bounds.max - I64Vec2::ONE).max(self.bounds.min);
        // Float to int `as` saturates, so the clamp sees finite extremes.
        p.as_dvec2().floor().as_i64vec2().clamp(self.bounds.min, last)
    }
}
