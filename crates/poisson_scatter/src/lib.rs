#![forbid(unsafe_code)]
//! poisson_scatter: blue-noise point distributions by dart-throwing Poisson disk sampling.
//!
//! Modules:
//! - geometry: sampling domains ([`geometry::Rect`]) and the integer area the grid covers
//! - grid: uniform spatial grid answering "any point within r of p?"
//! - policy: constant, variable, and masked minimum-separation rules
//! - sampling: the dart-throwing sampler and its entry points
//! - events: observational event sinks for sampling runs
//!
//! ```no_run
//! use glam::Vec2;
//! use poisson_scatter::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
//! let points = poisson_disk_distribution(10.0, bounds, &[], 30, &mut rng);
//! assert!(points.iter().all(|&p| bounds.contains(p)));
//! ```
pub mod error;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod policy;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use poisson_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, SamplingEvent, VecSink};
    pub use crate::geometry::{PixelArea, Rect};
    pub use crate::grid::{SpatialGrid, DEFAULT_CELL_EXPONENT};
    pub use crate::policy::{
        ConstantSeparation, MaskedSeparation, SeparationPolicy, VariableSeparation,
    };
    pub use crate::sampling::{
        poisson_disk_distribution, poisson_disk_distribution_masked,
        poisson_disk_distribution_with, sample, PoissonDiskSampling, PositionSampling,
        SamplerConfig, SamplingResult, SamplingStats,
    };
}
