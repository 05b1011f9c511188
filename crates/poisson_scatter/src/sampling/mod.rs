//! Sampling strategies for generating blue-noise positions in a 2D domain.
//!
//! The random source is always supplied by the caller as `&mut dyn RngCore`; this
//! module derives the two draws the samplers need from it, a float in `[0, 1)` and
//! an index in `[0, len)`.
use mint::Vector2;
use rand::RngCore;

use crate::geometry::Rect;

pub mod poisson_disk;

pub use poisson_disk::{
    poisson_disk_distribution, poisson_disk_distribution_masked, poisson_disk_distribution_with,
    sample, PoissonDiskSampling, SamplerConfig, SamplingResult, SamplingStats,
};

/// Trait for position sampling over a rectangular domain.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain: Rect, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    // 24 bits fill the f32 mantissa exactly, so the result never rounds up to 1.0.
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Generate a uniform index in the range [0, len). `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rng.next_u64() as u128 * len as u128) >> 64) as usize
}
