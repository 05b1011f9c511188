//! Minimum-separation rules applied while sampling.
//!
//! A [`SeparationPolicy`] answers two questions for the sampler: how far apart the
//! children of an active point must be, and whether a candidate inside the rectangular
//! domain is acceptable at all. The three shipped policies cover a constant distance,
//! a distance field, and a distance field combined with an admissibility mask.
use glam::Vec2;

/// Local minimum distance and admissibility used by the sampler.
pub trait SeparationPolicy {
    /// Minimum distance enforced between children spawned around `point` and every
    /// existing point. Evaluated once per active point.
    fn separation_at(&self, point: Vec2) -> f32;

    /// Extra filter evaluated on candidates already inside the rectangular domain.
    #[inline]
    fn is_admissible(&self, _point: Vec2) -> bool {
        true
    }
}

/// Any `Fn(Vec2) -> f32` is a separation policy that admits every point.
impl<F> SeparationPolicy for F
where
    F: Fn(Vec2) -> f32,
{
    #[inline]
    fn separation_at(&self, point: Vec2) -> f32 {
        self(point)
    }
}

/// Same separation everywhere in the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSeparation(pub f32);

impl SeparationPolicy for ConstantSeparation {
    #[inline]
    fn separation_at(&self, _point: Vec2) -> f32 {
        self.0
    }
}

/// Separation given by a distance function of position.
#[derive(Clone)]
pub struct VariableSeparation<F>(pub F)
where
    F: Fn(Vec2) -> f32;

impl<F> SeparationPolicy for VariableSeparation<F>
where
    F: Fn(Vec2) -> f32,
{
    #[inline]
    fn separation_at(&self, point: Vec2) -> f32 {
        (self.0)(point)
    }
}

impl<F> std::fmt::Debug for VariableSeparation<F>
where
    F: Fn(Vec2) -> f32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VariableSeparation").finish_non_exhaustive()
    }
}

/// Separation function plus an admissibility mask, for carving shapes out of the
/// rectangular domain.
#[derive(Clone)]
pub struct MaskedSeparation<F, G>
where
    F: Fn(Vec2) -> f32,
    G: Fn(Vec2) -> bool,
{
    pub separation: F,
    pub admissible: G,
}

impl<F, G> MaskedSeparation<F, G>
where
    F: Fn(Vec2) -> f32,
    G: Fn(Vec2) -> bool,
{
    pub fn new(separation: F, admissible: G) -> Self {
        Self {
            separation,
            admissible,
        }
    }
}

impl<F, G> SeparationPolicy for MaskedSeparation<F, G>
where
    F: Fn(Vec2) -> f32,
    G: Fn(Vec2) -> bool,
{
    #[inline]
    fn separation_at(&self, point: Vec2) -> f32 {
        (self.separation)(point)
    }

    #[inline]
    fn is_admissible(&self, point: Vec2) -> bool {
        (self.admissible)(point)
    }
}

impl<F, G> std::fmt::Debug for MaskedSeparation<F, G>
where
    F: Fn(Vec2) -> f32,
    G: Fn(Vec2) -> bool,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskedSeparation").finish_non_exhaustive()
    }
}
