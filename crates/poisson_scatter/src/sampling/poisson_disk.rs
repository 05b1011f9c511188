//! Poisson disk position sampling by dart throwing.
//!
//! A run keeps an active list of points that may still spawn children. Each iteration
//! removes a random active point, draws `k` candidates in the annulus between one and
//! two times its local separation, and accepts every candidate that lies inside the
//! domain, passes the policy's admissibility test, and has no accepted point closer
//! than that separation. Neighbor tests go through a [`SpatialGrid`] owned by the run.
//!
//! Runs never fail. Degenerate domains or separations shrink the output, possibly to
//! nothing; diagnostics go to `tracing` and the optional [`EventSink`].
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::events::{EventSink, SamplingEvent};
use crate::geometry::{PixelArea, Rect};
use crate::grid::{SpatialGrid, DEFAULT_CELL_EXPONENT, MAX_CELL_EXPONENT};
use crate::policy::{ConstantSeparation, MaskedSeparation, SeparationPolicy, VariableSeparation};
use crate::sampling::{rand01, rand_index, PositionSampling};

/// Default number of candidates spawned per active point.
pub const DEFAULT_K: usize = 30;

/// Tuning knobs for a sampling run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Candidates spawned around each active point. Higher values pack denser and run slower.
    pub k: usize,
    /// Spatial grid cells are `2^cell_exponent` domain units wide.
    pub cell_exponent: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            cell_exponent: DEFAULT_CELL_EXPONENT,
        }
    }
}

impl SamplerConfig {
    /// Creates a config with `k` candidates per active point and the default grid.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Sets the number of candidates per active point.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the grid cell-size exponent.
    pub fn with_cell_exponent(mut self, cell_exponent: u32) -> Self {
        self.cell_exponent = cell_exponent;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be >= 1".into()));
        }
        if self.cell_exponent > MAX_CELL_EXPONENT {
            return Err(Error::InvalidConfig(format!(
                "cell_exponent must be <= {MAX_CELL_EXPONENT}, got {}",
                self.cell_exponent
            )));
        }
        Ok(())
    }
}

/// Counters collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplingStats {
    /// Active points taken off the active list.
    pub active_processed: usize,
    /// Candidates drawn.
    pub candidates_evaluated: usize,
    /// Candidates discarded by the domain, admissibility, or neighbor test.
    pub candidates_rejected: usize,
    /// Output points the spatial grid could not index.
    pub index_drops: usize,
}

/// Output of [`sample`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingResult {
    /// Initial points in input order, then accepted points in acceptance order.
    pub points: Vec<Vec2>,
    pub stats: SamplingStats,
}

/// Per-run state. Owns the grid exclusively for the duration of one run.
struct Run<'a, P: ?Sized, S> {
    policy: &'a P,
    bounds: Rect,
    grid: SpatialGrid,
    active: Vec<Vec2>,
    points: Vec<Vec2>,
    stats: SamplingStats,
    sink: S,
}

impl<'a, P, S> Run<'a, P, S>
where
    P: SeparationPolicy + ?Sized,
    S: EventSink,
{
    fn new(policy: &'a P, bounds: Rect, cell_exponent: u32, sink: S) -> Self {
        Self {
            policy,
            bounds,
            grid: SpatialGrid::new(PixelArea::from(bounds), cell_exponent),
            active: Vec::new(),
            points: Vec::new(),
            stats: SamplingStats::default(),
            sink,
        }
    }

    fn add_point(&mut self, p: Vec2) {
        self.active.push(p);
        self.points.push(p);
        if !self.grid.insert(p) {
            self.stats.index_drops += 1;
            self.sink
                .send(SamplingEvent::IndexInsertDropped { position: p });
        }
    }

    fn seed(&mut self, initial_points: &[Vec2]) {
        self.active.reserve(initial_points.len());
        self.points.reserve(initial_points.len());
        for &p in initial_points {
            self.add_point(p);
        }

        if self.points.is_empty() {
            let center = self.bounds.center();
            if self.policy.is_admissible(center) {
                self.add_point(center);
                self.sink.send(SamplingEvent::Seeded { position: center });
            } else {
                debug!("Domain center {} is not admissible; nothing to seed.", center);
            }
        }
    }

    /// Spawn `k` candidates around `parent`, keeping those that pass every test.
    fn spawn_children(&mut self, parent: Vec2, k: usize, rng: &mut dyn RngCore) {
        let dist = self.policy.separation_at(parent);
        if !dist.is_finite() || dist <= 0.0 {
            debug!(
                "Separation {} at {} is not positive and finite; spawning no candidates.",
                dist, parent
            );
            self.sink.send(SamplingEvent::SeparationSkipped {
                position: parent,
                separation: dist,
            });
            return;
        }

        for _ in 0..k {
            // Linear in the radius, not area-uniform over the annulus.
            let radius = dist * (1.0 + rand01(rng));
            let angle = rand01(rng) * TAU;
            let candidate = parent + Vec2::from_angle(angle) * radius;
            self.stats.candidates_evaluated += 1;

            if self.bounds.contains(candidate)
                && self.policy.is_admissible(candidate)
                && !self.grid.has_neighbor_within(candidate, dist)
            {
                self.add_point(candidate);
                self.sink.send(SamplingEvent::PointAccepted {
                    position: candidate,
                    parent,
                    separation: dist,
                });
            } else {
                self.stats.candidates_rejected += 1;
            }
        }
    }

    fn run(mut self, k: usize, rng: &mut dyn RngCore) -> SamplingResult {
        // Without cells no separation can be enforced, so only the seed set is kept.
        if !self.grid.has_cells() && !self.active.is_empty() {
            debug!(
                "Domain {:?} has no grid cells; keeping {} seed points only.",
                self.bounds,
                self.points.len()
            );
            self.active.clear();
        }

        while !self.active.is_empty() {
            let index = rand_index(rng, self.active.len());
            let parent = self.active.swap_remove(index);
            self.stats.active_processed += 1;
            self.spawn_children(parent, k, rng);
        }

        trace!(
            "Poisson disk run finished: {} points, {} candidates evaluated, {} rejected.",
            self.points.len(),
            self.stats.candidates_evaluated,
            self.stats.candidates_rejected
        );
        self.sink
            .send(SamplingEvent::RunFinished { stats: self.stats });

        SamplingResult {
            points: self.points,
            stats: self.stats,
        }
    }
}

/// Generic sampling core shared by every entry point.
///
/// `initial_points` are copied verbatim to the front of the output and indexed; when
/// empty, the domain center is seeded instead (provided the policy admits it).
pub fn sample<P, S>(
    policy: &P,
    bounds: Rect,
    initial_points: &[Vec2],
    config: &SamplerConfig,
    rng: &mut dyn RngCore,
    mut sink: S,
) -> SamplingResult
where
    P: SeparationPolicy + ?Sized,
    S: EventSink,
{
    sink.send(SamplingEvent::RunStarted {
        bounds,
        initial_count: initial_points.len(),
        k: config.k,
    });

    let mut run = Run::new(policy, bounds, config.cell_exponent, sink);
    run.seed(initial_points);
    run.run(config.k, rng)
}

/// Poisson disk samples inside `bounds` with a constant minimum `separation`.
///
/// Higher `k` packs denser at higher cost. Without `initial_set` the domain center
/// seeds the run.
pub fn poisson_disk_distribution(
    separation: f32,
    bounds: Rect,
    initial_set: &[Vec2],
    k: usize,
    rng: &mut dyn RngCore,
) -> Vec<Vec2> {
    sample(
        &ConstantSeparation(separation),
        bounds,
        initial_set,
        &SamplerConfig::new(k),
        rng,
        (),
    )
    .points
}

/// Poisson disk samples inside `bounds` whose minimum separation around each point
/// is given by `distance`.
pub fn poisson_disk_distribution_with<F>(
    distance: F,
    bounds: Rect,
    initial_set: &[Vec2],
    k: usize,
    rng: &mut dyn RngCore,
) -> Vec<Vec2>
where
    F: Fn(Vec2) -> f32,
{
    sample(
        &VariableSeparation(distance),
        bounds,
        initial_set,
        &SamplerConfig::new(k),
        rng,
        (),
    )
    .points
}

/// Like [`poisson_disk_distribution_with`], additionally keeping only candidates for
/// which `admissible` holds.
pub fn poisson_disk_distribution_masked<F, G>(
    distance: F,
    admissible: G,
    bounds: Rect,
    initial_set: &[Vec2],
    k: usize,
    rng: &mut dyn RngCore,
) -> Vec<Vec2>
where
    F: Fn(Vec2) -> f32,
    G: Fn(Vec2) -> bool,
{
    sample(
        &MaskedSeparation::new(distance, admissible),
        bounds,
        initial_set,
        &SamplerConfig::new(k),
        rng,
        (),
    )
    .points
}

/// Poisson disk sampling strategy: a separation policy plus run configuration.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampling<P = ConstantSeparation> {
    /// Separation rule applied during the run.
    pub policy: P,
    /// Candidate count and grid layout.
    pub config: SamplerConfig,
    /// Points placed before sampling starts.
    pub initial_points: Vec<Vec2>,
}

impl PoissonDiskSampling<ConstantSeparation> {
    /// Create a strategy with a constant minimum `separation` and default config.
    pub fn new(separation: f32) -> Self {
        Self::with_policy(ConstantSeparation(separation))
    }

    /// Like [`Self::new`], rejecting separations that cannot produce a distribution.
    pub fn try_new(separation: f32) -> Result<Self> {
        if !separation.is_finite() || separation <= 0.0 {
            return Err(Error::InvalidSeparation { value: separation });
        }
        Ok(Self::new(separation))
    }
}

impl<P: SeparationPolicy> PoissonDiskSampling<P> {
    /// Create a strategy from an arbitrary separation policy.
    pub fn with_policy(policy: P) -> Self {
        Self {
            policy,
            config: SamplerConfig::default(),
            initial_points: Vec::new(),
        }
    }

    /// Sets the number of candidates per active point.
    pub fn with_k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }

    /// Replaces the run configuration.
    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the points placed before sampling starts.
    pub fn with_initial_points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Vec2>,
    {
        self.initial_points = points.into_iter().map(Into::into).collect();
        self
    }

    /// Run once, reporting progress to `sink`.
    pub fn sample_with_events<S: EventSink>(
        &self,
        bounds: Rect,
        rng: &mut dyn RngCore,
        sink: S,
    ) -> SamplingResult {
        sample(
            &self.policy,
            bounds,
            &self.initial_points,
            &self.config,
            rng,
            sink,
        )
    }

    /// Run once and return the points in output order.
    pub fn sample(&self, bounds: Rect, rng: &mut dyn RngCore) -> Vec<Vec2> {
        self.sample_with_events(bounds, rng, ()).points
    }
}

impl<P> PositionSampling for PoissonDiskSampling<P>
where
    P: SeparationPolicy + Send + Sync,
{
    fn generate(&self, domain: Rect, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        self.sample(domain, rng).into_iter().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::VecSink;
    use crate::sampling::tests::FixedRng;

    fn square(size: f32) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::splat(size))
    }

    fn assert_min_separation(points: &[Vec2], separation: f32) {
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d = points[i].distance(points[j]);
                assert!(
                    d >= separation - 1e-4,
                    "points {} and {} are {} apart, expected >= {}",
                    points[i],
                    points[j],
                    d,
                    separation
                );
            }
        }
    }

    /// Replays `PointAccepted` events and checks each accepted point against every
    /// point emitted before it, using the separation the sampler reported for it.
    fn assert_accepts_respect_their_separation(points: &[Vec2], events: &[SamplingEvent]) {
        let accepted: Vec<(Vec2, f32)> = events
            .iter()
            .filter_map(|e| match e {
                SamplingEvent::PointAccepted {
                    position,
                    separation,
                    ..
                } => Some((*position, *separation)),
                _ => None,
            })
            .collect();
        let prefix = points.len() - accepted.len();
        let mut earlier = points[..prefix].to_vec();

        for (i, &(position, separation)) in accepted.iter().enumerate() {
            assert_eq!(points[prefix + i], position, "events out of output order");
            assert!(separation.is_finite() && separation > 0.0);
            for &q in &earlier {
                let d = position.distance(q);
                assert!(
                    d >= separation - 1e-4,
                    "accepted {} is {} from earlier {}, its separation is {}",
                    position,
                    d,
                    q,
                    separation
                );
            }
            earlier.push(position);
        }
    }

    #[test]
    fn config_defaults_and_validation() {
        let config = SamplerConfig::default();
        assert_eq!(config.k, 30);
        assert_eq!(config.cell_exponent, 3);
        assert!(config.validate().is_ok());

        assert!(matches!(
            SamplerConfig::new(0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SamplerConfig::default().with_cell_exponent(17).validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn try_new_rejects_degenerate_separation() {
        assert!(PoissonDiskSampling::try_new(2.0).is_ok());
        for value in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                PoissonDiskSampling::try_new(value),
                Err(Error::InvalidSeparation { .. })
            ));
        }
    }

    #[test]
    fn dense_square_respects_separation_and_bounds() {
        let mut rng = StdRng::seed_from_u64(123);
        let bounds = square(100.0);
        let points = poisson_disk_distribution(10.0, bounds, &[], 30, &mut rng);

        assert!(
            (55..=85).contains(&points.len()),
            "unexpected point count {}",
            points.len()
        );
        assert_eq!(points[0], Vec2::new(50.0, 50.0));
        assert!(points.iter().all(|&p| bounds.contains(p)));
        assert_min_separation(&points, 10.0);
    }

    #[test]
    fn tiny_domain_yields_only_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = poisson_disk_distribution(10.0, square(1.0), &[], 10, &mut rng);
        assert_eq!(points, vec![Vec2::new(0.5, 0.5)]);
    }

    #[test]
    fn initial_points_form_output_prefix() {
        let mut rng = StdRng::seed_from_u64(99);
        let initial = [Vec2::new(5.0, 5.0), Vec2::new(50.0, 50.0)];
        let points = poisson_disk_distribution(10.0, square(100.0), &initial, 30, &mut rng);

        assert!(points.len() > 2);
        assert_eq!(&points[..2], &initial);
        assert_min_separation(&points, 10.0);
    }

    #[test]
    fn zero_k_returns_seed_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = poisson_disk_distribution(5.0, square(50.0), &[], 0, &mut rng);
        assert_eq!(points, vec![Vec2::new(25.0, 25.0)]);
    }

    #[test]
    fn constant_rng_walks_along_x_axis() {
        // Every draw is zero: radius = dist, angle = 0, so each child lands exactly
        // `dist` to the right of its parent until the domain edge stops the chain.
        let mut rng = FixedRng { value: 0 };
        let points = poisson_disk_distribution(10.0, square(40.0), &[], 3, &mut rng);
        assert_eq!(
            points,
            vec![
                Vec2::new(20.0, 20.0),
                Vec2::new(30.0, 20.0),
                Vec2::new(40.0, 20.0),
            ]
        );
    }

    #[test]
    fn degenerate_separation_spawns_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        for separation in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            let points = poisson_disk_distribution(separation, square(50.0), &[], 30, &mut rng);
            assert_eq!(points, vec![Vec2::new(25.0, 25.0)]);
        }
    }

    #[test]
    fn inverted_domain_returns_at_most_the_seed() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(-10.0, 10.0));
        let points = poisson_disk_distribution(1.0, bounds, &[], 30, &mut rng);
        assert_eq!(points, vec![bounds.center()]);
    }

    #[test]
    fn variable_separation_grows_with_x() {
        let mut rng = StdRng::seed_from_u64(2024);
        let bounds = square(200.0);
        let distance = |p: Vec2| 4.0 + p.x * 0.05;
        let points = poisson_disk_distribution_with(distance, bounds, &[], 20, &mut rng);

        let left = points.iter().filter(|p| p.x < 100.0).count();
        let right = points.len() - left;
        assert!(left > right, "left {left} should be denser than right {right}");
        assert!(points.iter().all(|&p| bounds.contains(p)));
        // The smallest separation anywhere bounds every pair from below.
        assert_min_separation(&points, 4.0);
    }

    #[test]
    fn masked_separation_keeps_points_inside_mask() {
        let mut rng = StdRng::seed_from_u64(31);
        let bounds = Rect::new(Vec2::splat(-50.0), Vec2::splat(100.0));
        let inside_disk = |p: Vec2| p.length() <= 40.0;
        let points =
            poisson_disk_distribution_masked(|_| 5.0, inside_disk, bounds, &[], 30, &mut rng);

        assert!(points.len() > 10);
        assert!(points.iter().all(|&p| inside_disk(p) && bounds.contains(p)));
        assert_min_separation(&points, 5.0);
    }

    #[test]
    fn variable_accepts_keep_their_local_separation() {
        let bounds = square(200.0);
        let policy = VariableSeparation(|p: Vec2| 4.0 + p.x * 0.05);
        let config = SamplerConfig::new(20);
        for seed in [1, 2024, 90210] {
            let mut sink = VecSink::new();
            let result = sample(
                &policy,
                bounds,
                &[],
                &config,
                &mut StdRng::seed_from_u64(seed),
                &mut sink,
            );
            assert!(result.points.len() > 50);
            assert_accepts_respect_their_separation(&result.points, sink.as_slice());
        }
    }

    #[test]
    fn masked_accepts_keep_their_local_separation() {
        let bounds = Rect::new(Vec2::splat(-60.0), Vec2::splat(120.0));
        let policy = MaskedSeparation::new(
            |p: Vec2| 3.0 + p.length() * 0.1,
            |p: Vec2| (15.0..=55.0).contains(&p.length()),
        );
        let initial = [Vec2::new(30.0, 0.0), Vec2::new(-30.0, 0.0)];
        let config = SamplerConfig::default();
        for seed in [5, 77, 4096] {
            let mut sink = VecSink::new();
            let result = sample(
                &policy,
                bounds,
                &initial,
                &config,
                &mut StdRng::seed_from_u64(seed),
                &mut sink,
            );
            assert_eq!(&result.points[..2], &initial);
            assert!(result.points.len() > 20);
            assert_accepts_respect_their_separation(&result.points, sink.as_slice());
        }
    }

    #[test]
    fn far_from_origin_domain_degrades_without_panicking() {
        let mut rng = StdRng::seed_from_u64(1);
        // f32 steps are 256 units here, so every candidate rounds back onto its parent.
        let bounds = Rect::new(Vec2::splat(-3.0e9), Vec2::splat(1.0e3));
        let points = poisson_disk_distribution(10.0, bounds, &[], 30, &mut rng);
        assert_eq!(points, vec![bounds.center()]);

        // Corners beyond the grid's integer range leave no cells to enforce separation.
        let bounds = Rect::new(Vec2::splat(-1.0e30), Vec2::splat(1.0e3));
        let points = poisson_disk_distribution(10.0, bounds, &[], 30, &mut rng);
        assert_eq!(points, vec![bounds.center()]);
    }

    #[test]
    fn masked_center_rejected_gives_empty_output() {
        let mut rng = StdRng::seed_from_u64(3);
        let points =
            poisson_disk_distribution_masked(|_| 5.0, |_| false, square(50.0), &[], 30, &mut rng);
        assert!(points.is_empty());
    }

    #[test]
    fn same_seed_same_output() {
        let strategy = PoissonDiskSampling::new(6.0).with_k(12);
        let bounds = Rect::new(Vec2::new(-30.0, 10.0), Vec2::new(80.0, 40.0));
        let a = strategy.sample(bounds, &mut StdRng::seed_from_u64(42));
        let b = strategy.sample(bounds, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn offset_domain_keeps_separation() {
        let mut rng = StdRng::seed_from_u64(8);
        let bounds = Rect::new(Vec2::new(250.0, -400.0), Vec2::new(60.0, 90.0));
        let points = poisson_disk_distribution(7.0, bounds, &[], 30, &mut rng);
        assert!(points.len() > 20);
        assert!(points.iter().all(|&p| bounds.contains(p)));
        assert_min_separation(&points, 7.0);
    }

    #[test]
    fn events_mirror_the_output() {
        let strategy = PoissonDiskSampling::new(8.0).with_k(10);
        let mut sink = VecSink::new();
        let result =
            strategy.sample_with_events(square(64.0), &mut StdRng::seed_from_u64(17), &mut sink);

        let events = sink.into_inner();
        assert!(matches!(
            events.first(),
            Some(SamplingEvent::RunStarted {
                initial_count: 0,
                k: 10,
                ..
            })
        ));
        assert!(matches!(
            events.get(1),
            Some(SamplingEvent::Seeded { position }) if *position == Vec2::splat(32.0)
        ));
        let accepted = events
            .iter()
            .filter(|e| matches!(e, SamplingEvent::PointAccepted { .. }))
            .count();
        assert_eq!(accepted + 1, result.points.len());
        assert_eq!(
            events.last(),
            Some(&SamplingEvent::RunFinished {
                stats: result.stats
            })
        );

        let stats = result.stats;
        assert_eq!(stats.active_processed, result.points.len());
        assert_eq!(stats.candidates_evaluated, stats.active_processed * 10);
        assert_eq!(
            stats.candidates_evaluated - stats.candidates_rejected,
            result.points.len() - 1
        );
    }

    #[test]
    fn out_of_domain_initial_points_are_reported() {
        let strategy = PoissonDiskSampling::new(5.0)
            .with_k(5)
            .with_initial_points([Vec2::new(500.0, 500.0)]);
        let mut sink = VecSink::new();
        let result =
            strategy.sample_with_events(square(20.0), &mut StdRng::seed_from_u64(4), &mut sink);

        assert_eq!(result.points, vec![Vec2::new(500.0, 500.0)]);
        assert_eq!(result.stats.index_drops, 1);
        assert!(sink
            .as_slice()
            .iter()
            .any(|e| matches!(e, SamplingEvent::IndexInsertDropped { .. })));
    }

    #[test]
    fn position_sampling_returns_mint_points() {
        let strategy = PoissonDiskSampling::new(3.0);
        let bounds = square(30.0);
        let points = strategy.generate(bounds, &mut StdRng::seed_from_u64(77));
        assert!(!points.is_empty());
        assert!(points.iter().all(|&p| bounds.contains(Vec2::from(p))));
    }
}
