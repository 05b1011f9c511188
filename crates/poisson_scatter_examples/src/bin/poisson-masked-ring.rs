use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, PointStyle, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Rect::try_new(Vec2::new(-50.0, -50.0), Vec2::new(100.0, 100.0))?;
    let mut rng = StdRng::seed_from_u64(2024);

    let in_ring = |p: Vec2| (15.0..=45.0).contains(&p.length());
    // The domain center is outside the ring, so seed inside it.
    let initial = [Vec2::new(30.0, 0.0)];
    let strategy = PoissonDiskSampling::with_policy(MaskedSeparation::new(|_| 2.5, in_ring))
        .with_initial_points(initial)
        .with_k(30);

    let mut sink = VecSink::new();
    let result = strategy.sample_with_events(bounds, &mut rng, &mut sink);
    info!(
        "Placed {} points in the ring ({} candidates evaluated, {} rejected, {} events)",
        result.points.len(),
        result.stats.candidates_evaluated,
        result.stats.candidates_rejected,
        sink.len()
    );

    let config = RenderConfig::new((800, 800), bounds)
        .with_background([20, 22, 30])
        .with_style(PointStyle {
            color: [230, 120, 90],
            radius: 2,
        });
    render_points_to_png(&result.points, &config, "poisson-masked-ring.png")?;
    Ok(())
}
