use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, PointStyle, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Rect::try_new(Vec2::ZERO, Vec2::new(100.0, 100.0))?;
    let config = SamplerConfig::new(30).with_cell_exponent(3);
    config.validate()?;

    // A hand-placed diagonal the sampler fills around.
    let initial: Vec<Vec2> = (0..10)
        .map(|i| Vec2::splat(5.0 + i as f32 * 10.0))
        .collect();

    let mut rng = StdRng::seed_from_u64(3);
    let mut accepted = 0usize;
    let sink = FnSink::new(|event| match event {
        SamplingEvent::PointAccepted { .. } => accepted += 1,
        SamplingEvent::IndexInsertDropped { position } => {
            warn!("Point {} was not indexed", position);
        }
        _ => {}
    });
    let result = sample(
        &ConstantSeparation(6.0),
        bounds,
        &initial,
        &config,
        &mut rng,
        sink,
    );
    info!(
        "{} initial points, {} accepted, {} total",
        initial.len(),
        accepted,
        result.points.len()
    );

    let render = RenderConfig::new((800, 800), bounds).with_style(PointStyle {
        color: [20, 90, 40],
        radius: 3,
    });
    render_points_to_png(&result.points, &render, "poisson-seeded-initial-points.png")?;
    Ok(())
}
