use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, PointStyle, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Rect::try_new(Vec2::ZERO, Vec2::new(200.0, 100.0))?;
    let mut rng = StdRng::seed_from_u64(7);

    // Stippling-style gradient: dense on the left, sparse on the right.
    let distance = |p: Vec2| 1.5 + 10.0 * (p.x / 200.0).powi(2);
    let points = poisson_disk_distribution_with(distance, bounds, &[], 30, &mut rng);
    info!("Placed {} points along a separation gradient", points.len());

    let config = RenderConfig::new((1200, 600), bounds).with_style(PointStyle {
        color: [20, 20, 60],
        radius: 2,
    });
    render_points_to_png(&points, &config, "poisson-variable-separation.png")?;
    Ok(())
}
