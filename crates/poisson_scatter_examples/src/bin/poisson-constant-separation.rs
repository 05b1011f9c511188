use glam::Vec2;
use poisson_scatter::prelude::*;
use poisson_scatter_examples::{init_tracing, render_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Rect::try_new(Vec2::ZERO, Vec2::new(100.0, 100.0))?;
    let mut rng = StdRng::seed_from_u64(42);

    let points = poisson_disk_distribution(4.0, bounds, &[], 30, &mut rng);
    info!("Placed {} points at separation 4.0", points.len());

    let config = RenderConfig::new((800, 800), bounds);
    render_points_to_png(&points, &config, "poisson-constant-separation.png")?;
    Ok(())
}
