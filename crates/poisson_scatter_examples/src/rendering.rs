//! PNG rendering helpers shared by the example binaries.
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgb, RgbImage};
use poisson_scatter::geometry::Rect;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when several examples share a process.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How a single point is drawn.
#[derive(Debug, Clone, Copy)]
pub struct PointStyle {
    pub color: [u8; 3],
    /// Disc radius in pixels.
    pub radius: i32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: [30, 30, 30],
            radius: 3,
        }
    }
}

/// Maps a sampling domain onto an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain: Rect,
    pub background: [u8; 3],
    pub style: PointStyle,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain: Rect) -> Self {
        Self {
            image_size,
            domain,
            background: [245, 245, 240],
            style: PointStyle::default(),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }

    fn to_pixel(&self, p: Vec2) -> (i32, i32) {
        let (w, h) = self.image_size;
        let uv = (p - self.domain.min) / self.domain.size;
        ((uv.x * w as f32) as i32, (uv.y * h as f32) as i32)
    }
}

/// Draw `points` as filled discs and write the image to `path`.
pub fn render_points_to_png(
    points: &[Vec2],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    for &p in points {
        let (cx, cy) = config.to_pixel(p);
        fill_disc(&mut img, cx, cy, config.style.radius, Rgb(config.style.color));
    }

    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} points to {}", points.len(), path.display());
    Ok(())
}

fn fill_disc(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if (0..w).contains(&x) && (0..h).contains(&y) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
