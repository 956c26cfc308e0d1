//! Glimpse demo — cached pan/zoom over an expensive scatter render.
//!
//! Renders a large random scatter through a [`FrameCache`]: the first draw
//! rasterizes every marker, the simulated drag redraws from the capture,
//! and the release draw rasterizes in full again. Timings land in the log;
//! set `GLIMPSE_SNAPSHOT_DIR` to also write PNG snapshots of each phase,
//! and `GLIMPSE_LOG_Y` to run the session on a log y axis (mesh path).

mod config;
mod events;
mod raster;
mod scatter;

use std::error::Error;
use std::path::Path;
use std::time::Instant;

use glam::DVec2;
use glimpse_core::{AxisScale, CanvasEvent, FrameCache, MouseButton, Renderer, ViewBounds};

use config::DemoConfig;
use events::EventBus;
use raster::SoftwareRenderer;
use scatter::{Marker, ScatterSurface};

/// Deterministic xorshift generator for the synthetic data set.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Standard normal via Box-Muller.
    fn normal(&mut self) -> f64 {
        let u = self.uniform().max(f64::MIN_POSITIVE);
        let v = self.uniform();
        (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * v).cos()
    }
}

fn markers(cfg: &DemoConfig) -> Vec<Marker> {
    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);
    (0..cfg.points)
        .map(|_| {
            let x = rng.normal();
            let y = if cfg.log_y {
                // Log-normal keeps every point on the positive y axis.
                10f64.powf(rng.normal() * 0.5)
            } else {
                rng.normal()
            };
            let shade = (rng.uniform() * 255.0) as u8;
            Marker {
                pos: DVec2::new(x, y),
                radius: 1.0 + rng.uniform() * 2.0,
                color: [40, shade, 200, 51],
            }
        })
        .collect()
}

fn snapshot(renderer: &SoftwareRenderer, dir: &Path, name: &str) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let img = image::RgbaImage::from_raw(
        renderer.width(),
        renderer.height(),
        renderer.buffer_rgba().to_vec(),
    )
    .ok_or("renderer buffer does not match its dimensions")?;
    let path = dir.join(name);
    img.save(&path)?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let cfg = DemoConfig::default();
    tracing::info!(
        "rendering {} points on a {}x{} canvas",
        cfg.points,
        cfg.size,
        cfg.size
    );

    let bounds = if cfg.log_y {
        ViewBounds::new(-3.0, 3.0, 0.05, 20.0)
    } else {
        ViewBounds::new(-3.0, 3.0, -3.0, 3.0)
    };
    let mut surface = ScatterSurface::new((cfg.size, cfg.size), bounds, markers(&cfg));
    if cfg.log_y {
        surface.set_y_scale(AxisScale::Log);
    }

    let mut events = EventBus::new();
    let mut cache = FrameCache::attach(surface, &mut events);
    let mut renderer = SoftwareRenderer::new(cfg.size, cfg.size);

    // First draw renders every marker and captures the frame.
    let start = Instant::now();
    cache.draw(&mut renderer)?;
    tracing::info!("full draw took {:?}", start.elapsed());
    if let Some(dir) = &cfg.snapshot_dir {
        snapshot(&renderer, dir, "initial.png")?;
    }

    // Simulated drag: the view shifts a little each step while the cached
    // frame stands in for the scatter.
    let start = Instant::now();
    for _ in 0..cfg.pan_steps {
        cache.surface_mut().pan_fraction(0.01, 0.0);
        cache.draw(&mut renderer)?;
    }
    let elapsed = start.elapsed();
    tracing::info!(
        "{} cached draws took {:?} ({:?} per frame)",
        cfg.pan_steps,
        elapsed,
        elapsed / cfg.pan_steps.max(1) as u32
    );
    if let Some(dir) = &cfg.snapshot_dir {
        snapshot(&renderer, dir, "panning.png")?;
    }

    // Releasing the button invalidates the capture; the next draw is full.
    events.emit(&CanvasEvent::ButtonRelease {
        button: MouseButton::Left,
        x: cfg.size as f64 / 2.0,
        y: cfg.size as f64 / 2.0,
    });
    let start = Instant::now();
    cache.draw(&mut renderer)?;
    tracing::info!("post-release draw took {:?}", start.elapsed());
    if let Some(dir) = &cfg.snapshot_dir {
        snapshot(&renderer, dir, "settled.png")?;
    }

    let surface = cache.detach(&mut events);
    tracing::info!("session done; {} markers", surface.marker_count());
    Ok(())
}
