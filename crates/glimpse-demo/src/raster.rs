//! Minimal CPU rasterizer implementing the render-backend capability.

use glam::DVec2;
use glimpse_core::{DeviceRect, FrameBuffer, MeshRef, Renderer};

/// Render target backed by an RGBA byte buffer, rows top to bottom.
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![255; width as usize * height as usize * 4],
        }
    }

    /// Source-over blend of `color` onto the pixel at `(x, y)`.
    /// Coordinates outside the canvas are ignored.
    fn blend(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let a = color[3] as u32;
        for c in 0..3 {
            let src = color[c] as u32;
            let dst = self.buffer[i + c] as u32;
            self.buffer[i + c] = ((src * a + dst * (255 - a) + 127) / 255) as u8;
        }
        self.buffer[i + 3] = 255;
    }
}

impl Renderer for SoftwareRenderer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn buffer_rgba(&self) -> &[u8] {
        &self.buffer
    }

    fn fill_rect(&mut self, rect: DeviceRect, color: [u8; 4]) {
        let (x0, x1) = (rect.x0.floor() as i64, rect.x1.ceil() as i64);
        let (y0, y1) = (rect.y0.floor() as i64, rect.y1.ceil() as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: [u8; 4]) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i64;
        if steps == 0 {
            self.blend(from.x.round() as i64, from.y.round() as i64, color);
            return;
        }
        let step = delta / steps as f64;
        let mut p = from;
        for _ in 0..=steps {
            self.blend(p.x.round() as i64, p.y.round() as i64, color);
            p += step;
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: [u8; 4]) {
        let r2 = radius * radius;
        let (y0, y1) = (
            (center.y - radius).floor() as i64,
            (center.y + radius).ceil() as i64,
        );
        let (x0, x1) = (
            (center.x - radius).floor() as i64,
            (center.x + radius).ceil() as i64,
        );
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 - center.x;
                let dy = y as f64 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn draw_image(&mut self, image: &FrameBuffer, rect: DeviceRect) {
        if image.width == 0 || image.height == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let x0 = rect.x0.floor().max(0.0) as i64;
        let y0 = rect.y0.floor().max(0.0) as i64;
        let x1 = (rect.x1.ceil() as i64).min(self.width as i64);
        let y1 = (rect.y1.ceil() as i64).min(self.height as i64);

        // Nearest-neighbor sample at each covered pixel's center.
        for y in y0..y1 {
            let v = (y as f64 + 0.5 - rect.y0) / rect.height();
            let sy = ((v * image.height as f64) as i64).clamp(0, image.height as i64 - 1) as u32;
            for x in x0..x1 {
                let u = (x as f64 + 0.5 - rect.x0) / rect.width();
                let sx = ((u * image.width as f64) as i64).clamp(0, image.width as i64 - 1) as u32;
                self.blend(x, y, image.pixel(sx, sy));
            }
        }
    }

    fn draw_mesh(&mut self, mesh: MeshRef<'_>) {
        let cols = mesh.xs.len().saturating_sub(1);
        for row in 0..mesh.ys.len().saturating_sub(1) {
            for col in 0..cols {
                let v = mesh.cells[row * cols + col];
                let rect = DeviceRect::from_corners(
                    DVec2::new(mesh.xs[col], mesh.ys[row]),
                    DVec2::new(mesh.xs[col + 1], mesh.ys[row + 1]),
                );
                self.fill_rect(rect, [v, v, v, 255]);
            }
        }
    }
}
