//! Synthetic scatter-plot surface used by the demo session.

use glam::DVec2;
use glimpse_core::{Axis, AxisScale, CacheError, DeviceRect, PlotSurface, Renderer, ViewBounds};

/// Tick length in device pixels, drawn inward from the canvas edge.
const TICK_LEN: f64 = 4.0;
/// Interval count per linear axis; one more mark than this is drawn.
const LINEAR_TICKS: usize = 5;

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const CHROME: [u8; 4] = [60, 60, 60, 255];

/// One scatter marker in data space.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub pos: DVec2,
    pub radius: f64,
    pub color: [u8; 4],
}

/// A scatter plot that renders itself through the shared primitive set.
/// Stands in for the host plotting library's axes object.
pub struct ScatterSurface {
    bounds: ViewBounds,
    x_scale: AxisScale,
    y_scale: AxisScale,
    device: (u32, u32),
    markers: Vec<Marker>,
}

impl ScatterSurface {
    pub fn new(device: (u32, u32), bounds: ViewBounds, markers: Vec<Marker>) -> Self {
        Self {
            bounds,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            device,
            markers,
        }
    }

    pub fn set_y_scale(&mut self, scale: AxisScale) {
        self.y_scale = scale;
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Shift the view bounds by a fraction of their current span.
    pub fn pan_fraction(&mut self, fx: f64, fy: f64) {
        let dx = (self.bounds.x_max - self.bounds.x_min) * fx;
        let dy = (self.bounds.y_max - self.bounds.y_min) * fy;
        self.bounds.x_min += dx;
        self.bounds.x_max += dx;
        self.bounds.y_min += dy;
        self.bounds.y_max += dy;
    }

    fn fraction(scale: AxisScale, lo: f64, hi: f64, v: f64) -> f64 {
        match scale {
            AxisScale::Linear => (v - lo) / (hi - lo),
            AxisScale::Log => (v.log10() - lo.log10()) / (hi.log10() - lo.log10()),
        }
    }

    fn unfraction(scale: AxisScale, lo: f64, hi: f64, f: f64) -> f64 {
        match scale {
            AxisScale::Linear => lo + f * (hi - lo),
            AxisScale::Log => 10f64.powf(lo.log10() + f * (hi.log10() - lo.log10())),
        }
    }

    /// Tick positions in data space: even subdivisions on a linear axis,
    /// decades on a log axis.
    fn ticks(scale: AxisScale, lo: f64, hi: f64) -> Vec<f64> {
        match scale {
            AxisScale::Linear => (0..=LINEAR_TICKS)
                .map(|i| lo + (hi - lo) * i as f64 / LINEAR_TICKS as f64)
                .collect(),
            AxisScale::Log => {
                let lo_exp = lo.log10().ceil() as i32;
                let hi_exp = hi.log10().floor() as i32;
                (lo_exp..=hi_exp).map(|e| 10f64.powi(e)).collect()
            }
        }
    }
}

impl PlotSurface for ScatterSurface {
    fn view_bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn x_scale(&self) -> AxisScale {
        self.x_scale
    }

    fn y_scale(&self) -> AxisScale {
        self.y_scale
    }

    fn data_to_device(&self, point: DVec2) -> DVec2 {
        let fx = Self::fraction(self.x_scale, self.bounds.x_min, self.bounds.x_max, point.x);
        let fy = Self::fraction(self.y_scale, self.bounds.y_min, self.bounds.y_max, point.y);
        DVec2::new(fx * self.device.0 as f64, (1.0 - fy) * self.device.1 as f64)
    }

    fn device_to_data(&self, point: DVec2) -> DVec2 {
        let fx = point.x / self.device.0 as f64;
        let fy = 1.0 - point.y / self.device.1 as f64;
        DVec2::new(
            Self::unfraction(self.x_scale, self.bounds.x_min, self.bounds.x_max, fx),
            Self::unfraction(self.y_scale, self.bounds.y_min, self.bounds.y_max, fy),
        )
    }

    fn draw_full(&mut self, renderer: &mut dyn Renderer) -> Result<(), CacheError> {
        self.draw_background(renderer);
        for marker in &self.markers {
            let center = self.data_to_device(marker.pos);
            renderer.fill_circle(center, marker.radius, marker.color);
        }
        self.draw_axis(renderer, Axis::X);
        self.draw_axis(renderer, Axis::Y);
        self.draw_frame(renderer);
        Ok(())
    }

    fn draw_background(&mut self, renderer: &mut dyn Renderer) {
        let rect = DeviceRect {
            x0: 0.0,
            y0: 0.0,
            x1: self.device.0 as f64,
            y1: self.device.1 as f64,
        };
        renderer.fill_rect(rect, BACKGROUND);
    }

    fn draw_axis(&mut self, renderer: &mut dyn Renderer, axis: Axis) {
        match axis {
            Axis::X => {
                let base = self.device.1 as f64 - 1.0;
                for t in Self::ticks(self.x_scale, self.bounds.x_min, self.bounds.x_max) {
                    let x = self.data_to_device(DVec2::new(t, self.bounds.y_min)).x;
                    renderer.draw_line(
                        DVec2::new(x, base),
                        DVec2::new(x, base - TICK_LEN),
                        CHROME,
                    );
                }
            }
            Axis::Y => {
                for t in Self::ticks(self.y_scale, self.bounds.y_min, self.bounds.y_max) {
                    let y = self.data_to_device(DVec2::new(self.bounds.x_min, t)).y;
                    renderer.draw_line(DVec2::new(0.0, y), DVec2::new(TICK_LEN, y), CHROME);
                }
            }
        }
    }

    fn draw_frame(&mut self, renderer: &mut dyn Renderer) {
        let w = self.device.0 as f64 - 1.0;
        let h = self.device.1 as f64 - 1.0;
        let corners = [
            (DVec2::new(0.0, 0.0), DVec2::new(w, 0.0)),
            (DVec2::new(w, 0.0), DVec2::new(w, h)),
            (DVec2::new(w, h), DVec2::new(0.0, h)),
            (DVec2::new(0.0, h), DVec2::new(0.0, 0.0)),
        ];
        for (from, to) in corners {
            renderer.draw_line(from, to, CHROME);
        }
    }
}
