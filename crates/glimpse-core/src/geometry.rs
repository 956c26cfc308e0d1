//! Coordinate types shared between the cache and its host surface.
//!
//! Device coordinates have their origin at the top-left of the canvas with
//! y increasing downward; data coordinates are whatever the host surface
//! plots in, related to device space through the surface's view transform.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Data-space x/y ranges of a plot surface's current view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Corner at the minimum of both ranges.
    pub const fn lower(&self) -> DVec2 {
        DVec2::new(self.x_min, self.y_min)
    }

    /// Corner at the maximum of both ranges.
    pub const fn upper(&self) -> DVec2 {
        DVec2::new(self.x_max, self.y_max)
    }
}

/// Scale mode of one plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisScale {
    /// Uniform mapping between data and device space.
    Linear,
    /// Logarithmic mapping; device spacing is non-uniform in data space.
    Log,
}

impl AxisScale {
    pub const fn is_linear(self) -> bool {
        matches!(self, Self::Linear)
    }
}

/// Identifies one of the two plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle in integer device pixels.
///
/// Upper bounds are exclusive, so `width` and `height` count whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    /// Rectangle spanning two device-space corners, normalized so `x0 <= x1`
    /// and `y0 <= y1`. Coordinates truncate toward zero.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let (ax, bx) = (a.x.trunc() as i64, b.x.trunc() as i64);
        let (ay, by) = (a.y.trunc() as i64, b.y.trunc() as i64);
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    pub const fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> i64 {
        self.y1 - self.y0
    }

    /// Move every side inward by `margin` pixels.
    pub const fn shrink(&self, margin: i64) -> Self {
        Self {
            x0: self.x0 + margin,
            y0: self.y0 + margin,
            x1: self.x1 - margin,
            y1: self.y1 - margin,
        }
    }

    /// Overlap with `other`. May come out empty; check [`is_empty`].
    ///
    /// [`is_empty`]: PixelRect::is_empty
    pub fn intersect(&self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Axis-aligned rectangle in f64 device coordinates, used to place a cached
/// image under the current view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl DeviceRect {
    /// Rectangle spanning two corners, normalized so `x0 <= x1` and `y0 <= y1`.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rect_normalizes_corners() {
        let rect = PixelRect::from_corners(DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0));
        assert_eq!(rect, PixelRect { x0: 0, y0: 0, x1: 100, y1: 100 });
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 100);
    }

    #[test]
    fn shrink_insets_every_side() {
        let rect = PixelRect { x0: 0, y0: 0, x1: 100, y1: 80 }.shrink(5);
        assert_eq!(rect, PixelRect { x0: 5, y0: 5, x1: 95, y1: 75 });
        assert_eq!(rect.width(), 90);
        assert_eq!(rect.height(), 70);
    }

    #[test]
    fn shrink_past_center_is_empty() {
        let rect = PixelRect { x0: 0, y0: 0, x1: 8, y1: 8 }.shrink(5);
        assert!(rect.is_empty());
    }

    #[test]
    fn intersect_clamps_to_frame() {
        let frame = PixelRect { x0: 0, y0: 0, x1: 64, y1: 64 };
        let rect = PixelRect { x0: -10, y0: 5, x1: 80, y1: 60 }.intersect(frame);
        assert_eq!(rect, PixelRect { x0: 0, y0: 5, x1: 64, y1: 60 });
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = PixelRect { x0: 0, y0: 0, x1: 10, y1: 10 };
        let b = PixelRect { x0: 20, y0: 20, x1: 30, y1: 30 };
        assert!(a.intersect(b).is_empty());
    }
}
