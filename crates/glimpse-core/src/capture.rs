//! Conversion of a finished render into a reusable, croppable frame.
//!
//! A [`RenderCapture`] snapshots the renderer's pixels right after a full
//! draw and anchors them to the view bounds active at that moment. Later
//! draws re-place the snapshot under whatever transform is current, which
//! is what makes cached pan/zoom frames land in the right spot.

use glam::DVec2;

use crate::error::CacheError;
use crate::frame::FrameBuffer;
use crate::geometry::{DeviceRect, PixelRect, ViewBounds};
use crate::render::{MeshRef, Renderer};
use crate::surface::PlotSurface;

/// Device pixels trimmed from each edge of the captured region so axis
/// tick marks don't end up inside the cached image.
const EDGE_INSET_PX: i64 = 5;

/// Grayscale quadrilateral mesh addressed by explicit data-space
/// coordinate arrays.
///
/// Cell `(row, col)` spans `xs[col]..xs[col + 1]` by `ys[row]..ys[row + 1]`
/// in data space and carries a single channel: the red channel of the
/// captured pixel. Green, blue, and alpha are discarded, so frames redrawn
/// through the mesh path come out grayscale.
#[derive(Debug, Clone)]
pub struct GrayMesh {
    /// Data-space x coordinate of each pixel column in the captured region.
    pub xs: Vec<f64>,
    /// Data-space y coordinate of each pixel row, top row first.
    pub ys: Vec<f64>,
    /// Cell values, row-major, `(ys.len() - 1) * (xs.len() - 1)` entries.
    pub cells: Vec<u8>,
}

impl GrayMesh {
    pub fn rows(&self) -> usize {
        self.ys.len().saturating_sub(1)
    }

    pub fn cols(&self) -> usize {
        self.xs.len().saturating_sub(1)
    }

    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols() + col]
    }
}

/// A finished render captured for cheap redraws.
///
/// Holds the cropped sub-image together with the data-space extent it was
/// rendered for, plus the mesh alternative used when an axis scale is
/// non-linear. The extent matches the view bounds at capture time exactly;
/// drawing under different bounds crops and rescales rather than stretching
/// the capture to fit.
#[derive(Debug, Clone)]
pub struct RenderCapture {
    image: FrameBuffer,
    extent: ViewBounds,
    mesh: GrayMesh,
    device_size: (u32, u32),
}

impl RenderCapture {
    /// Capture the renderer's current contents for the given surface.
    ///
    /// Fails with [`CacheError::DegenerateViewport`] when the inset view
    /// rectangle has no area (checked before any pixels are copied), and
    /// with [`CacheError::BufferSizeMismatch`] when the renderer's buffer
    /// disagrees with its reported dimensions.
    pub fn new(surface: &dyn PlotSurface, renderer: &dyn Renderer) -> Result<Self, CacheError> {
        let (width, height) = (renderer.width(), renderer.height());
        let frame_rect = PixelRect {
            x0: 0,
            y0: 0,
            x1: width as i64,
            y1: height as i64,
        };

        let bounds = surface.view_bounds();
        let a = surface.data_to_device(bounds.lower());
        let b = surface.data_to_device(bounds.upper());
        let inset = PixelRect::from_corners(a, b)
            .shrink(EDGE_INSET_PX)
            .intersect(frame_rect);
        if inset.is_empty() {
            return Err(CacheError::DegenerateViewport {
                width: inset.width(),
                height: inset.height(),
            });
        }

        let full = FrameBuffer::from_rgba(width, height, renderer.buffer_rgba())?;
        let image = full.crop(inset);

        // Data coordinates of every pixel column and row inside the inset
        // rectangle, obtained by inverting the current view transform.
        let xs: Vec<f64> = (inset.x0..inset.x1)
            .map(|px| surface.device_to_data(DVec2::new(px as f64, inset.y0 as f64)).x)
            .collect();
        let ys: Vec<f64> = (inset.y0..inset.y1)
            .map(|py| surface.device_to_data(DVec2::new(inset.x0 as f64, py as f64)).y)
            .collect();

        let (x_lo, x_hi) = min_max(&xs);
        let (y_lo, y_hi) = min_max(&ys);
        let extent = ViewBounds::new(x_lo, x_hi, y_lo, y_hi);

        // Mesh cells keep the red channel only. The last pixel row and
        // column have no outer edge coordinate and are dropped.
        let (cell_rows, cell_cols) = (image.height as usize - 1, image.width as usize - 1);
        let mut cells = Vec::with_capacity(cell_rows * cell_cols);
        for y in 0..cell_rows as u32 {
            for x in 0..cell_cols as u32 {
                cells.push(image.pixel(x, y)[0]);
            }
        }

        tracing::trace!(
            "captured {}x{} region inset from {}x{} device pixels",
            image.width,
            image.height,
            width,
            height
        );

        Ok(Self {
            image,
            extent,
            mesh: GrayMesh { xs, ys, cells },
            device_size: (width, height),
        })
    }

    /// Redraw the captured frame against the surface's current view.
    ///
    /// The representation is chosen from the surface's scale modes at call
    /// time, never from the modes at capture time: the direct image when
    /// both axes are linear, the mesh otherwise. Idempotent; the capture is
    /// not mutated.
    pub fn draw(&self, surface: &dyn PlotSurface, renderer: &mut dyn Renderer) {
        if surface.x_scale().is_linear() && surface.y_scale().is_linear() {
            let a = surface.data_to_device(self.extent.lower());
            let b = surface.data_to_device(self.extent.upper());
            renderer.draw_image(&self.image, DeviceRect::from_corners(a, b));
        } else {
            // Transforming each stored coordinate keeps the cells aligned
            // with the non-uniform device spacing a non-linear scale
            // produces; the flat image cannot represent that spacing.
            let xs: Vec<f64> = self
                .mesh
                .xs
                .iter()
                .map(|&x| surface.data_to_device(DVec2::new(x, self.extent.y_min)).x)
                .collect();
            let ys: Vec<f64> = self
                .mesh
                .ys
                .iter()
                .map(|&y| surface.data_to_device(DVec2::new(self.extent.x_min, y)).y)
                .collect();
            renderer.draw_mesh(MeshRef {
                xs: &xs,
                ys: &ys,
                cells: &self.mesh.cells,
            });
        }
    }

    /// Renderer dimensions at capture time.
    pub const fn device_size(&self) -> (u32, u32) {
        self.device_size
    }

    /// Data-space extent of the captured image.
    pub const fn extent(&self) -> ViewBounds {
        self.extent
    }

    /// The cropped sub-image.
    pub fn image(&self) -> &FrameBuffer {
        &self.image
    }

    /// The mesh alternative.
    pub fn mesh(&self) -> &GrayMesh {
        &self.mesh
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
