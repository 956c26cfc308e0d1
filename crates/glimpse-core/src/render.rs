//! Render-target capability consumed from the host.

use glam::DVec2;

use crate::frame::FrameBuffer;
use crate::geometry::DeviceRect;

/// Borrowed mesh data handed to [`Renderer::draw_mesh`].
///
/// `xs` and `ys` are device-space edge coordinates for cell columns and
/// rows; `cells` is row-major with `(ys.len() - 1) * (xs.len() - 1)`
/// grayscale values. Cell `(row, col)` spans `xs[col]..xs[col + 1]` by
/// `ys[row]..ys[row + 1]`.
#[derive(Debug, Clone, Copy)]
pub struct MeshRef<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub cells: &'a [u8],
}

/// A render backend the host hands into draw calls.
///
/// After a full draw completes the backend exposes its device dimensions
/// and raw RGBA contents for capture. The drawing methods are the primitive
/// set the cache and its surface render with: flat fills and lines for
/// chrome and markers, plus the image and mesh placements a captured frame
/// needs. All coordinates are device-space.
pub trait Renderer {
    /// Device width in pixels.
    fn width(&self) -> u32;

    /// Device height in pixels.
    fn height(&self) -> u32;

    /// Raw RGBA contents, row-major top to bottom, `width * height * 4` bytes.
    fn buffer_rgba(&self) -> &[u8];

    /// Fill `rect` with a flat color.
    fn fill_rect(&mut self, rect: DeviceRect, color: [u8; 4]);

    /// Draw a one-pixel line segment.
    fn draw_line(&mut self, from: DVec2, to: DVec2, color: [u8; 4]);

    /// Fill a circle of `radius` device pixels around `center`.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: [u8; 4]);

    /// Scale `image` into `rect` with nearest-neighbor sampling.
    fn draw_image(&mut self, image: &FrameBuffer, rect: DeviceRect);

    /// Fill the quadrilateral mesh cells described by `mesh`.
    fn draw_mesh(&mut self, mesh: MeshRef<'_>);
}
