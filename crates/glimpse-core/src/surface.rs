//! Plot-surface capability consumed from the host.

use glam::DVec2;

use crate::error::CacheError;
use crate::geometry::{Axis, AxisScale, ViewBounds};
use crate::render::Renderer;

/// The plot surface whose draws are being cached.
///
/// Coordinate transforms are separable per axis: the device x of a point
/// depends only on its data x, and likewise for y. The transform reflects
/// the surface's current view bounds and scale modes, so its output for a
/// fixed data point changes as the user pans or zooms.
///
/// The draw methods split the host's render path the way the cache needs
/// it: [`draw_full`] is the expensive everything-draw used on a cache miss,
/// while the chrome methods re-render only the cheap decorations that must
/// stay crisp over a cached bitmap.
///
/// [`draw_full`]: PlotSurface::draw_full
pub trait PlotSurface {
    /// Current data-space view bounds.
    fn view_bounds(&self) -> ViewBounds;

    /// Scale mode of the x axis.
    fn x_scale(&self) -> AxisScale;

    /// Scale mode of the y axis.
    fn y_scale(&self) -> AxisScale;

    /// Map a data-space point to device pixels.
    fn data_to_device(&self, point: DVec2) -> DVec2;

    /// Map a device-pixel point back to data space.
    fn device_to_data(&self, point: DVec2) -> DVec2;

    /// The full draw: content plus all decorations.
    fn draw_full(&mut self, renderer: &mut dyn Renderer) -> Result<(), CacheError>;

    /// Background patch behind the plot content.
    fn draw_background(&mut self, renderer: &mut dyn Renderer);

    /// Tick marks and labels for one axis.
    fn draw_axis(&mut self, renderer: &mut dyn Renderer, axis: Axis);

    /// Border spines around the plot area.
    fn draw_frame(&mut self, renderer: &mut dyn Renderer);
}
