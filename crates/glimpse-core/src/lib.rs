//! Glimpse Core — cached-frame redraws for interactive plot surfaces.
//!
//! When the full render of a plot is expensive (a scatter of a hundred
//! thousand points, say), redrawing it for every frame of a pan or zoom
//! can't keep up with the pointer. [`FrameCache`] wraps a surface's draw
//! path instead: the first draw is rendered in full and captured as a
//! bitmap, and while an interaction is in flight each subsequent draw
//! re-places that bitmap cropped and rescaled against the current view,
//! re-rendering only the chrome. Releasing the mouse button drops the
//! capture, so the next draw is sharp again.
//!
//! The host plotting stack stays external. It supplies the surface, the
//! render backend, and the event stream through the [`PlotSurface`],
//! [`Renderer`], and [`EventSource`] traits; this crate owns only the
//! capture math and the cache lifecycle.

pub mod cache;
pub mod capture;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod render;
pub mod surface;

// Re-exports for convenience.
pub use cache::FrameCache;
pub use capture::{GrayMesh, RenderCapture};
pub use error::CacheError;
pub use events::{CanvasEvent, EventHandler, EventKind, EventSource, MouseButton, SubscriptionId};
pub use frame::FrameBuffer;
pub use geometry::{Axis, AxisScale, DeviceRect, PixelRect, ViewBounds};
pub use render::{MeshRef, Renderer};
pub use surface::PlotSurface;
