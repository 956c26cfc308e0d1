//! Cache controller: the draw decorator that arbitrates between full and
//! cached redraws.

use std::cell::RefCell;
use std::rc::Rc;

use crate::capture::RenderCapture;
use crate::error::CacheError;
use crate::events::{EventKind, EventSource, SubscriptionId};
use crate::geometry::Axis;
use crate::render::Renderer;
use crate::surface::PlotSurface;

type Slot = Rc<RefCell<Option<RenderCapture>>>;

/// Caches a surface's rendered frame across draws.
///
/// Wraps a [`PlotSurface`] and replaces its draw path. The first draw after
/// the slot empties performs the full render and captures the result;
/// subsequent draws re-place the capture and re-render only the chrome
/// (background, axis decorations, frame) so text and lines stay crisp.
/// Releasing a mouse button or resizing the canvas empties the slot, and
/// the next draw renders in full again.
///
/// The host registers this wrapper as the surface's active draw handler;
/// the surface itself is never patched. The slot is shared with the event
/// handlers through `Rc<RefCell<..>>`; everything runs synchronously on the
/// host's event loop, so there is no concurrent access.
pub struct FrameCache<S> {
    surface: S,
    slot: Slot,
    subscriptions: Vec<SubscriptionId>,
}

impl<S: PlotSurface> FrameCache<S> {
    /// Wrap `surface` and register invalidation handlers with `events`.
    pub fn attach(surface: S, events: &mut dyn EventSource) -> Self {
        let slot: Slot = Rc::new(RefCell::new(None));
        let subscriptions = [EventKind::ButtonRelease, EventKind::Resize]
            .into_iter()
            .map(|kind| {
                let slot = Rc::clone(&slot);
                events.subscribe(
                    kind,
                    Box::new(move |event| {
                        if slot.borrow_mut().take().is_some() {
                            tracing::debug!("cached frame dropped on {:?}", event.kind());
                        }
                    }),
                )
            })
            .collect();
        Self {
            surface,
            slot,
            subscriptions,
        }
    }

    /// Unregister the invalidation handlers and hand the surface back.
    pub fn detach(self, events: &mut dyn EventSource) -> S {
        let Self {
            surface,
            subscriptions,
            ..
        } = self;
        for id in subscriptions {
            events.unsubscribe(id);
        }
        surface
    }

    /// Draw the surface, taking the cached path when a valid capture exists.
    ///
    /// Misses delegate to [`PlotSurface::draw_full`]; its errors propagate
    /// and leave the slot empty. A capture taken at a different device size
    /// than the renderer currently reports is discarded rather than
    /// stretched, and a viewport too small to capture stays uncached
    /// without failing the draw.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<(), CacheError> {
        let device_size = (renderer.width(), renderer.height());
        let cached = self
            .slot
            .borrow_mut()
            .take()
            .filter(|capture| capture.device_size() == device_size);

        match cached {
            None => {
                tracing::debug!(
                    "cache miss: full draw at {}x{}",
                    device_size.0,
                    device_size.1
                );
                self.surface.draw_full(renderer)?;
                match RenderCapture::new(&self.surface, &*renderer) {
                    Ok(capture) => *self.slot.borrow_mut() = Some(capture),
                    Err(CacheError::DegenerateViewport { width, height }) => {
                        tracing::debug!("viewport {width}x{height} too small to cache");
                    }
                    Err(err) => return Err(err),
                }
            }
            Some(capture) => {
                tracing::trace!("cache hit: redrawing captured frame");
                self.surface.draw_background(renderer);
                capture.draw(&self.surface, renderer);
                self.surface.draw_axis(renderer, Axis::X);
                self.surface.draw_axis(renderer, Axis::Y);
                self.surface.draw_frame(renderer);
                *self.slot.borrow_mut() = Some(capture);
            }
        }
        Ok(())
    }

    /// Empty the cache slot so the next draw performs a full render.
    /// Callable any time; no effect when already empty.
    pub fn reset(&mut self) {
        if self.slot.borrow_mut().take().is_some() {
            tracing::debug!("cache reset");
        }
    }

    /// Whether a captured frame is currently stored.
    pub fn is_cached(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the wrapped surface, e.g. to update its view
    /// bounds during a pan.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
