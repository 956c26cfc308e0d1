//! End-to-end behavior of the frame cache against mock host collaborators.

use glam::DVec2;

use glimpse_core::{
    Axis, AxisScale, CacheError, CanvasEvent, DeviceRect, EventHandler, EventKind, EventSource,
    FrameBuffer, FrameCache, MeshRef, MouseButton, PlotSurface, RenderCapture, Renderer,
    SubscriptionId, ViewBounds,
};

// ── Fixtures ────────────────────────────────────────────────────────────────

/// Per-axis fraction of the way `v` sits between `lo` and `hi`.
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

/// Surface with a separable bounds-to-canvas transform that records how
/// often its expensive draw runs and in what order chrome is re-rendered.
struct TestSurface {
    bounds: ViewBounds,
    x_scale: AxisScale,
    y_scale: AxisScale,
    device: (u32, u32),
    full_draws: usize,
    chrome_calls: Vec<&'static str>,
    fail_full_draw: bool,
}

impl TestSurface {
    fn new(device: (u32, u32)) -> Self {
        Self {
            bounds: ViewBounds::new(0.0, 10.0, 0.0, 10.0),
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            device,
            full_draws: 0,
            chrome_calls: Vec::new(),
            fail_full_draw: false,
        }
    }

    fn with_log_y(device: (u32, u32)) -> Self {
        Self {
            bounds: ViewBounds::new(0.0, 10.0, 1.0, 100.0),
            y_scale: AxisScale::Log,
            ..Self::new(device)
        }
    }
}

impl PlotSurface for TestSurface {
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
        let fx = fraction(self.x_scale, self.bounds.x_min, self.bounds.x_max, point.x);
        let fy = fraction(self.y_scale, self.bounds.y_min, self.bounds.y_max, point.y);
        DVec2::new(fx * self.device.0 as f64, (1.0 - fy) * self.device.1 as f64)
    }

    fn device_to_data(&self, point: DVec2) -> DVec2 {
        let fx = point.x / self.device.0 as f64;
        let fy = 1.0 - point.y / self.device.1 as f64;
        DVec2::new(
            unfraction(self.x_scale, self.bounds.x_min, self.bounds.x_max, fx),
            unfraction(self.y_scale, self.bounds.y_min, self.bounds.y_max, fy),
        )
    }

    fn draw_full(&mut self, _renderer: &mut dyn Renderer) -> Result<(), CacheError> {
        if self.fail_full_draw {
            return Err(CacheError::Surface("synthetic draw failure".into()));
        }
        self.full_draws += 1;
        Ok(())
    }

    fn draw_background(&mut self, _renderer: &mut dyn Renderer) {
        self.chrome_calls.push("background");
    }

    fn draw_axis(&mut self, _renderer: &mut dyn Renderer, axis: Axis) {
        self.chrome_calls.push(match axis {
            Axis::X => "axis-x",
            Axis::Y => "axis-y",
        });
    }

    fn draw_frame(&mut self, _renderer: &mut dyn Renderer) {
        self.chrome_calls.push("frame");
    }
}

/// Renderer whose canvas is pre-seeded with a known pattern; records which
/// cached-draw primitive each hit goes through.
struct TestRenderer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    image_draws: Vec<DeviceRect>,
    mesh_draws: Vec<(Vec<f64>, Vec<f64>)>,
}

impl TestRenderer {
    fn new(width: u32, height: u32) -> Self {
        Self::with_pixel(width, height, |x, _| [(x % 256) as u8, 0, 0, 255])
    }

    fn with_pixel(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut buffer = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                buffer.extend_from_slice(&pixel(x, y));
            }
        }
        Self {
            width,
            height,
            buffer,
            image_draws: Vec::new(),
            mesh_draws: Vec::new(),
        }
    }
}

impl Renderer for TestRenderer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn buffer_rgba(&self) -> &[u8] {
        &self.buffer
    }

    fn fill_rect(&mut self, _rect: DeviceRect, _color: [u8; 4]) {}

    fn draw_line(&mut self, _from: DVec2, _to: DVec2, _color: [u8; 4]) {}

    fn fill_circle(&mut self, _center: DVec2, _radius: f64, _color: [u8; 4]) {}

    fn draw_image(&mut self, _image: &FrameBuffer, rect: DeviceRect) {
        self.image_draws.push(rect);
    }

    fn draw_mesh(&mut self, mesh: MeshRef<'_>) {
        self.mesh_draws.push((mesh.xs.to_vec(), mesh.ys.to_vec()));
    }
}

/// Synchronous event bus standing in for the host canvas.
#[derive(Default)]
struct TestEvents {
    handlers: Vec<(SubscriptionId, EventKind, EventHandler)>,
    next_id: u64,
}

impl TestEvents {
    fn emit(&mut self, event: &CanvasEvent) {
        for (_, kind, handler) in &mut self.handlers {
            if *kind == event.kind() {
                handler(event);
            }
        }
    }

    fn release() -> CanvasEvent {
        CanvasEvent::ButtonRelease {
            button: MouseButton::Left,
            x: 50.0,
            y: 50.0,
        }
    }
}

impl EventSource for TestEvents {
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.handlers.retain(|(sid, _, _)| *sid != id);
    }
}

// ── State machine ───────────────────────────────────────────────────────────

#[test]
fn first_draw_fills_cache_and_runs_full_draw() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    assert!(!cache.is_cached());
    cache.draw(&mut renderer).unwrap();
    assert!(cache.is_cached());
    assert_eq!(cache.surface().full_draws, 1);
}

#[test]
fn second_draw_skips_full_draw_and_redraws_chrome() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    cache.surface_mut().chrome_calls.clear();

    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 1);
    assert_eq!(
        cache.surface().chrome_calls,
        ["background", "axis-x", "axis-y", "frame"]
    );
    assert_eq!(renderer.image_draws.len(), 1);
}

#[test]
fn button_release_empties_cache() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 1);

    events.emit(&TestEvents::release());
    assert!(!cache.is_cached());

    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 2);
}

#[test]
fn reset_is_idempotent() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    cache.reset();
    cache.reset();
    assert!(!cache.is_cached());

    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 1);

    cache.reset();
    cache.reset();
    assert!(!cache.is_cached());
    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 2);
}

#[test]
fn resize_event_empties_cache() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    events.emit(&CanvasEvent::Resize {
        width: 120,
        height: 120,
    });
    assert!(!cache.is_cached());
}

#[test]
fn device_size_change_invalidates_without_event() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 1);

    // The host resized its canvas but never told anyone.
    let mut resized = TestRenderer::new(120, 120);
    cache.surface_mut().device = (120, 120);
    cache.draw(&mut resized).unwrap();
    assert_eq!(cache.surface().full_draws, 2);
    assert!(resized.image_draws.is_empty());
}

#[test]
fn degenerate_viewport_stays_uncached() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(8, 8);
    let mut cache = FrameCache::attach(TestSurface::new((8, 8)), &mut events);

    cache.draw(&mut renderer).unwrap();
    assert!(!cache.is_cached());
    cache.draw(&mut renderer).unwrap();
    assert_eq!(cache.surface().full_draws, 2);
}

#[test]
fn full_draw_failure_propagates_and_stays_uncached() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut surface = TestSurface::new((100, 100));
    surface.fail_full_draw = true;
    let mut cache = FrameCache::attach(surface, &mut events);

    let err = cache.draw(&mut renderer).unwrap_err();
    assert!(matches!(err, CacheError::Surface(_)));
    assert!(!cache.is_cached());

    cache.surface_mut().fail_full_draw = false;
    cache.draw(&mut renderer).unwrap();
    assert!(cache.is_cached());
}

#[test]
fn short_pixel_buffer_is_reported() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    renderer.buffer.truncate(100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    let err = cache.draw(&mut renderer).unwrap_err();
    assert!(matches!(err, CacheError::BufferSizeMismatch { .. }));
    assert!(!cache.is_cached());
}

#[test]
fn detach_unsubscribes_handlers() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);
    assert_eq!(events.handlers.len(), 2);

    cache.draw(&mut renderer).unwrap();
    let surface = cache.detach(&mut events);
    assert!(events.handlers.is_empty());
    assert_eq!(surface.full_draws, 1);

    // Emitting after detach reaches nothing.
    events.emit(&TestEvents::release());
}

// ── Capture geometry ────────────────────────────────────────────────────────

#[test]
fn inset_region_spans_device_minus_margin() {
    let surface = TestSurface::new((100, 100));
    let renderer = TestRenderer::new(100, 100);

    let capture = RenderCapture::new(&surface, &renderer).unwrap();
    assert_eq!(capture.image().width, 90);
    assert_eq!(capture.image().height, 90);
}

#[test]
fn extent_maps_back_to_inset_corners() {
    let surface = TestSurface::new((100, 100));
    let renderer = TestRenderer::new(100, 100);

    let capture = RenderCapture::new(&surface, &renderer).unwrap();
    let extent = capture.extent();
    let a = surface.data_to_device(DVec2::new(extent.x_min, extent.y_min));
    let b = surface.data_to_device(DVec2::new(extent.x_max, extent.y_max));
    let rect = DeviceRect::from_corners(a, b);

    // The inset rectangle runs from 5 to 95 (exclusive) on both axes, so
    // the last sampled column and row sit at 94: one pixel inside.
    assert!((rect.x0 - 5.0).abs() < 1e-6, "x0 = {}", rect.x0);
    assert!((rect.x1 - 94.0).abs() < 1e-6, "x1 = {}", rect.x1);
    assert!((rect.y0 - 5.0).abs() < 1e-6, "y0 = {}", rect.y0);
    assert!((rect.y1 - 94.0).abs() < 1e-6, "y1 = {}", rect.y1);
}

#[test]
fn mesh_keeps_red_channel_only() {
    let surface = TestSurface::new((100, 100));
    let renderer = TestRenderer::with_pixel(100, 100, |_, _| [7, 99, 13, 201]);

    let capture = RenderCapture::new(&surface, &renderer).unwrap();
    assert!(capture.mesh().cells.iter().all(|&v| v == 7));
    assert_eq!(capture.mesh().rows(), 89);
    assert_eq!(capture.mesh().cols(), 89);
}

// ── Scale-mode branching ────────────────────────────────────────────────────

#[test]
fn linear_scales_take_image_path() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::new((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    cache.draw(&mut renderer).unwrap();
    assert_eq!(renderer.image_draws.len(), 1);
    assert!(renderer.mesh_draws.is_empty());
}

#[test]
fn non_linear_scale_takes_mesh_path() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::with_log_y((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    cache.draw(&mut renderer).unwrap();
    assert!(renderer.image_draws.is_empty());
    assert_eq!(renderer.mesh_draws.len(), 1);
}

#[test]
fn scale_switch_changes_path_without_recapture() {
    let mut events = TestEvents::default();
    let mut renderer = TestRenderer::new(100, 100);
    let mut cache = FrameCache::attach(TestSurface::with_log_y((100, 100)), &mut events);

    cache.draw(&mut renderer).unwrap();
    cache.draw(&mut renderer).unwrap();
    assert_eq!(renderer.mesh_draws.len(), 1);

    cache.surface_mut().y_scale = AxisScale::Linear;
    cache.draw(&mut renderer).unwrap();
    assert_eq!(renderer.image_draws.len(), 1);
    assert_eq!(cache.surface().full_draws, 1);
}

#[test]
fn mesh_rows_follow_log_spacing() {
    let surface = TestSurface::with_log_y((100, 100));
    let renderer = TestRenderer::new(100, 100);

    let capture = RenderCapture::new(&surface, &renderer).unwrap();
    let ys = &capture.mesh().ys;

    // Top rows sit at large data-y values; spacing shrinks toward the
    // bottom of a log axis instead of staying constant.
    assert!(ys.first().unwrap() > ys.last().unwrap());
    let first_step = (ys[1] - ys[0]).abs();
    let last_step = (ys[ys.len() - 1] - ys[ys.len() - 2]).abs();
    assert!(
        first_step > last_step * 2.0,
        "expected non-uniform spacing, got {first_step} vs {last_step}"
    );

    // Each row coordinate matches the inverse transform of its device row.
    for (i, &y) in ys.iter().enumerate().step_by(13) {
        let expected = surface.device_to_data(DVec2::new(5.0, 5.0 + i as f64)).y;
        assert!((y - expected).abs() < 1e-9);
    }
}
