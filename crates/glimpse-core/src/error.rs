//! Error types for capture and cached-draw operations.

/// Errors that can occur while capturing or redrawing a frame.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The inset view rectangle has no device-pixel area to capture.
    #[error("view rectangle is {width}x{height} device pixels after inset; nothing to capture")]
    DegenerateViewport { width: i64, height: i64 },

    /// The renderer's raw buffer disagrees with its reported dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The host surface failed to complete its full draw.
    #[error("surface draw failed: {0}")]
    Surface(String),
}
