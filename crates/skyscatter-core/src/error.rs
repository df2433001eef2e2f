use thiserror::Error;

/// Errors that can occur during Skyscatter initialization and configuration.
/// Per-frame rendering never fails; it reports a frame outcome instead.
#[derive(Debug, Error)]
pub enum SkyError {
    #[error("Canvas element not found: {0}")]
    CanvasNotFound(String),

    #[error("Element '{0}' is not a canvas")]
    NotACanvas(String),

    #[error("WebGPU adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("Failed to request GPU device: {0}")]
    DeviceRequestFailed(String),

    #[error("Surface configuration failed: {0}")]
    SurfaceConfigFailed(String),

    #[error("Failed to parse palette RON: {0}")]
    PaletteParse(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
