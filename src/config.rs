//! Configuration values for the drawing surface and the inference client.
//!
//! Both types are plain data with sensible defaults; the CLI fills them from
//! command-line flags (and `QUICKDIGIT_ENDPOINT`) before handing them to the
//! library.

use std::time::Duration;

use crate::error::QuickdigitError;

/// Side length of the logical raster in the reference setup (MNIST-sized).
pub const DEFAULT_SIDE: u32 = 28;

/// On-screen magnification of each logical pixel.
pub const DEFAULT_DISPLAY_SCALE: u32 = 10;

/// Largest raster side a surface accepts.
pub const MAX_SIDE: u32 = 4096;

/// Largest side of a magnified display image.
pub const MAX_DISPLAY_SIDE: u32 = 16384;

/// Stroke width in buffer pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 1.8;

/// Intensity of a blank cell (white).
pub const BACKGROUND: u8 = 255;

/// Intensity of fully covered ink (black).
pub const INK: u8 = 0;

/// Classification endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://quickdigit-backend.onrender.com/";

/// Environment variable that overrides [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "QUICKDIGIT_ENDPOINT";

/// Geometry and stroke style of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Side length N of the N×N raster.
    pub side: u32,
    /// Stroke width in buffer pixels.
    pub line_width: f64,
    /// Intensity the raster is filled with on init and clear.
    pub background: u8,
    /// Intensity of fully covered stroke cells.
    pub ink: u8,
}

impl SurfaceConfig {
    /// Creates a config with the given side length and default style.
    pub fn with_side(side: u32) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    /// Rejects configurations a surface cannot be built from.
    pub fn validate(&self) -> Result<(), QuickdigitError> {
        if self.side == 0 {
            return Err(QuickdigitError::InvalidSurface {
                message: "side length must be greater than 0".to_string(),
            });
        }
        if self.side > MAX_SIDE {
            return Err(QuickdigitError::InvalidSurface {
                message: format!(
                    "side length {} exceeds the maximum of {}",
                    self.side, MAX_SIDE
                ),
            });
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(QuickdigitError::InvalidSurface {
                message: format!(
                    "line width must be a positive finite number, got {}",
                    self.line_width
                ),
            });
        }
        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            line_width: DEFAULT_LINE_WIDTH,
            background: BACKGROUND,
            ink: INK,
        }
    }
}

/// Where and how the inference client talks to the classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Global request timeout. `None` leaves the exchange unbounded.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
