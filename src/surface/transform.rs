//! Mapping between display-scaled pointer coordinates and buffer space.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::space::{Buffer, Display};

/// On-screen bounding rectangle of the drawing element, in display pixels.
///
/// This is what a layout engine reports for the element right now. It is
/// never cached by the surface: every pointer event carries the rectangle
/// that was current when the event fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// An element at the page origin showing an N×N raster at `scale`
    /// display pixels per cell.
    pub fn for_scale(side: u32, scale: u32) -> Self {
        let size = f64::from(side) * f64::from(scale);
        Self::new(0.0, 0.0, size, size)
    }

    /// Returns true once the element has a usable, laid-out size.
    pub fn is_laid_out(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Per-axis scale factors from display pixels to buffer cells.
///
/// X and Y are scaled independently, so a stretched element still maps
/// its corners onto the raster corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayTransform {
    origin: Coord<Display>,
    scale_x: f64,
    scale_y: f64,
}

impl DisplayTransform {
    /// Derives the transform for a `logical_width × logical_height` raster
    /// shown in `rect`.
    ///
    /// Returns `None` when the element has no rendered size yet, in which
    /// case the mapping is undefined.
    pub fn new(logical_width: u32, logical_height: u32, rect: &ElementRect) -> Option<Self> {
        if !rect.is_laid_out() {
            return None;
        }
        Some(Self {
            origin: Coord::new(rect.left, rect.top),
            scale_x: f64::from(logical_width) / rect.width,
            scale_y: f64::from(logical_height) / rect.height,
        })
    }

    #[inline]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    #[inline]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Maps a pointer position into buffer space.
    #[inline]
    pub fn to_buffer(&self, point: Coord<Display>) -> Coord<Buffer> {
        Coord::new(
            (point.x - self.origin.x) * self.scale_x,
            (point.y - self.origin.y) * self.scale_y,
        )
    }
}

/// Maps a raw pointer position to buffer space for an N×N raster shown in
/// `rect`.
///
/// The transform is recomputed from `rect` on every call. Returns `None` if
/// the element is not laid out yet.
pub fn map_pointer_event(
    pointer: Coord<Display>,
    rect: &ElementRect,
    side: u32,
) -> Option<Coord<Buffer>> {
    DisplayTransform::new(side, side, rect).map(|transform| transform.to_buffer(pointer))
}
