//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to keep
//! pointer-reported coordinates apart from raster coordinates at compile
//! time.

use std::fmt;

/// Marker type for buffer-space coordinates.
///
/// Buffer coordinates live on the fixed logical N×N raster grid, where (0, 0)
/// is the top-left corner of the first cell and (N, N) the bottom-right
/// corner of the last one. They are independent of on-screen magnification.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buffer {}

/// Marker type for display-scaled coordinates.
///
/// Display coordinates are on-screen pixels as reported by the pointer
/// device, in the page's coordinate space (not relative to the element).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {}

impl fmt::Debug for Buffer {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
