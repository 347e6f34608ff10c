//! Anti-aliased stroke rendering with round caps and round joins.
//!
//! A path is drawn as the union of capsules (segments swept by a disc of
//! radius `line_width / 2`), which gives round caps and joins for free. While
//! a path is open it remembers the raster as it was when the path began and
//! the highest coverage seen per cell, so stroking the extended path again
//! composites each cell once instead of darkening overlaps at the joints.

use super::coord::Coord;
use super::raster::PixelBuffer;
use super::space::Buffer;

/// Width and ink of rendered strokes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub ink: u8,
}

/// An open path: where the pen is, plus the per-cell coverage of every
/// segment stroked since the path began.
#[derive(Clone, Debug)]
pub(crate) struct ActivePath {
    cursor: Coord<Buffer>,
    backdrop: Vec<u8>,
    coverage: Vec<f32>,
    segments: usize,
}

impl ActivePath {
    /// Begins a path at `start` over the current contents of `buffer`.
    pub(crate) fn begin(start: Coord<Buffer>, buffer: &PixelBuffer) -> Self {
        Self {
            cursor: start,
            backdrop: buffer.as_raw().to_vec(),
            coverage: vec![0.0; buffer.as_raw().len()],
            segments: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Coord<Buffer> {
        self.cursor
    }

    #[inline]
    pub(crate) fn segments(&self) -> usize {
        self.segments
    }

    /// Extends the path with a straight segment to `to` and strokes it.
    ///
    /// Returns true if any cell of `buffer` changed.
    pub(crate) fn line_to(
        &mut self,
        to: Coord<Buffer>,
        buffer: &mut PixelBuffer,
        style: &StrokeStyle,
    ) -> bool {
        let from = self.cursor;
        self.cursor = to;
        if !(from.is_finite() && to.is_finite()) {
            return false;
        }
        self.segments += 1;

        let side = buffer.side();
        let radius = style.line_width / 2.0;
        let Some((x_range, y_range)) = cell_bounds(from, to, radius, side) else {
            return false;
        };

        let mut changed = false;
        for y in y_range {
            for x in x_range.clone() {
                let center = Coord::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let cov = coverage(distance_to_segment(center, from, to), radius);
                let idx = y as usize * side as usize + x as usize;
                if cov <= self.coverage[idx] {
                    continue;
                }
                self.coverage[idx] = cov;
                let value = composite(self.backdrop[idx], style.ink, cov);
                if buffer.get(x, y) != Some(value) {
                    buffer.put(x, y, value);
                    changed = true;
                }
            }
        }
        changed
    }
}

/// Inclusive cell ranges that a capsule from `a` to `b` can touch, clamped
/// to the grid. `None` if the capsule misses the grid entirely.
fn cell_bounds(
    a: Coord<Buffer>,
    b: Coord<Buffer>,
    radius: f64,
    side: u32,
) -> Option<(std::ops::RangeInclusive<u32>, std::ops::RangeInclusive<u32>)> {
    let reach = radius + 1.0;
    let last = f64::from(side) - 1.0;

    let x0 = (a.x.min(b.x) - reach).floor().max(0.0);
    let x1 = (a.x.max(b.x) + reach).ceil().min(last);
    let y0 = (a.y.min(b.y) - reach).floor().max(0.0);
    let y1 = (a.y.max(b.y) + reach).ceil().min(last);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as u32..=x1 as u32, y0 as u32..=y1 as u32))
}

fn distance_to_segment(p: Coord<Buffer>, a: Coord<Buffer>, b: Coord<Buffer>) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return p.distance(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(&Coord::new(a.x + t * dx, a.y + t * dy))
}

/// One-pixel linear ramp across the stroke edge.
#[inline]
fn coverage(distance: f64, radius: f64) -> f32 {
    (radius + 0.5 - distance).clamp(0.0, 1.0) as f32
}

#[inline]
fn composite(backdrop: u8, ink: u8, coverage: f32) -> u8 {
    let value = f32::from(backdrop) * (1.0 - coverage) + f32::from(ink) * coverage;
    value.round().clamp(0.0, 255.0) as u8
}
