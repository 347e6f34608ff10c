//! The drawing surface: a fixed-resolution raster fed by pointer events.
//!
//! Pointer positions arrive in display-scaled page coordinates together with
//! the element's current bounding rectangle. The surface maps each one into
//! buffer space and renders freehand strokes with a small two-state machine:
//!
//! ```text
//!            pointer-down
//!   Idle ───────────────────▶ Drawing ──┐ pointer-move: line_to + stroke
//!    ▲                          │  ▲    │
//!    └── pointer-up / leave ────┘  └────┘
//! ```
//!
//! Moves while `Idle` are ignored. `clear` works from either state and
//! always lands in `Idle`.
//!
//! # Example
//!
//! ```
//! use quickdigit::surface::{Coord, DrawingSurface, ElementRect};
//!
//! let mut surface = DrawingSurface::default();
//! let rect = ElementRect::for_scale(28, 10);
//!
//! surface.pointer_down(Coord::new(50.0, 50.0), &rect);
//! surface.pointer_move(Coord::new(200.0, 200.0), &rect);
//! surface.pointer_up();
//!
//! assert!(!surface.buffer().is_blank());
//! ```

mod coord;
mod raster;
mod space;
mod stroke;
mod transform;

use image::GrayImage;
use log::debug;

use crate::config::{SurfaceConfig, MAX_DISPLAY_SIDE};
use crate::error::QuickdigitError;

pub use coord::Coord;
pub use raster::PixelBuffer;
pub use space::{Buffer, Display};
pub use stroke::StrokeStyle;
pub use transform::{map_pointer_event, DisplayTransform, ElementRect};

use stroke::ActivePath;

/// Observable phase of the stroke lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokePhase {
    Idle,
    Drawing,
}

/// Pointer input the surface reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug)]
enum StrokeState {
    Idle,
    Drawing(ActivePath),
}

/// A pointer-driven sketchpad over an N×N [`PixelBuffer`].
///
/// The surface owns its raster for its whole lifetime. Size and style only
/// change through [`DrawingSurface::reinitialize`], which resets everything.
#[derive(Debug)]
pub struct DrawingSurface {
    config: SurfaceConfig,
    buffer: PixelBuffer,
    state: StrokeState,
}

impl DrawingSurface {
    /// Allocates a blank surface for `config`.
    pub fn new(config: SurfaceConfig) -> Result<Self, QuickdigitError> {
        config.validate()?;
        Ok(Self::blank(config))
    }

    fn blank(config: SurfaceConfig) -> Self {
        Self {
            buffer: PixelBuffer::new(config.side, config.background),
            config,
            state: StrokeState::Idle,
        }
    }

    /// Replaces size, style and contents in one step.
    ///
    /// On error the surface is left untouched.
    pub fn reinitialize(&mut self, config: SurfaceConfig) -> Result<(), QuickdigitError> {
        config.validate()?;
        debug!("reinitializing surface: {:?}", config);
        *self = Self::blank(config);
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[inline]
    pub fn side(&self) -> u32 {
        self.buffer.side()
    }

    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Owned copy of the raster as it is right now.
    pub fn snapshot(&self) -> PixelBuffer {
        self.buffer.clone()
    }

    pub fn phase(&self) -> StrokePhase {
        match self.state {
            StrokeState::Idle => StrokePhase::Idle,
            StrokeState::Drawing(_) => StrokePhase::Drawing,
        }
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            line_width: self.config.line_width,
            ink: self.config.ink,
        }
    }

    /// Maps a pointer position into buffer space using `rect` as it is now.
    pub fn map_pointer(
        &self,
        pointer: Coord<Display>,
        rect: &ElementRect,
    ) -> Option<Coord<Buffer>> {
        map_pointer_event(pointer, rect, self.side())
    }

    /// Dispatches a pointer action. Returns true if the raster changed.
    pub fn handle_pointer(
        &mut self,
        action: PointerAction,
        pointer: Coord<Display>,
        rect: &ElementRect,
    ) -> bool {
        match action {
            PointerAction::Down => {
                self.pointer_down(pointer, rect);
                false
            }
            PointerAction::Move => self.pointer_move(pointer, rect),
            PointerAction::Up => {
                self.pointer_up();
                false
            }
            PointerAction::Leave => {
                self.pointer_leave();
                false
            }
        }
    }

    /// Starts a new path at the pointer. Nothing is drawn yet.
    ///
    /// Ignored if the element is not laid out.
    pub fn pointer_down(&mut self, pointer: Coord<Display>, rect: &ElementRect) {
        let Some(start) = self.map_pointer(pointer, rect) else {
            debug!("pointer-down ignored: element has no rendered size");
            return;
        };
        debug!("stroke begins at ({:.2}, {:.2})", start.x, start.y);
        self.state = StrokeState::Drawing(ActivePath::begin(start, &self.buffer));
    }

    /// Extends the active path to the pointer and strokes it.
    ///
    /// Returns true if the raster changed. Moves while idle do nothing.
    pub fn pointer_move(&mut self, pointer: Coord<Display>, rect: &ElementRect) -> bool {
        let style = self.style();
        let Some(to) = self.map_pointer(pointer, rect) else {
            return false;
        };
        match &mut self.state {
            StrokeState::Idle => false,
            StrokeState::Drawing(path) => path.line_to(to, &mut self.buffer, &style),
        }
    }

    /// Ends the active stroke, if any.
    pub fn pointer_up(&mut self) {
        self.end_stroke("pointer-up");
    }

    /// Ends the active stroke when the pointer leaves the element.
    pub fn pointer_leave(&mut self) {
        self.end_stroke("pointer-leave");
    }

    fn end_stroke(&mut self, trigger: &str) {
        if let StrokeState::Drawing(path) = &self.state {
            debug!("stroke ends on {} after {} segment(s)", trigger, path.segments());
        }
        self.state = StrokeState::Idle;
    }

    /// Resets the raster to the background and drops any open path.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = StrokeState::Idle;
    }

    /// The raster as shown on screen: each cell magnified `scale` times with
    /// no interpolation.
    ///
    /// The magnified side may not exceed [`MAX_DISPLAY_SIDE`].
    pub fn render_display(&self, scale: u32) -> Result<GrayImage, QuickdigitError> {
        if scale == 0 {
            return Err(QuickdigitError::InvalidSurface {
                message: "display scale must be greater than 0".to_string(),
            });
        }
        let too_large = || QuickdigitError::InvalidSurface {
            message: format!(
                "display scale {} on a {}-cell raster exceeds the maximum display side of {}",
                scale,
                self.side(),
                MAX_DISPLAY_SIDE
            ),
        };
        match self.side().checked_mul(scale) {
            Some(shown) if shown <= MAX_DISPLAY_SIDE => {}
            _ => return Err(too_large()),
        }
        self.buffer.magnify(scale).ok_or_else(too_large)
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::blank(SurfaceConfig::default())
    }
}
