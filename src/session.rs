//! Recorded pointer sessions, replayed into a drawing surface.
//!
//! A session is a JSON document describing the drawing element and the
//! pointer events fired on it:
//!
//! ```json
//! {
//!   "element": { "left": 0, "top": 0, "width": 280, "height": 280 },
//!   "events": [
//!     { "kind": "down", "x": 50, "y": 50 },
//!     { "kind": "move", "x": 200, "y": 200 },
//!     { "kind": "up" }
//!   ]
//! }
//! ```
//!
//! Coordinates are display pixels in page space. A `down` or `move` event may
//! carry its own `element`, which models a layout change: it replaces the
//! current rectangle for that event and every later one.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::QuickdigitError;
use crate::surface::{Coord, DrawingSurface, ElementRect, StrokePhase};

/// A drawing element plus the pointer events recorded on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSession {
    pub element: ElementRect,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

/// One recorded user interaction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        element: Option<ElementRect>,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        element: Option<ElementRect>,
    },
    Up,
    Leave,
    Clear,
}

/// What a replay did to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    /// Pointer-downs that actually started a stroke.
    pub strokes: usize,
    /// Moves that changed at least one cell.
    pub inking_moves: usize,
    /// Moves that arrived while no stroke was active.
    pub idle_moves: usize,
}

impl PointerSession {
    /// An empty session on `element`.
    pub fn new(element: ElementRect) -> Self {
        Self {
            element,
            events: Vec::new(),
        }
    }

    pub fn down(mut self, x: f64, y: f64) -> Self {
        self.events.push(SessionEvent::Down {
            x,
            y,
            element: None,
        });
        self
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.events.push(SessionEvent::Move {
            x,
            y,
            element: None,
        });
        self
    }

    pub fn up(mut self) -> Self {
        self.events.push(SessionEvent::Up);
        self
    }

    pub fn leave(mut self) -> Self {
        self.events.push(SessionEvent::Leave);
        self
    }

    pub fn clear(mut self) -> Self {
        self.events.push(SessionEvent::Clear);
        self
    }

    /// Feeds every event to `surface` in order.
    pub fn replay(&self, surface: &mut DrawingSurface) -> ReplaySummary {
        let mut element = self.element;
        let mut summary = ReplaySummary {
            events: self.events.len(),
            ..ReplaySummary::default()
        };

        for event in &self.events {
            match *event {
                SessionEvent::Down {
                    x,
                    y,
                    element: resized,
                } => {
                    element = resized.unwrap_or(element);
                    let pointer = Coord::new(x, y);
                    if surface.map_pointer(pointer, &element).is_some() {
                        summary.strokes += 1;
                    }
                    surface.pointer_down(pointer, &element);
                }
                SessionEvent::Move {
                    x,
                    y,
                    element: resized,
                } => {
                    element = resized.unwrap_or(element);
                    if surface.phase() == StrokePhase::Idle {
                        summary.idle_moves += 1;
                    }
                    if surface.pointer_move(Coord::new(x, y), &element) {
                        summary.inking_moves += 1;
                    }
                }
                SessionEvent::Up => surface.pointer_up(),
                SessionEvent::Leave => surface.pointer_leave(),
                SessionEvent::Clear => surface.clear(),
            }
        }

        debug!("replayed session: {:?}", summary);
        summary
    }
}

/// Parses a session from a JSON string.
pub fn from_session_str(json: &str) -> Result<PointerSession, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a session from JSON bytes.
pub fn from_session_slice(bytes: &[u8]) -> Result<PointerSession, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Reads a session file.
pub fn read_session(path: &Path) -> Result<PointerSession, QuickdigitError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| QuickdigitError::SessionParse {
        path: path.to_path_buf(),
        source,
    })
}
