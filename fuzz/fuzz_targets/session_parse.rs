//! Fuzz target for pointer session parsing and replay.
//!
//! Anything that parses as a session is replayed into a surface, so odd
//! element rectangles and coordinates (huge, negative, zero-sized) go through
//! the mapping and stroke renderer too.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quickdigit::session::from_session_slice;
use quickdigit::surface::DrawingSurface;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(session) = from_session_slice(data) {
        let mut surface = DrawingSurface::default();
        session.replay(&mut surface);
        assert_eq!(surface.buffer().as_raw().len(), 28 * 28);
    }
});
