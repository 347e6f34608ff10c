//! Fuzz target for classifier response interpretation.
//!
//! The first two bytes pick the status code; the rest is the body.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quickdigit::inference::{interpret_response, RawResponse};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 1024 * 1024 {
        return;
    }

    let status = u16::from_le_bytes([data[0], data[1]]) % 600;
    let body = String::from_utf8_lossy(&data[2..]);
    let result = interpret_response(Ok(RawResponse::new(status, body)));
    assert!(result.digit().is_some() != result.error_message().is_some());
});
