#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use quickdigit::session::{PointerSession, SessionEvent};
use quickdigit::surface::ElementRect;

/// Absolute tolerance for mapped coordinates.
pub const EPS_MAP: f64 = 1e-6;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A laid-out element somewhere on the page, possibly stretched.
pub fn arb_element() -> impl Strategy<Value = ElementRect> {
    (-500.0..500.0f64, -500.0..500.0f64, 1.0..2000.0f64, 1.0..2000.0f64)
        .prop_map(|(left, top, width, height)| ElementRect::new(left, top, width, height))
}

/// A point inside `element`, in page coordinates.
pub fn arb_point_in(element: ElementRect) -> impl Strategy<Value = (f64, f64)> {
    (0.0..=1.0f64, 0.0..=1.0f64).prop_map(move |(fx, fy)| {
        (
            element.left + fx * element.width,
            element.top + fy * element.height,
        )
    })
}

/// A pointer event confined to `element`.
pub fn arb_event_in(element: ElementRect) -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        2 => arb_point_in(element).prop_map(|(x, y)| SessionEvent::Down { x, y, element: None }),
        6 => arb_point_in(element).prop_map(|(x, y)| SessionEvent::Move { x, y, element: None }),
        1 => Just(SessionEvent::Up),
        1 => Just(SessionEvent::Leave),
    ]
}

/// A session whose pointer never leaves its element.
pub fn arb_session(max_events: usize) -> impl Strategy<Value = PointerSession> {
    arb_element().prop_flat_map(move |element| {
        prop::collection::vec(arb_event_in(element), 0..max_events).prop_map(move |events| {
            PointerSession { element, events }
        })
    })
}

/// Only moves, never a pointer-down.
pub fn arb_idle_session(max_events: usize) -> impl Strategy<Value = PointerSession> {
    arb_element().prop_flat_map(move |element| {
        prop::collection::vec(
            prop_oneof![
                4 => arb_point_in(element).prop_map(|(x, y)| SessionEvent::Move { x, y, element: None }),
                1 => Just(SessionEvent::Up),
                1 => Just(SessionEvent::Leave),
            ],
            0..max_events,
        )
        .prop_map(move |events| PointerSession { element, events })
    })
}
