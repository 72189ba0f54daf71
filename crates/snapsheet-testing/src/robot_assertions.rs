//! Assertion helpers for sheet tests.

use snapsheet::{Phase, SheetEvent};

use crate::robot::SheetRobot;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the sheet is idle on the snap point with caller index
/// `raw_index`.
pub fn assert_settled_on(robot: &SheetRobot, raw_index: usize, msg: &str) {
    let engine = robot.engine();
    assert_eq!(engine.phase(), Phase::Idle, "{}: sheet still moving", msg);
    let expected = engine
        .snap_points()
        .sorted_index(raw_index)
        .and_then(|sorted| engine.snap_points().offset(sorted));
    assert_eq!(
        Some(engine.offset()),
        expected,
        "{}: expected snap {} ({:?}), offset is {}",
        msg,
        raw_index,
        expected,
        engine.offset()
    );
    assert_eq!(engine.current_snap(), Some(raw_index), "{}", msg);
}

/// Assert the exact sequence of events recorded so far.
pub fn assert_events(robot: &SheetRobot, expected: &[SheetEvent], msg: &str) {
    let events = robot.events();
    assert_eq!(events.as_slice(), expected, "{}", msg);
}

/// Assert how often `event` has fired.
pub fn assert_event_count(robot: &SheetRobot, event: SheetEvent, expected: usize, msg: &str) {
    let count = robot.events().iter().filter(|e| **e == event).count();
    assert_eq!(
        count, expected,
        "{}: {:?} fired {} times, expected {}",
        msg, event, count, expected
    );
}
