//! Assertion helpers for robot tests.

use quicktap_core::host::SyntheticEventType;

use crate::fake_dom::{DispatchReport, DomRecord, NodeId};
use crate::robot::TapRobot;

/// Assert that exactly one synthetic event of `event_type` reached `target`.
pub fn assert_single_synthetic(robot: &TapRobot, target: NodeId, event_type: SyntheticEventType) {
    let clicks = robot.synthetic_clicks();
    assert_eq!(
        clicks.len(),
        1,
        "expected one synthetic event, got {:?}",
        clicks
    );
    assert_eq!(clicks[0].0, target, "synthetic event target");
    assert_eq!(clicks[0].1.event_type, event_type, "synthetic event type");
}

pub fn assert_no_synthetic(robot: &TapRobot) {
    let clicks = robot.synthetic_clicks();
    assert!(clicks.is_empty(), "unexpected synthetic events: {:?}", clicks);
}

/// Assert that the event was cancelled and stopped before any later listener.
pub fn assert_suppressed(report: DispatchReport, msg: &str) {
    assert!(
        report.default_prevented && report.propagation_stopped,
        "{}: expected suppression, got {:?}",
        msg,
        report
    );
}

pub fn assert_passed(report: DispatchReport, msg: &str) {
    assert!(
        !report.default_prevented && !report.propagation_stopped,
        "{}: expected the event to pass, got {:?}",
        msg,
        report
    );
}

pub fn assert_focused(robot: &TapRobot, target: NodeId) {
    assert!(
        robot.records().contains(&DomRecord::Focus(target)),
        "{:?} was never focused: {:?}",
        target,
        robot.records()
    );
}
