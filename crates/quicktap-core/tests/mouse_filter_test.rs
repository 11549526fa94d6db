//! The native mouse and click filter, mostly on the Android path where
//! trailing mouse events are intercepted in the capture phase.

use std::cell::Cell;
use std::rc::Rc;

use quicktap_core::host::SyntheticEventType;
use quicktap_core::prelude::*;
use quicktap_testing::prelude::*;
use quicktap_testing::robot_assertions::{
    assert_no_synthetic, assert_passed, assert_single_synthetic, assert_suppressed,
};

fn page() -> (FakeDom, NodeId) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dom = FakeDom::new();
    let layer = dom.append(dom.body(), ElementSpec::new("div"));
    (dom, layer)
}

#[test]
fn test_trailing_mouse_events_are_suppressed_after_tap() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    robot.tap(div);

    assert_suppressed(robot.native_mouse(MouseKind::Over, div), "mouseover");
    assert_suppressed(robot.native_mouse(MouseKind::Down, div), "mousedown");
    assert_suppressed(robot.native_mouse(MouseKind::Up, div), "mouseup");
    assert_suppressed(robot.native_click(div), "click");

    // The suppressed click forgets the target.
    assert_passed(robot.native_mouse(MouseKind::Down, div), "later mousedown");
}

#[test]
fn test_mouse_events_without_gesture_pass() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    assert_passed(robot.native_mouse(MouseKind::Down, div), "mousedown");
    assert_passed(robot.native_click(div), "click");
}

#[test]
fn test_non_cancelable_mouse_event_passes() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    robot.tap(div);
    let programmatic = MouseInput {
        cancelable: false,
        ..MouseInput::native(MouseKind::Down, div)
    };
    let report = robot.dom().dispatch(&LayerEvent::Mouse(programmatic));

    assert_passed(report, "programmatic mousedown");
}

#[test]
fn test_double_tap_within_delay_suppresses_mouse_events_of_exempt_target() {
    let (dom, layer) = page();
    let widget = dom.append(layer, ElementSpec::new("div").with_class("needsclick"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    robot.tap(widget);
    assert_passed(robot.native_mouse(MouseKind::Down, widget), "first tap mousedown");

    robot.advance(50.0);
    let (x, y) = TAP_POINT;
    robot.touch_start(widget, x, y);
    robot.advance(50.0);
    robot.touch_end(widget, x, y);

    assert!(robot.controller().cancel_next_click());
    assert_suppressed(robot.native_mouse(MouseKind::Down, widget), "second tap mousedown");
    assert_suppressed(robot.native_mouse(MouseKind::Up, widget), "second tap mouseup");
}

#[test]
fn test_zero_detail_submit_click_passes() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let form = dom.append(layer, ElementSpec::new("form"));
    let submit = dom.append(form, ElementSpec::input("submit"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::ios()).unwrap();

    robot.tap(div);

    assert_passed(robot.keyboard_click(submit), "keyboard go");
    assert_suppressed(robot.native_click(submit), "native click on submit");
}

#[test]
fn test_click_while_tracking_abandons_tap() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    let (x, y) = TAP_POINT;
    robot.touch_start(div, x, y);
    assert_passed(robot.native_click(div), "script click");
    assert!(!robot.controller().is_tracking());

    robot.advance(40.0);
    robot.touch_end(div, x, y);
    assert_no_synthetic(&robot);
}

#[test]
fn test_android_select_receives_mousedown() {
    let (dom, layer) = page();
    let select = dom.append(layer, ElementSpec::new("select"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    let report = robot.tap(select);

    assert!(report.default_prevented);
    assert_single_synthetic(&robot, select, SyntheticEventType::MouseDown);
}

#[test]
fn test_focused_element_is_blurred_before_synthetic_click() {
    let (dom, layer) = page();
    let field = dom.append(layer, ElementSpec::input("text"));
    let div = dom.append(layer, ElementSpec::new("div"));
    dom.set_active_element(Some(field));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    robot.tap(div);

    let records = robot.records();
    assert_eq!(records[0], DomRecord::Blur(field));
    assert!(matches!(records[1], DomRecord::Synthetic { target, .. } if target == div));
    assert_eq!(robot.dom().active_element(), None);
}

#[test]
fn test_legacy_onclick_runs_after_filter() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let calls = Rc::new(Cell::new(0));
    {
        let calls = Rc::clone(&calls);
        dom.set_onclick(
            layer,
            Rc::new(move |_event: &LayerEvent<NodeId>| calls.set(calls.get() + 1)),
        );
    }
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();

    robot.tap(div);
    assert_eq!(calls.get(), 1, "synthetic click reaches the page handler");

    robot.native_click(div);
    assert_eq!(calls.get(), 1, "ghost click is stopped before the page handler");
}

/// A delay-aborted touch end leaves `cancel_next_click` set until the next
/// fully resolved touch end, across cancels in between.
#[test]
fn test_rapid_alternating_taps_and_cancels() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let widget = dom.append(layer, ElementSpec::new("div").with_class("needsclick"));
    let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::android()).unwrap();
    let (x, y) = TAP_POINT;

    robot.tap(div);
    assert_suppressed(robot.native_click(div), "first ghost click");

    robot.advance(50.0);
    robot.touch_start(div, x, y);
    robot.advance(50.0);
    robot.touch_end(div, x, y);
    assert!(robot.controller().cancel_next_click());

    robot.touch_cancel(div);
    assert!(!robot.controller().is_tracking());
    assert!(robot.controller().cancel_next_click(), "cancel keeps the flag");

    robot.advance(30.0);
    let start = robot.touch_start(div, x, y);
    assert!(start.default_prevented);
    robot.advance(10.0);
    robot.touch_cancel(div);
    assert!(robot.controller().cancel_next_click());

    // A long press ends without resolving: the stale flag still filters.
    robot.advance(300.0);
    robot.touch_start(widget, x, y);
    robot.advance(800.0);
    robot.touch_end(widget, x, y);
    assert_suppressed(robot.native_mouse(MouseKind::Down, widget), "stale flag");
    assert_passed(robot.native_click(widget), "click aborts tracking");

    // The next resolved tap clears it.
    robot.advance(300.0);
    robot.tap(widget);
    assert!(!robot.controller().cancel_next_click());
    assert_passed(robot.native_mouse(MouseKind::Down, widget), "exempt mousedown");
    assert_passed(robot.native_click(widget), "exempt click");

    assert_eq!(robot.synthetic_clicks().len(), 1);
}
