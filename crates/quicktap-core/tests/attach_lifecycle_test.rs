//! Attach guard, listener wiring, rollback and detach.

use std::rc::Rc;

use quicktap_core::prelude::*;
use quicktap_core::AttachError;
use quicktap_testing::prelude::*;
use quicktap_testing::robot_assertions::assert_no_synthetic;

fn page() -> (FakeDom, NodeId) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dom = FakeDom::new();
    let layer = dom.append(dom.body(), ElementSpec::new("div"));
    (dom, layer)
}

#[test]
fn test_ios_layer_wiring() {
    let (dom, layer) = page();
    let quicktap = attach(
        dom.clone(),
        layer,
        QuickTapConfig::default(),
        DeviceCapabilities::ios(),
    )
    .unwrap();

    assert!(quicktap.is_active());
    assert_eq!(quicktap.layer(), Some(&layer));
    assert_eq!(
        dom.listeners_for(layer),
        vec![
            (EventKind::Click, true),
            (EventKind::TouchStart, false),
            (EventKind::TouchMove, false),
            (EventKind::TouchEnd, false),
            (EventKind::TouchCancel, false),
        ]
    );
}

#[test]
fn test_android_layer_wires_mouse_capture_first() {
    let (dom, layer) = page();
    let _quicktap = attach(
        dom.clone(),
        layer,
        QuickTapConfig::default(),
        DeviceCapabilities::android(),
    )
    .unwrap();

    let listeners = dom.listeners_for(layer);
    assert_eq!(listeners.len(), 8);
    assert_eq!(
        &listeners[..3],
        &[
            (EventKind::MouseOver, true),
            (EventKind::MouseDown, true),
            (EventKind::MouseUp, true),
        ]
    );
}

#[test]
fn test_detach_removes_every_listener_and_is_repeatable() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let mut robot = TapRobot::attach(dom.clone(), layer, DeviceCapabilities::android()).unwrap();

    robot.detach();
    robot.detach();

    assert_eq!(dom.listener_count(layer), 0);
    assert!(!robot.quicktap().is_active());
    assert!(robot.quicktap().controller().is_none());

    robot.tap(div);
    assert_no_synthetic(&robot);
}

#[test]
fn test_detach_mid_gesture_drops_the_tap() {
    let (dom, layer) = page();
    let div = dom.append(layer, ElementSpec::new("div"));
    let mut robot = TapRobot::attach(dom.clone(), layer, DeviceCapabilities::ios()).unwrap();

    let (x, y) = TAP_POINT;
    robot.touch_start(div, x, y);
    robot.advance(TAP_HOLD_MS);
    robot.detach();
    let report = robot.touch_end(div, x, y);

    assert!(!report.default_prevented);
    assert_no_synthetic(&robot);
}

#[test]
fn test_inactive_handle_detach_is_noop() {
    let mut quicktap = QuickTap::<FakeDom>::inactive();
    quicktap.detach();
    assert!(!quicktap.is_active());
    assert!(quicktap.layer().is_none());
}

#[test]
fn test_no_touch_support_skips_instrumentation() {
    let (dom, layer) = page();
    dom.set_touch_supported(false);

    let quicktap = attach(
        dom.clone(),
        layer,
        QuickTapConfig::default(),
        DeviceCapabilities::desktop(),
    )
    .unwrap();

    assert!(!quicktap.is_active());
    assert_eq!(dom.listener_count(layer), 0);
}

#[test]
fn test_android_guard_needs_a_zoomable_viewport() {
    let cases = [
        (None, 1280.0, 360.0),
        (Some("width=device-width, user-scalable=no"), 1280.0, 360.0),
        (Some("width=device-width"), 360.0, 360.0),
    ];
    for (content, document_width, viewport_width) in cases {
        let (dom, layer) = page();
        dom.set_viewport(content, document_width, viewport_width);

        let quicktap = attach(
            dom.clone(),
            layer,
            QuickTapConfig::default(),
            DeviceCapabilities::android(),
        )
        .unwrap();

        assert!(!quicktap.is_active(), "viewport {:?} should skip", content);
        assert_eq!(dom.listener_count(layer), 0);
    }
}

#[test]
fn test_ios_is_always_instrumented() {
    let (dom, layer) = page();
    dom.set_viewport(None, 320.0, 320.0);

    let quicktap = attach(
        dom,
        layer,
        QuickTapConfig::default(),
        DeviceCapabilities::ios(),
    )
    .unwrap();

    assert!(quicktap.is_active());
}

#[test]
fn test_windows_phone_respects_touch_action() {
    for (touch_action, ms_touch_action, active) in [
        (None, None, true),
        (Some("none"), None, false),
        (Some("manipulation"), None, false),
        (Some("pan-y"), None, true),
        (None, Some("none"), false),
    ] {
        let (dom, layer) = page();
        dom.set_touch_action(layer, touch_action);
        dom.set_ms_touch_action(layer, ms_touch_action);

        let quicktap = attach(
            dom,
            layer,
            QuickTapConfig::default(),
            DeviceCapabilities::windows_phone(),
        )
        .unwrap();

        assert_eq!(
            quicktap.is_active(),
            active,
            "touch-action {:?} / {:?}",
            touch_action,
            ms_touch_action
        );
    }
}

#[test]
fn test_failed_registration_rolls_back() {
    let (dom, layer) = page();
    dom.fail_listener(Some(EventKind::TouchEnd));

    let result = attach(
        dom.clone(),
        layer,
        QuickTapConfig::default(),
        DeviceCapabilities::android(),
    );

    match result {
        Err(AttachError::Listener { event, .. }) => assert_eq!(event, EventKind::TouchEnd),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("attach should fail"),
    }
    assert_eq!(dom.listener_count(layer), 0);
}

#[test]
fn test_legacy_onclick_is_adopted_and_outlives_detach() {
    let (dom, layer) = page();
    dom.set_onclick(layer, Rc::new(|_event: &LayerEvent<NodeId>| {}));

    let mut quicktap = attach(
        dom.clone(),
        layer,
        QuickTapConfig::default(),
        DeviceCapabilities::ios(),
    )
    .unwrap();

    assert!(!dom.has_onclick(layer));
    assert_eq!(dom.listener_count(layer), 6);

    quicktap.detach();
    assert_eq!(dom.listeners_for(layer), vec![(EventKind::Click, false)]);
}

#[test]
fn test_invalid_config_values_fall_back_to_defaults() {
    let (dom, layer) = page();
    let config = QuickTapConfig::from_raw(Some(0.0), Some(-5.0), None);

    let quicktap = attach(dom, layer, config, DeviceCapabilities::ios()).unwrap();

    let controller = quicktap.controller().unwrap();
    assert_eq!(*controller.config(), QuickTapConfig::default());
}
