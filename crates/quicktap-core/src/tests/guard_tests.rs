use super::*;

fn zoomable_page() -> GuardEnvironment {
    GuardEnvironment {
        touch_supported: true,
        touch_action: None,
        ms_touch_action: None,
        viewport_content: Some("width=device-width, initial-scale=1".into()),
        document_width: 1280.0,
        viewport_width: 360.0,
    }
}

#[test]
fn test_no_touch_support_disables_everything() {
    let env = GuardEnvironment {
        touch_supported: false,
        ..zoomable_page()
    };
    for caps in [
        DeviceCapabilities::ios(),
        DeviceCapabilities::android(),
        DeviceCapabilities::windows_phone(),
    ] {
        assert_eq!(skip_reason(&env, &caps), Some(SkipReason::NoTouchSupport));
    }
}

#[test]
fn test_ios_is_always_instrumented() {
    let env = GuardEnvironment {
        viewport_content: Some("user-scalable=no".into()),
        document_width: 100.0,
        ..zoomable_page()
    };
    assert!(!not_needed(&env, &DeviceCapabilities::ios()));
}

#[test]
fn test_windows_phone_respects_touch_action() {
    let caps = DeviceCapabilities::windows_phone();
    assert!(!not_needed(&zoomable_page(), &caps));

    for (touch_action, ms_touch_action) in [
        (Some("none"), None),
        (Some("manipulation"), None),
        (None, Some("none")),
    ] {
        let env = GuardEnvironment {
            touch_action: touch_action.map(String::from),
            ms_touch_action: ms_touch_action.map(String::from),
            ..zoomable_page()
        };
        assert_eq!(
            skip_reason(&env, &caps),
            Some(SkipReason::TouchActionRestricted)
        );
    }

    let auto = GuardEnvironment {
        touch_action: Some("auto".into()),
        ..zoomable_page()
    };
    assert!(!not_needed(&auto, &caps));
}

#[test]
fn test_android_viewport_rules() {
    let caps = DeviceCapabilities::android();
    assert_eq!(skip_reason(&zoomable_page(), &caps), None);

    let no_meta = GuardEnvironment {
        viewport_content: None,
        ..zoomable_page()
    };
    assert_eq!(skip_reason(&no_meta, &caps), Some(SkipReason::NoViewportMeta));

    let unscalable = GuardEnvironment {
        viewport_content: Some("width=device-width, user-scalable=no".into()),
        ..zoomable_page()
    };
    assert_eq!(
        skip_reason(&unscalable, &caps),
        Some(SkipReason::UserScalingDisabled)
    );

    let fits = GuardEnvironment {
        document_width: 360.0,
        ..zoomable_page()
    };
    assert_eq!(skip_reason(&fits, &caps), Some(SkipReason::NothingToZoom));
}
