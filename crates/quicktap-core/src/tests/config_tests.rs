use super::*;

#[test]
fn test_defaults() {
    let config = QuickTapConfig::default();
    assert_eq!(config.touch_boundary, 10.0);
    assert_eq!(config.tap_delay, Duration::from_millis(200));
    assert_eq!(config.tap_timeout, Duration::from_millis(700));
    assert_eq!(config.tap_delay_ms(), 200.0);
    assert_eq!(config.tap_timeout_ms(), 700.0);
}

#[test]
fn test_builder_overrides() {
    let config = QuickTapConfig::new()
        .with_touch_boundary(4.0)
        .with_tap_delay(Duration::from_millis(50))
        .with_tap_timeout(Duration::from_millis(1500));
    assert_eq!(config.normalized(), config);
}

#[test]
fn test_falsy_values_fall_back_to_defaults() {
    let config = QuickTapConfig::new()
        .with_touch_boundary(0.0)
        .with_tap_delay(Duration::ZERO)
        .with_tap_timeout(Duration::ZERO)
        .normalized();
    assert_eq!(config, QuickTapConfig::default());

    let nan = QuickTapConfig::new().with_touch_boundary(f64::NAN).normalized();
    assert_eq!(nan.touch_boundary, DEFAULT_TOUCH_BOUNDARY);
}

#[test]
fn test_raw_script_options() {
    let config = QuickTapConfig::from_raw(Some(25.0), None, Some(1000.0));
    assert_eq!(config.touch_boundary, 25.0);
    assert_eq!(config.tap_delay, DEFAULT_TAP_DELAY);
    assert_eq!(config.tap_timeout, Duration::from_millis(1000));

    let rejected = QuickTapConfig::from_raw(Some(-1.0), Some(-5.0), Some(f64::INFINITY));
    assert_eq!(rejected, QuickTapConfig::default());
}

#[test]
fn test_oversized_script_options_fall_back_to_defaults() {
    let config = QuickTapConfig::from_raw(None, Some(1e30), Some(f64::MAX));
    assert_eq!(config.tap_delay, DEFAULT_TAP_DELAY);
    assert_eq!(config.tap_timeout, DEFAULT_TAP_TIMEOUT);

    // Large but representable values are kept.
    let long = QuickTapConfig::from_raw(None, Some(1e9), None);
    assert_eq!(long.tap_delay, Duration::from_secs(1_000_000));
}
