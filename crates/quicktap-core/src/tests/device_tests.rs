use super::*;

const IPHONE_IOS7: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1_2 like Mac OS X) AppleWebKit/537.51.2 (KHTML, like Gecko) Version/7.0 Mobile/11D257 Safari/9537.53";
const IPAD_IOS4: &str = "Mozilla/5.0 (iPad; U; CPU OS 4_3_3 like Mac OS X; en-us) AppleWebKit/533.17.9 (KHTML, like Gecko) Version/5.0.2 Mobile/8J2 Safari/6533.18.5";
const IPHONE_IOS12: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 12_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.1.2 Mobile/15E148 Safari/604.1";
const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 9; Pixel 3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/76.0.3809.89 Mobile Safari/537.36";
const WINDOWS_PHONE: &str = "Mozilla/5.0 (Mobile; Windows Phone 8.1; Android 4.0; ARM; Trident/7.0; Touch; rv:11.0; IEMobile/11.0; NOKIA; Lumia 635) like iPhone OS 7_0_3 Mac OS X AppleWebKit/537 (KHTML, like Gecko) Mobile Safari/537";
const BLACKBERRY_10: &str = "Mozilla/5.0 (BB10; Touch) AppleWebKit/537.10+ (KHTML, like Gecko) Version/10.0.9.2372 Mobile Safari/537.10+";

#[test]
fn test_ios7_reports_bad_target_quirk() {
    let caps = DeviceCapabilities::from_user_agent(IPHONE_IOS7);
    assert!(caps.ios);
    assert!(caps.ios_with_bad_target);
    assert!(!caps.ios4);
    assert!(!caps.android);
    assert!(caps.reliable_touch_identifiers());
}

#[test]
fn test_ios4_identifiers_are_unreliable() {
    let caps = DeviceCapabilities::from_user_agent(IPAD_IOS4);
    assert!(caps.ios);
    assert!(caps.ios4);
    assert!(!caps.ios_with_bad_target);
    assert!(!caps.reliable_touch_identifiers());
}

#[test]
fn test_two_digit_ios_versions_are_not_mistaken_for_old_ones() {
    let caps = DeviceCapabilities::from_user_agent(IPHONE_IOS12);
    assert_eq!(caps, DeviceCapabilities::ios());
}

#[test]
fn test_android_chrome() {
    assert_eq!(
        DeviceCapabilities::from_user_agent(ANDROID_CHROME),
        DeviceCapabilities::android()
    );
}

#[test]
fn test_windows_phone_is_neither_android_nor_ios() {
    assert_eq!(
        DeviceCapabilities::from_user_agent(WINDOWS_PHONE),
        DeviceCapabilities::windows_phone()
    );
}

#[test]
fn test_blackberry10_flag() {
    let caps = DeviceCapabilities::from_user_agent(BLACKBERRY_10);
    assert!(caps.blackberry10);
    assert!(!caps.ios && !caps.android);
}

#[test]
fn test_leading_android_token_does_not_count() {
    let caps = DeviceCapabilities::from_user_agent("Android-like test agent");
    assert!(!caps.android);
}
