//! Platform quirk flags.
//!
//! The controller never sniffs the environment itself. A host computes a
//! [`DeviceCapabilities`] once (usually from the user agent string) and hands
//! it to [`attach`](crate::attach), which keeps platform behaviour
//! deterministic under test.

/// Boolean quirk table for the platform the layer runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Windows Phone 8.1 masquerades as Android and iPhone, so it is
    /// detected first and excluded from both.
    pub windows_phone: bool,
    pub android: bool,
    pub ios: bool,
    /// iOS 4 reuses touch identifiers between unrelated touches and needs
    /// native events for select elements.
    pub ios4: bool,
    /// iOS 6.0 to 7.x report a stale touch-end target while the layer is
    /// scrolling or transitioning.
    pub ios_with_bad_target: bool,
    /// Part of the quirk table, not consulted by any policy yet.
    pub blackberry10: bool,
}

impl DeviceCapabilities {
    /// A platform with no known quirks.
    pub const fn desktop() -> Self {
        Self {
            windows_phone: false,
            android: false,
            ios: false,
            ios4: false,
            ios_with_bad_target: false,
            blackberry10: false,
        }
    }

    pub const fn android() -> Self {
        Self {
            android: true,
            ..Self::desktop()
        }
    }

    /// A current iOS release: identifiers are reliable and touch-end
    /// targets are correct.
    pub const fn ios() -> Self {
        Self {
            ios: true,
            ..Self::desktop()
        }
    }

    pub const fn ios4() -> Self {
        Self {
            ios: true,
            ios4: true,
            ..Self::desktop()
        }
    }

    pub const fn ios_with_bad_target() -> Self {
        Self {
            ios: true,
            ios_with_bad_target: true,
            ..Self::desktop()
        }
    }

    pub const fn windows_phone() -> Self {
        Self {
            windows_phone: true,
            ..Self::desktop()
        }
    }

    /// Derives the quirk flags from a `navigator.userAgent` string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let windows_phone = user_agent.contains("Windows Phone");
        let android = matches!(user_agent.find("Android"), Some(index) if index > 0)
            && !windows_phone;
        let ios = ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device))
            && !windows_phone;
        let ios4 = ios && contains_os_version(user_agent, |major| major == b'4');
        let ios_with_bad_target =
            ios && contains_os_version(user_agent, |major| major == b'6' || major == b'7');
        let blackberry10 = matches!(user_agent.find("BB10"), Some(index) if index > 0);

        Self {
            windows_phone,
            android,
            ios,
            ios4,
            ios_with_bad_target,
            blackberry10,
        }
    }

    /// Whether touch identifiers can be trusted to detect a replayed
    /// touch-start.
    pub fn reliable_touch_identifiers(&self) -> bool {
        self.ios && !self.ios4
    }
}

/// Looks for `OS <major>_<digit>` where `major` is a single digit accepted by
/// `accept`.
fn contains_os_version(user_agent: &str, accept: impl Fn(u8) -> bool) -> bool {
    let bytes = user_agent.as_bytes();
    bytes.windows(6).any(|window| {
        window.starts_with(b"OS ")
            && accept(window[3])
            && window[4] == b'_'
            && window[5].is_ascii_digit()
    })
}

#[cfg(test)]
#[path = "tests/device_tests.rs"]
mod tests;
