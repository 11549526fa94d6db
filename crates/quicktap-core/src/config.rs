//! Tap thresholds.

use std::time::Duration;

/// Movement in CSS pixels, along either axis, beyond which a touch stops
/// counting as a tap.
pub const DEFAULT_TOUCH_BOUNDARY: f64 = 10.0;

/// Minimum gap between two accepted taps. Anything faster is treated as a
/// phantom double tap.
pub const DEFAULT_TAP_DELAY: Duration = Duration::from_millis(200);

/// Longest touch that still counts as a tap.
pub const DEFAULT_TAP_TIMEOUT: Duration = Duration::from_millis(700);

/// A focusable element held for longer than this gets focus natively, so no
/// synthetic focus/click is needed.
pub const NATIVE_FOCUS_DELAY: Duration = Duration::from_millis(100);

/// Per-layer configuration.
///
/// Values that are zero, negative or not finite mean "use the default".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuickTapConfig {
    pub touch_boundary: f64,
    pub tap_delay: Duration,
    pub tap_timeout: Duration,
}

impl Default for QuickTapConfig {
    fn default() -> Self {
        Self {
            touch_boundary: DEFAULT_TOUCH_BOUNDARY,
            tap_delay: DEFAULT_TAP_DELAY,
            tap_timeout: DEFAULT_TAP_TIMEOUT,
        }
    }
}

impl QuickTapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_touch_boundary(mut self, pixels: f64) -> Self {
        self.touch_boundary = pixels;
        self
    }

    pub fn with_tap_delay(mut self, delay: Duration) -> Self {
        self.tap_delay = delay;
        self
    }

    pub fn with_tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }

    /// Builds a config from millisecond/pixel numbers as they arrive from
    /// script option objects. Missing values use the defaults.
    pub fn from_raw(
        touch_boundary: Option<f64>,
        tap_delay_ms: Option<f64>,
        tap_timeout_ms: Option<f64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            touch_boundary: touch_boundary.unwrap_or(defaults.touch_boundary),
            tap_delay: tap_delay_ms
                .and_then(millis_to_duration)
                .unwrap_or(defaults.tap_delay),
            tap_timeout: tap_timeout_ms
                .and_then(millis_to_duration)
                .unwrap_or(defaults.tap_timeout),
        }
        .normalized()
    }

    /// Replaces unusable values with their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            touch_boundary: if self.touch_boundary.is_finite() && self.touch_boundary > 0.0 {
                self.touch_boundary
            } else {
                defaults.touch_boundary
            },
            tap_delay: if self.tap_delay.is_zero() {
                defaults.tap_delay
            } else {
                self.tap_delay
            },
            tap_timeout: if self.tap_timeout.is_zero() {
                defaults.tap_timeout
            } else {
                self.tap_timeout
            },
        }
    }

    pub(crate) fn tap_delay_ms(&self) -> f64 {
        self.tap_delay.as_nanos() as f64 / 1_000_000.0
    }

    pub(crate) fn tap_timeout_ms(&self) -> f64 {
        self.tap_timeout.as_nanos() as f64 / 1_000_000.0
    }
}

fn millis_to_duration(ms: f64) -> Option<Duration> {
    if ms.is_finite() && ms > 0.0 {
        Duration::try_from_secs_f64(ms / 1000.0).ok()
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
