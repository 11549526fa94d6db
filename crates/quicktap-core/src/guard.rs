//! Decides whether a layer needs instrumenting at all.

use crate::device::DeviceCapabilities;

/// The environment facts the attach guard reads, gathered by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuardEnvironment {
    /// Whether the runtime exposes touch events at all.
    pub touch_supported: bool,
    /// Inline `touch-action` of the layer, if any.
    pub touch_action: Option<String>,
    /// Inline `-ms-touch-action` of the layer, if any.
    pub ms_touch_action: Option<String>,
    /// `content` of `<meta name="viewport">`, `None` without such a tag.
    pub viewport_content: Option<String>,
    /// `document.documentElement.scrollWidth`.
    pub document_width: f64,
    /// `window.outerWidth`.
    pub viewport_width: f64,
}

/// Why instrumentation is skipped for a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoTouchSupport,
    TouchActionRestricted,
    NoViewportMeta,
    UserScalingDisabled,
    NothingToZoom,
}

/// Returns the reason the layer can be left alone, or `None` when click
/// delays apply and the layer must be instrumented.
pub fn skip_reason(env: &GuardEnvironment, caps: &DeviceCapabilities) -> Option<SkipReason> {
    if !env.touch_supported {
        return Some(SkipReason::NoTouchSupport);
    }

    if caps.windows_phone {
        let restricted = matches!(env.ms_touch_action.as_deref(), Some("none"))
            || matches!(env.touch_action.as_deref(), Some("none" | "manipulation"));
        return restricted.then_some(SkipReason::TouchActionRestricted);
    }

    if caps.ios {
        return None;
    }

    let Some(content) = env.viewport_content.as_deref() else {
        return Some(SkipReason::NoViewportMeta);
    };
    if content.contains("user-scalable=no") {
        return Some(SkipReason::UserScalingDisabled);
    }
    if env.document_width <= env.viewport_width {
        return Some(SkipReason::NothingToZoom);
    }
    None
}

/// Whether instrumentation should be skipped entirely for the layer.
pub fn not_needed(env: &GuardEnvironment, caps: &DeviceCapabilities) -> bool {
    skip_reason(env, caps).is_some()
}

#[cfg(test)]
#[path = "tests/guard_tests.rs"]
mod tests;
