//! Touch-to-click normalisation for touch browsers.
//!
//! Touch browsers used to wait ~300ms after a tap before firing `click`.
//! [`QuickTap`] listens to touch events on a layer element, emits a
//! synthetic click as soon as a tap ends, and suppresses the delayed native
//! click and the mouse events that trail it. Platform quirks come from an
//! injected [`DeviceCapabilities`]; the document is reached through the
//! [`Dom`] and [`LayerHost`] traits.

pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod guard;
pub mod host;
pub mod input;
pub mod layer;
pub mod policy;
pub mod scroll_parent;

// Re-export commonly used items
pub use config::QuickTapConfig;
pub use controller::{Effect, Outcome, Resolution, TapPhase, TouchClickController, TrackedTap};
pub use device::DeviceCapabilities;
pub use error::AttachError;
pub use guard::{GuardEnvironment, SkipReason};
pub use host::{
    Dom, LabelControl, LayerCallback, LayerHost, ScrollMetrics, SyntheticClick,
    SyntheticEventType,
};
pub use input::{
    EventKind, EventResponse, LayerEvent, MouseInput, MouseKind, TouchInput, TouchKind,
    TouchList, TouchPoint,
};
pub use layer::{attach, QuickTap};
pub use policy::{ElementProfile, ElementTag};

pub mod prelude {
    pub use crate::config::QuickTapConfig;
    pub use crate::device::DeviceCapabilities;
    pub use crate::host::{Dom, LayerHost};
    pub use crate::input::prelude::*;
    pub use crate::layer::{attach, QuickTap};
    pub use crate::policy::{ElementProfile, ElementTag};
}
