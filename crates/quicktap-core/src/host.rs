//! The seams a platform implements.
//!
//! [`Dom`] covers the queries and side effects the controller needs from
//! the document. [`LayerHost`] adds listener plumbing for a layer element.
//! The browser binding implements both over `web-sys`; tests use an
//! in-memory document.

use std::rc::Rc;

use crate::error::AttachError;
use crate::guard::GuardEnvironment;
use crate::input::{EventKind, EventResponse, LayerEvent};
use crate::policy::ElementProfile;

/// Element geometry relevant to scroll-parent detection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub offset_height: f64,
    pub scroll_top: f64,
}

impl ScrollMetrics {
    /// Content taller than the box means the element scrolls on its own.
    pub fn is_scrollable(&self) -> bool {
        self.scroll_height > self.offset_height
    }
}

/// Result of asking a label for its `control` property.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelControl<E> {
    /// The host has no `control` property; fall back to `htmlFor` lookup.
    Unsupported,
    Resolved(Option<E>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntheticEventType {
    Click,
    /// Android select widgets only open on a press.
    MouseDown,
}

impl SyntheticEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            SyntheticEventType::Click => "click",
            SyntheticEventType::MouseDown => "mousedown",
        }
    }
}

/// A bubbling, cancelable mouse event with `detail` 1 and the
/// forwarded-touch marker set, positioned at the releasing touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticClick {
    pub event_type: SyntheticEventType,
    pub screen_x: f64,
    pub screen_y: f64,
    pub client_x: f64,
    pub client_y: f64,
}

/// Document access for the controller.
pub trait Dom: Clone + 'static {
    /// A non-owning element handle compared by identity.
    type Element: Clone + PartialEq + std::fmt::Debug + 'static;

    fn profile(&self, element: &Self::Element) -> ElementProfile;

    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Inclusive: an element contains itself.
    fn contains(&self, ancestor: &Self::Element, element: &Self::Element) -> bool;

    fn scroll_metrics(&self, element: &Self::Element) -> ScrollMetrics;

    /// A non-collapsed selection exists in the window.
    fn has_active_selection(&self) -> bool;

    /// Hit test in client coordinates.
    fn element_from_point(&self, x: f64, y: f64) -> Option<Self::Element>;

    /// `(pageXOffset, pageYOffset)`.
    fn page_offset(&self) -> (f64, f64);

    /// The document runs inside a frame of another document.
    fn is_nested_frame(&self) -> bool;

    fn label_control(&self, label: &Self::Element) -> LabelControl<Self::Element>;

    /// The label's `htmlFor`, `None` when empty.
    fn html_for(&self, label: &Self::Element) -> Option<String>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First descendant matching [`LABELLABLE_SELECTOR`](crate::policy::LABELLABLE_SELECTOR).
    fn first_labellable_descendant(&self, label: &Self::Element) -> Option<Self::Element>;

    fn active_element(&self) -> Option<Self::Element>;

    fn focus(&self, element: &Self::Element);

    fn blur(&self, element: &Self::Element);

    fn supports_selection_range(&self, element: &Self::Element) -> bool;

    /// `setSelectionRange(len, len)` on the element's value.
    fn place_caret_at_end(&self, element: &Self::Element);

    /// Builds the event described by `click` and dispatches it synchronously.
    fn dispatch_synthetic(&self, target: &Self::Element, click: &SyntheticClick);

    fn guard_environment(&self, layer: &Self::Element) -> GuardEnvironment;
}

/// Shared handler a host invokes for every event it delivers to a layer.
pub type LayerCallback<E> = Rc<dyn Fn(&LayerEvent<E>) -> EventResponse>;

/// Listener plumbing for the attached layer.
pub trait LayerHost: Dom {
    /// Whatever the host needs to remove the listener again.
    type Listener;

    fn add_listener(
        &self,
        layer: &Self::Element,
        kind: EventKind,
        capture: bool,
        callback: LayerCallback<Self::Element>,
    ) -> Result<Self::Listener, AttachError>;

    fn remove_listener(&self, layer: &Self::Element, listener: Self::Listener);

    /// Moves a handler assigned to the layer's single `onclick` slot into a
    /// regular bubbling listener and clears the slot. Returns whether a
    /// handler was moved.
    fn adopt_legacy_click_handler(&self, layer: &Self::Element) -> Result<bool, AttachError>;
}
