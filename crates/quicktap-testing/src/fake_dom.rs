//! In-memory document implementing the QuickTap host traits.
//!
//! Elements are addressed by [`NodeId`]. Listeners registered through
//! [`LayerHost`] run with capture/bubble ordering along the target's
//! ancestor chain, and synthetic clicks are dispatched back through them, so
//! re-entrant dispatch behaves as in a browser.

use std::cell::RefCell;
use std::rc::Rc;

use quicktap_core::guard::GuardEnvironment;
use quicktap_core::host::{
    Dom, LabelControl, LayerCallback, LayerHost, ScrollMetrics, SyntheticClick,
    SyntheticEventType,
};
use quicktap_core::input::{EventKind, EventResponse, LayerEvent, MouseInput, MouseKind};
use quicktap_core::policy::{ElementProfile, ElementTag};
use quicktap_core::AttachError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Handler stored in an element's `onclick` slot.
pub type LegacyHandler = Rc<dyn Fn(&LayerEvent<NodeId>)>;

/// Description of an element to insert.
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    input_type: String,
    disabled: bool,
    read_only: bool,
    class_name: String,
    value: String,
    html_for: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn input(input_type: &str) -> Self {
        Self::new("input").with_type(input_type)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_type(mut self, input_type: &str) -> Self {
        self.input_type = input_type.to_ascii_lowercase();
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_for(mut self, id: &str) -> Self {
        self.html_for = Some(id.to_string());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

struct NodeData {
    spec: ElementSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    metrics: ScrollMetrics,
    touch_action: Option<String>,
    ms_touch_action: Option<String>,
    onclick: Option<LegacyHandler>,
}

struct Registered {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    capture: bool,
    callback: LayerCallback<NodeId>,
}

/// Side effects the controller performed on the document, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DomRecord {
    Focus(NodeId),
    Blur(NodeId),
    CaretAtEnd(NodeId),
    Synthetic { target: NodeId, click: SyntheticClick },
}

/// Aggregate of the listener responses for one dispatched event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    pub listeners_invoked: usize,
}

struct DomState {
    nodes: Vec<NodeData>,
    listeners: Vec<Registered>,
    next_listener: u64,
    active: Option<NodeId>,
    records: Vec<DomRecord>,
    touch_supported: bool,
    viewport_content: Option<String>,
    document_width: f64,
    viewport_width: f64,
    selection_active: bool,
    nested_frame: bool,
    page_offset: (f64, f64),
    hit_test: Option<NodeId>,
    hit_test_points: Vec<(f64, f64)>,
    label_control_supported: bool,
    failing_listener: Option<EventKind>,
}

/// Cheaply clonable handle to a shared in-memory document.
#[derive(Clone)]
pub struct FakeDom {
    state: Rc<RefCell<DomState>>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    /// A zoomable touch page containing only `<body>`.
    pub fn new() -> Self {
        let body = NodeData {
            spec: ElementSpec::new("body"),
            parent: None,
            children: Vec::new(),
            metrics: ScrollMetrics::default(),
            touch_action: None,
            ms_touch_action: None,
            onclick: None,
        };
        Self {
            state: Rc::new(RefCell::new(DomState {
                nodes: vec![body],
                listeners: Vec::new(),
                next_listener: 1,
                active: None,
                records: Vec::new(),
                touch_supported: true,
                viewport_content: Some("width=device-width, initial-scale=1".into()),
                document_width: 1280.0,
                viewport_width: 360.0,
                selection_active: false,
                nested_frame: false,
                page_offset: (0.0, 0.0),
                hit_test: None,
                hit_test_points: Vec::new(),
                label_control_supported: false,
                failing_listener: None,
            })),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        state.nodes.push(NodeData {
            spec,
            parent: Some(parent),
            children: Vec::new(),
            metrics: ScrollMetrics::default(),
            touch_action: None,
            ms_touch_action: None,
            onclick: None,
        });
        state.nodes[parent.0].children.push(id);
        id
    }

    /// Moves `node` under `new_parent`.
    pub fn reparent(&self, node: NodeId, new_parent: NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(old) = state.nodes[node.0].parent {
            state.nodes[old.0].children.retain(|child| *child != node);
        }
        state.nodes[node.0].parent = Some(new_parent);
        state.nodes[new_parent.0].children.push(node);
    }

    /// Makes `node` a scroll container with the given offset.
    pub fn make_scrollable(&self, node: NodeId, scroll_top: f64) {
        let mut state = self.state.borrow_mut();
        state.nodes[node.0].metrics = ScrollMetrics {
            scroll_height: 2000.0,
            offset_height: 400.0,
            scroll_top,
        };
    }

    pub fn set_scroll_top(&self, node: NodeId, scroll_top: f64) {
        self.state.borrow_mut().nodes[node.0].metrics.scroll_top = scroll_top;
    }

    pub fn set_touch_action(&self, node: NodeId, touch_action: Option<&str>) {
        self.state.borrow_mut().nodes[node.0].touch_action = touch_action.map(String::from);
    }

    pub fn set_ms_touch_action(&self, node: NodeId, touch_action: Option<&str>) {
        self.state.borrow_mut().nodes[node.0].ms_touch_action = touch_action.map(String::from);
    }

    pub fn set_onclick(&self, node: NodeId, handler: LegacyHandler) {
        self.state.borrow_mut().nodes[node.0].onclick = Some(handler);
    }

    pub fn has_onclick(&self, node: NodeId) -> bool {
        self.state.borrow().nodes[node.0].onclick.is_some()
    }

    pub fn set_touch_supported(&self, supported: bool) {
        self.state.borrow_mut().touch_supported = supported;
    }

    pub fn set_viewport(&self, content: Option<&str>, document_width: f64, viewport_width: f64) {
        let mut state = self.state.borrow_mut();
        state.viewport_content = content.map(String::from);
        state.document_width = document_width;
        state.viewport_width = viewport_width;
    }

    pub fn set_selection_active(&self, active: bool) {
        self.state.borrow_mut().selection_active = active;
    }

    pub fn set_nested_frame(&self, nested: bool) {
        self.state.borrow_mut().nested_frame = nested;
    }

    pub fn set_page_offset(&self, x: f64, y: f64) {
        self.state.borrow_mut().page_offset = (x, y);
    }

    /// The element `element_from_point` reports, wherever the point is.
    pub fn set_hit_test(&self, node: Option<NodeId>) {
        self.state.borrow_mut().hit_test = node;
    }

    /// Whether labels expose the `control` property.
    pub fn set_label_control_supported(&self, supported: bool) {
        self.state.borrow_mut().label_control_supported = supported;
    }

    /// Makes registration of `kind` listeners fail.
    pub fn fail_listener(&self, kind: Option<EventKind>) {
        self.state.borrow_mut().failing_listener = kind;
    }

    pub fn set_active_element(&self, node: Option<NodeId>) {
        self.state.borrow_mut().active = node;
    }

    pub fn records(&self) -> Vec<DomRecord> {
        self.state.borrow().records.clone()
    }

    /// Viewport points passed to `element_from_point`, oldest first.
    pub fn hit_test_points(&self) -> Vec<(f64, f64)> {
        self.state.borrow().hit_test_points.clone()
    }

    pub fn synthetic_clicks(&self) -> Vec<(NodeId, SyntheticClick)> {
        self.state
            .borrow()
            .records
            .iter()
            .filter_map(|record| match record {
                DomRecord::Synthetic { target, click } => Some((*target, *click)),
                _ => None,
            })
            .collect()
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.node == node)
            .count()
    }

    pub fn listeners_for(&self, node: NodeId) -> Vec<(EventKind, bool)> {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.node == node)
            .map(|listener| (listener.kind, listener.capture))
            .collect()
    }

    fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let state = self.state.borrow();
        let mut chain = vec![node];
        let mut current = state.nodes[node.0].parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = state.nodes[parent.0].parent;
        }
        chain
    }

    /// Runs `event` through the registered listeners: capture listeners from
    /// the outermost ancestor inwards, then the `onclick` slot and bubbling
    /// listeners from the target outwards.
    pub fn dispatch(&self, event: &LayerEvent<NodeId>) -> DispatchReport {
        let kind = event.kind();
        let path = self.ancestors_inclusive(*event.target());

        let mut plan: Vec<(NodeId, LayerCallback<NodeId>)> = Vec::new();
        {
            let state = self.state.borrow();
            for node in path.iter().rev() {
                plan.extend(
                    state
                        .listeners
                        .iter()
                        .filter(|l| l.node == *node && l.kind == kind && l.capture)
                        .map(|l| (l.node, Rc::clone(&l.callback))),
                );
            }
            for node in path.iter() {
                if kind == EventKind::Click {
                    if let Some(handler) = state.nodes[node.0].onclick.clone() {
                        let slot: LayerCallback<NodeId> =
                            Rc::new(move |event: &LayerEvent<NodeId>| {
                                handler(event);
                                EventResponse::PASS
                            });
                        plan.push((*node, slot));
                    }
                }
                plan.extend(
                    state
                        .listeners
                        .iter()
                        .filter(|l| l.node == *node && l.kind == kind && !l.capture)
                        .map(|l| (l.node, Rc::clone(&l.callback))),
                );
            }
        }

        log::trace!("dispatch {} to {:?}: {} listeners", kind.as_str(), event.target(), plan.len());
        let mut report = DispatchReport::default();
        let mut stopped_at: Option<NodeId> = None;
        for (node, callback) in plan {
            if let Some(stop_node) = stopped_at {
                if stop_node != node {
                    break;
                }
            }
            let response = callback(event);
            report.listeners_invoked += 1;
            report.default_prevented |= response.prevent_default;
            if response.stop_immediate_propagation {
                report.propagation_stopped = true;
                break;
            }
            if response.stop_propagation {
                report.propagation_stopped = true;
                stopped_at = Some(node);
            }
        }
        report
    }

    fn record(&self, record: DomRecord) {
        self.state.borrow_mut().records.push(record);
    }
}

impl Dom for FakeDom {
    type Element = NodeId;

    fn profile(&self, element: &NodeId) -> ElementProfile {
        let state = self.state.borrow();
        let spec = &state.nodes[element.0].spec;
        ElementProfile::new(&spec.tag)
            .with_type(&spec.input_type)
            .with_disabled(spec.disabled)
            .with_read_only(spec.read_only)
            .with_class(&spec.class_name)
    }

    fn parent_element(&self, element: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[element.0].parent
    }

    fn contains(&self, ancestor: &NodeId, element: &NodeId) -> bool {
        self.ancestors_inclusive(*element).contains(ancestor)
    }

    fn scroll_metrics(&self, element: &NodeId) -> ScrollMetrics {
        self.state.borrow().nodes[element.0].metrics
    }

    fn has_active_selection(&self) -> bool {
        self.state.borrow().selection_active
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let mut state = self.state.borrow_mut();
        state.hit_test_points.push((x, y));
        state.hit_test
    }

    fn page_offset(&self) -> (f64, f64) {
        self.state.borrow().page_offset
    }

    fn is_nested_frame(&self) -> bool {
        self.state.borrow().nested_frame
    }

    fn label_control(&self, label: &NodeId) -> LabelControl<NodeId> {
        if !self.state.borrow().label_control_supported {
            return LabelControl::Unsupported;
        }
        let control = match self.html_for(label) {
            Some(id) => self.element_by_id(&id),
            None => self.first_labellable_descendant(label),
        };
        LabelControl::Resolved(control)
    }

    fn html_for(&self, label: &NodeId) -> Option<String> {
        self.state.borrow().nodes[label.0]
            .spec
            .html_for
            .clone()
            .filter(|id| !id.is_empty())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.spec.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn first_labellable_descendant(&self, label: &NodeId) -> Option<NodeId> {
        let state = self.state.borrow();
        let mut stack: Vec<NodeId> = state.nodes[label.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            let spec = &state.nodes[node.0].spec;
            let labellable = match ElementTag::from_name(&spec.tag) {
                ElementTag::Button | ElementTag::Select | ElementTag::Textarea => true,
                ElementTag::Input => spec.input_type != "hidden",
                ElementTag::Other(tag) => matches!(tag.as_str(), "keygen" | "meter" | "output" | "progress"),
                _ => false,
            };
            if labellable {
                return Some(node);
            }
            stack.extend(state.nodes[node.0].children.iter().rev().copied());
        }
        None
    }

    fn active_element(&self) -> Option<NodeId> {
        self.state.borrow().active
    }

    fn focus(&self, element: &NodeId) {
        self.state.borrow_mut().active = Some(*element);
        self.record(DomRecord::Focus(*element));
    }

    fn blur(&self, element: &NodeId) {
        {
            let mut state = self.state.borrow_mut();
            if state.active == Some(*element) {
                state.active = None;
            }
        }
        self.record(DomRecord::Blur(*element));
    }

    fn supports_selection_range(&self, element: &NodeId) -> bool {
        let state = self.state.borrow();
        let spec = &state.nodes[element.0].spec;
        spec.tag == "input"
            && matches!(
                spec.input_type.as_str(),
                "" | "text" | "search" | "url" | "tel" | "password"
            )
    }

    fn place_caret_at_end(&self, element: &NodeId) {
        self.state.borrow_mut().active = Some(*element);
        self.record(DomRecord::CaretAtEnd(*element));
    }

    fn dispatch_synthetic(&self, target: &NodeId, click: &SyntheticClick) {
        self.record(DomRecord::Synthetic {
            target: *target,
            click: *click,
        });
        let kind = match click.event_type {
            SyntheticEventType::Click => MouseKind::Click,
            SyntheticEventType::MouseDown => MouseKind::Down,
        };
        let event = LayerEvent::Mouse(MouseInput {
            kind,
            target: *target,
            cancelable: true,
            detail: 1,
            forwarded: true,
        });
        self.dispatch(&event);
    }

    fn guard_environment(&self, layer: &NodeId) -> GuardEnvironment {
        let state = self.state.borrow();
        let node = &state.nodes[layer.0];
        GuardEnvironment {
            touch_supported: state.touch_supported,
            touch_action: node.touch_action.clone(),
            ms_touch_action: node.ms_touch_action.clone(),
            viewport_content: state.viewport_content.clone(),
            document_width: state.document_width,
            viewport_width: state.viewport_width,
        }
    }
}

impl LayerHost for FakeDom {
    type Listener = ListenerId;

    fn add_listener(
        &self,
        layer: &NodeId,
        kind: EventKind,
        capture: bool,
        callback: LayerCallback<NodeId>,
    ) -> Result<ListenerId, AttachError> {
        let mut state = self.state.borrow_mut();
        if state.failing_listener == Some(kind) {
            return Err(AttachError::Listener {
                event: kind,
                reason: "registration rejected".into(),
            });
        }
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.listeners.push(Registered {
            id,
            node: *layer,
            kind,
            capture,
            callback,
        });
        Ok(id)
    }

    fn remove_listener(&self, _layer: &NodeId, listener: ListenerId) {
        self.state
            .borrow_mut()
            .listeners
            .retain(|registered| registered.id != listener);
    }

    fn adopt_legacy_click_handler(&self, layer: &NodeId) -> Result<bool, AttachError> {
        let taken = self.state.borrow_mut().nodes[layer.0].onclick.take();
        let Some(handler) = taken else {
            return Ok(false);
        };
        let callback: LayerCallback<NodeId> = Rc::new(move |event: &LayerEvent<NodeId>| {
            handler(event);
            EventResponse::PASS
        });
        self.add_listener(layer, EventKind::Click, false, callback)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/fake_dom_tests.rs"]
mod tests;
