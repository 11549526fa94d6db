//! Conversion between DOM events and the controller's event model.

use js_sys::Reflect;
use quicktap_core::input::{
    EventKind, EventResponse, LayerEvent, MouseInput, TouchInput, TouchList, TouchPoint,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, Node, TouchEvent, UiEvent};

/// Expando property marking a synthetic click as one of ours.
pub const FORWARDED_MARKER: &str = "forwardedTouchEvent";

/// Resolves the element an event is aimed at. Some older browsers target
/// the text node under the finger.
pub fn event_target_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    if let Some(node) = target.dyn_ref::<Node>() {
        if node.node_type() == Node::TEXT_NODE {
            return node.parent_element();
        }
    }
    target.dyn_into::<Element>().ok()
}

/// Builds a [`LayerEvent`] from a DOM event the layer listens to.
pub fn to_layer_event(event: &Event) -> Option<LayerEvent<Element>> {
    let kind = EventKind::from_type(&event.type_())?;
    let target = event_target_element(event)?;

    if let Some(touch_kind) = kind.touch_kind() {
        let touch_event = event.dyn_ref::<TouchEvent>()?;
        return Some(LayerEvent::Touch(TouchInput {
            kind: touch_kind,
            target,
            time_stamp: event.time_stamp(),
            target_touches: touch_points(&touch_event.target_touches()),
            changed_touches: touch_points(&touch_event.changed_touches()),
        }));
    }

    let mouse_kind = kind.mouse_kind()?;
    let detail = event.dyn_ref::<UiEvent>().map_or(0, UiEvent::detail);
    Some(LayerEvent::Mouse(MouseInput {
        kind: mouse_kind,
        target,
        cancelable: event.cancelable(),
        detail,
        forwarded: is_forwarded(event),
    }))
}

fn touch_points(list: &web_sys::TouchList) -> TouchList {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| TouchPoint {
            identifier: i64::from(touch.identifier()),
            page_x: touch.page_x() as f64,
            page_y: touch.page_y() as f64,
            screen_x: touch.screen_x() as f64,
            screen_y: touch.screen_y() as f64,
            client_x: touch.client_x() as f64,
            client_y: touch.client_y() as f64,
        })
        .collect()
}

pub fn is_forwarded(event: &Event) -> bool {
    Reflect::get(event, &JsValue::from_str(FORWARDED_MARKER))
        .map(|value| value.is_truthy())
        .unwrap_or(false)
}

pub fn mark_forwarded(event: &Event) {
    if let Err(err) = Reflect::set(event, &JsValue::from_str(FORWARDED_MARKER), &JsValue::TRUE) {
        log::warn!("could not mark synthetic event: {:?}", err);
    }
}

/// Applies the controller's decision to the live event.
pub fn apply_response(event: &Event, response: EventResponse) {
    if response.stop_immediate_propagation {
        event.stop_immediate_propagation();
    }
    if response.stop_propagation {
        event.stop_propagation();
    }
    if response.prevent_default {
        event.prevent_default();
    }
}
