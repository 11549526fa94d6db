//! [`Dom`] and [`LayerHost`] over `web-sys`.

use js_sys::{Object, Reflect};
use quicktap_core::guard::GuardEnvironment;
use quicktap_core::host::{
    Dom, LabelControl, LayerCallback, LayerHost, ScrollMetrics, SyntheticClick,
};
use quicktap_core::input::EventKind;
use quicktap_core::policy::{ElementProfile, LABELLABLE_SELECTOR};
use quicktap_core::{AttachError, DeviceCapabilities};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, MouseEvent, MouseEventInit, Window,
};

use crate::events;

/// The browser document a layer lives in.
#[derive(Clone, Debug)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window.document().ok_or("window has no document")?;
        Ok(Self { window, document })
    }

    /// The document of the global window.
    pub fn global() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window exists")?;
        Self::new(window)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Quirk flags from `navigator.userAgent`.
    pub fn device_capabilities(&self) -> DeviceCapabilities {
        match self.window.navigator().user_agent() {
            Ok(user_agent) => DeviceCapabilities::from_user_agent(&user_agent),
            Err(err) => {
                log::warn!("user agent unavailable: {:?}", err);
                DeviceCapabilities::desktop()
            }
        }
    }
}

fn js_prop(target: &JsValue, name: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

fn inline_style(element: &Element, property: &str) -> Option<String> {
    let style = element.dyn_ref::<HtmlElement>()?.style();
    let value = style.get_property_value(property).ok()?;
    (!value.is_empty()).then_some(value)
}

impl Dom for WebDom {
    type Element = Element;

    fn profile(&self, element: &Element) -> ElementProfile {
        let input_type = js_prop(element, "type").as_string().unwrap_or_default();
        ElementProfile::new(&element.tag_name())
            .with_type(&input_type)
            .with_disabled(js_prop(element, "disabled").is_truthy())
            .with_read_only(js_prop(element, "readOnly").is_truthy())
            .with_class(&element.class_name())
    }

    fn parent_element(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn contains(&self, ancestor: &Element, element: &Element) -> bool {
        ancestor.contains(Some(element))
    }

    fn scroll_metrics(&self, element: &Element) -> ScrollMetrics {
        let offset_height = element
            .dyn_ref::<HtmlElement>()
            .map_or(0.0, |html| html.offset_height() as f64);
        ScrollMetrics {
            scroll_height: element.scroll_height() as f64,
            offset_height,
            scroll_top: element.scroll_top() as f64,
        }
    }

    fn has_active_selection(&self) -> bool {
        match self.window.get_selection() {
            Ok(Some(selection)) => selection.range_count() > 0 && !selection.is_collapsed(),
            _ => false,
        }
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<Element> {
        self.document.element_from_point(x as f32, y as f32)
    }

    fn page_offset(&self) -> (f64, f64) {
        (
            self.window.page_x_offset().unwrap_or(0.0),
            self.window.page_y_offset().unwrap_or(0.0),
        )
    }

    fn is_nested_frame(&self) -> bool {
        match self.window.top() {
            Ok(Some(top)) => !Object::is(&top, &self.window),
            _ => false,
        }
    }

    fn label_control(&self, label: &Element) -> LabelControl<Element> {
        let control = js_prop(label, "control");
        if control.is_undefined() {
            return LabelControl::Unsupported;
        }
        LabelControl::Resolved(control.dyn_into::<Element>().ok())
    }

    fn html_for(&self, label: &Element) -> Option<String> {
        js_prop(label, "htmlFor")
            .as_string()
            .filter(|id| !id.is_empty())
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn first_labellable_descendant(&self, label: &Element) -> Option<Element> {
        label.query_selector(LABELLABLE_SELECTOR).ok().flatten()
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&self, element: &Element) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(err) = html.focus() {
                log::warn!("focus failed: {:?}", err);
            }
        }
    }

    fn blur(&self, element: &Element) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(err) = html.blur() {
                log::warn!("blur failed: {:?}", err);
            }
        }
    }

    fn supports_selection_range(&self, element: &Element) -> bool {
        element.is_instance_of::<HtmlInputElement>()
            && js_prop(element, "setSelectionRange").is_function()
    }

    fn place_caret_at_end(&self, element: &Element) {
        let Some(input) = element.dyn_ref::<HtmlInputElement>() else {
            return;
        };
        // Selection offsets count UTF-16 code units.
        let length = input.value().encode_utf16().count() as u32;
        if let Err(err) = input.set_selection_range(length, length) {
            log::debug!("setSelectionRange rejected, focusing instead: {:?}", err);
            self.focus(element);
        }
    }

    fn dispatch_synthetic(&self, target: &Element, click: &SyntheticClick) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_view(Some(&self.window));
        init.set_detail(1);
        init.set_screen_x(click.screen_x as i32);
        init.set_screen_y(click.screen_y as i32);
        init.set_client_x(click.client_x as i32);
        init.set_client_y(click.client_y as i32);

        let event = match MouseEvent::new_with_mouse_event_init_dict(click.event_type.as_str(), &init) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("could not create synthetic {}: {:?}", click.event_type.as_str(), err);
                return;
            }
        };
        events::mark_forwarded(&event);
        if let Err(err) = target.dispatch_event(&event) {
            log::warn!("synthetic {} dispatch failed: {:?}", click.event_type.as_str(), err);
        }
    }

    fn guard_environment(&self, layer: &Element) -> GuardEnvironment {
        let viewport_content = self
            .document
            .query_selector("meta[name=viewport]")
            .ok()
            .flatten()
            .map(|meta| meta.get_attribute("content").unwrap_or_default());
        let ms_touch_action = layer
            .dyn_ref::<HtmlElement>()
            .and_then(|html| js_prop(&html.style(), "msTouchAction").as_string())
            .filter(|value| !value.is_empty());
        let document_width = self
            .document
            .document_element()
            .map_or(0.0, |root| root.scroll_width() as f64);
        let viewport_width = self
            .window
            .outer_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0);

        GuardEnvironment {
            touch_supported: Reflect::has(&self.window, &JsValue::from_str("ontouchstart"))
                .unwrap_or(false),
            touch_action: inline_style(layer, "touch-action"),
            ms_touch_action,
            viewport_content,
            document_width,
            viewport_width,
        }
    }
}

/// A registered listener and the closure backing it.
pub struct WebListener {
    kind: EventKind,
    capture: bool,
    closure: Closure<dyn Fn(Event)>,
}

impl LayerHost for WebDom {
    type Listener = WebListener;

    fn add_listener(
        &self,
        layer: &Element,
        kind: EventKind,
        capture: bool,
        callback: LayerCallback<Element>,
    ) -> Result<WebListener, AttachError> {
        // `Fn` so a synthetic event may re-enter a listener.
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(layer_event) = events::to_layer_event(&event) else {
                return;
            };
            let response = callback(&layer_event);
            events::apply_response(&event, response);
        }) as Box<dyn Fn(Event)>);

        layer
            .add_event_listener_with_callback_and_bool(
                kind.as_str(),
                closure.as_ref().unchecked_ref(),
                capture,
            )
            .map_err(|err| AttachError::Listener {
                event: kind,
                reason: format!("{:?}", err),
            })?;

        Ok(WebListener {
            kind,
            capture,
            closure,
        })
    }

    fn remove_listener(&self, layer: &Element, listener: WebListener) {
        let result = layer.remove_event_listener_with_callback_and_bool(
            listener.kind.as_str(),
            listener.closure.as_ref().unchecked_ref(),
            listener.capture,
        );
        if let Err(err) = result {
            log::warn!("removing {} listener failed: {:?}", listener.kind.as_str(), err);
        }
    }

    fn adopt_legacy_click_handler(&self, layer: &Element) -> Result<bool, AttachError> {
        let Some(html) = layer.dyn_ref::<HtmlElement>() else {
            return Ok(false);
        };
        let Some(handler) = html.onclick() else {
            return Ok(false);
        };
        html.add_event_listener_with_callback("click", &handler)
            .map_err(|err| AttachError::LegacyHandler {
                reason: format!("{:?}", err),
            })?;
        html.set_onclick(None);
        log::debug!("adopted legacy onclick handler");
        Ok(true)
    }
}
