//! JavaScript entry points.

use js_sys::{Object, Reflect};
use quicktap_core::{QuickTap, QuickTapConfig};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::WebDom;

/// A layer instrumented from script:
///
/// ```js
/// const tap = new QuickTapLayer(document.body, { tapDelay: 150 });
/// tap.destroy();
/// ```
#[wasm_bindgen]
pub struct QuickTapLayer {
    inner: QuickTap<WebDom>,
}

#[wasm_bindgen]
impl QuickTapLayer {
    /// `options` may carry `touchBoundary`, `tapDelay` and `tapTimeout`.
    /// Missing or falsy values use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(layer: Element, options: Option<Object>) -> Result<QuickTapLayer, JsValue> {
        let config = options
            .as_ref()
            .map(config_from_options)
            .unwrap_or_default();
        let inner = crate::attach_layer(layer, config)?;
        Ok(Self { inner })
    }

    /// False when the page needed no instrumentation.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Removes every listener. Further calls do nothing.
    pub fn destroy(&mut self) {
        self.inner.detach();
    }
}

/// Reads a script options object.
pub fn config_from_options(options: &Object) -> QuickTapConfig {
    let number = |name: &str| {
        Reflect::get(options, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_f64())
    };
    QuickTapConfig::from_raw(
        number("touchBoundary"),
        number("tapDelay"),
        number("tapTimeout"),
    )
}

/// Routes `log` output to the browser console.
#[cfg(feature = "logging")]
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
}
