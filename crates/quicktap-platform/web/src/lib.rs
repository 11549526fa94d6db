//! Browser binding for QuickTap.
//!
//! [`WebDom`] implements the core host traits over `web-sys`; events are
//! converted in [`events`] and the controller's responses applied back to
//! the live DOM event. Script callers use [`QuickTapLayer`].

pub mod bindings;
pub mod dom;
pub mod events;

pub use bindings::{config_from_options, QuickTapLayer};
pub use dom::{WebDom, WebListener};

use quicktap_core::{QuickTap, QuickTapConfig};
use wasm_bindgen::JsValue;
use web_sys::Element;

/// Attaches to `layer` in the global document, with quirks detected from
/// the user agent.
pub fn attach_layer(layer: Element, config: QuickTapConfig) -> Result<QuickTap<WebDom>, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let dom = WebDom::global()?;
    let caps = dom.device_capabilities();
    log::debug!("attaching with {:?}", caps);
    QuickTap::attach(dom, layer, config, caps)
        .map_err(|err| js_sys::Error::new(&err.to_string()).into())
}
