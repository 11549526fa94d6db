//! Attaching the controller to a layer element.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::config::QuickTapConfig;
use crate::controller::{Effect, TouchClickController};
use crate::device::DeviceCapabilities;
use crate::error::AttachError;
use crate::guard;
use crate::host::{Dom, LayerCallback, LayerHost, SyntheticClick};
use crate::input::{EventKind, LayerEvent};

/// Listeners registered on every instrumented layer, with their capture flag.
const LAYER_LISTENERS: [(EventKind, bool); 5] = [
    (EventKind::Click, true),
    (EventKind::TouchStart, false),
    (EventKind::TouchMove, false),
    (EventKind::TouchEnd, false),
    (EventKind::TouchCancel, false),
];

/// Android synthesises mouse events from touches too; they are intercepted
/// in the capture phase.
const ANDROID_MOUSE_LISTENERS: [(EventKind, bool); 3] = [
    (EventKind::MouseOver, true),
    (EventKind::MouseDown, true),
    (EventKind::MouseUp, true),
];

struct Attached<H: LayerHost> {
    host: H,
    layer: H::Element,
    controller: Rc<RefCell<TouchClickController<H>>>,
    listeners: SmallVec<[H::Listener; 8]>,
}

/// Handle for an attached layer.
///
/// When the attach guard decides the layer needs no help the handle is
/// inactive: nothing was registered and [`detach`](Self::detach) does
/// nothing. Listeners hold the controller alive until `detach`, so dropping
/// the handle alone leaves the layer instrumented.
pub struct QuickTap<H: LayerHost> {
    attached: Option<Attached<H>>,
}

impl<H: LayerHost> QuickTap<H> {
    /// Instruments `layer` unless the guard finds no click delay to remove.
    pub fn attach(
        host: H,
        layer: H::Element,
        config: QuickTapConfig,
        caps: DeviceCapabilities,
    ) -> Result<Self, AttachError> {
        if let Some(reason) = guard::skip_reason(&host.guard_environment(&layer), &caps) {
            log::debug!("layer left uninstrumented: {:?}", reason);
            return Ok(Self::inactive());
        }

        let controller = Rc::new(RefCell::new(TouchClickController::new(
            host.clone(),
            config,
            caps,
        )));
        let callback = dispatch_callback(host.clone(), Rc::clone(&controller));

        let wiring = if caps.android {
            ANDROID_MOUSE_LISTENERS
                .iter()
                .chain(LAYER_LISTENERS.iter())
                .copied()
                .collect::<SmallVec<[(EventKind, bool); 8]>>()
        } else {
            LAYER_LISTENERS.iter().copied().collect()
        };

        let mut listeners: SmallVec<[H::Listener; 8]> = SmallVec::new();
        for (kind, capture) in wiring {
            match host.add_listener(&layer, kind, capture, Rc::clone(&callback)) {
                Ok(listener) => listeners.push(listener),
                Err(err) => {
                    log::debug!("attach rolled back: {err}");
                    for listener in listeners.drain(..) {
                        host.remove_listener(&layer, listener);
                    }
                    return Err(err);
                }
            }
        }

        // A handler in the `onclick` slot would otherwise run before the
        // capturing click filter.
        if let Err(err) = host.adopt_legacy_click_handler(&layer) {
            for listener in listeners.drain(..) {
                host.remove_listener(&layer, listener);
            }
            return Err(err);
        }

        log::debug!("layer instrumented with {} listeners", listeners.len());
        Ok(Self {
            attached: Some(Attached {
                host,
                layer,
                controller,
                listeners,
            }),
        })
    }

    /// A handle that instruments nothing.
    pub fn inactive() -> Self {
        Self { attached: None }
    }

    pub fn is_active(&self) -> bool {
        self.attached.is_some()
    }

    pub fn layer(&self) -> Option<&H::Element> {
        self.attached.as_ref().map(|attached| &attached.layer)
    }

    /// Borrows the controller of an active handle.
    pub fn controller(&self) -> Option<Ref<'_, TouchClickController<H>>> {
        self.attached
            .as_ref()
            .map(|attached| attached.controller.borrow())
    }

    /// Removes every listener registered by [`attach`](Self::attach). Safe to
    /// call more than once. An event already being handled completes
    /// normally.
    pub fn detach(&mut self) {
        let Some(mut attached) = self.attached.take() else {
            return;
        };
        for listener in attached.listeners.drain(..) {
            attached.host.remove_listener(&attached.layer, listener);
        }
        if let Ok(mut controller) = attached.controller.try_borrow_mut() {
            controller.reset();
        }
        log::debug!("layer detached");
    }
}

/// Shorthand for [`QuickTap::attach`].
pub fn attach<H: LayerHost>(
    host: H,
    layer: H::Element,
    config: QuickTapConfig,
    caps: DeviceCapabilities,
) -> Result<QuickTap<H>, AttachError> {
    QuickTap::attach(host, layer, config, caps)
}

fn dispatch_callback<H: LayerHost>(
    host: H,
    controller: Rc<RefCell<TouchClickController<H>>>,
) -> LayerCallback<H::Element> {
    Rc::new(move |event: &LayerEvent<H::Element>| {
        // The borrow ends before effects run: a synthetic click dispatched
        // below re-enters this callback.
        let outcome = controller.borrow_mut().handle(event);
        log::trace!("{} -> {:?}", event.kind().as_str(), outcome.resolution);
        run_effects(&host, outcome.effects);
        outcome.response
    })
}

fn run_effects<D: Dom>(dom: &D, effects: impl IntoIterator<Item = Effect<D::Element>>) {
    for effect in effects {
        match effect {
            Effect::Focus(target) => dom.focus(&target),
            Effect::PlaceCaretAtEnd(target) => dom.place_caret_at_end(&target),
            Effect::SendClick { target, click } => send_click(dom, &target, &click),
        }
    }
}

/// Blurs whatever holds focus first; some Android builds ignore a synthetic
/// click while another element is focused.
fn send_click<D: Dom>(dom: &D, target: &D::Element, click: &SyntheticClick) {
    if let Some(active) = dom.active_element() {
        if active != *target {
            dom.blur(&active);
        }
    }
    dom.dispatch_synthetic(target, click);
}
