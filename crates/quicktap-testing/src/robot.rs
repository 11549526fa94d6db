//! Robot-style driver for tap scenarios.
//!
//! [`TapRobot`] owns a [`FakeDom`], attaches QuickTap to a layer and feeds it
//! touch and mouse sequences against a manual clock.
//!
//! # Example
//!
//! ```
//! use quicktap_core::prelude::*;
//! use quicktap_testing::prelude::*;
//!
//! let dom = FakeDom::new();
//! let layer = dom.append(dom.body(), ElementSpec::new("div"));
//! let button = dom.append(layer, ElementSpec::new("button"));
//!
//! let mut robot = TapRobot::attach(dom, layer, DeviceCapabilities::ios()).unwrap();
//! robot.tap(button);
//! assert_eq!(robot.synthetic_clicks().len(), 1);
//! ```

use std::cell::Ref;

use quicktap_core::host::SyntheticClick;
use quicktap_core::input::{LayerEvent, MouseInput, MouseKind, TouchInput, TouchKind, TouchPoint};
use quicktap_core::{AttachError, DeviceCapabilities, QuickTap, QuickTapConfig, TouchClickController};

use crate::fake_dom::{DispatchReport, DomRecord, FakeDom, NodeId};

/// Duration of a plain tap driven by [`TapRobot::tap`].
pub const TAP_HOLD_MS: f64 = 50.0;

/// Where [`TapRobot::tap`] touches, in client coordinates.
pub const TAP_POINT: (f64, f64) = (40.0, 60.0);

/// Drives a QuickTap-instrumented layer in a [`FakeDom`].
pub struct TapRobot {
    dom: FakeDom,
    quicktap: QuickTap<FakeDom>,
    now: f64,
    next_identifier: i64,
    identifier: i64,
}

impl TapRobot {
    /// Attaches with the default configuration.
    pub fn attach(dom: FakeDom, layer: NodeId, caps: DeviceCapabilities) -> Result<Self, AttachError> {
        Self::attach_with(dom, layer, QuickTapConfig::default(), caps)
    }

    pub fn attach_with(
        dom: FakeDom,
        layer: NodeId,
        config: QuickTapConfig,
        caps: DeviceCapabilities,
    ) -> Result<Self, AttachError> {
        let quicktap = QuickTap::attach(dom.clone(), layer, config, caps)?;
        Ok(Self {
            dom,
            quicktap,
            // Event timestamps in a fresh page are never zero.
            now: 1_000.0,
            next_identifier: 1,
            identifier: 0,
        })
    }

    pub fn dom(&self) -> &FakeDom {
        &self.dom
    }

    pub fn quicktap(&self) -> &QuickTap<FakeDom> {
        &self.quicktap
    }

    pub fn quicktap_mut(&mut self) -> &mut QuickTap<FakeDom> {
        &mut self.quicktap
    }

    /// Panics on an inactive handle.
    pub fn controller(&self) -> Ref<'_, TouchClickController<FakeDom>> {
        match self.quicktap.controller() {
            Some(controller) => controller,
            None => panic!("layer was not instrumented"),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advances the event clock by `ms` milliseconds.
    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }

    /// Starts a touch with a fresh identifier.
    pub fn touch_start(&mut self, target: NodeId, x: f64, y: f64) -> DispatchReport {
        let identifier = self.next_identifier;
        self.next_identifier += 1;
        self.touch_start_with_identifier(target, identifier, x, y)
    }

    pub fn touch_start_with_identifier(
        &mut self,
        target: NodeId,
        identifier: i64,
        x: f64,
        y: f64,
    ) -> DispatchReport {
        self.identifier = identifier;
        self.send_touch(TouchKind::Start, target, x, y)
    }

    /// A second finger joins the current touch.
    pub fn second_finger_start(&mut self, target: NodeId, x: f64, y: f64) -> DispatchReport {
        let first = TouchPoint::at(self.identifier, x, y);
        let second = TouchPoint::at(self.identifier + 1_000, x + 30.0, y);
        let event = TouchInput::new(TouchKind::Start, target, self.now, first).with_extra_touch(second);
        self.dom.dispatch(&LayerEvent::Touch(event))
    }

    pub fn touch_move(&mut self, target: NodeId, x: f64, y: f64) -> DispatchReport {
        self.send_touch(TouchKind::Move, target, x, y)
    }

    pub fn touch_end(&mut self, target: NodeId, x: f64, y: f64) -> DispatchReport {
        self.send_touch(TouchKind::End, target, x, y)
    }

    pub fn touch_cancel(&mut self, target: NodeId) -> DispatchReport {
        let (x, y) = TAP_POINT;
        self.send_touch(TouchKind::Cancel, target, x, y)
    }

    /// Touch start, [`TAP_HOLD_MS`] of stillness, touch end at [`TAP_POINT`].
    /// Returns the touch-end report.
    pub fn tap(&mut self, target: NodeId) -> DispatchReport {
        let (x, y) = TAP_POINT;
        self.touch_start(target, x, y);
        self.advance(TAP_HOLD_MS);
        self.touch_end(target, x, y)
    }

    /// The delayed click the browser fires after a tap.
    pub fn native_click(&mut self, target: NodeId) -> DispatchReport {
        self.native_mouse(MouseKind::Click, target)
    }

    pub fn native_mouse(&mut self, kind: MouseKind, target: NodeId) -> DispatchReport {
        self.dom
            .dispatch(&LayerEvent::Mouse(MouseInput::native(kind, target)))
    }

    /// A click with `detail` 0, as produced by pressing enter in a form.
    pub fn keyboard_click(&mut self, target: NodeId) -> DispatchReport {
        let mut input = MouseInput::native(MouseKind::Click, target);
        input.detail = 0;
        self.dom.dispatch(&LayerEvent::Mouse(input))
    }

    pub fn synthetic_clicks(&self) -> Vec<(NodeId, SyntheticClick)> {
        self.dom.synthetic_clicks()
    }

    pub fn records(&self) -> Vec<DomRecord> {
        self.dom.records()
    }

    pub fn detach(&mut self) {
        self.quicktap.detach();
    }

    fn send_touch(&mut self, kind: TouchKind, target: NodeId, x: f64, y: f64) -> DispatchReport {
        let point = TouchPoint::at(self.identifier, x, y);
        let event = TouchInput::new(kind, target, self.now, point);
        self.dom.dispatch(&LayerEvent::Touch(event))
    }
}
