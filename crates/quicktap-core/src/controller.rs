//! Touch-to-click state machine.
//!
//! A tap moves through `Idle -> Tracking -> Settled/Idle`. Every handler is
//! a transition function returning an [`Outcome`]: the response for the DOM
//! event and the side effects to run. Effects are executed by the caller
//! after the controller is released, so a synthetic click that re-enters the
//! layer's own click listener finds the state already updated.

use smallvec::SmallVec;

use crate::config::{QuickTapConfig, NATIVE_FOCUS_DELAY};
use crate::device::DeviceCapabilities;
use crate::host::{Dom, LabelControl, SyntheticClick, SyntheticEventType};
use crate::input::{EventResponse, LayerEvent, MouseInput, TouchInput, TouchKind, TouchPoint};
use crate::policy::{self, ElementProfile, ElementTag};
use crate::scroll_parent::ScrollParentTable;

/// A touch that may still become a tap.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedTap<E> {
    pub target: E,
    /// Time stamp of the touch start, in milliseconds.
    pub started_at: f64,
    pub start_x: f64,
    pub start_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TapPhase<E> {
    Idle,
    Tracking(TrackedTap<E>),
    /// The touch ended; the original target is kept so the native mouse
    /// events that follow can be filtered.
    Settled { target: E },
}

/// How an event left the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No terminal decision for this event.
    Pending,
    /// Tracking aborted, no synthetic click.
    Cancelled,
    /// The native behaviour passes through unmodified.
    Ignored,
    /// A synthetic click was emitted.
    Clicked,
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<E> {
    Focus(E),
    PlaceCaretAtEnd(E),
    /// Blur the active element if it is not `target`, then dispatch.
    SendClick { target: E, click: SyntheticClick },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<E> {
    pub response: EventResponse,
    pub effects: SmallVec<[Effect<E>; 2]>,
    pub resolution: Resolution,
}

impl<E> Outcome<E> {
    fn new(response: EventResponse, resolution: Resolution) -> Self {
        Self {
            response,
            effects: SmallVec::new(),
            resolution,
        }
    }

    fn pass() -> Self {
        Self::new(EventResponse::PASS, Resolution::Pending)
    }

    fn with_effects(mut self, effects: SmallVec<[Effect<E>; 2]>) -> Self {
        self.effects = effects;
        self
    }
}

pub struct TouchClickController<D: Dom> {
    dom: D,
    config: QuickTapConfig,
    caps: DeviceCapabilities,
    phase: TapPhase<D::Element>,
    last_touch_identifier: i64,
    last_click_time: Option<f64>,
    cancel_next_click: bool,
    scroll_parents: ScrollParentTable<D::Element>,
}

impl<D: Dom> TouchClickController<D> {
    pub fn new(dom: D, config: QuickTapConfig, caps: DeviceCapabilities) -> Self {
        Self {
            dom,
            config: config.normalized(),
            caps,
            phase: TapPhase::Idle,
            last_touch_identifier: 0,
            last_click_time: None,
            cancel_next_click: false,
            scroll_parents: ScrollParentTable::new(),
        }
    }

    pub fn config(&self) -> &QuickTapConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.caps
    }

    pub fn phase(&self) -> &TapPhase<D::Element> {
        &self.phase
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, TapPhase::Tracking(_))
    }

    /// The element the current or last gesture started on.
    pub fn tracked_target(&self) -> Option<&D::Element> {
        match &self.phase {
            TapPhase::Idle => None,
            TapPhase::Tracking(tap) => Some(&tap.target),
            TapPhase::Settled { target } => Some(target),
        }
    }

    pub fn cancel_next_click(&self) -> bool {
        self.cancel_next_click
    }

    pub fn last_click_time(&self) -> Option<f64> {
        self.last_click_time
    }

    pub fn scroll_parents(&self) -> &ScrollParentTable<D::Element> {
        &self.scroll_parents
    }

    /// Drops all gesture state and side-table entries.
    pub fn reset(&mut self) {
        self.phase = TapPhase::Idle;
        self.cancel_next_click = false;
        self.scroll_parents.clear();
    }

    pub fn needs_click(&self, target: &D::Element) -> bool {
        policy::needs_click(&self.dom.profile(target), &self.caps)
    }

    pub fn needs_focus(&self, target: &D::Element) -> bool {
        policy::needs_focus(&self.dom.profile(target), &self.caps)
    }

    pub fn handle(&mut self, event: &LayerEvent<D::Element>) -> Outcome<D::Element> {
        match event {
            LayerEvent::Touch(touch) => match touch.kind {
                TouchKind::Start => self.on_touch_start(touch),
                TouchKind::Move => self.on_touch_move(touch),
                TouchKind::End => self.on_touch_end(touch),
                TouchKind::Cancel => self.on_touch_cancel(),
            },
            LayerEvent::Mouse(mouse) => match mouse.kind {
                crate::input::MouseKind::Click => self.on_click(mouse),
                _ => self.on_mouse(mouse),
            },
        }
    }

    pub fn on_touch_start(&mut self, event: &TouchInput<D::Element>) -> Outcome<D::Element> {
        // A second finger means pinch-zoom; leave it to the browser.
        if event.target_touches.len() > 1 {
            log::trace!("touchstart ignored: {} touches", event.target_touches.len());
            return Outcome::pass();
        }
        let Some(touch) = event.first_target_touch().copied() else {
            return Outcome::pass();
        };

        if self.caps.ios {
            // Only trusted events deselect text on iOS.
            if self.dom.has_active_selection() {
                log::trace!("touchstart ignored: active text selection");
                return Outcome::pass();
            }

            if self.caps.reliable_touch_identifiers() {
                // A dialog opened from a click handler replays the previous
                // touch pair with the same identifier. Emulated touches always
                // report identifier 0.
                if touch.identifier != 0 && touch.identifier == self.last_touch_identifier {
                    log::debug!("touchstart dropped: replayed identifier {}", touch.identifier);
                    return Outcome::new(EventResponse::PREVENT_DEFAULT, Resolution::Ignored);
                }
                self.last_touch_identifier = touch.identifier;
                self.scroll_parents.update(&self.dom, &event.target);
            }
        }

        self.phase = TapPhase::Tracking(TrackedTap {
            target: event.target.clone(),
            started_at: event.time_stamp,
            start_x: touch.page_x,
            start_y: touch.page_y,
        });
        log::trace!("tracking tap on {:?}", event.target);

        if self.within_tap_delay(event.time_stamp) {
            // Fast double tap: keep the browser from producing a click.
            return Outcome::new(EventResponse::PREVENT_DEFAULT, Resolution::Pending);
        }
        Outcome::pass()
    }

    pub fn on_touch_move(&mut self, event: &TouchInput<D::Element>) -> Outcome<D::Element> {
        let TapPhase::Tracking(tap) = &self.phase else {
            return Outcome::pass();
        };

        if tap.target != event.target || self.touch_has_moved(tap, event) {
            log::trace!("tap cancelled: touch left target or boundary");
            self.phase = TapPhase::Idle;
            return Outcome::new(EventResponse::PASS, Resolution::Cancelled);
        }
        Outcome::pass()
    }

    pub fn on_touch_end(&mut self, event: &TouchInput<D::Element>) -> Outcome<D::Element> {
        let TapPhase::Tracking(tap) = &self.phase else {
            return Outcome::pass();
        };
        let tap = tap.clone();

        // The tracking state is left untouched by both aborts below.
        if self.within_tap_delay(event.time_stamp) {
            log::debug!("touchend within tap delay: cancelling next click");
            self.cancel_next_click = true;
            return Outcome::new(EventResponse::PASS, Resolution::Ignored);
        }
        if event.time_stamp - tap.started_at > self.config.tap_timeout_ms() {
            log::debug!("touchend after tap timeout: native click");
            return Outcome::new(EventResponse::PASS, Resolution::Ignored);
        }

        self.cancel_next_click = false;
        self.last_click_time = Some(event.time_stamp);
        self.phase = TapPhase::Settled {
            target: tap.target.clone(),
        };

        let touch = event.first_changed_touch().copied().unwrap_or_default();
        let mut target = tap.target.clone();

        if self.caps.ios_with_bad_target {
            let (offset_x, offset_y) = self.dom.page_offset();
            if let Some(hit) = self
                .dom
                .element_from_point(touch.page_x - offset_x, touch.page_y - offset_y)
            {
                target = hit;
            }
            self.scroll_parents.inherit(&tap.target, &target);
        }

        let mut effects = SmallVec::new();
        let mut profile = self.dom.profile(&target);

        if profile.tag == ElementTag::Label {
            if let Some(control) = self.find_control(&target) {
                effects.push(self.focus_effect(&target, &profile));
                if self.caps.android {
                    // Android forwards label clicks to the control natively.
                    return Outcome::new(EventResponse::PASS, Resolution::Ignored)
                        .with_effects(effects);
                }
                profile = self.dom.profile(&control);
                target = control;
            }
        } else if policy::needs_focus(&profile, &self.caps) {
            let held_for = event.time_stamp - tap.started_at;
            let native_focus_ms = NATIVE_FOCUS_DELAY.as_millis() as f64;
            if held_for > native_focus_ms
                || (self.caps.ios && self.dom.is_nested_frame() && profile.tag == ElementTag::Input)
            {
                log::debug!("focus left to the browser after {held_for}ms");
                self.phase = TapPhase::Idle;
                return Outcome::new(EventResponse::PASS, Resolution::Ignored);
            }

            effects.push(self.focus_effect(&target, &profile));
            effects.push(self.send_click_effect(&target, &profile, &touch));

            // iOS select menus only open when the native event goes through.
            let response = if !self.caps.ios || profile.tag != ElementTag::Select {
                self.phase = TapPhase::Idle;
                EventResponse::PREVENT_DEFAULT
            } else {
                EventResponse::PASS
            };
            log::debug!("focused and clicked {:?}", target);
            return Outcome::new(response, Resolution::Clicked).with_effects(effects);
        }

        if self.caps.ios
            && !self.caps.ios4
            && self.scroll_parents.scrolled_since_update(&self.dom, &target)
        {
            log::debug!("tap stopped a scroll: no synthetic click");
            return Outcome::new(EventResponse::PASS, Resolution::Ignored).with_effects(effects);
        }

        if policy::needs_click(&profile, &self.caps) {
            log::debug!("{:?} needs a native click", target);
            return Outcome::new(EventResponse::PASS, Resolution::Ignored).with_effects(effects);
        }

        effects.push(self.send_click_effect(&target, &profile, &touch));
        log::debug!("synthetic click on {:?}", target);
        Outcome::new(EventResponse::PREVENT_DEFAULT, Resolution::Clicked).with_effects(effects)
    }

    pub fn on_touch_cancel(&mut self) -> Outcome<D::Element> {
        self.phase = TapPhase::Idle;
        Outcome::new(EventResponse::PASS, Resolution::Cancelled)
    }

    /// Filters native mouse events that trail a handled tap.
    pub fn on_mouse(&mut self, event: &MouseInput<D::Element>) -> Outcome<D::Element> {
        if self.mouse_permitted(event) {
            Outcome::pass()
        } else {
            log::trace!("suppressed native {:?}", event.kind);
            Outcome::new(EventResponse::SUPPRESS, Resolution::Ignored)
        }
    }

    pub fn on_click(&mut self, event: &MouseInput<D::Element>) -> Outcome<D::Element> {
        // Some other script clicked before the tap ended; give up on it.
        if self.is_tracking() {
            log::trace!("click during tracking: tap abandoned");
            self.phase = TapPhase::Idle;
            return Outcome::new(EventResponse::PASS, Resolution::Cancelled);
        }

        // The iOS keyboard's "Go" button fakes a zero-detail click on the
        // form's submit input.
        if event.detail == 0 && self.dom.profile(&event.target).input_type == "submit" {
            return Outcome::pass();
        }

        if self.mouse_permitted(event) {
            return Outcome::pass();
        }
        self.phase = TapPhase::Idle;
        log::trace!("suppressed native click");
        Outcome::new(EventResponse::SUPPRESS, Resolution::Ignored)
    }

    fn mouse_permitted(&self, event: &MouseInput<D::Element>) -> bool {
        let Some(target) = self.tracked_target() else {
            return true;
        };
        if event.forwarded || !event.cancelable {
            return true;
        }
        self.needs_click(target) && !self.cancel_next_click
    }

    fn within_tap_delay(&self, time_stamp: f64) -> bool {
        self.last_click_time
            .is_some_and(|last| time_stamp - last < self.config.tap_delay_ms())
    }

    fn touch_has_moved(&self, tap: &TrackedTap<D::Element>, event: &TouchInput<D::Element>) -> bool {
        let Some(touch) = event.first_changed_touch() else {
            return false;
        };
        let boundary = self.config.touch_boundary;
        (touch.page_x - tap.start_x).abs() > boundary || (touch.page_y - tap.start_y).abs() > boundary
    }

    /// The form control a label activates.
    pub fn find_control(&self, label: &D::Element) -> Option<D::Element> {
        match self.dom.label_control(label) {
            LabelControl::Resolved(control) => control,
            LabelControl::Unsupported => match self.dom.html_for(label) {
                Some(id) => self.dom.element_by_id(&id),
                None => self.dom.first_labellable_descendant(label),
            },
        }
    }

    fn focus_effect(&self, target: &D::Element, profile: &ElementProfile) -> Effect<D::Element> {
        let selection_range = self.dom.supports_selection_range(target);
        if policy::places_caret_on_focus(profile, &self.caps, selection_range) {
            Effect::PlaceCaretAtEnd(target.clone())
        } else {
            Effect::Focus(target.clone())
        }
    }

    fn send_click_effect(
        &self,
        target: &D::Element,
        profile: &ElementProfile,
        touch: &TouchPoint,
    ) -> Effect<D::Element> {
        Effect::SendClick {
            target: target.clone(),
            click: SyntheticClick {
                event_type: determine_event_type(profile, &self.caps),
                screen_x: touch.screen_x,
                screen_y: touch.screen_y,
                client_x: touch.client_x,
                client_y: touch.client_y,
            },
        }
    }
}

/// Android select widgets ignore synthetic clicks but open on a press.
pub fn determine_event_type(
    target: &ElementProfile,
    caps: &DeviceCapabilities,
) -> SyntheticEventType {
    if caps.android && target.tag == ElementTag::Select {
        SyntheticEventType::MouseDown
    } else {
        SyntheticEventType::Click
    }
}
