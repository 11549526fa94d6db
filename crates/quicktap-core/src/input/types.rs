use smallvec::SmallVec;

/// Every DOM event type the layer listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseOver,
    MouseDown,
    MouseUp,
    Click,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::MouseOver => "mouseover",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::Click => "click",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::TouchCancel => "touchcancel",
        }
    }

    /// Parses a DOM event `type`.
    pub fn from_type(name: &str) -> Option<Self> {
        Some(match name {
            "mouseover" => EventKind::MouseOver,
            "mousedown" => EventKind::MouseDown,
            "mouseup" => EventKind::MouseUp,
            "click" => EventKind::Click,
            "touchstart" => EventKind::TouchStart,
            "touchmove" => EventKind::TouchMove,
            "touchend" => EventKind::TouchEnd,
            "touchcancel" => EventKind::TouchCancel,
            _ => return None,
        })
    }

    pub fn touch_kind(self) -> Option<TouchKind> {
        match self {
            EventKind::TouchStart => Some(TouchKind::Start),
            EventKind::TouchMove => Some(TouchKind::Move),
            EventKind::TouchEnd => Some(TouchKind::End),
            EventKind::TouchCancel => Some(TouchKind::Cancel),
            _ => None,
        }
    }

    pub fn mouse_kind(self) -> Option<MouseKind> {
        match self {
            EventKind::MouseOver => Some(MouseKind::Over),
            EventKind::MouseDown => Some(MouseKind::Down),
            EventKind::MouseUp => Some(MouseKind::Up),
            EventKind::Click => Some(MouseKind::Click),
            _ => None,
        }
    }

    pub fn is_touch(self) -> bool {
        matches!(
            self,
            EventKind::TouchStart | EventKind::TouchMove | EventKind::TouchEnd | EventKind::TouchCancel
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

impl TouchKind {
    pub fn event_kind(self) -> EventKind {
        match self {
            TouchKind::Start => EventKind::TouchStart,
            TouchKind::Move => EventKind::TouchMove,
            TouchKind::End => EventKind::TouchEnd,
            TouchKind::Cancel => EventKind::TouchCancel,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseKind {
    Over,
    Down,
    Up,
    Click,
}

impl MouseKind {
    pub fn event_kind(self) -> EventKind {
        match self {
            MouseKind::Over => EventKind::MouseOver,
            MouseKind::Down => EventKind::MouseDown,
            MouseKind::Up => EventKind::MouseUp,
            MouseKind::Click => EventKind::Click,
        }
    }
}

/// One contact point, in the coordinate spaces the DOM reports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub identifier: i64,
    pub page_x: f64,
    pub page_y: f64,
    pub screen_x: f64,
    pub screen_y: f64,
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    /// A touch whose page, client and screen coordinates coincide.
    pub fn at(identifier: i64, x: f64, y: f64) -> Self {
        Self {
            identifier,
            page_x: x,
            page_y: y,
            screen_x: x,
            screen_y: y,
            client_x: x,
            client_y: y,
        }
    }
}

/// Touch lists almost always hold a single point.
pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// A touch event as seen by the controller.
///
/// `target` is already resolved to an element; text-node targets are mapped
/// to their parent by the host.
#[derive(Clone, Debug)]
pub struct TouchInput<E> {
    pub kind: TouchKind,
    pub target: E,
    /// Event time in milliseconds.
    pub time_stamp: f64,
    pub target_touches: TouchList,
    pub changed_touches: TouchList,
}

impl<E> TouchInput<E> {
    pub fn new(kind: TouchKind, target: E, time_stamp: f64, touch: TouchPoint) -> Self {
        let target_touches = match kind {
            TouchKind::Start | TouchKind::Move => smallvec::smallvec![touch],
            TouchKind::End | TouchKind::Cancel => TouchList::new(),
        };
        Self {
            kind,
            target,
            time_stamp,
            target_touches,
            changed_touches: smallvec::smallvec![touch],
        }
    }

    /// Adds an extra finger on the target, as a second simultaneous touch.
    pub fn with_extra_touch(mut self, touch: TouchPoint) -> Self {
        self.target_touches.push(touch);
        self
    }

    pub fn first_target_touch(&self) -> Option<&TouchPoint> {
        self.target_touches.first()
    }

    pub fn first_changed_touch(&self) -> Option<&TouchPoint> {
        self.changed_touches.first()
    }
}

/// A mouse or click event as seen by the controller.
#[derive(Clone, Debug)]
pub struct MouseInput<E> {
    pub kind: MouseKind,
    pub target: E,
    /// `false` for programmatic events that cannot be cancelled.
    pub cancelable: bool,
    /// Click count; zero for the keyboard-submit clicks some browsers fake.
    pub detail: i32,
    /// Set on events this library synthesised itself.
    pub forwarded: bool,
}

impl<E> MouseInput<E> {
    /// A trusted, cancelable single click or press as the browser sends it.
    pub fn native(kind: MouseKind, target: E) -> Self {
        Self {
            kind,
            target,
            cancelable: true,
            detail: 1,
            forwarded: false,
        }
    }
}

#[derive(Clone, Debug)]
pub enum LayerEvent<E> {
    Touch(TouchInput<E>),
    Mouse(MouseInput<E>),
}

impl<E> LayerEvent<E> {
    pub fn kind(&self) -> EventKind {
        match self {
            LayerEvent::Touch(touch) => touch.kind.event_kind(),
            LayerEvent::Mouse(mouse) => mouse.kind.event_kind(),
        }
    }

    pub fn target(&self) -> &E {
        match self {
            LayerEvent::Touch(touch) => &touch.target,
            LayerEvent::Mouse(mouse) => &mouse.target,
        }
    }
}

/// What the host must do with the DOM event after a handler ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub stop_immediate_propagation: bool,
}

impl EventResponse {
    /// Let the event continue untouched.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
        stop_immediate_propagation: false,
    };

    /// Cancel only the default action.
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
        stop_propagation: false,
        stop_immediate_propagation: false,
    };

    /// Swallow the event: no default action and no further listeners.
    pub const SUPPRESS: Self = Self {
        prevent_default: true,
        stop_propagation: true,
        stop_immediate_propagation: true,
    };

    pub fn is_pass(&self) -> bool {
        *self == Self::PASS
    }

    pub fn is_suppressed(&self) -> bool {
        *self == Self::SUPPRESS
    }
}

#[cfg(test)]
#[path = "../tests/input_tests.rs"]
mod tests;
