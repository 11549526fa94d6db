pub mod types;

pub use types::{
    EventKind, EventResponse, LayerEvent, MouseInput, MouseKind, TouchInput, TouchKind,
    TouchList, TouchPoint,
};

pub mod prelude {
    pub use super::types::{
        EventKind, EventResponse, LayerEvent, MouseInput, MouseKind, TouchInput, TouchKind,
        TouchList, TouchPoint,
    };
}
