//! Testing utilities for QuickTap: an in-memory document and a tap robot.

pub mod fake_dom;
pub mod robot;
pub mod robot_assertions;

pub use fake_dom::{DispatchReport, DomRecord, ElementSpec, FakeDom, LegacyHandler, ListenerId, NodeId};
pub use robot::{TapRobot, TAP_HOLD_MS, TAP_POINT};

pub mod prelude {
    pub use crate::fake_dom::{DispatchReport, DomRecord, ElementSpec, FakeDom, NodeId};
    pub use crate::robot::{TapRobot, TAP_HOLD_MS, TAP_POINT};
    pub use crate::robot_assertions;
}
