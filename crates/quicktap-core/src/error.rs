use crate::input::EventKind;

/// Failures of the host plumbing while wiring a layer.
///
/// Gesture outcomes are never errors; these only cover listener
/// registration on the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    Listener { event: EventKind, reason: String },
    LegacyHandler { reason: String },
}

impl std::fmt::Display for AttachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachError::Listener { event, reason } => {
                write!(f, "failed to register {} listener: {reason}", event.as_str())
            }
            AttachError::LegacyHandler { reason } => {
                write!(f, "failed to adopt legacy onclick handler: {reason}")
            }
        }
    }
}

impl std::error::Error for AttachError {}
