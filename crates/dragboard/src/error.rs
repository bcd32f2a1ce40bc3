#![forbid(unsafe_code)]

//! Error types for board setup and drag operations.

use std::fmt;

use crate::container::LayoutKind;

/// Error returned by listener callbacks. Propagated unchanged to the caller
/// of the operation that triggered the callback.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type of listener callbacks.
pub type ListenerResult = Result<(), ListenerError>;

/// Invalid wiring or configuration. Fatal: the caller must fix the setup.
#[derive(Debug)]
pub enum ConfigError {
    /// The container adapter cannot provide stable item identities.
    UnstableIds { container: usize },
    /// The container uses a layout the hit tester cannot reason about.
    UnsupportedLayout { container: usize, kind: LayoutKind },
    /// An item identity already exists elsewhere on the board.
    DuplicateItemId { container: usize, id: String },
    /// Auto-scroll tick interval must be non-zero.
    InvalidTickInterval,
    /// A fraction parameter must be finite and in (0, 1].
    InvalidFraction { field: &'static str, value: f32 },
    /// A scroll speed must be finite and positive.
    InvalidScrollSpeed { value: f32 },
    /// A non-negative finite value was required.
    InvalidValue { field: &'static str, value: f32 },
    /// I/O error reading a configuration file.
    #[cfg(feature = "config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnstableIds { container } => {
                write!(f, "container {container} does not provide stable item ids")
            }
            Self::UnsupportedLayout { container, kind } => {
                write!(f, "container {container} uses unsupported layout {kind:?}")
            }
            Self::DuplicateItemId { container, id } => {
                write!(f, "container {container} repeats item id {id}")
            }
            Self::InvalidTickInterval => write!(f, "auto-scroll tick interval must be > 0"),
            Self::InvalidFraction { field, value } => {
                write!(f, "{field} must be in (0, 1] (got {value})")
            }
            Self::InvalidScrollSpeed { value } => {
                write!(f, "scroll speed must be finite and > 0 (got {value})")
            }
            Self::InvalidValue { field, value } => {
                write!(f, "{field} must be finite and >= 0 (got {value})")
            }
            #[cfg(feature = "config")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Runtime drag and board operation errors.
#[derive(Debug)]
pub enum DragError {
    /// A drag session is already active on this board.
    SessionActive,
    /// The operation needs an active drag session.
    NoSession,
    /// Dragging is disabled on this board.
    DragDisabled,
    ContainerOutOfRange { index: usize, len: usize },
    RowOutOfRange { container: usize, row: usize, len: usize },
    /// The drag policy refused to let the item be picked up.
    DragRejected { container: usize, row: usize },
    /// A listener callback failed. Board state was already consistent when it
    /// was invoked.
    Listener(ListenerError),
    /// Container setup failed validation.
    Config(ConfigError),
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionActive => write!(f, "a drag session is already active"),
            Self::NoSession => write!(f, "no drag session is active"),
            Self::DragDisabled => write!(f, "dragging is disabled"),
            Self::ContainerOutOfRange { index, len } => {
                write!(f, "container {index} out of range (board has {len})")
            }
            Self::RowOutOfRange {
                container,
                row,
                len,
            } => write!(
                f,
                "row {row} out of range in container {container} (has {len} items)"
            ),
            Self::DragRejected { container, row } => {
                write!(f, "drag policy rejected item {row} in container {container}")
            }
            Self::Listener(e) => write!(f, "listener failed: {e}"),
            Self::Config(e) => write!(f, "invalid container setup: {e}"),
        }
    }
}

impl std::error::Error for DragError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listener(e) => Some(e.as_ref()),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for DragError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
