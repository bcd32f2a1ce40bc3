#![forbid(unsafe_code)]

//! Tunable parameters for boards, list drags, auto-scroll, and gestures.
//!
//! Every field defaults to the engine's built-in constants, so
//! `BoardConfig::default()` is always a valid configuration. With the
//! `config` feature the whole tree can be loaded from TOML or JSON;
//! durations are written in milliseconds and missing fields keep their
//! defaults.
//!
//! ```toml
//! board_edge_fraction = 0.14
//! snap_to_column_when_dragging = true
//!
//! [list]
//! edge_fraction = 0.5
//! transfer_hold_ms = 250
//!
//! [auto_scroll]
//! tick_interval_ms = 12
//! scroll_speed = 8.0
//! ```
//!
//! ```rust,ignore
//! let config = BoardConfig::from_toml_file("board.toml")?;
//! config.validate()?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use dragboard_core::geometry::Orientation;

use crate::error::ConfigError;
use crate::snap::ColumnSnapPosition;

/// How the board decides which container is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ContainerResolution {
    /// Only the board-axis coordinate matters: any pointer inside a
    /// column's horizontal band (for a horizontal board) targets it.
    #[default]
    BoardAxis,
    /// Both axes must fall inside the container bounds.
    Grid,
}

/// Per-container drag parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ListDragConfig {
    /// Edge band, as a fraction of the dragged item's extent, that arms
    /// auto-scroll. Default: 0.5.
    pub edge_fraction: f32,
    /// Reorder and auto-scroll hold after an item enters a container.
    /// Default: 250 ms.
    #[cfg_attr(feature = "config", serde(rename = "transfer_hold_ms", with = "duration_ms"))]
    pub transfer_hold: Duration,
    /// Ghost settle animation length. Default: 250 ms.
    #[cfg_attr(feature = "config", serde(rename = "settle_duration_ms", with = "duration_ms"))]
    pub settle_duration: Duration,
    /// Nothing may be moved into index 0. Default: false.
    pub lock_first_position: bool,
    /// Nothing may be moved into the last index. Default: false.
    pub lock_last_position: bool,
    /// Center the ghost on the pointer instead of keeping the grab offset.
    /// Default: false.
    pub snap_ghost_to_pointer: bool,
}

impl Default for ListDragConfig {
    fn default() -> Self {
        Self {
            edge_fraction: 0.5,
            transfer_hold: Duration::from_millis(250),
            settle_duration: Duration::from_millis(250),
            lock_first_position: false,
            lock_last_position: false,
            snap_ghost_to_pointer: false,
        }
    }
}

/// Auto-scroll ticker parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AutoScrollConfig {
    /// Default: 12 ms.
    #[cfg_attr(feature = "config", serde(rename = "tick_interval_ms", with = "duration_ms"))]
    pub tick_interval: Duration,
    /// Pixels per tick in continuous mode. Default: 8.
    pub scroll_speed: f32,
    /// Minimum time between column steps in column mode. Default: 1000 ms.
    #[cfg_attr(feature = "config", serde(rename = "column_cooldown_ms", with = "duration_ms"))]
    pub column_cooldown: Duration,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(12),
            scroll_speed: 8.0,
            column_cooldown: Duration::from_millis(1000),
        }
    }
}

/// Scroll and fling recognition parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureConfig {
    /// Movement before a press becomes a scroll. Default: 3 px.
    pub touch_slop: f32,
    /// Release speed (px/s) at or above which a release is a fling.
    /// Default: 50.
    pub min_fling_velocity: f32,
    /// Trailing window for velocity estimation. Default: 100 ms.
    #[cfg_attr(feature = "config", serde(rename = "velocity_window_ms", with = "duration_ms"))]
    pub velocity_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 3.0,
            min_fling_velocity: 50.0,
            velocity_window: dragboard_core::gesture::DEFAULT_VELOCITY_WINDOW,
        }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BoardConfig {
    /// Axis the containers are laid out along. Default: horizontal.
    pub orientation: Orientation,
    pub container_resolution: ContainerResolution,
    /// Board edge band, as a fraction of the viewport extent, that arms
    /// board auto-scroll. Default: 0.14.
    pub board_edge_fraction: f32,
    /// Board auto-scroll steps whole columns instead of pixels.
    /// Default: true.
    pub snap_to_column_when_dragging: bool,
    /// Scroll gestures settle on a column. Default: true.
    pub snap_to_column_when_scrolling: bool,
    /// Which part of a column aligns with the viewport when snapping.
    pub snap_position: ColumnSnapPosition,
    /// Column snap animation length. Default: 250 ms.
    #[cfg_attr(feature = "config", serde(rename = "snap_duration_ms", with = "duration_ms"))]
    pub snap_duration: Duration,
    /// Whether new drags may start. Default: true.
    pub drag_enabled: bool,
    pub list: ListDragConfig,
    pub auto_scroll: AutoScrollConfig,
    pub gesture: GestureConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            container_resolution: ContainerResolution::BoardAxis,
            board_edge_fraction: 0.14,
            snap_to_column_when_dragging: true,
            snap_to_column_when_scrolling: true,
            snap_position: ColumnSnapPosition::Center,
            snap_duration: Duration::from_millis(250),
            drag_enabled: true,
            list: ListDragConfig::default(),
            auto_scroll: AutoScrollConfig::default(),
            gesture: GestureConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Load from a TOML string. The result is not validated.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Check every parameter, reporting the first out-of-range one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fraction("list.edge_fraction", self.list.edge_fraction)?;
        fraction("board_edge_fraction", self.board_edge_fraction)?;
        if self.auto_scroll.tick_interval.is_zero() {
            return Err(ConfigError::InvalidTickInterval);
        }
        let speed = self.auto_scroll.scroll_speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::InvalidScrollSpeed { value: speed });
        }
        non_negative("gesture.touch_slop", self.gesture.touch_slop)?;
        non_negative("gesture.min_fling_velocity", self.gesture.min_fling_velocity)?;
        Ok(())
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

#[cfg(feature = "config")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
