#![forbid(unsafe_code)]

//! DragBoard engine
//!
//! Drag items within and between scrollable lists arranged on a scrollable
//! board, with live reordering, edge auto-scroll, and column snapping.
//!
//! # Key Components
//!
//! - [`Board`] - owns the containers and coordinates the one drag session
//! - [`ListDragController`] - per-container drag state machine
//! - [`AutoScrollController`] - cancellable repeating edge-scroll ticker
//! - [`DragGhost`] - floating proxy of the dragged item
//! - [`GestureRouter`] - routes pointer events to the drag or to scrolling
//! - [`hit_test`] - pointer to child-index mapping
//!
//! # Role in DragBoard
//! The host implements [`ContainerAdapter`] and [`ContainerGeometry`] for
//! its lists, [`GhostRenderer`] for the floating visual, and optionally
//! [`DragListener`] and [`DragPolicy`]. It feeds pointer events into a
//! [`GestureRouter`] (or calls the [`Board`] drag methods directly) and
//! calls [`Board::tick`] every frame.
//!
//! # How it fits in the system
//! Geometry, pointer events, animation, and the timer queue come from
//! `dragboard-core`. Nothing here paints, binds data, or owns a clock.

pub mod auto_scroll;
pub mod board;
pub mod config;
pub mod container;
pub mod error;
pub mod ghost;
pub mod hit_test;
pub mod list_drag;
pub mod listener;
pub mod router;
pub mod session;
pub mod snap;

pub use auto_scroll::{
    AutoScrollController, AutoScrollDirection, AutoScrollMode, AutoScrollState, AutoScrollStep,
};
pub use board::Board;
pub use config::{AutoScrollConfig, BoardConfig, ContainerResolution, GestureConfig, ListDragConfig};
pub use container::{
    ChildLayout, Container, ContainerAdapter, ContainerGeometry, ContainerPlacement, LayoutKind,
};
pub use error::{ConfigError, DragError, ListenerError, ListenerResult};
pub use ghost::{DragGhost, GhostRenderer};
pub use list_drag::{Edges, ListDragController, ListUpdate};
pub use listener::{AllowAll, DragListener, DragPolicy};
pub use router::{GestureRouter, Route};
pub use session::{BoardTimer, DragSession, DragState};
pub use snap::{ColumnSnapPosition, ColumnSpan};

pub use dragboard_core::Instant;
pub use dragboard_core::event::{PointerEvent, PointerEventKind, PointerId};
pub use dragboard_core::geometry::{Orientation, Point, Rect, Sides, Size};
