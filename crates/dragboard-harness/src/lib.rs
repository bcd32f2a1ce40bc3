#![forbid(unsafe_code)]

//! Test harness for DragBoard.
//!
//! Reference implementations of the capability traits, kept in memory so
//! integration tests, benches, and fuzz targets can drive a real
//! [`dragboard::Board`] without a UI:
//!
//! - [`VecContainer`] - `Vec`-backed container with a fixed-extent linear
//!   layout and its own scroll position
//! - [`RecordingGhost`] - ghost renderer that records every call
//! - [`RecordingListener`] - listener that records notifications and can be
//!   told to fail
//! - [`pointer_walk`] - deterministic pointer event sequences

pub mod container;
pub mod ghost;
pub mod listener;
pub mod storm;

pub use container::VecContainer;
pub use ghost::{GhostCall, RecordingGhost};
pub use listener::{ListenerEvent, RecordingListener};
pub use storm::{PointerWalk, pointer_walk};
