// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, pointer events, animation, and the timer queue.
//!
//! # Role in DragBoard
//! `dragboard-core` holds the platform-free building blocks the drag engine
//! is written against. Nothing here knows about containers, items, or drag
//! sessions.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Size`, `Rect`, `Sides`, `Orientation` in logical
//!   pixels.
//! - **PointerEvent**: normalized down/move/up/cancel samples from the host.
//! - **Animation**: the `Animation` trait, easing curves, and `Tween`.
//! - **TimerQueue**: deferred callbacks with generational cancellation tokens
//!   for a single-threaded event loop.
//! - **Gesture primitives**: touch slop and velocity estimation.
//!
//! # How it fits in the system
//! The engine crate (`dragboard`) consumes these types and is driven by the
//! host's event loop: pointer events in, `tick(now)` on every frame.

pub mod animation;
pub mod event;
pub mod gesture;
pub mod geometry;
pub mod logging;
pub mod timer;

pub use web_time::Instant;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
