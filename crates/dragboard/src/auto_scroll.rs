#![forbid(unsafe_code)]

//! Repeating auto-scroll ticker for edge scrolling during a drag.
//!
//! ```text
//! Disarmed --arm--> Armed --disarm--> Disarmed
//!                   Armed --arm(other dir)--> Armed (same tick stream)
//! ```
//!
//! The controller owns no geometry. Each accepted tick yields an
//! [`AutoScrollStep`]; the owner applies it and re-evaluates edge proximity,
//! possibly disarming.
//!
//! # Invariants
//!
//! 1. At most one tick stream exists per controller: arming an armed
//!    controller never schedules a second timer.
//! 2. A tick whose token is not the controller's current token is ignored,
//!    including ticks delivered after `disarm()`.
//! 3. The next tick is scheduled before the step is handed out, so a failure
//!    while applying a step never stalls or duplicates the stream.

use dragboard_core::Instant;
use dragboard_core::geometry::Orientation;
use dragboard_core::timer::{TimerQueue, TimerToken};

use crate::config::AutoScrollConfig;

/// How ticks translate into scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum AutoScrollMode {
    /// Fixed pixel delta every tick.
    #[default]
    Continuous,
    /// One column per cooldown period, heartbeats in between.
    Column,
}

/// Direction the viewport travels over the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollDirection {
    /// Towards the start of vertical content.
    Up,
    /// Towards the end of vertical content.
    Down,
    /// Towards the start of horizontal content.
    Left,
    /// Towards the end of horizontal content.
    Right,
}

impl AutoScrollDirection {
    /// Axis this direction scrolls along.
    #[must_use]
    pub const fn axis(self) -> Orientation {
        match self {
            Self::Up | Self::Down => Orientation::Vertical,
            Self::Left | Self::Right => Orientation::Horizontal,
        }
    }

    /// `-1` towards the content start, `+1` towards the end.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Up | Self::Left => -1,
            Self::Down | Self::Right => 1,
        }
    }

    /// Direction towards the start (`forward == false`) or end of `axis`.
    #[must_use]
    pub const fn along(axis: Orientation, forward: bool) -> Self {
        match (axis, forward) {
            (Orientation::Vertical, false) => Self::Up,
            (Orientation::Vertical, true) => Self::Down,
            (Orientation::Horizontal, false) => Self::Left,
            (Orientation::Horizontal, true) => Self::Right,
        }
    }
}

/// What one accepted tick asks the owner to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoScrollStep {
    /// Scroll the content offset by this delta.
    Pixels { dx: f32, dy: f32 },
    /// Advance this many columns; `0` is a heartbeat that only refreshes the
    /// drag position.
    Columns(i32),
}

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollState {
    Disarmed,
    Armed {
        direction: AutoScrollDirection,
        token: TimerToken,
        last_column_step: Option<Instant>,
    },
}

/// Cancellable repeating auto-scroll ticker.
#[derive(Debug, Clone)]
pub struct AutoScrollController {
    config: AutoScrollConfig,
    mode: AutoScrollMode,
    state: AutoScrollState,
}

impl AutoScrollController {
    #[must_use]
    pub fn new(config: AutoScrollConfig, mode: AutoScrollMode) -> Self {
        Self {
            config,
            mode,
            state: AutoScrollState::Disarmed,
        }
    }

    #[must_use]
    pub const fn state(&self) -> AutoScrollState {
        self.state
    }

    #[must_use]
    pub const fn mode(&self) -> AutoScrollMode {
        self.mode
    }

    /// Switch mode. Takes effect on the next tick.
    pub fn set_mode(&mut self, mode: AutoScrollMode) {
        self.mode = mode;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, AutoScrollState::Armed { .. })
    }

    /// Current direction while armed.
    #[must_use]
    pub const fn direction(&self) -> Option<AutoScrollDirection> {
        match self.state {
            AutoScrollState::Armed { direction, .. } => Some(direction),
            AutoScrollState::Disarmed => None,
        }
    }

    /// Arm towards `direction`, scheduling the first tick at `now`.
    ///
    /// Re-arming in the same direction is a no-op; re-arming in another
    /// direction keeps the existing tick stream. Returns `true` when the
    /// state changed.
    pub fn arm<T>(
        &mut self,
        direction: AutoScrollDirection,
        timers: &mut TimerQueue<T>,
        payload: T,
        now: Instant,
    ) -> bool {
        match &mut self.state {
            AutoScrollState::Armed {
                direction: current,
                ..
            } if *current == direction => false,
            AutoScrollState::Armed {
                direction: current,
                ..
            } => {
                tracing::trace!(from = ?*current, to = ?direction, "auto-scroll redirected");
                *current = direction;
                true
            }
            AutoScrollState::Disarmed => {
                let token = timers.schedule(now, payload);
                tracing::trace!(?direction, mode = ?self.mode, "auto-scroll armed");
                self.state = AutoScrollState::Armed {
                    direction,
                    token,
                    last_column_step: None,
                };
                true
            }
        }
    }

    /// Stop ticking. Safe to call when already disarmed.
    pub fn disarm<T>(&mut self, timers: &mut TimerQueue<T>) -> bool {
        match std::mem::replace(&mut self.state, AutoScrollState::Disarmed) {
            AutoScrollState::Armed { token, .. } => {
                timers.cancel(token);
                tracing::trace!("auto-scroll disarmed");
                true
            }
            AutoScrollState::Disarmed => false,
        }
    }

    /// Handle a fired timer. Returns `None` for stale tokens.
    ///
    /// Accepted ticks schedule the next tick `tick_interval` after `now`
    /// before returning the step.
    pub fn on_tick<T>(
        &mut self,
        fired: TimerToken,
        timers: &mut TimerQueue<T>,
        payload: T,
        now: Instant,
    ) -> Option<AutoScrollStep> {
        let AutoScrollState::Armed {
            direction,
            token,
            last_column_step,
        } = &mut self.state
        else {
            return None;
        };
        if *token != fired {
            return None;
        }
        *token = timers.schedule_after(now, self.config.tick_interval, payload);

        let sign = direction.sign();
        let step = match self.mode {
            AutoScrollMode::Continuous => {
                let delta = self.config.scroll_speed * sign as f32;
                match direction.axis() {
                    Orientation::Horizontal => AutoScrollStep::Pixels { dx: delta, dy: 0.0 },
                    Orientation::Vertical => AutoScrollStep::Pixels { dx: 0.0, dy: delta },
                }
            }
            AutoScrollMode::Column => {
                let cooled = last_column_step.is_none_or(|last| {
                    now.saturating_duration_since(last) >= self.config.column_cooldown
                });
                if cooled {
                    *last_column_step = Some(now);
                    AutoScrollStep::Columns(sign)
                } else {
                    AutoScrollStep::Columns(0)
                }
            }
        };
        Some(step)
    }
}
