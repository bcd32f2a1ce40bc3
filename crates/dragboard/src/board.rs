#![forbid(unsafe_code)]

//! Board-level drag coordination across sibling containers.
//!
//! A [`Board`] owns the containers, one [`ListDragController`] per
//! container, the ghost, the listener, and the timer queue that drives
//! auto-scroll ticks and transfer holds. The host feeds it pointer
//! positions (board viewport coordinates) and calls [`Board::tick`] every
//! frame.
//!
//! # Coordinate spaces
//!
//! - **viewport**: pointer input, origin at the board's visible top-left.
//! - **content**: viewport shifted by the board scroll offset along the
//!   board axis; container placements live here.
//! - **local**: content minus a container's placement origin.
//!
//! # Invariants
//!
//! 1. At most one session exists; it always names the container that holds
//!    the dragged item.
//! 2. A transfer removes the item from the old container and inserts it into
//!    the new one before any listener runs.
//! 3. While the owning container is inside its transfer hold, no further
//!    container switch happens.
//! 4. Board auto-scroll and the owner's auto-scroll are never armed at the
//!    same time.
//! 5. Listener callbacks run after each operation's state changes; a failing
//!    callback does not stop the remaining callbacks of that operation.

use std::time::Duration;

use ahash::AHashSet;
use dragboard_core::Instant;
use dragboard_core::animation::{Animation, Tween};
use dragboard_core::geometry::{Orientation, Point, Rect, Size};
use dragboard_core::timer::{TimerQueue, TimerToken};

use crate::auto_scroll::{AutoScrollController, AutoScrollDirection, AutoScrollMode, AutoScrollStep};
use crate::config::{BoardConfig, ContainerResolution};
use crate::container::Container;
use crate::error::{ConfigError, DragError};
use crate::ghost::{DragGhost, GhostRenderer};
use crate::hit_test;
use crate::list_drag::ListDragController;
use crate::listener::{AllowAll, DragListener, DragPolicy, Notification};
use crate::session::{BoardTimer, DragSession, DragState};
use crate::snap::{self, ColumnSpan};

struct Column<C: Container> {
    container: C,
    drag: ListDragController<C::Id>,
}

/// Ghost settle animation in flight.
#[derive(Debug, Clone, Copy)]
struct Settle {
    tween: Tween<Point>,
}

/// Coordinates drags across the containers of one board.
pub struct Board<C: Container, R: GhostRenderer, L: DragListener> {
    config: BoardConfig,
    columns: Vec<Column<C>>,
    ghost: DragGhost<R>,
    listener: L,
    policy: Box<dyn DragPolicy>,
    timers: TimerQueue<BoardTimer>,
    session: Option<DragSession<C::Id>>,
    board_scroll: AutoScrollController,
    viewport: Size,
    scroll_offset: f32,
    snap: Option<Tween<f32>>,
    settle: Option<Settle>,
    focused: Option<usize>,
    last_tick: Option<Instant>,
    pending: Vec<Notification>,
}

impl<C: Container, R: GhostRenderer, L: DragListener> Board<C, R, L> {
    /// Create an empty board. Fails when `config` does not validate.
    pub fn new(config: BoardConfig, renderer: R, listener: L) -> Result<Self, ConfigError> {
        config.validate()?;
        let mode = if config.snap_to_column_when_dragging {
            AutoScrollMode::Column
        } else {
            AutoScrollMode::Continuous
        };
        Ok(Self {
            config,
            columns: Vec::new(),
            ghost: DragGhost::new(renderer),
            listener,
            policy: Box::new(AllowAll),
            timers: TimerQueue::new(),
            session: None,
            board_scroll: AutoScrollController::new(config.auto_scroll, mode),
            viewport: Size::default(),
            scroll_offset: 0.0,
            snap: None,
            settle: None,
            focused: None,
            last_tick: None,
            pending: Vec::new(),
        })
    }

    /// Replace the drag policy.
    pub fn set_policy(&mut self, policy: impl DragPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn container(&self, index: usize) -> Option<&C> {
        self.columns.get(index).map(|c| &c.container)
    }

    #[must_use]
    pub fn list_drag(&self, index: usize) -> Option<&ListDragController<C::Id>> {
        self.columns.get(index).map(|c| &c.drag)
    }

    #[must_use]
    pub fn ghost(&self) -> &DragGhost<R> {
        &self.ghost
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// The active drag, if any (including while settling).
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<C::Id>> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn is_drag_enabled(&self) -> bool {
        self.config.drag_enabled
    }

    /// Allow or forbid new drags. A drag in progress is not affected.
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.config.drag_enabled = enabled;
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Whether board auto-scroll is currently armed.
    #[must_use]
    pub fn is_board_auto_scrolling(&self) -> bool {
        self.board_scroll.is_armed()
    }

    /// When the host should call [`Board::tick`] next, if a timer is
    /// pending. Animations additionally need a tick every frame.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    /// Whether a settle or snap animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.settle.is_some() || self.snap.is_some()
    }

    // -- containers ---------------------------------------------------------

    /// Append a container. Returns its index.
    pub fn add_container(&mut self, container: C) -> Result<usize, DragError> {
        let index = self.columns.len();
        self.insert_container(index, container)?;
        Ok(index)
    }

    /// Insert a container at `index`, shifting later ones.
    pub fn insert_container(&mut self, index: usize, container: C) -> Result<(), DragError> {
        self.ensure_idle()?;
        if index > self.columns.len() {
            return Err(DragError::ContainerOutOfRange {
                index,
                len: self.columns.len(),
            });
        }
        self.validate_container(index, &container)?;
        let drag = ListDragController::new(index, self.config.list, self.config.auto_scroll);
        self.columns.insert(index, Column { container, drag });
        self.renumber();
        if let Some(focused) = self.focused.as_mut()
            && *focused >= index
        {
            *focused += 1;
        }
        tracing::debug!(container = index, "container added");
        Ok(())
    }

    /// Remove and return the container at `index`.
    pub fn remove_container(&mut self, index: usize) -> Result<C, DragError> {
        self.ensure_idle()?;
        self.check_container(index)?;
        let column = self.columns.remove(index);
        self.renumber();
        self.focused = match self.focused {
            Some(f) if f == index => None,
            Some(f) if f > index => Some(f - 1),
            other => other,
        };
        tracing::debug!(container = index, "container removed");
        Ok(column.container)
    }

    fn validate_container(&self, index: usize, container: &C) -> Result<(), ConfigError> {
        if !container.has_stable_ids() {
            return Err(ConfigError::UnstableIds { container: index });
        }
        let kind = container.layout_kind();
        if !kind.is_supported() {
            return Err(ConfigError::UnsupportedLayout {
                container: index,
                kind,
            });
        }
        let mut seen: AHashSet<C::Id> = self
            .columns
            .iter()
            .flat_map(|c| (0..c.container.item_count()).filter_map(|i| c.container.id_at(i)))
            .collect();
        for id in (0..container.item_count()).filter_map(|i| container.id_at(i)) {
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicateItemId {
                    container: index,
                    id: format!("{id:?}"),
                });
            }
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.drag.set_container(i);
        }
    }

    fn ensure_idle(&self) -> Result<(), DragError> {
        if self.session.is_some() {
            Err(DragError::SessionActive)
        } else {
            Ok(())
        }
    }

    fn check_container(&self, index: usize) -> Result<(), DragError> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(DragError::ContainerOutOfRange {
                index,
                len: self.columns.len(),
            })
        }
    }

    fn check_row(&self, container: usize, row: usize) -> Result<(), DragError> {
        self.check_container(container)?;
        let len = self.columns[container].container.item_count();
        if row < len {
            Ok(())
        } else {
            Err(DragError::RowOutOfRange {
                container,
                row,
                len,
            })
        }
    }

    // -- programmatic item mutation ---------------------------------------

    /// Move an item within one container.
    pub fn move_item(&mut self, container: usize, from: usize, to: usize) -> Result<(), DragError> {
        self.ensure_idle()?;
        self.check_row(container, from)?;
        self.check_row(container, to)?;
        if from != to {
            self.columns[container].container.move_item(from, to);
        }
        Ok(())
    }

    /// Insert `item` at `index` (clamped) of `container`. Rejects items whose
    /// identity already exists on the board.
    pub fn add_item(&mut self, container: usize, index: usize, item: C::Item) -> Result<usize, DragError> {
        self.ensure_idle()?;
        self.check_container(container)?;
        let target = &mut self.columns[container].container;
        let index = index.min(target.item_count());
        target.insert(index, item);
        let Some(id) = target.id_at(index) else {
            return Ok(index);
        };
        let duplicate = self.columns.iter().enumerate().any(|(c, column)| {
            (0..column.container.item_count())
                .filter(|&i| !(c == container && i == index))
                .any(|i| column.container.id_at(i).as_ref() == Some(&id))
        });
        if duplicate {
            self.columns[container].container.remove_at(index);
            return Err(ConfigError::DuplicateItemId {
                container,
                id: format!("{id:?}"),
            }
            .into());
        }
        Ok(index)
    }

    /// Remove and return the item at `row` of `container`.
    pub fn remove_item(&mut self, container: usize, row: usize) -> Result<C::Item, DragError> {
        self.ensure_idle()?;
        self.check_row(container, row)?;
        let len = self.columns[container].container.item_count();
        self.columns[container]
            .container
            .remove_at(row)
            .ok_or(DragError::RowOutOfRange { container, row, len })
    }

    // -- board scrolling ----------------------------------------------------

    /// Set the visible size of the board.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Jump to `offset` (clamped), stopping any snap animation.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.snap = None;
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
        self.refresh_ghost();
    }

    /// Scroll by `delta` along the board axis. Returns the applied delta.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.snap = None;
        let before = self.scroll_offset;
        self.scroll_offset = (before + delta).clamp(0.0, self.max_scroll_offset());
        self.refresh_ghost();
        self.scroll_offset - before
    }

    /// Stop a running snap animation where it is.
    pub fn stop_scroll_animation(&mut self) {
        self.snap = None;
    }

    fn axis(&self) -> Orientation {
        self.config.orientation
    }

    fn spans(&self) -> Vec<ColumnSpan> {
        let axis = self.axis();
        self.columns
            .iter()
            .map(|c| {
                let placement = c.container.placement();
                ColumnSpan::new(axis.main(placement.origin), axis.extent(placement.size))
            })
            .collect()
    }

    fn content_extent(&self) -> f32 {
        self.spans().iter().map(ColumnSpan::end).fold(0.0, f32::max)
    }

    fn viewport_extent(&self) -> f32 {
        self.axis().extent(self.viewport)
    }

    /// Largest scroll offset the content allows.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f32 {
        snap::max_scroll_offset(self.content_extent(), self.viewport_extent())
    }

    /// Column whose center is nearest the viewport center.
    #[must_use]
    pub fn closest_column(&self) -> Option<usize> {
        snap::closest_column(&self.spans(), self.scroll_offset, self.viewport_extent())
    }

    /// Column the board last settled on.
    #[must_use]
    pub const fn focused_column(&self) -> Option<usize> {
        self.focused
    }

    /// Scroll so `column` rests at the configured snap position.
    pub fn scroll_to_column(&mut self, column: usize, animate: bool) -> Result<(), DragError> {
        self.check_container(column)?;
        self.snap_to(column, animate);
        self.flush()
    }

    /// Retarget the scroll offset on `column` and record the focus change.
    fn snap_to(&mut self, column: usize, animate: bool) {
        let target = self.settled_offset(column);
        if animate && target != self.scroll_offset {
            self.snap = Some(Tween::new(self.scroll_offset, target, self.config.snap_duration));
        } else {
            self.snap = None;
            self.scroll_offset = target;
            self.refresh_ghost();
        }
        if self.focused != Some(column) {
            tracing::debug!(old = ?self.focused, new = column, "focused column changed");
            self.pending.push(Notification::FocusChanged {
                old: self.focused,
                new: column,
            });
            self.focused = Some(column);
        }
    }

    fn settled_offset(&self, column: usize) -> f32 {
        snap::settled_offset(
            self.spans()[column],
            self.viewport_extent(),
            self.config.snap_position,
            self.max_scroll_offset(),
        )
    }

    /// Settle on the closest column when column snapping is enabled for
    /// scroll gestures.
    pub fn settle_scroll(&mut self) -> Result<(), DragError> {
        if !self.config.snap_to_column_when_scrolling {
            return Ok(());
        }
        match self.closest_column() {
            Some(column) => self.scroll_to_column(column, true),
            None => Ok(()),
        }
    }

    // -- coordinates --------------------------------------------------------

    fn to_content(&self, pointer: Point) -> Point {
        pointer.add(self.axis().point(self.scroll_offset, 0.0))
    }

    fn to_local(&self, container: usize, pointer: Point) -> Point {
        let origin = self.columns[container].container.placement().origin;
        self.to_content(pointer).sub(origin)
    }

    /// Screen origin of a container, for the ghost offset.
    fn screen_origin(&self, container: usize) -> Point {
        let origin = self.columns[container].container.placement().origin;
        origin.sub(self.axis().point(self.scroll_offset, 0.0))
    }

    /// Re-anchor the ghost on its container after the board scrolled. A live
    /// drag also keeps its grab point under the last pointer position.
    fn refresh_ghost(&mut self) {
        let Some((owner, pointer, live)) = self
            .session
            .as_ref()
            .map(|s| (s.current_container, s.pointer, s.state.is_live()))
        else {
            return;
        };
        let offset = self.screen_origin(owner);
        self.ghost.set_offset(offset);
        if live {
            let local = self.to_local(owner, pointer);
            self.ghost.follow(local);
        }
    }

    /// Row of `container` under `pointer` (viewport coordinates), as a host
    /// resolves the item to pick up before [`Board::start_drag`].
    #[must_use]
    pub fn row_at(&self, container: usize, pointer: Point) -> Option<usize> {
        let column = self.columns.get(container)?;
        let local = self.to_local(container, pointer);
        let axis = column.container.orientation();
        hit_test::child_at(&column.container.children(), local, axis)
    }

    /// Container under `pointer` (viewport coordinates).
    #[must_use]
    pub fn container_at(&self, pointer: Point) -> Option<usize> {
        let content = self.to_content(pointer);
        let axis = self.axis();
        self.columns.iter().position(|c| {
            let bounds = c.container.placement().bounds();
            match self.config.container_resolution {
                ContainerResolution::BoardAxis => bounds.contains_along(axis, axis.main(content)),
                ContainerResolution::Grid => bounds.contains(content),
            }
        })
    }

    // -- drag lifecycle -----------------------------------------------------

    /// Pick up the item at `row` of `container` under `pointer` (viewport).
    pub fn start_drag(
        &mut self,
        container: usize,
        row: usize,
        pointer: Point,
        now: Instant,
    ) -> Result<(), DragError> {
        self.ensure_idle()?;
        if !self.config.drag_enabled {
            return Err(DragError::DragDisabled);
        }
        self.check_row(container, row)?;
        if !self.policy.can_drag_item_at(container, row) {
            return Err(DragError::DragRejected { container, row });
        }
        let len = self.columns[container].container.item_count();
        let item_id = self.columns[container]
            .container
            .id_at(row)
            .ok_or(DragError::RowOutOfRange { container, row, len })?;

        let local = self.to_local(container, pointer);
        let offset = self.screen_origin(container);
        let column = &mut self.columns[container];
        let item_bounds = column
            .container
            .children()
            .iter()
            .find(|c| c.index == row)
            .map_or(Rect::from_origin_size(local, Size::default()), |c| c.bounds);
        let index = column
            .drag
            .start(&mut column.container, item_id.clone(), local)
            .ok_or(DragError::RowOutOfRange { container, row, len })?;

        self.snap = None;
        self.settle = None;
        self.last_tick = Some(now);
        self.ghost.begin(
            container,
            index,
            item_bounds,
            local,
            offset,
            self.config.list.snap_ghost_to_pointer,
        );
        self.session = Some(DragSession {
            item_id,
            origin_container: container,
            origin_index: index,
            current_container: container,
            current_index: index,
            pointer,
            state: DragState::Started,
        });
        tracing::debug!(container, row = index, "drag started");
        self.pending.push(Notification::DragStarted {
            container,
            row: index,
        });
        self.flush()
    }

    /// Move the dragged item to follow `pointer` (viewport).
    pub fn update_drag(&mut self, pointer: Point, now: Instant) -> Result<(), DragError> {
        let Some(session) = self.session.as_mut() else {
            return Err(DragError::NoSession);
        };
        if session.state == DragState::Settling {
            return Ok(());
        }
        session.pointer = pointer;
        session.state = DragState::Dragging;
        self.drive(pointer, now);
        self.flush()
    }

    /// Core pointer handling shared by pointer updates and timer ticks.
    fn drive(&mut self, pointer: Point, now: Instant) {
        let Some(owner) = self.session.as_ref().map(|s| s.current_container) else {
            return;
        };
        let owner = match self.container_at(pointer) {
            Some(target) if target != owner && !self.columns[owner].drag.is_holding() => {
                if self.transfer(owner, target, pointer, now) {
                    target
                } else {
                    owner
                }
            }
            _ => owner,
        };

        let local = self.to_local(owner, pointer);
        let (origin_container, origin_index) = self.origin();
        let policy = &*self.policy;
        let column = &mut self.columns[owner];
        let can_drop =
            |row: usize| policy.can_drop_at(origin_container, origin_index, owner, row);
        let update =
            column
                .drag
                .update_pointer(&mut column.container, local, &mut self.timers, now, &can_drop);
        if let Some((from, to)) = update.moved {
            self.pending.push(Notification::ItemMoved {
                container: owner,
                from,
                to,
            });
        }
        let index = column.drag.index();
        if let Some(session) = self.session.as_mut() {
            session.current_index = index;
        }
        let offset = self.screen_origin(owner);
        self.ghost.set_offset(offset);
        self.ghost.follow(local);
        self.evaluate_board_edges(pointer, update.auto_scrolling, now);
    }

    fn origin(&self) -> (usize, usize) {
        self.session
            .as_ref()
            .map_or((0, 0), |s| (s.origin_container, s.origin_index))
    }

    /// Move the dragged item from `old` into `new`. Returns `false` when the
    /// switch was aborted.
    fn transfer(&mut self, old: usize, new: usize, pointer: Point, now: Instant) -> bool {
        let Some(item_id) = self.session.as_ref().map(|s| s.item_id.clone()) else {
            return false;
        };
        let local = self.to_local(new, pointer);
        let index = self.columns[new]
            .drag
            .insertion_index(&self.columns[new].container, local);
        let (origin_container, origin_index) = self.origin();
        if !self
            .policy
            .can_drop_at(origin_container, origin_index, new, index)
        {
            return false;
        }

        let extent = self.columns[old].drag.item_extent();
        let column = &mut self.columns[old];
        let Some(item) = column
            .drag
            .remove_transferred_item(&mut column.container, &mut self.timers)
        else {
            return false;
        };
        let column = &mut self.columns[new];
        let index = column.drag.insert_transferred_item(
            &mut column.container,
            local,
            item,
            item_id,
            extent,
            &mut self.timers,
            now,
        );
        let offset = self.screen_origin(new);
        self.ghost.set_offset(offset);
        if let Some(session) = self.session.as_mut() {
            session.current_container = new;
            session.current_index = index;
        }
        tracing::debug!(from = old, to = new, row = index, "item transferred");
        self.pending.push(Notification::ContainerChanged { old, new });
        true
    }

    fn evaluate_board_edges(&mut self, pointer: Point, list_scrolling: bool, now: Instant) {
        if list_scrolling {
            self.board_scroll.disarm(&mut self.timers);
            return;
        }
        let axis = self.axis();
        let extent = self.viewport_extent();
        let band = self.config.board_edge_fraction * extent;
        let main = axis.main(pointer);
        let direction = if main <= band && self.scroll_offset > 0.0 {
            Some(AutoScrollDirection::along(axis, false))
        } else if main >= extent - band && self.scroll_offset < self.max_scroll_offset() {
            Some(AutoScrollDirection::along(axis, true))
        } else {
            None
        };
        match direction {
            Some(direction) => {
                self.board_scroll
                    .arm(direction, &mut self.timers, BoardTimer::BoardAutoScroll, now);
            }
            None => {
                self.board_scroll.disarm(&mut self.timers);
            }
        }
    }

    /// Release the item. The ghost animates into the item's slot; the drag
    /// ends on the tick that completes the animation (or immediately when
    /// the slot is not visible). A second call is a no-op.
    pub fn end_drag(&mut self, now: Instant) -> Result<(), DragError> {
        if !self.release(now) {
            return Ok(());
        }
        let target = self.slot_position();
        match target {
            Some(target) if self.config.list.settle_duration > Duration::ZERO => {
                self.settle = Some(Settle {
                    tween: Tween::new(self.ghost.position(), target, self.config.list.settle_duration),
                });
            }
            _ => self.finish_settle(),
        }
        self.flush()
    }

    /// Release without the settle animation.
    pub fn cancel_drag(&mut self, now: Instant) -> Result<(), DragError> {
        self.release(now);
        self.finish_settle();
        self.flush()
    }

    /// Enter `Settling`. Returns `false` when there is nothing to release.
    fn release(&mut self, now: Instant) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.state == DragState::Settling {
            return false;
        }
        session.state = DragState::Settling;
        let owner = session.current_container;
        self.board_scroll.disarm(&mut self.timers);
        self.columns[owner].drag.end(&mut self.timers);
        self.last_tick = Some(now);
        tracing::debug!(container = owner, "drag released");
        if self.config.snap_to_column_when_dragging
            && let Some(column) = self.closest_column()
        {
            self.snap_to(column, true);
        }
        true
    }

    /// Top-left of the dragged item's slot in its container, when visible.
    fn slot_position(&self) -> Option<Point> {
        let session = self.session.as_ref()?;
        let container = &self.columns[session.current_container].container;
        let content = container.placement().content_rect();
        container
            .children()
            .into_iter()
            .find(|c| c.index == session.current_index)
            .filter(|c| rects_overlap(c.bounds, content))
            .map(|c| c.bounds.origin())
    }

    fn finish_settle(&mut self) {
        self.settle = None;
        let Some(session) = self.session.take() else {
            return;
        };
        let owner = session.current_container;
        let column = &mut self.columns[owner];
        let index = column
            .drag
            .finish_settle(&mut column.container)
            .unwrap_or(session.current_index);
        self.ghost.hide();
        tracing::debug!(
            from_container = session.origin_container,
            from_row = session.origin_index,
            to_container = owner,
            to_row = index,
            "drag ended"
        );
        self.pending.push(Notification::DragEnded {
            from: (session.origin_container, session.origin_index),
            to: (owner, index),
        });
    }

    // -- time ---------------------------------------------------------------

    /// Advance timers and animations to `now`.
    pub fn tick(&mut self, now: Instant) -> Result<(), DragError> {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        while let Some((token, timer)) = self.timers.pop_due(now) {
            self.on_timer(token, timer, now);
        }

        // Scroll first so a settle ending on this frame lands on the final
        // container offset.
        if let Some(snap) = self.snap.as_mut() {
            snap.tick(dt);
            self.scroll_offset = snap.current();
            if snap.is_complete() {
                self.snap = None;
            }
            self.refresh_ghost();
        }
        if let Some(settle) = self.settle.as_mut() {
            settle.tween.tick(dt);
            let position = settle.tween.current();
            let done = settle.tween.is_complete();
            self.ghost.move_to(position);
            if done {
                self.finish_settle();
            }
        }
        self.flush()
    }

    fn on_timer(&mut self, token: TimerToken, timer: BoardTimer, now: Instant) {
        match timer {
            BoardTimer::ListAutoScroll(index) => {
                let (origin_container, origin_index) = self.origin();
                let policy = &*self.policy;
                let Some(column) = self.columns.get_mut(index) else {
                    return;
                };
                let can_drop =
                    |row: usize| policy.can_drop_at(origin_container, origin_index, index, row);
                let update = column.drag.on_auto_scroll_tick(
                    &mut column.container,
                    token,
                    &mut self.timers,
                    now,
                    &can_drop,
                );
                let new_index = column.drag.index();
                if let Some(update) = update {
                    if let Some((from, to)) = update.moved {
                        self.pending.push(Notification::ItemMoved {
                            container: index,
                            from,
                            to,
                        });
                    }
                    if let Some(session) = self.session.as_mut() {
                        session.current_index = new_index;
                    }
                }
            }
            BoardTimer::BoardAutoScroll => {
                let Some(step) = self.board_scroll.on_tick(
                    token,
                    &mut self.timers,
                    BoardTimer::BoardAutoScroll,
                    now,
                ) else {
                    return;
                };
                match step {
                    AutoScrollStep::Pixels { dx, dy } => {
                        let delta = match self.axis() {
                            Orientation::Horizontal => dx,
                            Orientation::Vertical => dy,
                        };
                        if self.scroll_by(delta) == 0.0 {
                            self.board_scroll.disarm(&mut self.timers);
                        }
                    }
                    AutoScrollStep::Columns(0) => {}
                    AutoScrollStep::Columns(step) => {
                        let current = self.focused.or_else(|| self.closest_column()).unwrap_or(0);
                        let last = self.columns.len().saturating_sub(1);
                        let target = current.saturating_add_signed(step as isize).min(last);
                        if target == current {
                            self.board_scroll.disarm(&mut self.timers);
                        } else {
                            self.snap_to(target, true);
                        }
                    }
                }
                self.redrive(now);
            }
            BoardTimer::ReleaseHold(index) => {
                if self
                    .columns
                    .get_mut(index)
                    .is_some_and(|c| c.drag.release_hold(token))
                {
                    tracing::trace!(container = index, "transfer hold released");
                    self.redrive(now);
                }
            }
        }
    }

    /// Re-run pointer handling at the last pointer position.
    fn redrive(&mut self, now: Instant) {
        if let Some(pointer) = self
            .session
            .as_ref()
            .filter(|s| s.state.is_live())
            .map(|s| s.pointer)
        {
            self.drive(pointer, now);
        }
    }

    /// Deliver queued notifications, returning the first listener error.
    fn flush(&mut self) -> Result<(), DragError> {
        let mut first_error = None;
        for note in std::mem::take(&mut self.pending) {
            if let Err(e) = note.deliver(&mut self.listener) {
                tracing::warn!(?note, error = %e, "listener failed");
                first_error.get_or_insert(DragError::Listener(e));
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
