#![forbid(unsafe_code)]

//! Drag state machine for a single container.
//!
//! A [`ListDragController`] tracks where the dragged item logically sits in
//! its container, reorders the container live as the pointer moves, and
//! arms the container's auto-scroll near its edges. It never talks to the
//! listener: operations report what happened and the board turns that into
//! notifications.
//!
//! ```text
//! Ended --start / insert_transferred_item--> Started
//! Started --update_pointer--> Dragging
//! Started | Dragging --end--> Settling --finish_settle--> Ended
//! Started | Dragging --remove_transferred_item--> Ended
//! ```
//!
//! # Invariants
//!
//! 1. While the state is live or settling, the dragged item is hidden in the
//!    container and `index` is its position.
//! 2. Each reorder step issues exactly one `move_item(old, new)`.
//! 3. During the transfer hold no reorder and no auto-scroll happen.
//! 4. `end()` outside a live state, and `remove_transferred_item()` without
//!    a live drag, are no-ops.

use bitflags::bitflags;
use dragboard_core::Instant;
use dragboard_core::geometry::{Orientation, Point};
use dragboard_core::timer::{TimerQueue, TimerToken};

use crate::auto_scroll::{AutoScrollController, AutoScrollDirection, AutoScrollMode, AutoScrollStep};
use crate::config::{AutoScrollConfig, ListDragConfig};
use crate::container::{ChildLayout, Container};
use crate::hit_test;
use crate::session::{BoardTimer, DragState};

bitflags! {
    /// Where the pointer and the content sit relative to the container's
    /// scroll edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        /// Pointer inside the leading edge band.
        const NEAR_START     = 0b0001;
        /// Pointer inside the trailing edge band.
        const NEAR_END       = 0b0010;
        /// First item laid out and fully inside the viewport.
        const FIRST_VISIBLE  = 0b0100;
        /// Last item laid out and fully inside the viewport.
        const LAST_VISIBLE   = 0b1000;
    }
}

impl Edges {
    /// Auto-scroll direction these edges call for, if any.
    #[must_use]
    pub fn scroll_direction(self, axis: Orientation) -> Option<AutoScrollDirection> {
        if self.contains(Self::NEAR_START) && !self.contains(Self::FIRST_VISIBLE) {
            Some(AutoScrollDirection::along(axis, false))
        } else if self.contains(Self::NEAR_END) && !self.contains(Self::LAST_VISIBLE) {
            Some(AutoScrollDirection::along(axis, true))
        } else {
            None
        }
    }
}

/// Classify `pointer` against the visible content of a container.
#[must_use]
pub fn edges<C: Container + ?Sized>(container: &C, pointer: Point, threshold: f32) -> Edges {
    let axis = container.orientation();
    let content = container.placement().content_rect();
    let (start, end) = (content.start(axis), content.end(axis));
    let main = axis.main(pointer);
    let count = container.item_count();

    let mut edges = Edges::empty();
    if main <= start + threshold {
        edges |= Edges::NEAR_START;
    } else if main >= end - threshold {
        edges |= Edges::NEAR_END;
    }
    for child in container.children() {
        if child.index == 0 && child.bounds.start(axis) >= start {
            edges |= Edges::FIRST_VISIBLE;
        }
        if child.index + 1 == count && child.bounds.end(axis) <= end {
            edges |= Edges::LAST_VISIBLE;
        }
    }
    if count == 0 {
        edges |= Edges::FIRST_VISIBLE | Edges::LAST_VISIBLE;
    }
    edges
}

/// Result of a pointer update or auto-scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListUpdate {
    /// Reorder performed, as `(from, to)`.
    pub moved: Option<(usize, usize)>,
    /// Whether the container's auto-scroll is armed afterwards.
    pub auto_scrolling: bool,
}

/// Per-container drag state machine.
#[derive(Debug, Clone)]
pub struct ListDragController<Id> {
    container: usize,
    config: ListDragConfig,
    state: DragState,
    item_id: Option<Id>,
    index: usize,
    pointer: Point,
    item_extent: f32,
    hold: Option<TimerToken>,
    auto_scroll: AutoScrollController,
}

impl<Id: Clone + PartialEq> ListDragController<Id> {
    /// Controller for the container at board index `container`.
    #[must_use]
    pub fn new(container: usize, config: ListDragConfig, auto_scroll: AutoScrollConfig) -> Self {
        Self {
            container,
            config,
            state: DragState::Ended,
            item_id: None,
            index: 0,
            pointer: Point::ZERO,
            item_extent: 0.0,
            hold: None,
            auto_scroll: AutoScrollController::new(auto_scroll, AutoScrollMode::Continuous),
        }
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Logical index of the dragged item.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn item_id(&self) -> Option<&Id> {
        self.item_id.as_ref()
    }

    /// Main-axis extent of the dragged item, used for the edge bands.
    #[must_use]
    pub const fn item_extent(&self) -> f32 {
        self.item_extent
    }

    /// Whether the post-transfer hold is still running.
    #[must_use]
    pub const fn is_holding(&self) -> bool {
        self.hold.is_some()
    }

    #[must_use]
    pub const fn is_auto_scrolling(&self) -> bool {
        self.auto_scroll.is_armed()
    }

    /// Board index this controller reports and schedules under.
    #[must_use]
    pub const fn container(&self) -> usize {
        self.container
    }

    pub(crate) fn set_container(&mut self, container: usize) {
        self.container = container;
    }

    /// Pick up the item `item_id` under `pointer` (local). Returns its
    /// index, or `None` when the container does not hold it.
    pub fn start<C>(&mut self, container: &mut C, item_id: Id, pointer: Point) -> Option<usize>
    where
        C: Container<Id = Id> + ?Sized,
    {
        let index = container.position_of(&item_id)?;
        let axis = container.orientation();
        self.item_extent = container
            .children()
            .iter()
            .find(|c| c.index == index)
            .map_or(0.0, |c| axis.extent(c.bounds.size()));
        container.set_drag_item(Some(item_id.clone()));
        self.item_id = Some(item_id);
        self.index = index;
        self.pointer = pointer;
        self.state = DragState::Started;
        Some(index)
    }

    /// Follow the pointer (local): reorder when it crosses into another
    /// child and arm or disarm auto-scroll by edge proximity.
    ///
    /// `can_drop(row)` is consulted before each reorder.
    pub fn update_pointer<C>(
        &mut self,
        container: &mut C,
        pointer: Point,
        timers: &mut TimerQueue<BoardTimer>,
        now: Instant,
        can_drop: &dyn Fn(usize) -> bool,
    ) -> ListUpdate
    where
        C: Container<Id = Id> + ?Sized,
    {
        if !self.state.is_live() {
            return ListUpdate::default();
        }
        self.pointer = pointer;
        self.state = DragState::Dragging;
        if self.hold.is_some() {
            return ListUpdate {
                moved: None,
                auto_scrolling: self.auto_scroll.is_armed(),
            };
        }

        let children = container.children();
        let moved = self.reorder(container, &children, can_drop);
        self.evaluate_edges(container, timers, now);
        ListUpdate {
            moved,
            auto_scrolling: self.auto_scroll.is_armed(),
        }
    }

    fn reorder<C>(
        &mut self,
        container: &mut C,
        children: &[ChildLayout],
        can_drop: &dyn Fn(usize) -> bool,
    ) -> Option<(usize, usize)>
    where
        C: Container<Id = Id> + ?Sized,
    {
        let axis = container.orientation();
        let target = hit_test::child_at(children, self.pointer, axis)?;
        let count = container.item_count();
        if target == self.index || target >= count || self.is_locked(target, count) || !can_drop(target)
        {
            return None;
        }
        let from = self.index;
        container.move_item(from, target);
        self.index = target;
        tracing::trace!(container = self.container, from, to = target, "item reordered");
        Some((from, target))
    }

    fn is_locked(&self, target: usize, count: usize) -> bool {
        (self.config.lock_first_position && target == 0)
            || (self.config.lock_last_position && target + 1 == count)
    }

    fn evaluate_edges<C>(&mut self, container: &C, timers: &mut TimerQueue<BoardTimer>, now: Instant)
    where
        C: Container<Id = Id> + ?Sized,
    {
        let threshold = self.config.edge_fraction * self.item_extent;
        let direction =
            edges(container, self.pointer, threshold).scroll_direction(container.orientation());
        match direction {
            Some(direction) => {
                self.auto_scroll
                    .arm(direction, timers, BoardTimer::ListAutoScroll(self.container), now);
            }
            None => {
                self.auto_scroll.disarm(timers);
            }
        }
    }

    /// Handle a fired auto-scroll tick: scroll, then re-run the pointer
    /// logic against the new layout. Stale ticks return `None`.
    pub fn on_auto_scroll_tick<C>(
        &mut self,
        container: &mut C,
        fired: TimerToken,
        timers: &mut TimerQueue<BoardTimer>,
        now: Instant,
        can_drop: &dyn Fn(usize) -> bool,
    ) -> Option<ListUpdate>
    where
        C: Container<Id = Id> + ?Sized,
    {
        if !self.state.is_live() {
            return None;
        }
        let step = self.auto_scroll.on_tick(
            fired,
            timers,
            BoardTimer::ListAutoScroll(self.container),
            now,
        )?;
        if let AutoScrollStep::Pixels { dx, dy } = step {
            let applied = container.scroll_by(dx, dy);
            if applied == 0.0 {
                self.auto_scroll.disarm(timers);
            }
        }
        Some(self.update_pointer(container, self.pointer, timers, now, can_drop))
    }

    /// Release: stop auto-scroll and the hold, enter `Settling`. Returns
    /// `false` (doing nothing) when no drag is live.
    pub fn end(&mut self, timers: &mut TimerQueue<BoardTimer>) -> bool {
        if !self.state.is_live() {
            return false;
        }
        self.stop_timers(timers);
        self.state = DragState::Settling;
        true
    }

    /// Settle animation finished: show the item again. Returns its final
    /// index, or `None` when the controller was not settling.
    pub fn finish_settle<C>(&mut self, container: &mut C) -> Option<usize>
    where
        C: Container<Id = Id> + ?Sized,
    {
        if self.state != DragState::Settling {
            return None;
        }
        container.set_drag_item(None);
        self.item_id = None;
        self.state = DragState::Ended;
        Some(self.index)
    }

    /// Take in an item leaving another container. Inserts it where the
    /// pointer (local) is, hides it and starts the transfer hold. Returns
    /// the insertion index.
    pub fn insert_transferred_item<C>(
        &mut self,
        container: &mut C,
        pointer: Point,
        item: C::Item,
        item_id: Id,
        item_extent: f32,
        timers: &mut TimerQueue<BoardTimer>,
        now: Instant,
    ) -> usize
    where
        C: Container<Id = Id> + ?Sized,
    {
        let index = self.insertion_index(&*container, pointer);
        container.insert(index, item);
        container.set_drag_item(Some(item_id.clone()));
        self.stop_timers(timers);
        self.hold = Some(timers.schedule_after(
            now,
            self.config.transfer_hold,
            BoardTimer::ReleaseHold(self.container),
        ));
        self.item_id = Some(item_id);
        self.index = index;
        self.pointer = pointer;
        self.item_extent = item_extent;
        self.state = DragState::Started;
        index
    }

    /// Index an item dropped in at `pointer` (local) would take, after the
    /// position locks.
    #[must_use]
    pub fn insertion_index<C>(&self, container: &C, pointer: Point) -> usize
    where
        C: Container<Id = Id> + ?Sized,
    {
        let count = container.item_count();
        let axis = container.orientation();
        let mut index =
            hit_test::insertion_index(&container.children(), axis.main(pointer), axis).min(count);
        if self.config.lock_first_position && index == 0 && count > 0 {
            index = 1;
        }
        if self.config.lock_last_position && index == count && count > 0 {
            index = count - 1;
        }
        index
    }

    /// Give up the dragged item to another container. Returns `None` when
    /// no drag is live here.
    pub fn remove_transferred_item<C>(
        &mut self,
        container: &mut C,
        timers: &mut TimerQueue<BoardTimer>,
    ) -> Option<C::Item>
    where
        C: Container<Id = Id> + ?Sized,
    {
        if !self.state.is_live() {
            return None;
        }
        self.stop_timers(timers);
        let item = container.remove_at(self.index);
        container.set_drag_item(None);
        self.item_id = None;
        self.state = DragState::Ended;
        item
    }

    /// Handle a fired hold timer. Returns `true` when it ended this
    /// controller's hold.
    pub fn release_hold(&mut self, fired: TimerToken) -> bool {
        if self.hold == Some(fired) {
            self.hold = None;
            true
        } else {
            false
        }
    }

    fn stop_timers(&mut self, timers: &mut TimerQueue<BoardTimer>) {
        self.auto_scroll.disarm(timers);
        if let Some(token) = self.hold.take() {
            timers.cancel(token);
        }
    }
}
