#![forbid(unsafe_code)]

//! Board-level auto-scroll while dragging near the viewport edges.
//!
//! Four 300px columns in a 400px viewport; the edge band is 14% of the
//! viewport (56px).
//!
//! Run:
//!   cargo test -p dragboard --test board_auto_scroll

use std::time::Duration;

use dragboard::{Board, BoardConfig, Instant, Point, Size};
use dragboard_harness::{ListenerEvent, RecordingGhost, RecordingListener, VecContainer};

type Column = VecContainer<&'static str, &'static str>;
type TestBoard = Board<Column, RecordingGhost, RecordingListener>;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn board(config: BoardConfig) -> TestBoard {
    let mut board =
        Board::new(config, RecordingGhost::new(), RecordingListener::new()).expect("valid config");
    let columns: [&[&'static str]; 4] = [&["A", "B"], &["C"], &["D"], &["E"]];
    for (i, labels) in columns.into_iter().enumerate() {
        let column = VecContainer::labels(labels)
            .with_placement(Point::new(i as f32 * 300.0, 0.0), Size::new(300.0, 400.0));
        board.add_container(column).expect("valid container");
    }
    board.set_viewport(Size::new(400.0, 400.0));
    board
}

fn continuous() -> BoardConfig {
    BoardConfig {
        snap_to_column_when_dragging: false,
        ..BoardConfig::default()
    }
}

#[test]
fn continuous_scroll_near_trailing_edge() {
    let t = Instant::now();
    let mut board = board(continuous());
    board.start_drag(0, 0, Point::new(50.0, 20.0), t).expect("start");

    board.update_drag(Point::new(390.0, 20.0), t).expect("edge");
    assert!(board.is_board_auto_scrolling());
    assert_eq!(board.session().map(|s| s.current_container), Some(1));

    board.tick(t).expect("first step");
    assert_eq!(board.scroll_offset(), 8.0);
    board.tick(t + ms(12)).expect("second step");
    assert_eq!(board.scroll_offset(), 16.0);

    board.update_drag(Point::new(200.0, 20.0), t + ms(13)).expect("middle");
    assert!(!board.is_board_auto_scrolling());
    board.tick(t + ms(100)).expect("disarmed");
    assert_eq!(board.scroll_offset(), 16.0);
}

#[test]
fn leading_edge_needs_room_to_scroll() {
    let t = Instant::now();
    let mut board = board(continuous());
    board.start_drag(0, 0, Point::new(50.0, 20.0), t).expect("start");
    board.update_drag(Point::new(10.0, 20.0), t).expect("left edge at offset 0");
    assert!(!board.is_board_auto_scrolling());

    board.set_scroll_offset(100.0);
    board.update_drag(Point::new(10.0, 20.0), t).expect("left edge");
    assert!(board.is_board_auto_scrolling());
    board.tick(t).expect("step");
    assert_eq!(board.scroll_offset(), 92.0);
}

#[test]
fn continuous_scroll_stops_at_the_end() {
    let t = Instant::now();
    let mut board = board(continuous());
    board.set_scroll_offset(796.0);
    board.start_drag(3, 0, Point::new(300.0, 20.0), t).expect("start");
    board.update_drag(Point::new(390.0, 20.0), t).expect("edge");
    assert!(board.is_board_auto_scrolling());

    board.tick(t).expect("clamped step");
    assert_eq!(board.scroll_offset(), 800.0);
    board.tick(t + ms(12)).expect("nothing left");
    assert_eq!(board.scroll_offset(), 800.0);
    assert!(!board.is_board_auto_scrolling());
}

#[test]
fn column_mode_steps_one_column_per_cooldown() {
    let t = Instant::now();
    let mut board = board(BoardConfig::default());
    board.start_drag(0, 0, Point::new(50.0, 20.0), t).expect("start");
    board.update_drag(Point::new(390.0, 20.0), t).expect("edge");
    assert!(board.is_board_auto_scrolling());

    board.tick(t).expect("column step");
    assert_eq!(board.focused_column(), Some(1));
    assert!(board.is_animating());

    // Inside the cooldown the edge keeps firing without stepping further.
    board.tick(t + ms(12)).expect("cooling down");
    board.tick(t + ms(24)).expect("cooling down");
    assert_eq!(board.focused_column(), Some(1));

    board.update_drag(Point::new(200.0, 20.0), t + ms(24)).expect("middle");
    assert!(!board.is_board_auto_scrolling());
    board.tick(t + ms(100)).expect("mid snap");
    assert!(board.is_animating());
    let expected = Point::new(200.0, 20.0).sub(board.ghost().grab_offset());
    let screen = board.ghost().screen_position();
    assert!(
        (screen.x - expected.x).abs() < 1e-3 && (screen.y - expected.y).abs() < 1e-3,
        "ghost at {screen:?}, pointer grab point at {expected:?}"
    );
    board.tick(t + ms(400)).expect("snap done");
    assert!(!board.is_animating());
    assert_eq!(board.scroll_offset(), 250.0);
    assert!(
        board
            .listener()
            .events
            .contains(&ListenerEvent::FocusChanged { old: None, new: 1 })
    );
}

#[test]
fn ghost_stays_under_pointer_while_board_scrolls() {
    let t = Instant::now();
    let mut board = board(continuous());
    board.start_drag(0, 0, Point::new(50.0, 20.0), t).expect("start");
    let pointer = Point::new(390.0, 20.0);
    board.update_drag(pointer, t).expect("edge");
    let grab = board.ghost().grab_offset();
    assert_eq!(grab, Point::new(50.0, 20.0));
    assert_eq!(board.ghost().screen_position(), Point::new(340.0, 0.0));

    for step in 0..10 {
        board.tick(t + ms(12 * step)).expect("scroll step");
    }
    assert_eq!(board.scroll_offset(), 80.0);
    assert_eq!(board.ghost().screen_position(), pointer.sub(grab));
    let owner = board.session().expect("session").current_container;
    assert_eq!(board.ghost().offset(), Point::new(owner as f32 * 300.0 - 80.0, 0.0));

    board.update_drag(pointer, t + ms(120)).expect("same spot");
    assert_eq!(board.ghost().screen_position(), pointer.sub(grab));
}

#[test]
fn settle_lands_on_slot_after_release_snap() {
    let t = Instant::now();
    let mut board = board(BoardConfig::default());
    // Viewport center at content x 380: column 1 is the closest.
    board.set_scroll_offset(180.0);
    assert_eq!(board.row_at(1, Point::new(200.0, 20.0)), Some(0));
    assert_eq!(board.row_at(7, Point::new(200.0, 20.0)), None);
    board.start_drag(1, 0, Point::new(200.0, 20.0), t).expect("start");
    assert_eq!(board.ghost().screen_position(), Point::new(120.0, 0.0));

    board.end_drag(t).expect("release");
    assert!(board.is_animating());
    board.tick(t + ms(100)).expect("mid snap");
    let offset = board.scroll_offset();
    assert!(offset > 180.0 && offset < 250.0, "offset {offset}");
    assert_eq!(board.ghost().offset(), Point::new(300.0 - offset, 0.0));

    board.tick(t + ms(300)).expect("settled");
    assert!(board.session().is_none());
    assert_eq!(board.scroll_offset(), 250.0);
    assert_eq!(board.focused_column(), Some(1));
    // Slot (0, 0) of column 1, whose screen origin is 300 - 250.
    assert_eq!(board.ghost().screen_position(), Point::new(50.0, 0.0));
    assert_eq!(board.ghost().renderer().offset, Point::new(50.0, 0.0));
}
