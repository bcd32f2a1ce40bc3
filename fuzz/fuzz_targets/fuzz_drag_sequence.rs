#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use dragboard::{
    Board, BoardConfig, ContainerAdapter, GestureRouter, Instant, Point, PointerEvent, Size,
};
use dragboard_harness::{RecordingGhost, RecordingListener, VecContainer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Start { container: u8, row: u8, x: i16, y: i16 },
    Down { pointer: u8, x: i16, y: i16 },
    Move { pointer: u8, x: i16, y: i16 },
    Up { pointer: u8, x: i16, y: i16 },
    Cancel { pointer: u8 },
    Tick { ms: u16 },
    ScrollTo { column: u8, animate: bool },
}

#[derive(Debug, Arbitrary)]
struct Input {
    snap_when_dragging: bool,
    columns: [u8; 3],
    steps: Vec<Step>,
}

fn point(x: i16, y: i16) -> Point {
    Point::new(f32::from(x) / 8.0, f32::from(y) / 8.0)
}

fuzz_target!(|input: Input| {
    let config = BoardConfig {
        snap_to_column_when_dragging: input.snap_when_dragging,
        ..BoardConfig::default()
    };
    let Ok(mut board) = Board::new(config, RecordingGhost::new(), RecordingListener::new()) else {
        return;
    };
    let mut total = 0usize;
    for (c, &count) in input.columns.iter().enumerate() {
        let count = usize::from(count % 24);
        total += count;
        let items: Vec<u32> = (0..count).map(|i| (c * 100 + i) as u32).collect();
        let column = VecContainer::new(items, |id: &u32| *id)
            .with_placement(Point::new(c as f32 * 120.0, 0.0), Size::new(120.0, 300.0));
        if board.add_container(column).is_err() {
            return;
        }
    }
    board.set_viewport(Size::new(200.0, 300.0));

    let mut router = GestureRouter::default();
    let mut now = Instant::now();
    for step in input.steps.into_iter().take(512) {
        let _ = match step {
            Step::Start { container, row, x, y } => board.start_drag(
                usize::from(container % 4),
                usize::from(row % 26),
                point(x, y),
                now,
            ),
            Step::Down { pointer, x, y } => router
                .handle(&mut board, PointerEvent::down(u32::from(pointer % 3), point(x, y), now))
                .map(drop),
            Step::Move { pointer, x, y } => router
                .handle(&mut board, PointerEvent::moved(u32::from(pointer % 3), point(x, y), now))
                .map(drop),
            Step::Up { pointer, x, y } => router
                .handle(&mut board, PointerEvent::up(u32::from(pointer % 3), point(x, y), now))
                .map(drop),
            Step::Cancel { pointer } => router
                .handle(
                    &mut board,
                    PointerEvent::cancel(u32::from(pointer % 3), Point::ZERO, now),
                )
                .map(drop),
            Step::Tick { ms } => {
                now += Duration::from_millis(u64::from(ms % 500));
                board.tick(now)
            }
            Step::ScrollTo { column, animate } => {
                board.scroll_to_column(usize::from(column % 4), animate)
            }
        };

        let count: usize = (0..board.len())
            .filter_map(|c| board.container(c))
            .map(ContainerAdapter::item_count)
            .sum();
        assert_eq!(count, total, "items lost or duplicated");
        let offset = board.scroll_offset();
        assert!(offset >= 0.0 && offset <= board.max_scroll_offset());
    }
});
