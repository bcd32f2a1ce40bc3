#![forbid(unsafe_code)]

//! Loading board configuration from files on disk.
//!
//! Run:
//!   cargo test -p dragboard --features config --test config_files

use std::io::Write;
use std::time::Duration;

use dragboard::{
    Board, BoardConfig, ColumnSnapPosition, ConfigError, ContainerResolution, Orientation,
};
use dragboard_harness::{RecordingGhost, RecordingListener, VecContainer};

#[test]
fn full_file_loads_and_builds_a_board() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
orientation = "vertical"
container_resolution = "grid"
board_edge_fraction = 0.2
snap_to_column_when_dragging = false
snap_position = "start"
snap_duration_ms = 400

[list]
edge_fraction = 0.25
transfer_hold_ms = 150
lock_first_position = true

[auto_scroll]
tick_interval_ms = 16
scroll_speed = 12.0

[gesture]
min_fling_velocity = 120.0
"#
    )
    .expect("write");

    let config = BoardConfig::from_toml_file(file.path()).expect("parse");
    assert_eq!(config.orientation, Orientation::Vertical);
    assert_eq!(config.container_resolution, ContainerResolution::Grid);
    assert_eq!(config.snap_position, ColumnSnapPosition::Start);
    assert_eq!(config.snap_duration, Duration::from_millis(400));
    assert!(!config.snap_to_column_when_dragging);
    assert_eq!(config.list.transfer_hold, Duration::from_millis(150));
    assert!(config.list.lock_first_position);
    assert_eq!(config.list.settle_duration, Duration::from_millis(250));
    assert_eq!(config.auto_scroll.tick_interval, Duration::from_millis(16));
    assert_eq!(config.auto_scroll.scroll_speed, 12.0);
    assert_eq!(config.gesture.min_fling_velocity, 120.0);
    assert_eq!(config.gesture.touch_slop, 3.0);

    let board = Board::<VecContainer<&str, &str>, _, _>::new(
        config,
        RecordingGhost::new(),
        RecordingListener::new(),
    )
    .expect("valid board");
    assert_eq!(board.config().board_edge_fraction, 0.2);
}

#[test]
fn out_of_range_values_parse_but_fail_validation() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[list]\nedge_fraction = 1.5").expect("write");

    let config = BoardConfig::from_toml_file(file.path()).expect("parse");
    match config.validate() {
        Err(ConfigError::InvalidFraction { field, value }) => {
            assert_eq!(field, "list.edge_fraction");
            assert_eq!(value, 1.5);
        }
        other => panic!("expected invalid fraction, got {other:?}"),
    }
    assert!(
        Board::<VecContainer<&str, &str>, _, _>::new(
            config,
            RecordingGhost::new(),
            RecordingListener::new()
        )
        .is_err()
    );
}

#[test]
fn malformed_file_reports_toml_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "orientation = [").expect("write");
    let err = BoardConfig::from_toml_file(file.path()).expect_err("malformed");
    assert!(matches!(err, ConfigError::Toml(_)));
    assert!(err.to_string().starts_with("TOML parse error"));
}

#[test]
fn unknown_enum_value_is_rejected() {
    let err = BoardConfig::from_json_str(r#"{"snap_position": "middle"}"#).expect_err("unknown");
    assert!(matches!(err, ConfigError::Json(_)));
}
