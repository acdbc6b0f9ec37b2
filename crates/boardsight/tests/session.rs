mod common;

use approx::assert_abs_diff_eq;

use boardsight::{
    LogPointer, Orientation, Point, ScreenshotSource, Session, SessionError, Side, Square,
};

fn square(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn reads_the_starting_pieces_white_at_bottom() {
    let dir = tempfile::tempdir().unwrap();
    common::write_references(dir.path());
    let session =
        Session::from_config(&common::config(dir.path(), Orientation::WhiteAtBottom)).unwrap();
    assert_eq!(session.library().len(), 4);

    let screen = ScreenshotSource::new(common::screenshot());
    let reading = session.read_board(&screen).unwrap();

    for file in ['a', 'd', 'h'] {
        let sq = square(&format!("{file}2"));
        assert_eq!(reading.get(sq).label.as_deref(), Some("wP"), "{sq}");
    }
    assert_eq!(reading.get(square("e1")).label.as_deref(), Some("wK"));
    assert_eq!(reading.get(square("e7")).label.as_deref(), Some("bP"));
    assert_eq!(reading.get(square("e4")).label.as_deref(), Some("empty"));
    assert_eq!(reading.get(square("h8")).label.as_deref(), Some("empty"));

    let single = session.identify(&screen, "e1").unwrap();
    assert_eq!(single.label, reading.get(square("e1")).label);
    assert_abs_diff_eq!(single.score, reading.get(square("e1")).score, epsilon = 1e-6);
    assert!(reading.min_score() > 0.5);
}

#[test]
fn black_at_bottom_reads_the_mirrored_squares() {
    let dir = tempfile::tempdir().unwrap();
    common::write_references(dir.path());
    let session =
        Session::from_config(&common::config(dir.path(), Orientation::BlackAtBottom)).unwrap();
    let screen = ScreenshotSource::new(common::screenshot());

    // The king drawn at column 4 of the bottom row is d8 from black's side.
    assert_eq!(session.identify(&screen, "d1").unwrap().label.as_deref(), Some("empty"));
    assert_eq!(session.identify(&screen, "d8").unwrap().label.as_deref(), Some("wK"));
    assert_eq!(session.identify(&screen, "d2").unwrap().label.as_deref(), Some("bP"));
    assert_eq!(session.identify(&screen, "a7").unwrap().label.as_deref(), Some("wP"));
}

#[test]
fn invalid_squares_fail_without_a_fallback() {
    let dir = tempfile::tempdir().unwrap();
    common::write_references(dir.path());
    let session =
        Session::from_config(&common::config(dir.path(), Orientation::WhiteAtBottom)).unwrap();
    let screen = ScreenshotSource::new(common::screenshot());

    assert!(matches!(session.identify(&screen, "z9"), Err(SessionError::Square(_))));
    assert!(matches!(session.plan_move("e2", "E4"), Err(SessionError::Square(_))));
}

#[test]
fn moves_drag_between_cell_centers() {
    let dir = tempfile::tempdir().unwrap();
    common::write_references(dir.path());
    let session =
        Session::from_config(&common::config(dir.path(), Orientation::WhiteAtBottom)).unwrap();

    let mut pointer = LogPointer::default();
    let (from, to) = session.execute_move(&mut pointer, "e2", "e4").unwrap();
    assert_eq!(from, Point::new(550, 750));
    assert_eq!(to, Point::new(550, 550));
    assert_eq!(pointer.position(), Some(to));
    assert_eq!(session.plan_move("e2", "e4").unwrap(), (from, to));
}

#[test]
fn move_log_crops_are_half_rows() {
    let dir = tempfile::tempdir().unwrap();
    common::write_references(dir.path());
    let session =
        Session::from_config(&common::config(dir.path(), Orientation::WhiteAtBottom)).unwrap();
    let screen = ScreenshotSource::new(common::screenshot());

    let white = session.capture_move(&screen, 1, Side::White).unwrap();
    let black = session.capture_move(&screen, 1, Side::Black).unwrap();
    assert_eq!((white.width(), white.height()), (50, 30));
    assert_eq!((black.width(), black.height()), (50, 30));

    let last = session.move_log_rect(12, Side::White).unwrap();
    assert_eq!(session.move_log_rect(40, Side::White).unwrap(), last);
}

#[test]
fn missing_reference_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = common::config(&dir.path().join("nope"), Orientation::WhiteAtBottom);
    assert!(matches!(Session::from_config(&cfg), Err(SessionError::Library(_))));
}
