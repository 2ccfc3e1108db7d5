use super::*;

fn info(day: u32, w: u32, h: u32) -> DayInfo {
    DayInfo {
        day,
        theme: "test".to_owned(),
        size: CanvasSize::new(w, h).unwrap(),
        started_at: None,
    }
}

fn ev(day: u32, x: u32, y: u32, block: u64) -> PaintEvent {
    PaintEvent {
        day,
        x,
        y,
        color: Rgb8::WHITE,
        seq: SequenceKey::new(block, 0),
    }
}

#[test]
fn accepts_in_bounds_events_and_keeps_order() {
    let events = vec![ev(1, 3, 3, 9), ev(1, 0, 0, 2), ev(1, 1, 2, 5)];
    let log = DayLog::new(info(1, 4, 4), events.clone()).unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log.events(), events.as_slice());
    assert_eq!(log.day(), 1);
}

#[test]
fn rejects_out_of_bounds_coordinate() {
    let err = DayLog::new(info(1, 4, 4), vec![ev(1, 0, 0, 1), ev(1, 5, 5, 2)]).unwrap_err();
    match err {
        PaintlapseError::OutOfBounds {
            x,
            y,
            width,
            height,
        } => assert_eq!((x, y, width, height), (5, 5, 4, 4)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_event_from_another_day() {
    let err = DayLog::new(info(2, 4, 4), vec![ev(2, 0, 0, 1), ev(3, 1, 1, 2)]).unwrap_err();
    assert!(matches!(err, PaintlapseError::CanvasMismatch(_)));
}

#[test]
fn empty_log_is_constructible() {
    let log = DayLog::new(info(1, 2, 2), Vec::new()).unwrap();
    assert!(log.is_empty());
}

#[test]
fn sequence_keys_order_by_block_then_index() {
    assert!(SequenceKey::new(1, 9) < SequenceKey::new(2, 0));
    assert!(SequenceKey::new(2, 0) < SequenceKey::new(2, 1));
}
