use super::*;

fn cursors(plan: &FramePlan) -> Vec<usize> {
    plan.slots().map(|s| s.end).collect()
}

#[test]
fn frame_count_rounds_and_rejects_degenerate_inputs() {
    let fps30 = Fps::new(30, 1).unwrap();
    assert_eq!(frame_count(30.0, fps30).unwrap(), 900);
    assert_eq!(frame_count(1.0, Fps::new(2, 1).unwrap()).unwrap(), 2);
    assert_eq!(frame_count(0.05, fps30).unwrap(), 2);

    for d in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.01] {
        let err = frame_count(d, fps30).unwrap_err();
        assert!(
            matches!(err, PaintlapseError::InvalidParameters(_)),
            "duration {d} should be rejected"
        );
    }
}

#[test]
fn empty_day_and_zero_frames_are_rejected() {
    assert!(matches!(
        FramePlan::new(3, 0, 10).unwrap_err(),
        PaintlapseError::EmptyDay { day: 3 }
    ));
    assert!(matches!(
        FramePlan::new(3, 10, 0).unwrap_err(),
        PaintlapseError::InvalidParameters(_)
    ));
}

#[test]
fn dense_plan_advances_in_even_chunks() {
    let plan = FramePlan::new(1, 10, 5).unwrap();
    assert!(!plan.is_sparse());
    assert_eq!(cursors(&plan), vec![2, 4, 6, 8, 10]);
}

#[test]
fn dense_plan_with_remainder_forces_last_cursor_to_total() {
    let plan = FramePlan::new(1, 10, 3).unwrap();
    assert_eq!(cursors(&plan), vec![3, 6, 10]);

    let plan = FramePlan::new(1, 1001, 1000).unwrap();
    let c = cursors(&plan);
    assert_eq!(c.len(), 1000);
    assert_eq!(*c.last().unwrap(), 1001);
    assert!(c.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn sparse_plan_places_event_by_proportion_and_holds_gaps() {
    let plan = FramePlan::new(1, 1, 2).unwrap();
    assert!(plan.is_sparse());
    assert_eq!(cursors(&plan), vec![1, 1]);
    assert_eq!(plan.slot_of(0), FrameIndex(0));

    let plan = FramePlan::new(1, 3, 7).unwrap();
    // floor(j * 7 / 3) for j = 0, 1, 2 -> slots 0, 2, 4.
    assert_eq!(cursors(&plan), vec![1, 1, 2, 2, 3, 3, 3]);
    let holds: Vec<bool> = plan.slots().map(|s| s.is_hold()).collect();
    assert_eq!(holds, vec![false, true, false, true, false, true, true]);
}

#[test]
fn equal_counts_map_one_event_per_slot() {
    let plan = FramePlan::new(1, 4, 4).unwrap();
    assert_eq!(cursors(&plan), vec![1, 2, 3, 4]);
    assert!(plan.slots().all(|s| s.len() == 1));
}

#[test]
fn slot_of_agrees_with_cursors() {
    for (e, n) in [(10usize, 5u64), (10, 3), (3, 7), (7, 7), (1, 9), (997, 60), (5, 1)] {
        let plan = FramePlan::new(1, e, n).unwrap();
        for slot in plan.slots() {
            for j in slot.start..slot.end {
                assert_eq!(plan.slot_of(j), slot.index, "e={e} n={n} j={j}");
            }
        }
    }
}

#[test]
fn boundary_event_goes_to_earlier_slot() {
    // (i + 1) * E / N is integral at every boundary here; event 1 closes slot 0.
    let plan = FramePlan::new(1, 4, 2).unwrap();
    assert_eq!(plan.slot_of(1), FrameIndex(0));
    assert_eq!(plan.slot_of(2), FrameIndex(1));
}

#[test]
fn slots_cover_every_event_exactly_once() {
    let plan = FramePlan::new(1, 123, 17).unwrap();
    let mut covered = 0;
    for slot in plan.slots() {
        assert_eq!(slot.start, covered);
        covered = slot.end;
    }
    assert_eq!(covered, 123);
    assert_eq!(plan.slots().len(), 17);
}

#[test]
fn single_frame_shows_everything() {
    let plan = FramePlan::new(1, 50, 1).unwrap();
    assert_eq!(cursors(&plan), vec![50]);
    assert_eq!(plan.cursor(99), 50);
}
