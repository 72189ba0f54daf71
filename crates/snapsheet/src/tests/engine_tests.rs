use super::*;

const FRAME: f32 = 16.0;

// Listed open to closed, so caller and sorted indices agree: offsets 0/300/600.
const SHEET: [f32; 3] = [600.0, 300.0, 0.0];

fn engine_with(points: &[f32], initial: usize) -> SheetEngine {
    SheetEngine::new(
        SheetConfig::default()
            .with_offsets(points)
            .with_initial_snap(initial),
    )
    .expect("valid config")
}

fn engine(initial: usize) -> SheetEngine {
    engine_with(&SHEET, initial)
}

fn master(state: GestureState, translation: f32, velocity: f32) -> GestureInput {
    GestureInput::Master(GestureSample::new(state, translation, velocity))
}

fn inner(state: GestureState, translation: f32, velocity: f32) -> GestureInput {
    GestureInput::Inner(GestureSample::new(state, translation, velocity))
}

fn settle(engine: &mut SheetEngine) {
    for _ in 0..1_000 {
        if engine.phase() == Phase::Idle {
            return;
        }
        engine.advance(FRAME, &[]);
    }
    panic!("engine did not settle: {engine:?}");
}

#[test]
fn starts_on_initial_snap_without_events() {
    let mut sheet = engine(1);
    assert_eq!(sheet.offset(), 300.0);
    assert_eq!(sheet.current_snap(), Some(1));
    assert_eq!(sheet.progress(), 0.5);
    assert_eq!(sheet.header_position(), 300.0);
    assert_eq!(sheet.content_position(), 0.0);

    let frame = sheet.advance(FRAME, &[]);
    assert!(frame.events.is_empty());
    assert_eq!(frame.phase, Phase::Idle);
}

#[test]
fn initial_snap_uses_caller_index() {
    // Caller index 0 is the 100-unit point, which sorts last.
    let sheet = engine_with(&[100.0, 500.0, 250.0], 0);
    assert_eq!(sheet.offset(), 400.0);
    assert_eq!(sheet.current_snap(), Some(0));
    assert_eq!(sheet.sheet_top(), 0.0 - 500.0 + 400.0);
}

#[test]
fn master_drag_tracks_finger_and_springs_on_release() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterDragging);

    let frame = sheet.advance(FRAME, &[master(GestureState::Active, 250.0, 0.0)]);
    assert_eq!(frame.offset, 550.0);

    sheet.advance(FRAME, &[master(GestureState::End, 250.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterSpringing { handoff: false });
    assert_eq!(sheet.spring_target, Some(2));

    settle(&mut sheet);
    assert_eq!(sheet.offset(), 600.0);
}

#[test]
fn active_without_began_starts_a_drag() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Active, 30.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterDragging);
    assert_eq!(sheet.offset(), 330.0);
}

#[test]
fn master_samples_are_processed_before_inner_ones() {
    let mut sheet = engine(1);
    // Inner listed first, yet the header claims the sheet in the same tick.
    sheet.advance(
        FRAME,
        &[
            inner(GestureState::Began, 0.0, 0.0),
            master(GestureState::Began, 0.0, 0.0),
        ],
    );
    assert_eq!(sheet.phase(), Phase::MasterDragging);

    sheet.advance(
        FRAME,
        &[
            inner(GestureState::Active, -100.0, 0.0),
            master(GestureState::Active, 20.0, 0.0),
        ],
    );
    assert_eq!(sheet.offset(), 320.0);
    assert_eq!(sheet.content_offset(), 0.0);
}

#[test]
fn cancel_uses_tracked_velocity() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    for step in 1..=3 {
        sheet.advance(
            FRAME,
            &[master(GestureState::Active, 20.0 * step as f32, 0.0)],
        );
    }
    assert_eq!(sheet.offset(), 360.0);

    // The cancelled sample carries no velocity; the tracker measured ~1250/s.
    sheet.advance(FRAME, &[master(GestureState::Cancelled, 999.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterSpringing { handoff: false });
    assert_eq!(sheet.spring_target, Some(2));
}

#[test]
fn cancelled_translation_is_not_accumulated() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[master(GestureState::Active, 10.0, 0.0)]);
    sheet.advance(FRAME, &[master(GestureState::Cancelled, 400.0, 0.0)]);
    // The spring starts from 310, not from 700.
    assert!(sheet.offset() > 310.0 && sheet.offset() < 350.0, "{}", sheet.offset());
}

#[test]
fn content_drag_on_partially_open_sheet_moves_the_sheet_first() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::InnerDragging { coupled: false });

    // 350 up: 300 raise the sheet to the top, 50 scroll the content.
    sheet.advance(FRAME, &[inner(GestureState::Active, -350.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::InnerDragging { coupled: true });
    assert_eq!(sheet.offset(), 0.0);
    assert_eq!(sheet.content_offset(), -50.0);

    // 80 back down: 50 unscroll the content, 30 pull the sheet.
    sheet.advance(FRAME, &[inner(GestureState::Active, -270.0, 0.0)]);
    assert_eq!(sheet.content_offset(), 0.0);
    assert_eq!(sheet.offset(), 30.0);
}

#[test]
fn content_release_below_top_hands_off_to_spring() {
    let mut sheet = engine(0);
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, 120.0, 0.0)]);
    assert_eq!(sheet.offset(), 120.0);
    assert_eq!(sheet.content_offset(), 0.0);

    sheet.advance(FRAME, &[inner(GestureState::End, 120.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterSpringing { handoff: true });
    assert!(!sheet.decay.is_running());
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn content_fling_at_top_decays() {
    let mut sheet = engine(0);
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, -100.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::End, -100.0, -2_000.0)]);
    assert_eq!(sheet.phase(), Phase::InnerDecaying);

    let before = sheet.content_offset();
    sheet.advance(FRAME, &[]);
    assert!(sheet.content_offset() < before);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn slow_content_release_goes_idle() {
    let mut sheet = engine(0);
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, -100.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::End, -100.0, 1.0)]);
    assert_eq!(sheet.phase(), Phase::Idle);
    assert_eq!(sheet.content_offset(), -100.0);
}

#[test]
fn inner_gestures_ignored_while_header_drags() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, 50.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::End, 50.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterDragging);
    assert_eq!(sheet.offset(), 300.0);
}

#[test]
fn inner_gestures_ignored_while_manually_snapping() {
    let mut sheet = engine(1);
    sheet.snap_to(0).unwrap();
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::ManuallySnapping);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn snap_request_during_drag_wins_at_release() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[master(GestureState::Active, 250.0, 0.0)]);
    sheet.snap_to(0).unwrap();
    assert_eq!(sheet.manual_target, Some(0));
    assert_eq!(sheet.phase(), Phase::MasterDragging);

    sheet.advance(FRAME, &[master(GestureState::End, 250.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::ManuallySnapping);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);
}

#[test]
fn header_drag_interrupts_manual_snap() {
    let mut sheet = engine(1);
    sheet.snap_to(2).unwrap();
    sheet.advance(FRAME, &[]);
    let caught_at = sheet.offset();

    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    assert_eq!(sheet.phase(), Phase::MasterDragging);
    assert!(!sheet.spring.is_running());
    assert_eq!(sheet.offset(), caught_at);
}

#[test]
fn snap_point_change_retargets_running_spring() {
    let mut sheet = engine(1);
    sheet.snap_to(2).unwrap();
    sheet.advance(FRAME, &[]);

    sheet
        .set_snap_points([700.0, 400.0, 0.0].map(SnapPointSpec::Offset))
        .unwrap();
    assert_eq!(sheet.spring.target(), 700.0);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 700.0);
}

#[test]
fn snap_point_change_moves_resting_sheet_with_its_point() {
    let mut sheet = engine(1);
    sheet
        .set_snap_points([800.0, 400.0, 0.0].map(SnapPointSpec::Offset))
        .unwrap();
    sheet.advance(FRAME, &[]);
    assert_eq!(sheet.offset(), 400.0);
}

#[test]
fn snap_point_change_rescales_parked_sheet() {
    let mut sheet = engine(0);
    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, 150.0, 0.0)]);
    // Parked between points by hand.
    sheet.phase = Phase::Idle;

    sheet
        .set_snap_points([1_200.0, 600.0, 0.0].map(SnapPointSpec::Offset))
        .unwrap();
    sheet.advance(FRAME, &[]);
    assert_eq!(sheet.offset(), 300.0);
}

#[test]
fn reconfigure_rejects_bad_config_and_keeps_state() {
    let mut sheet = engine(1);
    let err = sheet.set_snap_points(Vec::<SnapPointSpec>::new());
    assert_eq!(err, Err(SheetError::EmptySnapPoints));
    assert_eq!(sheet.snap_points().len(), 3);
    assert_eq!(sheet.offset(), 300.0);
}

#[test]
fn huge_frame_gaps_are_capped() {
    let mut sheet = engine(1);
    sheet.snap_to(0).unwrap();
    sheet.advance(10_000.0, &[]);
    assert_eq!(sheet.time_ms, MAX_FRAME_DELTA_MILLIS);
    sheet.advance(f32::NAN, &[]);
    assert_eq!(sheet.time_ms, MAX_FRAME_DELTA_MILLIS);
}

#[test]
fn on_frame_derives_delta_from_timestamps() {
    let mut sheet = engine(1);
    sheet.on_frame(1_000_000_000, &[]);
    assert_eq!(sheet.time_ms, 0.0);
    sheet.on_frame(1_016_000_000, &[]);
    assert!((sheet.time_ms - 16.0).abs() < 1e-3);
}

#[test]
fn non_finite_translations_do_not_poison_the_sheet() {
    let mut sheet = engine(1);
    sheet.advance(FRAME, &[master(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[master(GestureState::Active, 40.0, 0.0)]);
    sheet.advance(FRAME, &[master(GestureState::Active, f32::NAN, 0.0)]);
    assert_eq!(sheet.offset(), 340.0);

    sheet.advance(FRAME, &[master(GestureState::End, f32::NAN, f32::NAN)]);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 300.0);
    assert_eq!(sheet.current_snap(), Some(1));

    sheet.snap_to(0).unwrap();
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 0.0);

    sheet.advance(FRAME, &[inner(GestureState::Began, 0.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, -50.0, 0.0)]);
    sheet.advance(FRAME, &[inner(GestureState::Active, f32::INFINITY, 0.0)]);
    let frame = sheet.advance(FRAME, &[inner(GestureState::End, f32::NAN, 0.0)]);
    assert_eq!(frame.phase, Phase::Idle);
    assert_eq!(frame.content_offset, -50.0);
    assert_eq!(frame.offset, 0.0);
}
