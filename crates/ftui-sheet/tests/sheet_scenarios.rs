//! End-to-end scenarios for the bottom sheet: gesture streams in, status and
//! settled offsets out.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ftui_sheet::{BottomSheet, FlingPolicy, SheetConfig, SheetGesture, Status, StatusSet};

const MS_16: Duration = Duration::from_millis(16);

fn config(status: Status) -> SheetConfig {
    SheetConfig::default()
        .with_height(800.0)
        .with_deltas(100.0, 100.0)
        .with_status(status)
}

fn settle(sheet: &mut BottomSheet) {
    let mut frames = 0;
    while sheet.is_settling() {
        sheet.tick(MS_16);
        frames += 1;
        assert!(frames < 2000, "settle did not converge: {sheet:?}");
    }
}

#[test]
fn scenario_a_closed_flung_up_opens() {
    let mut sheet = BottomSheet::new(config(Status::Closed)).unwrap();
    let b = *sheet.boundaries();
    assert_eq!((b.opened(), b.closed(), b.hidden()), (100.0, 700.0, 800.0));

    let next = sheet.handle_gesture(SheetGesture::Release { velocity: -150.0 });
    assert_eq!(next, Status::Opened);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 100.0);
}

#[test]
fn scenario_b_opened_flung_down_closes_under_both_policies() {
    for policy in [FlingPolicy::Fallback, FlingPolicy::Strict] {
        let mut sheet =
            BottomSheet::new(config(Status::Opened).with_fling_policy(policy)).unwrap();
        assert_eq!(sheet.release(150.0), Status::Closed, "{policy:?}");
        settle(&mut sheet);
        assert_eq!(sheet.offset(), 700.0);
    }
}

#[test]
fn scenario_c_fallback_policy_hides_without_closed() {
    let mut sheet = BottomSheet::new(
        config(Status::Opened)
            .with_available_statuses(StatusSet::OPENED | StatusSet::HIDDEN)
            .with_fling_policy(FlingPolicy::Fallback),
    )
    .unwrap();
    assert_eq!(sheet.release(150.0), Status::Hidden);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 800.0);
    assert!(!sheet.visible());
}

#[test]
fn scenario_c_strict_policy_closes_without_closed() {
    let mut sheet = BottomSheet::new(
        config(Status::Opened)
            .with_available_statuses(StatusSet::OPENED | StatusSet::HIDDEN)
            .with_fling_policy(FlingPolicy::Strict),
    )
    .unwrap();
    assert_eq!(sheet.release(150.0), Status::Closed);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 700.0);
}

#[test]
fn scenario_d_slow_release_snaps_back() {
    let mut sheet = BottomSheet::new(config(Status::Closed)).unwrap();
    for translation in [10.0, 25.0, 40.0, 50.0] {
        sheet.handle_gesture(SheetGesture::Drag { translation });
    }
    assert_eq!(sheet.offset(), 750.0);

    let next = sheet.handle_gesture(SheetGesture::Release { velocity: 30.0 });
    assert_eq!(next, Status::Closed);
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 700.0);
}

#[test]
fn requesting_current_status_is_idempotent() {
    let mut sheet = BottomSheet::new(config(Status::Closed)).unwrap();
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    sheet.set_on_status_change(move |s| sink.borrow_mut().push(s));

    sheet.drag(60.0);
    sheet.set_status(Status::Closed);
    assert_eq!(sheet.status(), Status::Closed);
    assert!(sheet.is_settling());
    settle(&mut sheet);
    assert_eq!(sheet.offset(), 700.0);

    sheet.set_status(Status::Closed);
    settle(&mut sheet);
    assert_eq!(sheet.status(), Status::Closed);
    assert_eq!(sheet.offset(), 700.0);
    assert_eq!(*fired.borrow(), vec![Status::Closed, Status::Closed]);
}

#[test]
fn settle_converges_for_every_status() {
    let mut sheet = BottomSheet::new(config(Status::Hidden)).unwrap();
    for status in [Status::Opened, Status::Closed, Status::Hidden, Status::Opened] {
        sheet.set_status(status);
        settle(&mut sheet);
        assert_eq!(sheet.offset(), sheet.boundaries().offset(status));
    }
}

#[test]
fn hidden_ignores_flings_until_made_visible() {
    let mut sheet = BottomSheet::new(config(Status::Hidden)).unwrap();
    assert_eq!(sheet.release(-5000.0), Status::Hidden);
    assert_eq!(sheet.release(5000.0), Status::Hidden);
    sheet.set_visible(true);
    assert_eq!(sheet.status(), Status::Closed);
    assert_eq!(sheet.release(-5000.0), Status::Opened);
}

#[test]
fn fling_can_overshoot_before_settling() {
    let mut sheet = BottomSheet::new(config(Status::Closed)).unwrap();
    sheet.release(-2000.0);
    let mut min = f64::MAX;
    while sheet.is_settling() {
        sheet.tick(MS_16);
        min = min.min(sheet.offset());
        assert_eq!(sheet.status(), Status::Opened);
    }
    assert!(min < 100.0, "offset never passed the opened boundary: {min}");
    assert_eq!(sheet.offset(), 100.0);
}

#[test]
fn signals_track_offset_during_settle() {
    let mut sheet = BottomSheet::new(
        config(Status::Hidden)
            .with_content_animated_opacity(true)
            .with_hide_on_zero_opacity(true),
    )
    .unwrap();
    let s = sheet.signals();
    assert!(!s.back_layer_visible);
    assert_eq!(s.overlay_opacity, 0.0);

    sheet.set_visible(true);
    settle(&mut sheet);
    let s = sheet.signals();
    assert!(s.back_layer_visible);
    assert!((s.overlay_opacity - 0.3).abs() < 1e-9);
    assert_eq!(s.content_opacity, 0.0);
    assert!(!s.content_visible);
    assert!(!s.interactable);

    sheet.set_status(Status::Opened);
    settle(&mut sheet);
    let s = sheet.signals();
    assert_eq!(s.content_opacity, 1.0);
    assert!(s.content_visible);
    assert!(s.interactable);
}

#[test]
fn offset_listener_lifecycle_across_remount() {
    let mut sheet = BottomSheet::new(config(Status::Closed)).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let handle = sheet.subscribe(move |v| sink.borrow_mut().push(v)).unwrap();
    assert!(sheet.subscribe(|_| {}).is_err());

    sheet.drag(20.0);
    sheet.unsubscribe(handle).unwrap();
    sheet.drag(30.0);
    assert_eq!(*seen.borrow(), vec![720.0]);

    let sink = Rc::clone(&seen);
    let again = sheet.subscribe(move |v| sink.borrow_mut().push(v)).unwrap();
    assert_ne!(handle, again);
    sheet.release(0.0);
    settle(&mut sheet);
    assert_eq!(seen.borrow().last().copied(), Some(700.0));
}
