use std::cell::RefCell;
use std::rc::Rc;

use fame_easing::EasingName;
use fame_style::{PropertyValue, Unit};
use fame_testing::ManualRuntime;
use fame_timeline::{MasterTimeline, PropertyKeyframe, PropertyTimeline};

use super::*;

fn opacity_timeline(duration_s: f64) -> Rc<MasterTimeline> {
    let property = PropertyTimeline::new(
        "opacity",
        vec![
            PropertyKeyframe::new(0.0, PropertyValue::Number(0.0, Unit::Unitless)),
            PropertyKeyframe::new(duration_s, PropertyValue::Number(1.0, Unit::Unitless)).with_easing(EasingName::Linear),
        ],
    )
    .unwrap();
    Rc::new(MasterTimeline::new(vec![property]).unwrap())
}

fn recorder() -> (Rc<RefCell<Vec<FrameSample>>>, impl Fn(FrameSample)) {
    let samples = Rc::new(RefCell::new(Vec::new()));
    let sink = samples.clone();
    (samples, move |sample: FrameSample| sink.borrow_mut().push(sample))
}

#[test]
fn play_forward_reaches_1_after_full_duration() {
    let runtime = ManualRuntime::new();
    let (samples, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    player.play_forward(0.0);
    runtime.advance_frame(0.0);
    runtime.advance_frame(500.0);
    runtime.advance_frame(1000.0);

    let last = samples.borrow().last().unwrap().progress;
    assert!((last - 1.0).abs() < 1e-9);
    assert!(!player.is_playing());
}

#[test]
fn seek_to_samples_immediately_without_a_frame() {
    let runtime = ManualRuntime::new();
    let (samples, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    player.seek_to(0.5);
    assert_eq!(samples.borrow().len(), 1);
    assert_eq!(samples.borrow()[0].values.get("opacity").unwrap(), "0.5");
    assert_eq!(runtime.pending_frame_count(), 0);
}

#[test]
fn play_backward_time_reversal_reports_decreasing_progress() {
    let runtime = ManualRuntime::new();
    let (samples, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    player.play_backward(1.0, ReverseMode::TimeReversal);
    runtime.advance_frame(0.0);
    runtime.advance_frame(1000.0);

    let last = samples.borrow().last().unwrap().progress;
    assert!((last - 0.0).abs() < 1e-9);
}

#[test]
fn play_backward_easing_preservation_reports_inverted_progress() {
    let runtime = ManualRuntime::new();
    let (samples, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    player.play_backward(1.0, ReverseMode::EasingPreservation);
    runtime.advance_frame(0.0);
    runtime.advance_frame(1000.0);

    let last = samples.borrow().last().unwrap().progress;
    assert!((last - 0.0).abs() < 1e-9);
}

#[test]
fn new_play_request_cancels_the_previous_raf_loop() {
    let runtime = ManualRuntime::new();
    let (_, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    player.play_forward(0.0);
    assert_eq!(runtime.pending_frame_count(), 1);
    player.play_forward(0.0);
    assert_eq!(runtime.pending_frame_count(), 1, "starting a new run must cancel the stale registration");
}

#[test]
fn play_forward_and_reset_ends_at_zero() {
    let runtime = ManualRuntime::new();
    let (samples, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    let expected = player.execute_behavior(AnimationBehavior::PlayForwardAndReset, 0.0, ReverseMode::default());
    assert_eq!(expected, Some(0.0));

    runtime.advance_frame(0.0);
    runtime.advance_frame(1000.0);

    let last = samples.borrow().last().unwrap();
    assert!((last.progress - 0.0).abs() < 1e-9);
    assert_eq!(last.values.get("opacity").unwrap(), "0");
}

#[test]
fn play_once_skips_when_progress_is_not_zero() {
    let runtime = ManualRuntime::new();
    let (_, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    let result = player.execute_behavior(AnimationBehavior::PlayOnce, 0.3, ReverseMode::default());
    assert_eq!(result, None);
    assert!(!player.is_playing());
}

#[test]
fn loop_variants_are_not_owned_by_the_player() {
    let runtime = ManualRuntime::new();
    let (_, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    assert_eq!(player.execute_behavior(AnimationBehavior::StartLoop, 0.0, ReverseMode::default()), None);
    assert_eq!(player.execute_behavior(AnimationBehavior::StopPingPong, 0.0, ReverseMode::default()), None);
}

#[test]
fn play_forward_notify_fires_on_natural_completion_only() {
    let runtime = ManualRuntime::new();
    let (_, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    let fired = Rc::new(RefCell::new(0));
    let fired_sink = fired.clone();
    player.play_forward_notify(0.0, move || *fired_sink.borrow_mut() += 1);

    runtime.advance_frame(0.0);
    runtime.advance_frame(500.0);
    assert_eq!(*fired.borrow(), 0, "must not fire before the run finishes");

    runtime.advance_frame(1000.0);
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn play_forward_notify_does_not_fire_when_superseded() {
    let runtime = ManualRuntime::new();
    let (_, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    let fired = Rc::new(RefCell::new(0));
    let fired_sink = fired.clone();
    player.play_forward_notify(0.0, move || *fired_sink.borrow_mut() += 1);
    runtime.advance_frame(0.0);

    // A fresh call cancels the prior run before it ever completes.
    player.play_backward(0.2, ReverseMode::TimeReversal);
    runtime.advance_frame(100.0);
    runtime.advance_frame(1000.0);

    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn cancel_stops_the_run_without_resampling() {
    let runtime = ManualRuntime::new();
    let (samples, sink) = recorder();
    let player = TimelinePlayer::new(runtime.handle(), opacity_timeline(1.0), sink);

    player.play_forward(0.0);
    runtime.advance_frame(0.0);
    runtime.advance_frame(400.0);
    let before = samples.borrow().len();

    player.cancel();
    assert!(!player.is_playing());
    runtime.advance_frame(1000.0);
    assert_eq!(samples.borrow().len(), before, "cancel must not schedule or emit another frame");
}
