//! Timeline Player (C5): plays a `MasterTimeline` on one element, generalizing
//! the donor `Animatable::schedule_frame`/`on_frame` RAF loop (cancel-on-replace
//! via a held `FrameCallbackRegistration`, lazily captured start time) from a
//! single scalar to a whole timeline sampled once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use fame_core::frame_clock::with_frame_millis;
use fame_core::platform::RuntimeHandle;
use fame_core::FrameCallbackRegistration;
use fame_timeline::MasterTimeline;
use rustc_hash::FxHashMap;

use crate::behavior::{AnimationBehavior, ReverseMode};

/// One frame's sampled output: the reported progress (already accounting for
/// `ReverseMode::EasingPreservation`'s inversion) plus every property's
/// interpolated CSS value at that instant.
pub struct FrameSample {
    pub progress: f64,
    pub values: FxHashMap<String, String>,
}

type SampleCallback = dyn Fn(FrameSample);

struct Run {
    timeline: Rc<MasterTimeline>,
    from_t: f64,
    to_t: f64,
    invert_report: bool,
    start_time_ms: Option<f64>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

struct PlayerInner {
    runtime: RuntimeHandle,
    timeline: Rc<MasterTimeline>,
    on_sample: Rc<SampleCallback>,
    registration: Option<FrameCallbackRegistration>,
    run: Option<Run>,
    progress: f64,
}

/// Plays one `MasterTimeline` on one element. The player is the only writer
/// for that element: starting a new run cancels whatever RAF loop was
/// previously scheduled.
pub struct TimelinePlayer {
    inner: Rc<RefCell<PlayerInner>>,
}

impl Clone for TimelinePlayer {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl TimelinePlayer {
    pub fn new(
        runtime: RuntimeHandle,
        timeline: Rc<MasterTimeline>,
        on_sample: impl Fn(FrameSample) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PlayerInner {
                runtime,
                timeline,
                on_sample: Rc::new(on_sample),
                registration: None,
                run: None,
                progress: 0.0,
            })),
        }
    }

    pub fn progress(&self) -> f64 {
        self.inner.borrow().progress
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().run.is_some()
    }

    pub fn play_forward(&self, from: f64) {
        self.start_run(self.timeline(), from, 1.0, false, None);
    }

    pub fn play_backward(&self, from: f64, reverse_mode: ReverseMode) {
        self.play_backward_with_completion(from, reverse_mode, None);
    }

    pub fn toggle(&self, current_progress: f64) {
        if current_progress < 0.5 {
            self.play_forward(current_progress);
        } else {
            self.play_backward(current_progress, ReverseMode::default());
        }
    }

    /// Cancels any active run and jumps straight to `progress`, sampling and
    /// reporting it immediately rather than waiting for the next frame.
    pub fn seek_to(&self, progress: f64) {
        let progress = progress.clamp(0.0, 1.0);
        let (timeline, on_sample) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.run = None;
            inner.progress = progress;
            (inner.timeline.clone(), inner.on_sample.clone())
        };
        let values = timeline.values_at_time(progress * timeline.total_duration_s());
        on_sample(FrameSample { progress, values });
    }

    pub fn reset(&self, progress: f64) {
        self.seek_to(progress);
    }

    /// Executes a behavior, returning the *final expected progress* a caller
    /// should treat the slot as converging to (composite behaviors reduce to
    /// a sequence of primitives; loop/ping-pong/delayed-trigger variants are
    /// owned by `fame-behavior` and return `None` here).
    pub fn execute_behavior(
        &self,
        behavior: AnimationBehavior,
        current_progress: f64,
        reverse_mode: ReverseMode,
    ) -> Option<f64> {
        use AnimationBehavior::*;
        match behavior {
            PlayForward => {
                self.play_forward(current_progress);
                Some(1.0)
            }
            PlayBackward => {
                self.play_backward(current_progress, reverse_mode);
                Some(0.0)
            }
            Toggle => {
                if current_progress < 0.5 {
                    self.play_forward(current_progress);
                    Some(1.0)
                } else {
                    self.play_backward(current_progress, reverse_mode);
                    Some(0.0)
                }
            }
            PlayOnce => {
                if current_progress == 0.0 {
                    self.play_forward(0.0);
                    Some(1.0)
                } else {
                    None
                }
            }
            PlayForwardAndReset => {
                let player = self.clone();
                self.play_forward_with_completion(current_progress, Some(Box::new(move || player.seek_to(0.0))));
                Some(0.0)
            }
            PlayBackwardAndReset => {
                let player = self.clone();
                self.play_backward_with_completion(
                    current_progress,
                    reverse_mode,
                    Some(Box::new(move || player.seek_to(1.0))),
                );
                Some(1.0)
            }
            PlayForwardAndReverse => {
                let player = self.clone();
                self.play_forward_with_completion(
                    current_progress,
                    Some(Box::new(move || player.play_backward(1.0, reverse_mode))),
                );
                Some(0.0)
            }
            PlayBackwardAndReverse => {
                let player = self.clone();
                self.play_backward_with_completion(
                    current_progress,
                    reverse_mode,
                    Some(Box::new(move || player.play_forward(0.0))),
                );
                Some(1.0)
            }
            StartLoop | StopLoop | StartPingPong | StopPingPong | DelayedTrigger => None,
        }
    }

    fn timeline(&self) -> Rc<MasterTimeline> {
        self.inner.borrow().timeline.clone()
    }

    /// Plays forward like [`Self::play_forward`], but `on_complete` fires once
    /// the run finishes naturally (not on cancellation by a subsequent call).
    /// Used by `fame-engine`'s Event Animation Coordinator to detect
    /// per-element completion for slot-level and stagger-barrier bookkeeping
    /// that `execute_behavior`'s own internal chaining doesn't expose.
    pub fn play_forward_notify(&self, from: f64, on_complete: impl FnOnce() + 'static) {
        self.play_forward_with_completion(from, Some(Box::new(on_complete)));
    }

    /// Backward counterpart of [`Self::play_forward_notify`].
    pub fn play_backward_notify(&self, from: f64, reverse_mode: ReverseMode, on_complete: impl FnOnce() + 'static) {
        self.play_backward_with_completion(from, reverse_mode, Some(Box::new(on_complete)));
    }

    /// Cancels any in-flight run without sampling or reporting a value.
    /// `progress()` stays at its last-sampled reading, per §5's "cancellation
    /// never re-applies styles" rule.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.run = None;
    }

    fn play_forward_with_completion(&self, from: f64, on_complete: Option<Box<dyn FnOnce()>>) {
        self.start_run(self.timeline(), from, 1.0, false, on_complete);
    }

    fn play_backward_with_completion(
        &self,
        from: f64,
        reverse_mode: ReverseMode,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) {
        match reverse_mode {
            ReverseMode::TimeReversal => self.start_run(self.timeline(), from, 0.0, false, on_complete),
            ReverseMode::EasingPreservation => {
                let swapped = Rc::new(self.timeline().with_swapped_endpoints());
                self.start_run(swapped, 1.0 - from, 1.0, true, on_complete)
            }
        }
    }

    fn start_run(
        &self,
        timeline: Rc<MasterTimeline>,
        from_t: f64,
        to_t: f64,
        invert_report: bool,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.run = Some(Run { timeline, from_t, to_t, invert_report, start_time_ms: None, on_complete });
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<PlayerInner>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = with_frame_millis(&runtime, move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<PlayerInner>>, frame_time_ms: f64) {
        let mut schedule_next = false;
        let on_sample;
        let sample;
        let mut completion = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let (reported_progress, values, finished) = {
                let run = match inner.run.as_mut() {
                    Some(run) => run,
                    None => return,
                };
                let start_time = *run.start_time_ms.get_or_insert(frame_time_ms);
                let elapsed_ms = (frame_time_ms - start_time).max(0.0);
                let distance = (run.to_t - run.from_t).abs();
                let duration_ms = distance * run.timeline.total_duration_s() * 1000.0;
                let linear = if duration_ms > 0.0 { (elapsed_ms / duration_ms).clamp(0.0, 1.0) } else { 1.0 };
                let effective_t = run.from_t + (run.to_t - run.from_t) * linear;
                let values = run.timeline.values_at_time(effective_t * run.timeline.total_duration_s());
                let reported_progress = if run.invert_report { 1.0 - effective_t } else { effective_t };
                (reported_progress, values, linear >= 1.0)
            };

            inner.progress = reported_progress;
            on_sample = inner.on_sample.clone();
            sample = FrameSample { progress: reported_progress, values };

            if finished {
                completion = inner.run.take().and_then(|run| run.on_complete);
            } else {
                schedule_next = true;
            }
        }

        on_sample(sample);
        if let Some(done) = completion {
            done();
        }
        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

#[cfg(test)]
#[path = "tests/player_tests.rs"]
mod tests;
