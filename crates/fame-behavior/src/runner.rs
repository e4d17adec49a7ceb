//! Loop & Ping-Pong Runners (C13): repeat a play action with an inter-cycle
//! delay and a bounded iteration count, generalizing the donor
//! `Animatable::schedule_frame`/`on_frame` cancel-on-replace pattern from a
//! single RAF chain to a chain of RAF-driven plays separated by timer
//! delays. Like `TimelinePlayer`, iteration is callback-driven rather than
//! `async`/`await` — there is no executor anywhere in this engine to poll a
//! `Future`, so a "play" is a function that takes an on-finished callback,
//! same shape as `TimelinePlayer::execute_behavior`'s composite phases.

use std::rc::Rc;

use fame_core::platform::{RuntimeHandle, TimerCallbackId};
use fame_core::{Owned, WeakOwned};

/// `iterations >= ITERATION_INFINITE_THRESHOLD` is treated as effectively
/// unbounded and capped at [`ITERATION_CAP`]; anything below that is capped
/// at [`ITERATION_CAP`] too, just without the "effectively infinite" framing.
const ITERATION_INFINITE_THRESHOLD: u32 = 999;
const ITERATION_CAP: u32 = 1000;

fn clamp_iterations(iterations: u32) -> u32 {
    if iterations >= ITERATION_INFINITE_THRESHOLD {
        ITERATION_CAP
    } else {
        iterations.min(ITERATION_CAP)
    }
}

type PlayFn = dyn Fn(Box<dyn FnOnce()>);

struct LoopState {
    remaining: u32,
    delay_ms: u32,
    stopped: bool,
    runtime: RuntimeHandle,
    play: Rc<PlayFn>,
    pending_timer: Option<TimerCallbackId>,
}

/// Repeats a single play action `iterations` times, each separated by
/// `delay_ms` of timer delay. `stop()` is cooperative: the iteration already
/// in flight still completes, but no further iteration starts.
#[derive(Clone)]
pub struct LoopRunner {
    state: Owned<LoopState>,
}

impl LoopRunner {
    pub fn new(runtime: RuntimeHandle, iterations: u32, delay_ms: u32, play: impl Fn(Box<dyn FnOnce()>) + 'static) -> Self {
        Self {
            state: Owned::new(LoopState {
                remaining: clamp_iterations(iterations),
                delay_ms,
                stopped: false,
                runtime,
                play: Rc::new(play),
                pending_timer: None,
            }),
        }
    }

    pub fn start(&self) {
        Self::run_iteration(self.state.downgrade());
    }

    /// Aborts after the current iteration; cancels a pending inter-cycle
    /// delay if one is outstanding.
    pub fn stop(&self) {
        self.state.update(|s| {
            s.stopped = true;
            if let Some(id) = s.pending_timer.take() {
                s.runtime.timers().cancel_timer(id);
            }
        });
    }

    fn run_iteration(weak: WeakOwned<LoopState>) {
        let Some(state) = weak.upgrade() else { return };
        let (stopped, remaining, play) = state.with(|s| (s.stopped, s.remaining, s.play.clone()));
        if stopped || remaining == 0 {
            return;
        }
        state.update(|s| s.remaining -= 1);

        let weak_for_delay = weak.clone();
        play(Box::new(move || {
            let Some(state) = weak_for_delay.upgrade() else { return };
            let (stopped, remaining, delay_ms, runtime) =
                state.with(|s| (s.stopped, s.remaining, s.delay_ms, s.runtime.clone()));
            if stopped || remaining == 0 {
                return;
            }
            let weak_for_timer = weak_for_delay.clone();
            let timer_id = runtime.timers().request_timer(
                delay_ms,
                Box::new(move || {
                    let Some(state) = weak_for_timer.upgrade() else { return };
                    state.update(|s| s.pending_timer = None);
                    Self::run_iteration(weak_for_timer.clone());
                }),
            );
            state.update(|s| s.pending_timer = Some(timer_id));
        }));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PingPongPhase {
    Forward,
    Backward,
}

struct PingPongState {
    remaining_cycles: u32,
    delay_ms: u32,
    stopped: bool,
    runtime: RuntimeHandle,
    play_forward: Rc<PlayFn>,
    play_backward: Rc<PlayFn>,
    pending_timer: Option<TimerCallbackId>,
}

/// One cycle is a forward play followed by a backward play, each separated
/// from the next phase (and the next cycle) by `delay_ms`. Same bounds and
/// `stop()` semantics as [`LoopRunner`].
#[derive(Clone)]
pub struct PingPongRunner {
    state: Owned<PingPongState>,
}

impl PingPongRunner {
    pub fn new(
        runtime: RuntimeHandle,
        cycles: u32,
        delay_ms: u32,
        play_forward: impl Fn(Box<dyn FnOnce()>) + 'static,
        play_backward: impl Fn(Box<dyn FnOnce()>) + 'static,
    ) -> Self {
        Self {
            state: Owned::new(PingPongState {
                remaining_cycles: clamp_iterations(cycles),
                delay_ms,
                stopped: false,
                runtime,
                play_forward: Rc::new(play_forward),
                play_backward: Rc::new(play_backward),
                pending_timer: None,
            }),
        }
    }

    pub fn start(&self) {
        Self::run_phase(self.state.downgrade(), PingPongPhase::Forward);
    }

    pub fn stop(&self) {
        self.state.update(|s| {
            s.stopped = true;
            if let Some(id) = s.pending_timer.take() {
                s.runtime.timers().cancel_timer(id);
            }
        });
    }

    fn run_phase(weak: WeakOwned<PingPongState>, phase: PingPongPhase) {
        let Some(state) = weak.upgrade() else { return };
        let (stopped, remaining_cycles, play) = state.with(|s| {
            let play = match phase {
                PingPongPhase::Forward => s.play_forward.clone(),
                PingPongPhase::Backward => s.play_backward.clone(),
            };
            (s.stopped, s.remaining_cycles, play)
        });
        if stopped || remaining_cycles == 0 {
            return;
        }
        if phase == PingPongPhase::Backward {
            state.update(|s| s.remaining_cycles -= 1);
        }

        let weak_for_delay = weak.clone();
        play(Box::new(move || {
            let Some(state) = weak_for_delay.upgrade() else { return };
            let (stopped, remaining_cycles, delay_ms, runtime) =
                state.with(|s| (s.stopped, s.remaining_cycles, s.delay_ms, s.runtime.clone()));
            if stopped || (phase == PingPongPhase::Backward && remaining_cycles == 0) {
                return;
            }
            let next_phase = match phase {
                PingPongPhase::Forward => PingPongPhase::Backward,
                PingPongPhase::Backward => PingPongPhase::Forward,
            };
            let weak_for_timer = weak_for_delay.clone();
            let timer_id = runtime.timers().request_timer(
                delay_ms,
                Box::new(move || {
                    let Some(state) = weak_for_timer.upgrade() else { return };
                    state.update(|s| s.pending_timer = None);
                    Self::run_phase(weak_for_timer.clone(), next_phase);
                }),
            );
            state.update(|s| s.pending_timer = Some(timer_id));
        }));
    }
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
