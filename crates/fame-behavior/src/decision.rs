//! Behavior Decision Engine (C11): a pure function of the slot's current
//! progress and the requested behavior. No DOM, no timer, no shared state —
//! the easiest component in the whole engine to exhaustively unit test.

use fame_player::{AnimationBehavior, ReverseMode};

/// `|effective_start - target| < DO_NOTHING_EPSILON` means the slot is
/// already where it needs to be; the coordinator returns without scheduling
/// a single frame.
const DO_NOTHING_EPSILON: f64 = 0.01;

/// What the coordinator should do: play `behavior` on the player from
/// `effective_start` toward `target_progress`, reporting reverse-mode
/// `reverse_mode` for any backward phase. `None` from [`decide`] means the
/// caller shouldn't act at all (a skip, or a behavior this engine doesn't
/// own the semantics of).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorDecision {
    pub behavior: AnimationBehavior,
    pub effective_start: f64,
    pub target_progress: f64,
    pub reverse_mode: ReverseMode,
}

/// Decides what a trigger firing should do to a slot currently at
/// `current_progress`. `override_state` and `override_start_progress` let a
/// caller (e.g. a "restart from 30%" authoring toggle) supplant the stored
/// progress as the effective starting point before the behavior table is
/// applied.
///
/// Returns `None` for:
/// - `PLAY_ONCE` when the slot isn't at progress `0` (it has already played),
/// - the loop/ping-pong/delayed-trigger variants, which this engine doesn't
///   decide at all (C12 routes those to C13/C14 before ever calling here),
/// - a do-nothing decision (`effective_start` already within
///   [`DO_NOTHING_EPSILON`] of the computed target).
pub fn decide(
    behavior: AnimationBehavior,
    current_progress: f64,
    override_state: bool,
    override_start_progress: f64,
    reverse_mode: ReverseMode,
) -> Option<BehaviorDecision> {
    use AnimationBehavior::*;

    let effective_start = if override_state { override_start_progress } else { current_progress };

    let target_progress = match behavior {
        PlayForward | PlayForwardAndReset | PlayForwardAndReverse => 1.0,
        PlayBackward | PlayBackwardAndReset | PlayBackwardAndReverse => 0.0,
        Toggle => {
            if effective_start < 0.5 {
                1.0
            } else {
                0.0
            }
        }
        PlayOnce => {
            if effective_start == 0.0 {
                1.0
            } else {
                return None;
            }
        }
        StartLoop | StopLoop | StartPingPong | StopPingPong | DelayedTrigger => return None,
    };

    // `PlayForwardAndReverse`/`PlayBackwardAndReverse` report their *first*
    // phase's target above (so the coordinator knows which direction to
    // start in), but their net effect is a full round trip back to the
    // opposite edge. The do-nothing check has to compare against that net
    // target, or a composite fired from the edge it starts at would look
    // like a no-op and never run its reverse phase.
    let near_target_check = match behavior {
        PlayForwardAndReverse => 0.0,
        PlayBackwardAndReverse => 1.0,
        _ => target_progress,
    };

    if (effective_start - near_target_check).abs() < DO_NOTHING_EPSILON {
        return None;
    }

    Some(BehaviorDecision { behavior, effective_start, target_progress, reverse_mode })
}

#[cfg(test)]
#[path = "tests/decision_tests.rs"]
mod tests;
