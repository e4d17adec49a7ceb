use serde::{Deserialize, Serialize};

/// The closed set of trigger behaviors from the data model (§3). Defined
/// here because the eight `Play*` variants are exactly what `TimelinePlayer`
/// reduces to sequences of its own primitives; the loop/ping-pong/delayed
/// variants pass through untouched to `fame-behavior`'s C13/C14, which is
/// why `TimelinePlayer::execute_behavior` returns `None` for them rather
/// than owning their semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationBehavior {
    PlayForward,
    PlayBackward,
    Toggle,
    PlayOnce,
    PlayForwardAndReset,
    PlayBackwardAndReset,
    PlayForwardAndReverse,
    PlayBackwardAndReverse,
    StartLoop,
    StopLoop,
    StartPingPong,
    StopPingPong,
    DelayedTrigger,
}

/// How a backward play relates to the forward easing curve (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReverseMode {
    /// Play the original timeline with decreasing `t`; easing shape mirrors.
    TimeReversal,
    /// Play a transformed (endpoint-swapped) timeline forward, reporting
    /// `1 - p`; easing shape is preserved rather than mirrored.
    #[default]
    EasingPreservation,
}
