//! The public authoring surface (§3/§4.19): `AnimationSlot`, `Trigger`, and
//! the loop/ping-pong/distribution configs a host builds once and hands to
//! [`crate::EventAnimationCoordinator::bind`].

use fame_behavior::{DelayedTriggerMode, InterruptBehavior};
use fame_dom::ElementSelection;
use fame_player::{AnimationBehavior, ReverseMode};
use fame_scroll::ScrollBoundaries;
use fame_stagger::{DistributionPattern, StaggerConfig};
use fame_text::TextSplitConfig;
use fame_timeline::MasterTimeline;
use serde::{Deserialize, Serialize};

/// The DOM event a [`Trigger`] listens for. `Load` fires once at bind time
/// rather than through a DOM listener; `Scroll` is either scrubbed
/// (`slot.scroll_config` set) or a discrete threshold crossing
/// (`Trigger::scroll_thresholds`), never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    Click,
    MouseOver,
    MouseOut,
    Load,
    Scroll,
    ScrollDirectionChange,
}

/// Authoring config for a `START_LOOP` trigger. `play_behavior` is the
/// single action repeated each iteration; composite reverse behaviors are
/// not supported here (loop/ping-pong are themselves the repetition
/// mechanism, per §4.13).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    pub iterations: u32,
    pub delay_ms: u32,
    pub play_behavior: AnimationBehavior,
}

/// Authoring config for a `START_PING_PONG` trigger: implicitly forward
/// then backward every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PingPongConfig {
    pub cycles: u32,
    pub delay_ms: u32,
}

/// One trigger entry on a slot (§3's `Trigger`). `selection` resolves the
/// element whose DOM event is listened to, which may differ from the
/// slot's animated elements (e.g. a button click animating a sibling panel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub event: TriggerEvent,
    pub selection: ElementSelection,
    pub behavior: AnimationBehavior,
    pub override_state: bool,
    pub override_start_progress: f64,
    pub reverse_mode: ReverseMode,
    pub loop_config: Option<LoopConfig>,
    pub ping_pong_config: Option<PingPongConfig>,
    pub delayed_trigger_mode: Option<DelayedTriggerMode>,
    /// The behavior actually run once `delayed_trigger_mode` gates a firing
    /// open. Only consulted when `behavior == AnimationBehavior::DelayedTrigger`.
    pub gated_behavior: Option<AnimationBehavior>,
    /// Discrete, non-scrubbed scroll firing window: the trigger's
    /// `behavior` fires once when scroll progress against this window
    /// crosses from below 1.0 to 1.0. Distinct from `AnimationSlot::scroll_config`,
    /// which scrubs continuously instead of firing a trigger at all.
    pub scroll_thresholds: Option<ScrollBoundaries>,
}

impl Trigger {
    pub fn new(event: TriggerEvent, selection: ElementSelection, behavior: AnimationBehavior) -> Self {
        Self {
            event,
            selection,
            behavior,
            override_state: false,
            override_start_progress: 0.0,
            reverse_mode: ReverseMode::default(),
            loop_config: None,
            ping_pong_config: None,
            delayed_trigger_mode: None,
            gated_behavior: None,
            scroll_thresholds: None,
        }
    }

    pub fn with_override_start(mut self, progress: f64) -> Self {
        self.override_state = true;
        self.override_start_progress = progress;
        self
    }

    pub fn with_reverse_mode(mut self, reverse_mode: ReverseMode) -> Self {
        self.reverse_mode = reverse_mode;
        self
    }

    pub fn with_loop_config(mut self, config: LoopConfig) -> Self {
        self.loop_config = Some(config);
        self
    }

    pub fn with_ping_pong_config(mut self, config: PingPongConfig) -> Self {
        self.ping_pong_config = Some(config);
        self
    }

    pub fn with_delayed_trigger(mut self, mode: DelayedTriggerMode, gated_behavior: AnimationBehavior) -> Self {
        self.delayed_trigger_mode = Some(mode);
        self.gated_behavior = Some(gated_behavior);
        self
    }

    pub fn with_scroll_thresholds(mut self, boundaries: ScrollBoundaries) -> Self {
        self.scroll_thresholds = Some(boundaries);
        self
    }
}

/// The animated elements a slot plays its timeline on (§3's
/// `AnimatedElementSelection`), plus an optional text-processing step
/// (C9) that replaces the resolved containers with their split wrappers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatedElementSelection {
    pub selection: ElementSelection,
    pub text_processing: Option<TextSplitConfig>,
}

impl AnimatedElementSelection {
    pub fn new(selection: ElementSelection) -> Self {
        Self { selection, text_processing: None }
    }

    pub fn with_text_processing(mut self, config: TextSplitConfig) -> Self {
        self.text_processing = Some(config);
        self
    }
}

/// A host's complete authoring input for one animation (§3's `AnimationSlot`).
/// Reusable across `bind` calls (e.g. one slot bound against many component
/// instances); binding never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSlot {
    pub id: String,
    pub animated_elements: AnimatedElementSelection,
    pub master_timeline: MasterTimeline,
    pub triggers: Vec<Trigger>,
    pub interrupt_behavior: InterruptBehavior,
    pub staggering: Option<StaggerConfig>,
    /// Scrubbed-scroll window (§4.15/§4.16). When set, every `SCROLL`
    /// trigger on this slot scrubs continuously instead of firing once;
    /// `Trigger::scroll_thresholds` is ignored for this slot's scroll
    /// triggers in that case.
    pub scroll_config: Option<ScrollBoundaries>,
    /// Per-property distributed `from`/`to` patterns (C20), applied against
    /// the resolved animated-element count at bind time.
    pub distributions: Vec<(String, Option<DistributionPattern>, Option<DistributionPattern>)>,
    /// The canvas-environment initial-values toggle (§6).
    pub show_initial_values_in_canvas: bool,
}

impl AnimationSlot {
    pub fn new(id: impl Into<String>, animated_elements: AnimatedElementSelection, master_timeline: MasterTimeline) -> Self {
        Self {
            id: id.into(),
            animated_elements,
            master_timeline,
            triggers: Vec::new(),
            interrupt_behavior: InterruptBehavior::Immediate,
            staggering: None,
            scroll_config: None,
            distributions: Vec::new(),
            show_initial_values_in_canvas: false,
        }
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn with_interrupt_behavior(mut self, interrupt_behavior: InterruptBehavior) -> Self {
        self.interrupt_behavior = interrupt_behavior;
        self
    }

    pub fn with_staggering(mut self, staggering: StaggerConfig) -> Self {
        self.staggering = Some(staggering);
        self
    }

    pub fn with_scroll_config(mut self, scroll_config: ScrollBoundaries) -> Self {
        self.scroll_config = Some(scroll_config);
        self
    }

    pub fn with_distribution(
        mut self,
        property: impl Into<String>,
        from_pattern: Option<DistributionPattern>,
        to_pattern: Option<DistributionPattern>,
    ) -> Self {
        self.distributions.push((property.into(), from_pattern, to_pattern));
        self
    }

    pub fn with_show_initial_values_in_canvas(mut self, show: bool) -> Self {
        self.show_initial_values_in_canvas = show;
        self
    }
}
