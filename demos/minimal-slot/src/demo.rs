//! The one `AnimationSlot` this demo wires up: a click on `#trigger`
//! toggles three staggered children of `#fame-demo-root` between their
//! resting and revealed opacity/translate-x values. Shared verbatim by the
//! native smoke-test binary and the wasm entry point — only the `Document`/
//! `RuntimeHandle` each one hands in differs.

use std::rc::Rc;

use fame_behavior::InterruptBehavior;
use fame_core::{FameConfig, RuntimeHandle};
use fame_dom::{
    DocumentHandle, DynamicElementRegistry, ElementHandle, ElementSelection, EnvironmentMode, MissPolicy, Scope,
    StyleApplicator,
};
use fame_engine::{AnimatedElementSelection, AnimationSlot, BoundSlotHandle, EventAnimationCoordinator, Trigger, TriggerEvent};
use fame_player::AnimationBehavior;
use fame_stagger::{StaggerConfig, StaggerDirection, StaggerStrategy};
use fame_style::{PropertyValue, Unit};
use fame_timeline::{MasterTimeline, PropertyKeyframe, PropertyTimeline};

/// `opacity: 0 -> 1` and `translateX: -16px -> 0px` over 600ms.
fn reveal_timeline() -> MasterTimeline {
    let opacity = PropertyTimeline::new(
        "opacity",
        vec![
            PropertyKeyframe::new(0.0, PropertyValue::Number(0.0, Unit::Unitless)),
            PropertyKeyframe::new(0.6, PropertyValue::Number(1.0, Unit::Unitless)),
        ],
    )
    .expect("two keyframes at distinct times is always valid");
    let translate_x = PropertyTimeline::new(
        "translateX",
        vec![
            PropertyKeyframe::new(0.0, PropertyValue::Number(-16.0, Unit::Px)),
            PropertyKeyframe::new(0.6, PropertyValue::Number(0.0, Unit::Px)),
        ],
    )
    .expect("two keyframes at distinct times is always valid");
    MasterTimeline::new(vec![opacity, translate_x]).expect("non-empty property list is always valid")
}

/// The slot itself: children of `#fame-demo-root` animate, a `.trigger`
/// click toggles them, staggered 150ms apart in document order.
pub fn animation_slot() -> AnimationSlot {
    let animated = AnimatedElementSelection::new(ElementSelection::new(Scope::Children));
    let stagger = StaggerConfig::new(StaggerStrategy::Linear, 0.15, StaggerDirection::FirstToLast)
        .expect("0.15s is a finite, non-negative delay");
    let trigger = Trigger::new(
        TriggerEvent::Click,
        ElementSelection::new(Scope::SelfScope),
        AnimationBehavior::Toggle,
    );

    AnimationSlot::new("minimal-reveal", animated, reveal_timeline())
        .with_interrupt_behavior(InterruptBehavior::QueueLatest)
        .with_staggering(stagger)
        .with_trigger(trigger)
}

/// Builds the coordinator and binds the one slot against `root`, whose
/// direct children are the animated elements and which is itself the
/// trigger's click target.
pub fn bind(document: DocumentHandle, runtime: RuntimeHandle, root: ElementHandle) -> BoundSlotHandle {
    let registry = Rc::new(DynamicElementRegistry::new(runtime.clock().clone(), MissPolicy::Warn));
    let style = Rc::new(StyleApplicator::new(runtime.clock().clone()));
    let coordinator = EventAnimationCoordinator::new(document, runtime, registry, style, FameConfig::default());
    coordinator.bind(animation_slot(), root, EnvironmentMode::Live)
}
