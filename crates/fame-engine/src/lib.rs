//! Event Animation Coordinator (C19) and the shared DOM listener registry it
//! builds on: the component that turns an authored [`AnimationSlot`] into
//! live DOM behavior against a real or fake [`fame_dom::Document`].

mod coordinator;
mod listener_registry;
mod slot;

pub use coordinator::{BoundSlotHandle, EventAnimationCoordinator, ELEMENT_INDEX_ATTRIBUTE};
pub use listener_registry::{SharedListenerHandle, SharedListenerRegistry};
pub use slot::{AnimatedElementSelection, AnimationSlot, LoopConfig, PingPongConfig, Trigger, TriggerEvent};
