//! Behavior Decision Engine (C11), Behavior Coordinator (C12), Loop &
//! Ping-Pong Runners (C13), and Delayed Trigger Manager (C14). Together
//! these decide, for a fired trigger, what a slot's animation should do
//! next and whether it should happen at all.

mod coordinator;
mod decision;
mod delayed_trigger;
mod runner;

pub use coordinator::{BehaviorCoordinator, InterruptBehavior, PendingIntent};
pub use decision::{decide, BehaviorDecision};
pub use delayed_trigger::{DelayedTriggerManager, DelayedTriggerMode};
pub use runner::{LoopRunner, PingPongRunner};
