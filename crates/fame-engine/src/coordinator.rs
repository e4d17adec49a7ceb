//! Event Animation Coordinator (C19): the central wiring component. Binds an
//! [`AnimationSlot`] to a live DOM root, routing every [`TriggerEvent`]
//! through the Delayed Trigger Manager (C14), the Loop/Ping-Pong Runners
//! (C13) or the Behavior Coordinator (C12), the Stagger Coordinator (C15),
//! and finally the Timeline Player (C5)/Style Applicator (C6) for each
//! resolved animated element.
//!
//! Composite reverse behaviors (`PLAY_FORWARD_AND_REVERSE`/
//! `PLAY_BACKWARD_AND_REVERSE`) need a cross-element barrier that
//! `TimelinePlayer::execute_behavior`'s own per-element phase chaining can't
//! give us (§9: "every element finishes phase one before any element starts
//! phase two"), so this coordinator drives those two behaviors itself via
//! `play_forward_notify`/`play_backward_notify` rather than delegating to
//! `execute_behavior`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fame_behavior::{BehaviorCoordinator, BehaviorDecision, DelayedTriggerManager, LoopRunner, PendingIntent, PingPongRunner};
use fame_core::platform::RuntimeHandle;
use fame_core::FameConfig;
use fame_dom::{
    DocumentHandle, DynamicElementRegistry, ElementFinder, ElementHandle, EnvironmentMode, Rect, StyleApplicator,
};
use fame_player::{AnimationBehavior, ReverseMode, TimelinePlayer};
use fame_scroll::{ScrollDirectionDetector, ScrollPriority, ScrollProgressTracker, UnifiedScrollManager};
use fame_stagger::{expand_master_timeline_for_element, populate_distribution, StaggerCoordinator, StaggerStrategy, DEFAULT_GRID_BUCKET_TOLERANCE_PX};
use fame_state::{AnimationStateStore, AnimationStatus};
use fame_text::TextSplitter;
use fame_timeline::MasterTimeline;

use crate::listener_registry::{SharedListenerHandle, SharedListenerRegistry};
use crate::slot::{AnimatedElementSelection, AnimationSlot, Trigger, TriggerEvent};

/// Stable per-animated-element ordinal, written alongside `data-fame-element-id`
/// at bind time. Lets a host's CSS target "the 3rd animated element" without
/// depending on the minted id's format.
pub const ELEMENT_INDEX_ATTRIBUTE: &str = "data-fame-element-index";

struct ElementRun {
    element_id: String,
    player: TimelinePlayer,
    timeline: Rc<MasterTimeline>,
}

struct BoundSlotRuntime {
    engine: EventAnimationCoordinator,
    slot: AnimationSlot,
    root: ElementHandle,
    environment: EnvironmentMode,
    players: Vec<ElementRun>,
    listener_handles: RefCell<Vec<SharedListenerHandle>>,
    direction_subscriptions: RefCell<Vec<u64>>,
    scroll_registration_ids: RefCell<Vec<String>>,
    scroll_trackers: RefCell<Vec<Rc<ScrollProgressTracker>>>,
    scrub_bound: Cell<bool>,
    loop_runner: RefCell<Option<LoopRunner>>,
    ping_pong_runner: RefCell<Option<PingPongRunner>>,
}

/// A live binding produced by [`EventAnimationCoordinator::bind`]. Dropping
/// this without calling [`Self::unbind`] leaves listeners and scroll
/// registrations installed — callers that own a component lifecycle should
/// call `unbind` on unmount, matching §3's "state entries are torn down when
/// the slot's owning host unmounts".
pub struct BoundSlotHandle {
    runtime: Rc<BoundSlotRuntime>,
}

impl BoundSlotHandle {
    pub fn slot_id(&self) -> &str {
        &self.runtime.slot.id
    }

    /// The slot's current progress (`0..1`), read from the shared state store.
    pub fn progress(&self) -> f64 {
        self.runtime.engine.inner.state.progress(&self.runtime.slot.id)
    }

    /// Tears down every listener, scroll registration, and running player
    /// this binding installed.
    pub fn unbind(self) {
        self.runtime.engine.clone().teardown(&self.runtime);
    }
}

struct Inner {
    document: DocumentHandle,
    runtime: RuntimeHandle,
    registry: Rc<DynamicElementRegistry>,
    style: Rc<StyleApplicator>,
    stagger: StaggerCoordinator,
    text_splitter: TextSplitter,
    state: AnimationStateStore,
    behavior: BehaviorCoordinator,
    delayed: DelayedTriggerManager,
    listeners: SharedListenerRegistry,
    scroll_manager: UnifiedScrollManager,
    direction_detector: ScrollDirectionDetector,
}

/// Turns bound [`AnimationSlot`]s into live DOM behavior. One instance per
/// document; every slot a host binds shares the same scroll manager,
/// direction detector, and listener registry, matching the "one shared
/// listener per concern" discipline those components are themselves built on.
#[derive(Clone)]
pub struct EventAnimationCoordinator {
    inner: Rc<Inner>,
}

impl EventAnimationCoordinator {
    pub fn new(
        document: DocumentHandle,
        runtime: RuntimeHandle,
        registry: Rc<DynamicElementRegistry>,
        style: Rc<StyleApplicator>,
        config: FameConfig,
    ) -> Self {
        let state = AnimationStateStore::new();
        let behavior = BehaviorCoordinator::new(state.clone());
        Self {
            inner: Rc::new(Inner {
                scroll_manager: UnifiedScrollManager::new(document.clone(), runtime.clone(), config),
                direction_detector: ScrollDirectionDetector::new(document.clone()),
                document,
                runtime,
                registry,
                style,
                stagger: StaggerCoordinator::new(DEFAULT_GRID_BUCKET_TOLERANCE_PX),
                text_splitter: TextSplitter::new(config),
                state,
                behavior,
                delayed: DelayedTriggerManager::new(),
                listeners: SharedListenerRegistry::new(),
            }),
        }
    }

    /// Resolves a slot's animated elements against `root`, assigns each a
    /// stable id and ordinal, applies initial values per §6's canvas-mode
    /// rule, wires every trigger, and returns a handle the host keeps for the
    /// binding's lifetime.
    pub fn bind(&self, slot: AnimationSlot, root: ElementHandle, environment: EnvironmentMode) -> BoundSlotHandle {
        let animated = self.resolve_animated_elements(&root, &slot.animated_elements);
        if animated.is_empty() {
            log::warn!("fame-engine: slot {:?} resolved zero animated elements; binding is a no-op", slot.id);
        }

        let element_count = animated.len();
        let element_ids: Vec<String> = animated
            .iter()
            .enumerate()
            .map(|(i, el)| {
                let id = self.inner.registry.ensure_element_id(el);
                el.set_attribute(ELEMENT_INDEX_ATTRIBUTE, &i.to_string());
                id
            })
            .collect();

        let players: Vec<ElementRun> = (0..element_count)
            .map(|i| {
                let timeline = self.build_master_for_element(&slot, element_count, i);
                let player = self.make_player(timeline.clone(), element_ids[i].clone());
                ElementRun { element_id: element_ids[i].clone(), player, timeline }
            })
            .collect();

        self.apply_initial_values(environment, slot.show_initial_values_in_canvas, &players, &animated);

        let runtime = Rc::new(BoundSlotRuntime {
            engine: self.clone(),
            slot,
            root,
            environment,
            players,
            listener_handles: RefCell::new(Vec::new()),
            direction_subscriptions: RefCell::new(Vec::new()),
            scroll_registration_ids: RefCell::new(Vec::new()),
            scroll_trackers: RefCell::new(Vec::new()),
            scrub_bound: Cell::new(false),
            loop_runner: RefCell::new(None),
            ping_pong_runner: RefCell::new(None),
        });

        self.bind_triggers(&runtime);

        BoundSlotHandle { runtime }
    }

    fn apply_initial_values(
        &self,
        environment: EnvironmentMode,
        show_initial_values_in_canvas: bool,
        players: &[ElementRun],
        elements: &[ElementHandle],
    ) {
        if environment == EnvironmentMode::Canvas && !show_initial_values_in_canvas {
            return;
        }
        for (run, element) in players.iter().zip(elements) {
            let values = run.timeline.values_at_time(0.0);
            self.inner.style.apply(&*self.inner.document, element, &values);
        }
    }

    fn resolve_animated_elements(&self, root: &ElementHandle, selection: &AnimatedElementSelection) -> Vec<ElementHandle> {
        let containers = ElementFinder::resolve(&*self.inner.document, root, &selection.selection);
        match &selection.text_processing {
            Some(config) => containers
                .iter()
                .flat_map(|container| {
                    self.inner
                        .text_splitter
                        .split(&*self.inner.document, &self.inner.registry, container, config, false)
                        .animated_elements
                })
                .collect(),
            None => containers,
        }
    }

    /// Rebuilds `slot.master_timeline` for one element when it has any
    /// distributed properties (C20); returns the slot's shared timeline
    /// unchanged otherwise.
    fn build_master_for_element(&self, slot: &AnimationSlot, element_count: usize, element_index: usize) -> Rc<MasterTimeline> {
        if slot.distributions.is_empty() {
            return Rc::new(slot.master_timeline.clone());
        }

        let mut timelines = slot.master_timeline.property_timelines().to_vec();
        for (property, from_pattern, to_pattern) in &slot.distributions {
            match timelines.iter_mut().find(|t| &t.property == property) {
                Some(timeline) => populate_distribution(timeline, from_pattern.as_ref(), to_pattern.as_ref(), element_count),
                None => log::warn!("fame-engine: distribution configured for unknown property {property:?}"),
            }
        }

        let populated = match MasterTimeline::new(timelines) {
            Ok(populated) => populated,
            Err(err) => {
                log::error!("fame-engine: failed to rebuild master timeline for distribution: {err}");
                return Rc::new(slot.master_timeline.clone());
            }
        };
        match expand_master_timeline_for_element(&populated, element_index) {
            Ok(per_element) => Rc::new(per_element),
            Err(err) => {
                log::error!("fame-engine: failed to expand per-element timeline: {err}");
                Rc::new(populated)
            }
        }
    }

    fn make_player(&self, timeline: Rc<MasterTimeline>, element_id: String) -> TimelinePlayer {
        let document = self.inner.document.clone();
        let registry = self.inner.registry.clone();
        let style = self.inner.style.clone();
        TimelinePlayer::new(self.inner.runtime.clone(), timeline, move |sample| {
            if let Some(element) = registry.resolve(&*document, &element_id) {
                style.apply(&*document, &element, &sample.values);
            }
        })
    }

    fn bind_triggers(&self, bound: &Rc<BoundSlotRuntime>) {
        for (trigger_index, trigger) in bound.slot.triggers.iter().enumerate() {
            if bound.environment == EnvironmentMode::Canvas
                && matches!(trigger.event, TriggerEvent::Load | TriggerEvent::Scroll | TriggerEvent::ScrollDirectionChange)
            {
                continue;
            }
            match trigger.event {
                TriggerEvent::Click => self.bind_dom_event(bound, trigger_index, trigger, "click"),
                TriggerEvent::MouseOver => self.bind_dom_event(bound, trigger_index, trigger, "mouseover"),
                TriggerEvent::MouseOut => self.bind_dom_event(bound, trigger_index, trigger, "mouseout"),
                TriggerEvent::Load => self.fire_trigger(bound, trigger_index),
                TriggerEvent::ScrollDirectionChange => self.bind_direction_change(bound, trigger_index),
                TriggerEvent::Scroll => {
                    if bound.slot.scroll_config.is_some() {
                        self.bind_scrub_scroll(bound, trigger);
                    } else if trigger.scroll_thresholds.is_some() {
                        self.bind_threshold_scroll(bound, trigger_index, trigger);
                    } else {
                        log::warn!(
                            "fame-engine: slot {:?} has a SCROLL trigger with neither scroll_config nor \
                             scroll_thresholds; ignoring",
                            bound.slot.id
                        );
                    }
                }
            }
        }
    }

    fn bind_dom_event(&self, bound: &Rc<BoundSlotRuntime>, trigger_index: usize, trigger: &Trigger, event_name: &str) {
        let elements = ElementFinder::resolve(&*self.inner.document, &bound.root, &trigger.selection);
        if elements.is_empty() {
            log::warn!("fame-engine: trigger {trigger_index} on slot {:?} resolved zero elements", bound.slot.id);
            return;
        }
        for element in &elements {
            let bound_for_closure = bound.clone();
            let handle = self.inner.listeners.add(element, event_name, move || {
                bound_for_closure.engine.clone().fire_trigger(&bound_for_closure, trigger_index);
            });
            bound.listener_handles.borrow_mut().push(handle);
        }
    }

    fn bind_direction_change(&self, bound: &Rc<BoundSlotRuntime>, trigger_index: usize) {
        let bound_for_closure = bound.clone();
        let id = self.inner.direction_detector.subscribe(move |_direction| {
            bound_for_closure.engine.clone().fire_trigger(&bound_for_closure, trigger_index);
        });
        bound.direction_subscriptions.borrow_mut().push(id);
    }

    fn bind_threshold_scroll(&self, bound: &Rc<BoundSlotRuntime>, trigger_index: usize, trigger: &Trigger) {
        let Some(boundaries) = trigger.scroll_thresholds else { return };
        let elements = ElementFinder::resolve(&*self.inner.document, &bound.root, &trigger.selection);
        let Some(element) = elements.into_iter().next() else {
            log::warn!(
                "fame-engine: scroll-threshold trigger {trigger_index} on slot {:?} resolved zero elements",
                bound.slot.id
            );
            return;
        };
        let tracker = ScrollProgressTracker::new(&self.inner.document, element, boundaries);
        let last_progress = Rc::new(Cell::new(0.0_f64));

        let bound_for_closure = bound.clone();
        let document = self.inner.document.clone();
        let tracker_for_closure = tracker.clone();
        let reg_id = self.inner.scroll_manager.register(
            &format!("{}#threshold#{}", bound.slot.id, trigger_index),
            ScrollPriority::Medium,
            move || {
                let progress = tracker_for_closure.progress(&*document);
                let previous = last_progress.replace(progress);
                if previous < 1.0 && progress >= 1.0 {
                    bound_for_closure.engine.clone().fire_trigger(&bound_for_closure, trigger_index);
                }
            },
        );
        bound.scroll_registration_ids.borrow_mut().push(reg_id);
        bound.scroll_trackers.borrow_mut().push(tracker);
    }

    /// Wires the slot's one scrubbed-scroll tracker (§4.15/§4.16). Multiple
    /// `SCROLL` triggers on the same scrub-configured slot all share this one
    /// registration — `scrub_bound` guards against registering it twice.
    fn bind_scrub_scroll(&self, bound: &Rc<BoundSlotRuntime>, trigger: &Trigger) {
        if bound.scrub_bound.replace(true) {
            return;
        }
        let Some(boundaries) = bound.slot.scroll_config else { return };
        let elements = ElementFinder::resolve(&*self.inner.document, &bound.root, &trigger.selection);
        let Some(element) = elements.into_iter().next() else {
            log::warn!("fame-engine: scrubbed-scroll slot {:?} trigger resolved zero elements", bound.slot.id);
            return;
        };
        let tracker = ScrollProgressTracker::new(&self.inner.document, element, boundaries);

        let bound_for_closure = bound.clone();
        let document = self.inner.document.clone();
        let tracker_for_closure = tracker.clone();
        let registry = self.inner.registry.clone();
        let style = self.inner.style.clone();
        let stagger = self.inner.stagger;
        let reg_id = self.inner.scroll_manager.register(
            &format!("{}#scrub", bound.slot.id),
            ScrollPriority::High,
            move || {
                let global_progress = tracker_for_closure.progress(&*document);
                let n = bound_for_closure.players.len();
                let per_element = match &bound_for_closure.slot.staggering {
                    Some(config) if config.enabled && config.strategy == StaggerStrategy::ScrubbedScroll => {
                        stagger.scrub_progress(config, global_progress, n)
                    }
                    _ => vec![global_progress; n],
                };
                for (run, element_progress) in bound_for_closure.players.iter().zip(per_element) {
                    if let Some(element) = registry.resolve(&*document, &run.element_id) {
                        let t = element_progress * run.timeline.total_duration_s();
                        let values = run.timeline.values_at_time(t);
                        style.apply(&*document, &element, &values);
                    }
                }
            },
        );
        bound.scroll_registration_ids.borrow_mut().push(reg_id);
        bound.scroll_trackers.borrow_mut().push(tracker);
    }

    fn fire_trigger(&self, bound: &Rc<BoundSlotRuntime>, trigger_index: usize) {
        let trigger = &bound.slot.triggers[trigger_index];
        if let Some(mode) = &trigger.delayed_trigger_mode {
            if !self.inner.delayed.should_execute(&bound.slot.id, mode) {
                return;
            }
        }

        let behavior = if trigger.behavior == AnimationBehavior::DelayedTrigger {
            match trigger.gated_behavior {
                Some(gated) => gated,
                None => {
                    log::warn!(
                        "fame-engine: trigger {trigger_index} on slot {:?} is DELAYED_TRIGGER with no gated_behavior",
                        bound.slot.id
                    );
                    return;
                }
            }
        } else {
            trigger.behavior
        };

        match behavior {
            AnimationBehavior::StartLoop => self.start_loop(bound, trigger),
            AnimationBehavior::StopLoop => {
                if let Some(runner) = bound.loop_runner.borrow_mut().take() {
                    runner.stop();
                }
            }
            AnimationBehavior::StartPingPong => self.start_ping_pong(bound, trigger),
            AnimationBehavior::StopPingPong => {
                if let Some(runner) = bound.ping_pong_runner.borrow_mut().take() {
                    runner.stop();
                }
            }
            _ => {
                let intent = PendingIntent {
                    behavior,
                    override_state: trigger.override_state,
                    override_start_progress: trigger.override_start_progress,
                    reverse_mode: trigger.reverse_mode,
                };
                if let Some(decision) = self.inner.behavior.dispatch(&bound.slot.id, bound.slot.interrupt_behavior, intent) {
                    self.execute_decision(bound.clone(), decision);
                }
            }
        }
    }

    fn start_loop(&self, bound: &Rc<BoundSlotRuntime>, trigger: &Trigger) {
        let Some(config) = trigger.loop_config else { return };
        if let Some(existing) = bound.loop_runner.borrow_mut().take() {
            existing.stop();
        }
        let bound_for_play = bound.clone();
        let play_behavior = config.play_behavior;
        let reverse_mode = trigger.reverse_mode;
        let runner = LoopRunner::new(self.inner.runtime.clone(), config.iterations, config.delay_ms, move |on_iteration_done| {
            bound_for_play.engine.clone().run_single_pass(&bound_for_play, play_behavior, reverse_mode, on_iteration_done);
        });
        runner.start();
        *bound.loop_runner.borrow_mut() = Some(runner);
    }

    fn start_ping_pong(&self, bound: &Rc<BoundSlotRuntime>, trigger: &Trigger) {
        let Some(config) = trigger.ping_pong_config else { return };
        if let Some(existing) = bound.ping_pong_runner.borrow_mut().take() {
            existing.stop();
        }
        let bound_forward = bound.clone();
        let bound_backward = bound.clone();
        let reverse_mode = trigger.reverse_mode;
        let runner = PingPongRunner::new(
            self.inner.runtime.clone(),
            config.cycles,
            config.delay_ms,
            move |on_done| {
                bound_forward.engine.clone().run_single_pass(&bound_forward, AnimationBehavior::PlayForward, reverse_mode, on_done);
            },
            move |on_done| {
                bound_backward.engine.clone().run_single_pass(&bound_backward, AnimationBehavior::PlayBackward, reverse_mode, on_done);
            },
        );
        runner.start();
        *bound.ping_pong_runner.borrow_mut() = Some(runner);
    }

    /// Runs one loop/ping-pong iteration: bypasses the Decision Engine and
    /// interrupt policy entirely (C13 itself *is* the repetition mechanism,
    /// per §4.13) and always starts from the slot's current stored progress.
    fn run_single_pass(&self, bound: &Rc<BoundSlotRuntime>, behavior: AnimationBehavior, reverse_mode: ReverseMode, on_done: Box<dyn FnOnce()>) {
        let current = self.inner.state.progress(&bound.slot.id);
        let target = match behavior {
            AnimationBehavior::PlayBackward => 0.0,
            _ => 1.0,
        };
        self.inner.state.update_target(&bound.slot.id, target);
        self.inner.state.update_progress(&bound.slot.id, current, AnimationStatus::Running);
        let bound = bound.clone();
        // `on_done` is a one-shot `FnOnce`, but `run_elements` clones its
        // completion callback once per element and needs `Fn`. A
        // `Cell`-guarded `take` lets the shared closure satisfy `Fn` while
        // still only ever calling the boxed closure once.
        let on_done = Rc::new(Cell::new(Some(on_done)));
        self.run_elements(bound, behavior, current, reverse_mode, move |_| {
            if let Some(on_done) = on_done.take() {
                on_done();
            }
        });
    }

    fn execute_decision(&self, bound: Rc<BoundSlotRuntime>, decision: BehaviorDecision) {
        match decision.behavior {
            AnimationBehavior::PlayForwardAndReverse | AnimationBehavior::PlayBackwardAndReverse => {
                self.run_composite_reverse(bound, decision);
            }
            _ => {
                let engine = self.clone();
                let bound_for_done = bound.clone();
                self.run_elements(bound, decision.behavior, decision.effective_start, decision.reverse_mode, move |final_progress| {
                    engine.on_slot_settled(&bound_for_done, final_progress);
                });
            }
        }
    }

    /// Runs a simple (non-composite-reverse) behavior across every element,
    /// staggering each element's start per the slot's `StaggerConfig`, and
    /// invokes `on_all_done` once every element's run has finished.
    fn run_elements(
        &self,
        bound: Rc<BoundSlotRuntime>,
        behavior: AnimationBehavior,
        start: f64,
        reverse_mode: ReverseMode,
        on_all_done: impl Fn(f64) + 'static,
    ) {
        let target = match behavior {
            AnimationBehavior::PlayBackward | AnimationBehavior::PlayBackwardAndReset => 0.0,
            AnimationBehavior::Toggle => {
                if start < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            AnimationBehavior::PlayForwardAndReset => 0.0,
            _ => 1.0,
        };

        let n = bound.players.len();
        if n == 0 {
            on_all_done(target);
            return;
        }

        let delays_ms = self.stagger_delay_ms(&bound);
        let remaining = Rc::new(Cell::new(n));
        let on_all_done = Rc::new(on_all_done);

        for (i, run) in bound.players.iter().enumerate() {
            let player = run.player.clone();
            let remaining = remaining.clone();
            let on_all_done = on_all_done.clone();
            let fire = move || {
                let finish = move || {
                    remaining.set(remaining.get() - 1);
                    if remaining.get() == 0 {
                        on_all_done(target);
                    }
                };
                run_single_behavior(&player, behavior, start, reverse_mode, finish);
            };
            self.schedule_with_delay(&bound, delays_ms[i], fire);
        }
    }

    /// Drives a composite reverse behavior's cross-element barrier (§9):
    /// every element plays phase one, and only once *all* have finished does
    /// any element start phase two.
    fn run_composite_reverse(&self, bound: Rc<BoundSlotRuntime>, decision: BehaviorDecision) {
        let n = bound.players.len();
        let forward_first = decision.behavior == AnimationBehavior::PlayForwardAndReverse;
        let final_progress = if forward_first { 0.0 } else { 1.0 };
        if n == 0 {
            self.on_slot_settled(&bound, final_progress);
            return;
        }

        let delays_ms = self.stagger_delay_ms(&bound);
        let remaining_phase1 = Rc::new(Cell::new(n));
        let engine = self.clone();
        let start = decision.effective_start;
        let reverse_mode = decision.reverse_mode;

        for (i, run) in bound.players.iter().enumerate() {
            let player = run.player.clone();
            let remaining_phase1 = remaining_phase1.clone();
            let bound_for_phase2 = bound.clone();
            let engine_for_phase2 = engine.clone();
            let fire = move || {
                let remaining_phase1 = remaining_phase1.clone();
                let bound_for_phase2 = bound_for_phase2.clone();
                let engine_for_phase2 = engine_for_phase2.clone();
                let on_phase1_done = move || {
                    remaining_phase1.set(remaining_phase1.get() - 1);
                    if remaining_phase1.get() == 0 {
                        engine_for_phase2.start_reverse_phase2(bound_for_phase2, forward_first, reverse_mode, final_progress);
                    }
                };
                if forward_first {
                    player.play_forward_notify(start, on_phase1_done);
                } else {
                    player.play_backward_notify(start, reverse_mode, on_phase1_done);
                }
            };
            self.schedule_with_delay(&bound, delays_ms[i], fire);
        }
    }

    /// Phase two of a composite reverse behavior: every element plays the
    /// opposite direction from its phase-one endpoint, with no further
    /// stagger delay (phase one's stagger already spread the elements out).
    fn start_reverse_phase2(&self, bound: Rc<BoundSlotRuntime>, phase1_was_forward: bool, reverse_mode: ReverseMode, final_progress: f64) {
        let n = bound.players.len();
        if n == 0 {
            self.on_slot_settled(&bound, final_progress);
            return;
        }
        let remaining = Rc::new(Cell::new(n));
        let engine = self.clone();
        for run in &bound.players {
            let player = run.player.clone();
            let remaining = remaining.clone();
            let bound_for_done = bound.clone();
            let engine_for_done = engine.clone();
            let on_done = move || {
                remaining.set(remaining.get() - 1);
                if remaining.get() == 0 {
                    engine_for_done.on_slot_settled(&bound_for_done, final_progress);
                }
            };
            if phase1_was_forward {
                player.play_backward_notify(1.0, reverse_mode, on_done);
            } else {
                player.play_forward_notify(0.0, on_done);
            }
        }
    }

    /// Marks the slot completed and, if a `QUEUE_LATEST` trigger was
    /// deferred while it ran, executes it now (§4.12).
    fn on_slot_settled(&self, bound: &Rc<BoundSlotRuntime>, final_progress: f64) {
        self.inner.state.complete(&bound.slot.id, final_progress);
        if let Some(decision) = self.inner.behavior.execute_queued_intent_if_exists(&bound.slot.id) {
            self.execute_decision(bound.clone(), decision);
        }
    }

    fn stagger_delay_ms(&self, bound: &Rc<BoundSlotRuntime>) -> Vec<f64> {
        let n = bound.players.len();
        match &bound.slot.staggering {
            Some(config) if config.enabled && config.strategy != StaggerStrategy::ScrubbedScroll => {
                let rects: Vec<Rect> = bound
                    .players
                    .iter()
                    .map(|run| {
                        self.inner
                            .registry
                            .resolve(&*self.inner.document, &run.element_id)
                            .map(|el| el.bounding_client_rect())
                            .unwrap_or_default()
                    })
                    .collect();
                self.inner.stagger.delays(config, &rects).into_iter().map(|seconds| seconds * 1000.0).collect()
            }
            _ => vec![0.0; n],
        }
    }

    /// Runs `fire` after `delay_ms`, or immediately when there's no delay.
    /// The timer is registered as a cleanup so `cancel_active_animations`
    /// (an `Immediate`-interrupt re-trigger) cancels an outstanding
    /// stagger delay before it ever fires the element it was queued for.
    fn schedule_with_delay(&self, bound: &Rc<BoundSlotRuntime>, delay_ms: f64, fire: impl FnOnce() + 'static) {
        if delay_ms <= 0.0 {
            fire();
            return;
        }
        let runtime = self.inner.runtime.clone();
        let timer_id = runtime.timers().request_timer(delay_ms.round().max(0.0) as u32, Box::new(fire));
        let runtime_for_cleanup = self.inner.runtime.clone();
        self.inner.state.register_cleanup(&bound.slot.id, move || runtime_for_cleanup.timers().cancel_timer(timer_id));
    }

    fn teardown(&self, bound: &Rc<BoundSlotRuntime>) {
        self.inner.state.teardown(&bound.slot.id);
        self.inner.delayed.teardown(&bound.slot.id);

        for handle in bound.listener_handles.borrow_mut().drain(..) {
            handle.remove();
        }
        for id in bound.direction_subscriptions.borrow_mut().drain(..) {
            self.inner.direction_detector.unsubscribe(id);
        }
        for id in bound.scroll_registration_ids.borrow_mut().drain(..) {
            self.inner.scroll_manager.deregister(&id);
        }
        for tracker in bound.scroll_trackers.borrow_mut().drain(..) {
            tracker.teardown(&self.inner.document);
        }
        if let Some(runner) = bound.loop_runner.borrow_mut().take() {
            runner.stop();
        }
        if let Some(runner) = bound.ping_pong_runner.borrow_mut().take() {
            runner.stop();
        }
        for run in &bound.players {
            run.player.cancel();
        }
    }
}

/// Runs one element's run of a simple (non-composite-reverse) behavior,
/// chaining the `AndReset` variants' snap-back locally since that chaining
/// doesn't need the cross-element barrier composite reverse does.
fn run_single_behavior(player: &TimelinePlayer, behavior: AnimationBehavior, start: f64, reverse_mode: ReverseMode, on_done: impl FnOnce() + 'static) {
    use AnimationBehavior::*;
    match behavior {
        PlayForward | PlayOnce => player.play_forward_notify(start, on_done),
        PlayBackward => player.play_backward_notify(start, reverse_mode, on_done),
        Toggle => {
            if start < 0.5 {
                player.play_forward_notify(start, on_done);
            } else {
                player.play_backward_notify(start, reverse_mode, on_done);
            }
        }
        PlayForwardAndReset => {
            let player = player.clone();
            player.clone().play_forward_notify(start, move || {
                player.seek_to(0.0);
                on_done();
            });
        }
        PlayBackwardAndReset => {
            let player = player.clone();
            player.clone().play_backward_notify(start, reverse_mode, move || {
                player.seek_to(1.0);
                on_done();
            });
        }
        _ => {
            log::warn!("fame-engine: run_single_behavior called with unsupported behavior {behavior:?}");
            on_done();
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
