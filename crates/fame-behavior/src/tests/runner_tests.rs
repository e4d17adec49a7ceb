use std::cell::RefCell;
use std::rc::Rc;

use fame_testing::ManualRuntime;

use super::*;

/// A play action that finishes synchronously (calls its completion callback
/// immediately), counting how many times it ran.
fn counting_play(count: Rc<RefCell<u32>>) -> impl Fn(Box<dyn FnOnce()>) {
    move |on_complete| {
        *count.borrow_mut() += 1;
        on_complete();
    }
}

#[test]
fn loop_runner_runs_the_requested_iteration_count() {
    let runtime = ManualRuntime::new();
    let count = Rc::new(RefCell::new(0));
    let runner = LoopRunner::new(runtime.handle(), 3, 10, counting_play(count.clone()));
    runner.start();

    // the first iteration runs synchronously inside start(); each
    // subsequent one waits behind a 10ms timer.
    assert_eq!(*count.borrow(), 1);
    runtime.advance_millis(10.0);
    assert_eq!(*count.borrow(), 2);
    runtime.advance_millis(10.0);
    assert_eq!(*count.borrow(), 3);

    // no fourth iteration.
    runtime.advance_millis(100.0);
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn loop_runner_caps_iterations_at_one_thousand_when_requesting_infinite() {
    let runtime = ManualRuntime::new();
    let count = Rc::new(RefCell::new(0));
    let runner = LoopRunner::new(runtime.handle(), 999, 0, counting_play(count.clone()));
    runner.start();
    for _ in 0..1100 {
        runtime.advance_millis(0.0);
    }
    assert_eq!(*count.borrow(), 1000);
}

#[test]
fn loop_runner_stop_prevents_further_iterations() {
    let runtime = ManualRuntime::new();
    let count = Rc::new(RefCell::new(0));
    let runner = LoopRunner::new(runtime.handle(), 5, 10, counting_play(count.clone()));
    runner.start();
    assert_eq!(*count.borrow(), 1);

    runner.stop();
    runtime.advance_millis(100.0);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn loop_runner_dropping_the_handle_halts_the_chain() {
    let runtime = ManualRuntime::new();
    let count = Rc::new(RefCell::new(0));
    {
        let runner = LoopRunner::new(runtime.handle(), 5, 10, counting_play(count.clone()));
        runner.start();
        assert_eq!(*count.borrow(), 1);
    }
    // the runner handle is gone; the weak ref inside the scheduled timer
    // callback can no longer upgrade.
    runtime.advance_millis(100.0);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn ping_pong_runner_alternates_forward_and_backward_per_cycle() {
    let runtime = ManualRuntime::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let forward_log = log.clone();
    let play_forward = move |on_complete: Box<dyn FnOnce()>| {
        forward_log.borrow_mut().push("forward");
        on_complete();
    };
    let backward_log = log.clone();
    let play_backward = move |on_complete: Box<dyn FnOnce()>| {
        backward_log.borrow_mut().push("backward");
        on_complete();
    };

    let runner = PingPongRunner::new(runtime.handle(), 2, 5, play_forward, play_backward);
    runner.start();
    assert_eq!(*log.borrow(), vec!["forward"]);

    runtime.advance_millis(5.0);
    assert_eq!(*log.borrow(), vec!["forward", "backward"]);

    runtime.advance_millis(5.0);
    assert_eq!(*log.borrow(), vec!["forward", "backward", "forward"]);

    runtime.advance_millis(5.0);
    assert_eq!(*log.borrow(), vec!["forward", "backward", "forward", "backward"]);

    // two cycles requested; no third forward phase.
    runtime.advance_millis(50.0);
    assert_eq!(log.borrow().len(), 4);
}
