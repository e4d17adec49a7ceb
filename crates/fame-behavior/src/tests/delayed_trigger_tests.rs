use super::*;

#[test]
fn simple_mode_fires_on_the_skip_count_plus_one_trigger() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Simple { skip_count: 2 };

    assert!(!manager.should_execute("slot", &mode));
    assert!(!manager.should_execute("slot", &mode));
    assert!(manager.should_execute("slot", &mode));

    // counter reset; next cycle takes three triggers again.
    assert!(!manager.should_execute("slot", &mode));
    assert!(!manager.should_execute("slot", &mode));
    assert!(manager.should_execute("slot", &mode));
}

#[test]
fn simple_mode_with_zero_skip_count_fires_every_time() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Simple { skip_count: 0 };
    for _ in 0..5 {
        assert!(manager.should_execute("slot", &mode));
    }
}

#[test]
fn pattern_mode_cycles_through_parsed_values() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Pattern { pattern: "0,0,1,0,1".to_string() };

    let fired: Vec<bool> = (0..10).map(|_| manager.should_execute("slot", &mode)).collect();
    assert_eq!(fired, vec![false, false, true, false, true, false, false, true, false, true]);
}

#[test]
fn pattern_mode_accepts_whitespace_separators() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Pattern { pattern: "1 0  1".to_string() };
    let fired: Vec<bool> = (0..3).map(|_| manager.should_execute("slot", &mode)).collect();
    assert_eq!(fired, vec![true, false, true]);
}

#[test]
fn pattern_mode_treats_invalid_tokens_as_zero() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Pattern { pattern: "1,x,yes,1".to_string() };
    let fired: Vec<bool> = (0..4).map(|_| manager.should_execute("slot", &mode)).collect();
    assert_eq!(fired, vec![true, false, false, true]);
}

#[test]
fn pattern_mode_falls_back_to_default_on_empty_pattern() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Pattern { pattern: "   ".to_string() };
    let fired: Vec<bool> = (0..3).map(|_| manager.should_execute("slot", &mode)).collect();
    assert_eq!(fired, vec![false, false, true]);
}

#[test]
fn slots_are_independent() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Simple { skip_count: 1 };
    assert!(!manager.should_execute("a", &mode));
    assert!(!manager.should_execute("b", &mode));
    assert!(manager.should_execute("a", &mode));
    assert!(!manager.should_execute("b", &mode));
    assert!(manager.should_execute("b", &mode));
}

#[test]
fn teardown_resets_a_slots_gating_state() {
    let manager = DelayedTriggerManager::new();
    let mode = DelayedTriggerMode::Simple { skip_count: 1 };
    assert!(!manager.should_execute("slot", &mode));
    manager.teardown("slot");
    // a fresh entry starts the count back over.
    assert!(!manager.should_execute("slot", &mode));
    assert!(manager.should_execute("slot", &mode));
}
