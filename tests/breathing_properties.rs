use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use breathwell_lib::{
    breathing::{advance, REST_SCALE},
    BreathingPhase, PhaseDurations, SessionController, SessionStatus,
};

fn run_ms(controller: &mut SessionController, total_ms: u64, step_ms: u64) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        controller.tick(step_ms);
        elapsed += step_ms;
    }
}

#[test]
fn advance_repeats_inhale_hold_exhale() {
    let mut phase = BreathingPhase::Inhale;
    for i in 0..30 {
        assert_eq!(phase, BreathingPhase::ALL[i % 3]);
        phase = advance(phase);
    }
}

#[test]
fn cycles_counted_once_per_traversal() {
    let mut controller = SessionController::default();
    controller.start();
    run_ms(&mut controller, 5 * 12_000, 250);
    assert_eq!(controller.state().completed_cycles, 5);
}

#[test]
fn interrupted_exhale_does_not_count() {
    let mut controller = SessionController::default();
    controller.start();

    // Two seconds short of finishing the first exhale.
    run_ms(&mut controller, 10_000, 1_000);
    assert_eq!(controller.state().current_phase, BreathingPhase::Exhale);
    controller.pause();
    run_ms(&mut controller, 10_000, 1_000);
    assert_eq!(controller.state().completed_cycles, 0);

    controller.start();
    run_ms(&mut controller, 1_000, 1_000);
    controller.reset();
    assert_eq!(controller.state().completed_cycles, 0);
}

#[test]
fn coarse_ticks_do_not_drop_phases() {
    let phases = Arc::new(Mutex::new(Vec::new()));
    let mut controller = SessionController::new(PhaseDurations::default());
    let sink = phases.clone();
    controller.on_phase_change(move |change| sink.lock().unwrap().push(change.to));

    controller.start();
    for _ in 0..12 {
        controller.tick(1_000);
    }

    let state = controller.state();
    assert_eq!(state.completed_cycles, 1);
    assert_eq!(state.current_phase, BreathingPhase::Inhale);
    assert_eq!(state.elapsed_in_phase_ms, 0);
    assert_eq!(
        *phases.lock().unwrap(),
        vec![
            BreathingPhase::Hold,
            BreathingPhase::Exhale,
            BreathingPhase::Inhale
        ]
    );
}

#[test]
fn pause_and_resume_keep_position() {
    let mut controller = SessionController::default();
    controller.start();
    run_ms(&mut controller, 2_500, 500);
    let target = controller.state().animation_target;

    controller.pause();
    let paused = controller.state();
    assert_eq!(paused.status, SessionStatus::Paused);
    assert_eq!(paused.elapsed_in_phase_ms, 2_500);

    controller.start();
    let resumed = controller.state();
    assert_eq!(resumed.status, SessionStatus::Running);
    assert_eq!(resumed.current_phase, BreathingPhase::Inhale);
    assert_eq!(resumed.elapsed_in_phase_ms, 2_500);
    assert_eq!(resumed.animation_target, target);
    assert_eq!(resumed.session_id, paused.session_id);

    controller.tick(1_500);
    assert_eq!(controller.state().current_phase, BreathingPhase::Hold);
}

#[test]
fn reset_returns_to_idle_from_every_status() {
    for pause_first in [false, true] {
        let mut controller = SessionController::default();
        controller.start();
        run_ms(&mut controller, 30_500, 500);
        if pause_first {
            controller.pause();
        }
        controller.reset();

        let state = controller.state();
        assert_eq!(state.status, SessionStatus::Idle);
        assert!(!state.is_active);
        assert_eq!(state.current_phase, BreathingPhase::Inhale);
        assert_eq!(state.elapsed_in_phase_ms, 0);
        assert_eq!(state.completed_cycles, 0);
        assert_eq!(state.animation_target, REST_SCALE);
    }

    let mut idle = SessionController::default();
    idle.reset();
    assert_eq!(idle.state().status, SessionStatus::Idle);
}

#[test]
fn repeated_commands_are_no_ops() {
    let mut controller = SessionController::default();
    assert!(controller.start());
    controller.tick(1_000);
    let once = controller.state();
    assert!(!controller.start());
    assert_eq!(controller.state(), once);

    assert!(controller.pause());
    let paused = controller.state();
    assert!(!controller.pause());
    assert_eq!(controller.state(), paused);

    let mut idle = SessionController::default();
    assert!(!idle.pause());
    assert_eq!(idle.state().status, SessionStatus::Idle);
}

#[test]
fn teardown_stops_phase_signals() {
    let signals = Arc::new(AtomicUsize::new(0));
    let mut controller = SessionController::default();
    let sink = signals.clone();
    controller.on_phase_change(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    controller.start();
    run_ms(&mut controller, 6_000, 1_000);
    assert_eq!(signals.load(Ordering::SeqCst), 2);

    controller.teardown();
    run_ms(&mut controller, 60_000, 1_000);
    assert_eq!(signals.load(Ordering::SeqCst), 2);
    assert!(controller.tick(60_000).is_empty());
}

#[test]
fn non_positive_durations_rejected_up_front() {
    assert!(PhaseDurations::new(0, 2_000, 6_000).is_err());
    assert!(PhaseDurations::new(4_000, 2_000, 0).is_err());
    assert!(SessionController::from_millis(4_000, 0, 6_000).is_err());
}
