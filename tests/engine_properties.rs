use interval_timer::{
    engine::{CueKind, CueSink, TimerEngine, GRACE_DELAY_MS},
    state::seconds_remaining,
    IntervalConfig, Phase,
};
use proptest::prelude::*;

/// Records every cue together with the seconds shown when it fired
#[derive(Debug, Default)]
struct CueLog {
    cues: Vec<CueKind>,
}

impl CueSink for CueLog {
    fn emit(&mut self, kind: CueKind, _frequency_hz: f32) {
        self.cues.push(kind);
    }
}

fn engine() -> TimerEngine<CueLog> {
    TimerEngine::new(CueLog::default())
}

fn run_for(engine: &mut TimerEngine<CueLog>, total_ms: u64, step_ms: u64) {
    let mut left = total_ms;
    while left > 0 {
        let step = step_ms.min(left);
        engine.tick(step as f64);
        left -= step;
    }
}

/// Run a whole phase and its grace delay
fn finish_phase(engine: &mut TimerEngine<CueLog>, step_ms: u64) {
    let remaining = engine.state().remaining_ms as u64;
    run_for(engine, remaining, step_ms);
    engine.tick(GRACE_DELAY_MS);
}

#[test]
fn full_run_with_rest_reaches_idle() {
    let mut engine = engine();
    engine.start(IntervalConfig::new(20, 40, 5));
    assert_eq!(engine.state().phase, Phase::Work);
    assert_eq!(engine.state().remaining_ms, 20_000.0);
    assert_eq!(engine.state().current_round, 1);

    finish_phase(&mut engine, 200);
    assert_eq!(engine.state().phase, Phase::Rest);
    assert_eq!(engine.state().remaining_ms, 40_000.0);
    assert_eq!(engine.state().current_round, 1);

    finish_phase(&mut engine, 200);
    assert_eq!(engine.state().phase, Phase::Work);
    assert_eq!(engine.state().current_round, 2);

    for _ in 0..7 {
        finish_phase(&mut engine, 200);
    }
    assert_eq!(engine.state().phase, Phase::Rest);
    assert_eq!(engine.state().current_round, 5);

    finish_phase(&mut engine, 200);
    let state = engine.state();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.current_round, 0);
    assert!(!state.running);
    assert_eq!(state.remaining_ms, 0.0);
}

#[test]
fn zero_rest_skips_rest_phase() {
    let mut engine = engine();
    engine.start(IntervalConfig::new(10, 0, 3));

    for round in 1..=3 {
        assert_eq!(engine.state().phase, Phase::Work);
        assert_eq!(engine.state().current_round, round);
        finish_phase(&mut engine, 200);
        assert_ne!(engine.state().phase, Phase::Rest);
    }

    assert_eq!(engine.state().phase, Phase::Idle);
    assert!(!engine.is_running());
}

#[test]
fn reset_during_grace_forces_idle() {
    let mut engine = engine();
    engine.start(IntervalConfig::new(3, 3, 2));
    run_for(&mut engine, 3_000, 50);
    engine.tick(GRACE_DELAY_MS / 2.0);
    assert!(engine.transition_pending());

    engine.reset();
    engine.tick(GRACE_DELAY_MS);
    assert_eq!(engine.state().phase, Phase::Idle);
    assert_eq!(engine.state().current_round, 0);
    assert!(!engine.transition_pending());
}

#[test]
fn cue_memory_resets_for_each_phase() {
    let mut engine = engine();
    engine.start(IntervalConfig::new(4, 4, 1));
    finish_phase(&mut engine, 200);
    finish_phase(&mut engine, 200);

    let expected = [CueKind::Short, CueKind::Short, CueKind::Short, CueKind::Long];
    let cues = &engine.cue_sink().cues;
    assert_eq!(cues.len(), 8);
    assert_eq!(&cues[..4], &expected);
    assert_eq!(&cues[4..], &expected);
}

#[test]
fn cues_fire_once_per_second_for_common_tick_sizes() {
    for step in [50, 200, 999] {
        let mut engine = engine();
        engine.start(IntervalConfig::new(10, 0, 1));

        let mut fired_at = Vec::new();
        let mut left = 10_000u64;
        while left > 0 {
            let before = engine.cue_sink().cues.len();
            let tick = step.min(left);
            engine.tick(tick as f64);
            left -= tick;
            if engine.cue_sink().cues.len() > before {
                fired_at.push(seconds_remaining(engine.state().remaining_ms));
            }
        }

        assert_eq!(fired_at, vec![3, 2, 1, 0], "tick size {step}");
        assert_eq!(
            engine.cue_sink().cues,
            vec![CueKind::Short, CueKind::Short, CueKind::Short, CueKind::Long],
            "tick size {step}"
        );
    }
}

#[test]
fn paused_ticks_do_not_advance() {
    let mut engine = engine();
    engine.start(IntervalConfig::new(30, 10, 1));
    engine.tick(2_500.0);
    engine.pause();
    for _ in 0..100 {
        engine.tick(1_000.0);
    }
    engine.resume();
    assert_eq!(engine.state().remaining_ms, 27_500.0);
    assert!(engine.cue_sink().cues.is_empty());
}

/// Split `total` into consecutive steps taken from `sizes`, cycling
fn splits(total: u64, sizes: &[u64]) -> Vec<u64> {
    let mut out = Vec::new();
    let mut left = total;
    for size in sizes.iter().cycle() {
        if left == 0 {
            break;
        }
        let step = (*size).min(left);
        out.push(step);
        left -= step;
    }
    out
}

proptest! {
    #[test]
    fn work_phase_ends_once_for_any_split(
        work in 1u32..30,
        rest in 0u32..10,
        rounds in 1u32..5,
        sizes in prop::collection::vec(1u64..1000, 1..8),
    ) {
        let mut engine = engine();
        engine.start(IntervalConfig::new(work, rest, rounds));

        for step in splits(u64::from(work) * 1000, &sizes) {
            engine.tick(step as f64);
        }
        prop_assert_eq!(engine.state().remaining_ms, 0.0);
        engine.tick(GRACE_DELAY_MS);

        let state = engine.state();
        if rest > 0 {
            prop_assert_eq!(state.phase, Phase::Rest);
            prop_assert_eq!(state.current_round, 1);
            prop_assert_eq!(state.remaining_ms, f64::from(rest) * 1000.0);
        } else if rounds > 1 {
            prop_assert_eq!(state.phase, Phase::Work);
            prop_assert_eq!(state.current_round, 2);
        } else {
            prop_assert_eq!(state.phase, Phase::Idle);
        }
    }

    #[test]
    fn run_completes_after_all_rounds(
        work in 1u32..8,
        rest in 0u32..5,
        rounds in 1u32..6,
        step in 1u64..1000,
    ) {
        let mut engine = engine();
        engine.start(IntervalConfig::new(work, rest, rounds));
        let phases_per_round = if rest > 0 { 2 } else { 1 };

        for _ in 0..(rounds * phases_per_round - 1) {
            finish_phase(&mut engine, step);
            prop_assert!(engine.is_running());
        }
        finish_phase(&mut engine, step);

        let state = engine.state();
        prop_assert_eq!(state.phase, Phase::Idle);
        prop_assert_eq!(state.current_round, 0);
        prop_assert!(!state.running);
    }

    #[test]
    fn short_and_long_cues_fire_exactly_once(
        work in 4u32..20,
        step in 1u64..1000,
    ) {
        let mut engine = engine();
        engine.start(IntervalConfig::new(work, 0, 1));
        run_for(&mut engine, u64::from(work) * 1000, step);

        prop_assert_eq!(
            &engine.cue_sink().cues,
            &vec![CueKind::Short, CueKind::Short, CueKind::Short, CueKind::Long]
        );
    }
}
