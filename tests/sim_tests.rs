use std::time::Duration;

use gridlife::config::CanvasConfig;
use gridlife::grid::SEED_OFFSETS;
use gridlife::rule_set::B3S23;
use gridlife::sim::Simulation;

fn sim_with_interval(interval: Duration) -> Simulation {
    let config = CanvasConfig::new(100, 100, 10, interval).unwrap();
    Simulation::new(config, B3S23).unwrap()
}

#[test]
fn fresh_simulation_is_stopped_and_seeded() {
    let sim = sim_with_interval(Duration::from_millis(100));

    assert!(!sim.running());
    assert_eq!(sim.generation(), 0);

    let live: Vec<_> = sim.snapshot().live_cells().collect();
    assert_eq!(live, SEED_OFFSETS);
}

#[test]
fn start_advances_one_generation_per_interval() {
    let mut sim = sim_with_interval(Duration::from_millis(25));

    assert!(sim.start());
    std::thread::sleep(Duration::from_millis(120));
    sim.stop();

    // ~4 ticks in 120ms at a 25ms fixed delay; wide margins for scheduling
    let ticks = sim.generation();
    assert!(ticks >= 1, "no tick fired");
    assert!(ticks <= 6, "too many ticks fired: {ticks}");
}

#[test]
fn second_start_does_not_spawn_a_second_tick_chain() {
    let mut sim = sim_with_interval(Duration::from_millis(25));

    assert!(sim.start());
    assert!(!sim.start());
    assert!(!sim.start());

    std::thread::sleep(Duration::from_millis(120));
    sim.stop();

    // a duplicate chain would roughly double the tick count
    let ticks = sim.generation();
    assert!(ticks <= 6, "more than one tick chain ran: {ticks}");
}

#[test]
fn stop_during_the_wait_prevents_the_pending_tick() {
    let mut sim = sim_with_interval(Duration::from_secs(3600));

    sim.start();
    std::thread::sleep(Duration::from_millis(50));
    sim.stop();

    assert_eq!(sim.generation(), 0);
    let live: Vec<_> = sim.snapshot().live_cells().collect();
    assert_eq!(live, SEED_OFFSETS);
}

#[test]
fn stop_is_idempotent() {
    let mut sim = sim_with_interval(Duration::from_millis(25));

    sim.start();
    sim.stop();
    sim.stop();

    assert!(!sim.running());
}

#[test]
fn ticks_match_the_pure_rule_engine() {
    let mut sim = sim_with_interval(Duration::from_millis(10));

    let expected = B3S23.step(&sim.snapshot());

    sim.start();
    while sim.generation() < 1 {
        std::thread::sleep(Duration::from_millis(1));
    }
    sim.stop();

    let ticks = sim.generation();
    let mut oracle = expected;
    for _ in 1..ticks {
        oracle = B3S23.step(&oracle);
    }

    assert_eq!(sim.snapshot(), oracle);
}

#[test]
fn reset_while_running_stops_and_restores_the_seed() {
    let mut sim = sim_with_interval(Duration::from_millis(10));

    // a manual edit on top of the seed
    sim.edit_cell(7, 7, true).unwrap();

    sim.start();
    while sim.generation() < 2 {
        std::thread::sleep(Duration::from_millis(1));
    }

    sim.reset().unwrap();

    assert!(!sim.running());
    assert_eq!(sim.generation(), 0);

    let live: Vec<_> = sim.snapshot().live_cells().collect();
    assert_eq!(live, SEED_OFFSETS);
}

#[test]
fn set_cell_size_rederives_dimensions_and_reseeds() {
    let mut sim = sim_with_interval(Duration::from_millis(100));

    sim.edit_cell(7, 7, true).unwrap();
    sim.set_cell_size(20).unwrap();

    let grid = sim.snapshot();
    assert_eq!(grid.height(), 5);
    assert_eq!(grid.width(), 5);

    // prior edits are gone, only the seed remains
    let live: Vec<_> = grid.live_cells().collect();
    assert_eq!(live, SEED_OFFSETS);
}

#[test]
fn invalid_configuration_is_rejected_and_prior_config_kept() {
    let mut sim = sim_with_interval(Duration::from_millis(100));

    assert!(sim.set_cell_size(0).is_err());
    assert!(sim.set_cell_size(50).is_err()); // 100 / 50 = 2 cells a side
    assert!(sim.set_tick_interval(Duration::ZERO).is_err());

    let config = sim.config();
    assert_eq!(config.cell_size_px(), 10);
    assert_eq!(config.tick_interval(), Duration::from_millis(100));
    assert_eq!(sim.snapshot().height(), 10);
}

#[test]
fn submillisecond_interval_still_waits_between_ticks() {
    let mut sim = sim_with_interval(Duration::from_millis(100));

    // valid, just finer than a millisecond; must not degrade to a zero wait
    sim.set_tick_interval(Duration::from_micros(500)).unwrap();

    sim.start();
    std::thread::sleep(Duration::from_millis(50));
    sim.stop();

    // ~100 ticks fit in 50ms at a 500us fixed delay; a truncated interval
    // spins orders of magnitude past that
    let ticks = sim.generation();
    assert!(ticks >= 1, "no tick fired");
    assert!(ticks <= 400, "ticker did not wait between ticks: {ticks}");
}

#[test]
fn edits_apply_while_running() {
    let mut sim = sim_with_interval(Duration::from_secs(3600));

    sim.start();
    sim.edit_cell(8, 8, true).unwrap();
    sim.stop();

    assert_eq!(sim.snapshot().get(8, 8), Some(true));
}

#[test]
fn simulations_are_independent_instances() {
    let mut a = sim_with_interval(Duration::from_millis(10));
    let b = sim_with_interval(Duration::from_millis(10));

    a.start();
    while a.generation() < 1 {
        std::thread::sleep(Duration::from_millis(1));
    }
    a.stop();

    assert_eq!(b.generation(), 0);
    let live: Vec<_> = b.snapshot().live_cells().collect();
    assert_eq!(live, SEED_OFFSETS);
}
