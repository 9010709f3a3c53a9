//! Self-play benchmarks.
//!
//! Full games between computer seats, from deal to win:
//!
//! 1. **Priority** - every seat uses the default priority strategy
//! 2. **Random** - every seat plays a random legal card
//! 3. **Checkpoint** - encode and restore a mid-game table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uno_engine::{Engine, RuleConfig};

fn play_out(players: usize, seed: u64, random: bool) -> u32 {
    let mut engine = Engine::new(RuleConfig::all_computer(players).with_seed(seed))
        .expect("valid config");
    if random {
        engine = engine.with_random_opponent();
    }
    engine.run_computer_turns();
    engine.state().turn_number()
}

fn bench_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play_priority");
    for players in 2..=4 {
        group.bench_with_input(BenchmarkId::from_parameter(players), &players, |b, &players| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(play_out(players, seed, false))
            });
        });
    }
    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play_random");
    for players in 2..=4 {
        group.bench_with_input(BenchmarkId::from_parameter(players), &players, |b, &players| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(play_out(players, seed, true))
            });
        });
    }
    group.finish();
}

fn bench_checkpoint(c: &mut Criterion) {
    let mut engine = Engine::new(RuleConfig::all_computer(4).with_seed(7)).expect("valid config");
    for _ in 0..20 {
        if engine.play_computer_turn().is_err() {
            break;
        }
    }

    c.bench_function("checkpoint_restore", |b| {
        b.iter(|| {
            let bytes = engine.checkpoint().expect("encodes");
            black_box(Engine::restore(&bytes).expect("decodes"))
        });
    });
}

criterion_group!(benches, bench_priority, bench_random, bench_checkpoint);
criterion_main!(benches);
