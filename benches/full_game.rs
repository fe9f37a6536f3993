use ashtachamma::core::{GameConfig, GameRng, PlayerId};
use ashtachamma::env::{EnvConfig, Environment};
use ashtachamma::rules::{Ashtachamma, RulesEngine, TurnController, TurnStart};
use ashtachamma::strategy::Strategy;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

/// Mid-game positions reached by random play from a fixed seed.
fn corpus(rules: &Ashtachamma) -> Vec<ashtachamma::core::GameState> {
    let mut game = TurnController::new(rules.clone(), 7777);
    let mut rng = GameRng::new(7777);
    let mut states = vec![game.state().clone()];
    while states.len() < 64 && !game.is_terminal() {
        if let TurnStart::Choose { player, moves, .. } = game.roll().unwrap() {
            let mv = Strategy::Random.select(player, &moves, None, &mut rng).unwrap().unwrap();
            game.play(&mv).unwrap();
        }
        states.push(game.state().clone());
    }
    states
}

fn bench_rules(c: &mut Criterion) {
    let rules = Ashtachamma::new(GameConfig::default()).unwrap();
    let states = corpus(&rules);

    c.bench_function("rules.legal_moves", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for state in &states {
                for player in PlayerId::all() {
                    for roll in [1u8, 2, 3, 4, 8] {
                        acc += rules.legal_moves(state, player, roll).len();
                    }
                }
            }
            black_box(acc)
        })
    });

    c.bench_function("rules.roll_dice", |b| {
        b.iter_batched(
            || states[0].clone(),
            |mut state| {
                let mut acc = 0u32;
                for _ in 0..256 {
                    acc += u32::from(rules.roll_dice(&mut state));
                }
                black_box(acc)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_games(c: &mut Criterion) {
    let mut seed = 0u64;
    c.bench_function("game.play_out.default", |b| {
        b.iter_batched(
            || {
                seed += 1;
                let config = EnvConfig::default().with_seats([Strategy::Random; 4]);
                Environment::new(config, seed).unwrap()
            },
            |mut env| black_box(env.play_out().unwrap()),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("env.step_until_external", |b| {
        b.iter_batched(
            || Environment::new(EnvConfig::default(), 42).unwrap(),
            |mut env| {
                for _ in 0..32 {
                    if env.is_done() {
                        break;
                    }
                    env.step(Some(0)).unwrap();
                    black_box(env.step_until_external().unwrap());
                }
                black_box(env.observe())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_rules, bench_games);
criterion_main!(benches);
