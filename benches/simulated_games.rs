use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use simon_says::io::{NullSink, RecordingClock, SimulatedPlayer};
use simon_says::{GameConfig, GameRunner, SymbolRng};

fn full_games(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulated_game");

    for rounds in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(rounds), &rounds, |b, &rounds| {
            let mut seeds = SymbolRng::new(7);
            b.iter(|| {
                let player = SimulatedPlayer::new(4, rounds);
                let seed = seeds.fork().seed();
                let mut runner = GameRunner::builder(GameConfig::default().with_seed(seed), player.hands())
                    .sink((player.eyes(), NullSink))
                    .reporter(|_score: u32| {})
                    .clock(RecordingClock::new())
                    .build()
                    .unwrap();
                black_box(runner.run().unwrap().score)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, full_games);
criterion_main!(benches);
