use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sushi_bot::{Agent, Strategy, simulate_game_with_seed};

fn full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");
    for name in ["first", "maki,nigiri", "smart", "smarter"] {
        let strategy: Strategy = name.parse().expect("strategy parses");
        group.bench_with_input(BenchmarkId::from_parameter(name), &strategy, |b, strategy| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let mut agents: Vec<Agent> = (0..4).map(|_| Agent::from_strategy(strategy)).collect();
                black_box(simulate_game_with_seed(&mut agents, seed).expect("game completes"))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, full_game);
criterion_main!(benches);
