use criterion::{criterion_group, criterion_main, Criterion};
use sim_core::TournamentConfig;
use sim_runtime::Tournament;

fn bench_tournament(c: &mut Criterion) {
    let config = TournamentConfig {
        games: 50,
        ..Default::default()
    };
    c.bench_function("tournament_50_games", |b| {
        b.iter(|| {
            let mut tournament = Tournament::seeded(config.clone()).unwrap();
            let _ = tournament.run();
        })
    });
    c.bench_function("pool_generation", |b| {
        b.iter(|| sim_random::PooledSource::from_config(&config).unwrap())
    });
}

criterion_group!(benches, bench_tournament);
criterion_main!(benches);
