//! Registry hot path benchmarks.
//!
//! Run with: cargo bench -p edge-factors --bench registry_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edge_core::config::RegistryConfig;
use edge_core::types::{
    CoachingComparison, GameContext, GameRecord, TeamData, TeamStats,
};
use edge_factors::FactorRegistry;

fn schedule(games: u32) -> Vec<GameRecord> {
    (1..=games)
        .map(|week| GameRecord {
            week: Some(week),
            date: Some(format!("2024-{:02}-{:02}", 9 + week / 4, 1 + (week % 4) * 7)),
            completed: true,
            team_score: Some(20.0 + f64::from(week % 5) * 4.0),
            opponent_score: Some(17.0 + f64::from(week % 3) * 6.0),
            is_home_game: Some(week % 2 == 0),
            ..Default::default()
        })
        .collect()
}

fn context(games: u32) -> GameContext {
    let team = |stats: TeamStats| TeamData {
        stats: Some(stats),
        schedule: schedule(games),
        ..Default::default()
    };
    GameContext {
        home_team_data: Some(team(TeamStats {
            success_rate_off: Some(0.47),
            plays_per_game: Some(66.0),
            ..Default::default()
        })),
        away_team_data: Some(team(TeamStats {
            success_rate_def: Some(0.45),
            plays_per_game: Some(79.0),
            ..Default::default()
        })),
        coaching_comparison: Some(CoachingComparison::default()),
        vegas_spread: Some(-6.5),
        week: Some(games + 1),
        ..Default::default()
    }
}

fn registry_calculate_all(c: &mut Criterion) {
    let registry = FactorRegistry::new(&RegistryConfig::default()).unwrap();
    let mut group = c.benchmark_group("registry_calculate_all");

    for games in [4, 8, 12] {
        let ctx = context(games);
        group.bench_with_input(BenchmarkId::new("schedule_games", games), &ctx, |b, ctx| {
            b.iter(|| registry.calculate_all_factors(black_box("Georgia"), black_box("Auburn"), Some(ctx)));
        });
    }
    group.finish();
}

fn registry_build(c: &mut Criterion) {
    c.bench_function("registry_build", |b| {
        b.iter(|| FactorRegistry::new(black_box(&RegistryConfig::default())).unwrap());
    });
}

criterion_group!(benches, registry_calculate_all, registry_build);
criterion_main!(benches);
