//! Benchmarks for grid generation followed by surface aggregation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use solvency_core::{Position, ProtocolRule};
use solvency_risk::{aggregate, governance_stress, GovernanceShock};
use solvency_stress::{generate_grid, ExecutionConfig, ScenarioAxes};

fn bench_reference_surface(c: &mut Criterion) {
    let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
    let rule = ProtocolRule::new(0.80).unwrap();
    let axes = ScenarioAxes::reference();
    let exec = ExecutionConfig::sequential();

    c.bench_function("grid_and_aggregate_60", |b| {
        b.iter(|| {
            let grid = generate_grid(black_box(&position), &rule, &axes, &exec).unwrap();
            aggregate(grid, rule.liquidation_threshold())
        })
    });
}

fn bench_governance(c: &mut Criterion) {
    let position = Position::new(1.0, 30_000.0, 21_000.0).unwrap();
    let axes = ScenarioAxes::reference();
    let exec = ExecutionConfig::default();
    let shocks = GovernanceShock::presets();

    c.bench_function("governance_presets", |b| {
        b.iter(|| governance_stress(black_box(&position), &shocks, &axes, &exec))
    });
}

criterion_group!(benches, bench_reference_surface, bench_governance);
criterion_main!(benches);
