//! Simulation benchmarks for cs_core.
//!
//! Run with: `cargo bench -p cs_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cs_core::influence::InfluenceMaps;
use cs_core::message_sync::MessageSync;
use cs_core::options::Options;
use cs_core::rng::ChaChaSource;
use cs_test_utils::fixtures::ScenarioBuilder;

/// Rebuilding the influence maps for one side of a full front.
pub fn influence_benchmark(c: &mut Criterion) {
    let state = ScenarioBuilder::new()
        .front_units(48)
        .build()
        .new_game(
            0,
            Options::computer_vs_computer(),
            Box::new(ChaChaSource::new(1)),
            MessageSync::collecting(),
        )
        .expect("variant 0 exists");
    let mut maps = InfluenceMaps::default();
    c.bench_function("influence_rebuild", |b| {
        b.iter(|| {
            maps.rebuild(state.world(), black_box(0));
            black_box(&maps);
        });
    });
}

/// One simulated day: 24 ticks with every unit update, movement, combat and
/// the daily supply pass.
pub fn simulated_day_benchmark(c: &mut Criterion) {
    let bundle = ScenarioBuilder::new().front_units(48).length_in_days(30).build();
    c.bench_function("simulated_day", |b| {
        b.iter_batched(
            || {
                let mut state = bundle
                    .new_game(
                        0,
                        Options::computer_vs_computer(),
                        Box::new(ChaChaSource::new(7)),
                        MessageSync::collecting(),
                    )
                    .expect("variant 0 exists");
                state.init();
                state
            },
            |mut state| {
                for _ in 0..24 {
                    state.update();
                }
                black_box(state.world_mut().take_collected().len())
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, influence_benchmark, simulated_day_benchmark);
criterion_main!(benches);
