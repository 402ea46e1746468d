//! Benchmarks for the CPU simulation loop.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fx2d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// An emitter whose pool is already full, so every update recycles.
fn saturated(quantity: usize, particle: ParticleConfig) -> Emitter {
    let mut emitter = Emitter::builder()
        .with_quantity(quantity)
        .with_emission_rate(quantity as f32)
        .with_particle_config(particle.with_life_time(1.0).with_life_time_range(0.0..0.5))
        .with_seed(1)
        .build()
        .unwrap();
    for _ in 0..120 {
        emitter.update(1.0 / 60.0);
    }
    emitter
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_update");

    for quantity in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("gravity_only", quantity), &quantity, |b, &quantity| {
            let mut emitter = saturated(quantity, ParticleConfig::new().with_gravity(0.0, 20.0));
            b.iter(|| emitter.update(black_box(1.0 / 60.0)))
        });

        group.bench_with_input(BenchmarkId::new("swirl", quantity), &quantity, |b, &quantity| {
            let particle = ParticleConfig::new()
                .with_angle(0.0)
                .with_angle_range(0.0..360.0)
                .with_radial_acceleration(-3.0)
                .with_tangential_acceleration(6.0)
                .with_scale(0.5, 1.5);
            let mut emitter = saturated(quantity, particle);
            b.iter(|| emitter.update(black_box(1.0 / 60.0)))
        });

        group.bench_with_input(BenchmarkId::new("instance_batch", quantity), &quantity, |b, &quantity| {
            let batch = InstanceBatch::new();
            let mut emitter = Emitter::builder()
                .with_quantity(quantity)
                .with_emission_rate(quantity as f32)
                .with_particle_config(ParticleConfig::new().with_life_time(1.0))
                .with_renderer_factory(batch.clone())
                .build()
                .unwrap();
            b.iter(|| {
                emitter.update(black_box(1.0 / 60.0));
                black_box(batch.to_bytes().len())
            })
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_config");

    let config = presets::square_burst(Vec2::new(320.0, 320.0)).particle;
    let mut rng = StdRng::seed_from_u64(3);
    group.bench_function("resolve", |b| b.iter(|| black_box(config.resolve(&mut rng))));

    let mut particle = Particle::new();
    let init = config.resolve(&mut rng);
    group.bench_function("reset", |b| b.iter(|| particle.reset(black_box(&init))));

    group.finish();
}

criterion_group!(benches, bench_update, bench_resolve);
criterion_main!(benches);
