//! Benchmarks for boundary derivation and resampling.
//!
//! Run with: `cargo bench --bench boundary_bench`
//!
//! Measures convex-hull boundary walking on rotated regular grids and
//! nearest / IDW sampling from scattered station sets.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nest_rs::boundary::{BoundarySampler, SamplerConfig};
use nest_rs::dataset::StationDataset;
use nest_rs::mesh::{GridGeometry, RegularGridSpec};

/// Generate a random vector (deterministic LCG for reproducibility).
fn random_vec(n: usize, seed: u64) -> Vec<f64> {
    let mut v = Vec::with_capacity(n);
    let mut x = seed;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        let val = (x as f64) / (u64::MAX as f64) * 2.0 - 1.0;
        v.push(val);
    }
    v
}

/// Square grid of `n x n` nodes covering [0, 10]^2 before rotation.
fn grid(n: usize) -> GridGeometry {
    let d = 10.0 / (n - 1) as f64;
    GridGeometry::from_regular(&RegularGridSpec::new(0.0, 0.0, 30.0, d, d, n, n).unwrap())
}

/// Stations scattered over [-15, 15]^2 with a 32-value record each.
fn stations(n: usize) -> StationDataset {
    let x: Vec<f64> = random_vec(n, 7).into_iter().map(|v| v * 15.0).collect();
    let y: Vec<f64> = random_vec(n, 8).into_iter().map(|v| v * 15.0).collect();
    let values = random_vec(n * 32, 9);
    StationDataset::new("efth", x, y, 32, values).unwrap()
}

fn bench_boundary_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("points_along_boundary");

    for n in [50, 200, 500] {
        let geom = grid(n);
        group.bench_with_input(BenchmarkId::new("rotated_grid", n * n), &geom, |b, g| {
            b.iter(|| g.points_along_boundary(black_box(0.1)).unwrap())
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_sampling");

    let sites = grid(50).points_along_boundary(0.05).unwrap();
    for n in [1_000, 10_000] {
        let source = stations(n);
        for (name, config) in [
            ("nearest", SamplerConfig::nearest(None)),
            ("idw", SamplerConfig::idw(Some(2.0))),
        ] {
            let sampler = BoundarySampler::new(config).unwrap();
            group.bench_with_input(BenchmarkId::new(name, n), &source, |b, s| {
                b.iter(|| sampler.sample(black_box(&sites), s).unwrap())
            });

            #[cfg(feature = "parallel")]
            group.bench_with_input(
                BenchmarkId::new(format!("{name}_parallel"), n),
                &source,
                |b, s| b.iter(|| sampler.sample_parallel(black_box(&sites), s).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_boundary_points, bench_sampling);
criterion_main!(benches);
