//! Integration tests for the nesting boundary pipeline.
//!
//! These tests verify:
//! - IDW missing-value and nearest hard-failure policies for the same gap
//! - Spacing policies against gridded and station sources
//! - Bit-identical results across repeated pipeline runs

use nest_rs::boundary::{
    BoundaryError, BoundaryResolver, BoundarySampler, NestingBoundary, SamplerConfig,
    SpacingPolicy,
};
use nest_rs::dataset::{GriddedDataset, SourceDataset, StationDataset};
use nest_rs::mesh::{GridGeometry, RegularGridSpec};
use nest_rs::types::Point2D;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness; `RUST_LOG=nest_rs=debug` shows them.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Sites (0,0), (10,10), (20,20).
fn diagonal_stations() -> StationDataset {
    StationDataset::new(
        "efth",
        vec![0.0, 10.0, 20.0],
        vec![0.0, 10.0, 20.0],
        3,
        vec![0.1, 0.2, 0.3, 1.1, 1.2, 1.3, 2.1, 2.2, 2.3],
    )
    .unwrap()
}

/// Gridded parent covering [-2, 6] x [-2, 5] at 0.5, value = x + 10 y.
fn parent_grid() -> GriddedDataset {
    let x: Vec<f64> = (0..17).map(|i| -2.0 + 0.5 * i as f64).collect();
    let y: Vec<f64> = (0..15).map(|j| -2.0 + 0.5 * j as f64).collect();
    let values = y
        .iter()
        .flat_map(|&yj| x.iter().map(move |&xi| xi + 10.0 * yj))
        .collect();
    GriddedDataset::new("hs", x, y, 1, values).unwrap()
}

/// 3 x 2 child grid at 0.25 spacing, origin (0.5, 0.25).
fn child_grid(rotation: f64) -> GridGeometry {
    let spec = RegularGridSpec::new(0.5, 0.25, rotation, 0.25, 0.25, 13, 9).unwrap();
    GridGeometry::from_regular(&spec)
}

#[test]
fn test_idw_gap_is_missing_value() {
    init_logging();
    let sampler = BoundarySampler::new(SamplerConfig::idw(Some(1.0))).unwrap();
    let out = sampler
        .sample(&[Point2D::new(5.0, 5.0)], &diagonal_stations())
        .unwrap();
    assert_eq!(out.n_sites(), 1);
    assert!(out.is_missing(0));
    assert!(out.record(0).iter().all(|v| v.is_nan()));
}

#[test]
fn test_nearest_gap_is_fatal() {
    let sampler = BoundarySampler::new(SamplerConfig::nearest(Some(1.0))).unwrap();
    let err = sampler
        .sample(&[Point2D::new(5.0, 5.0)], &diagonal_stations())
        .unwrap_err();
    assert!(matches!(
        err,
        BoundaryError::InsufficientNeighbors { site: 0, .. }
    ));
}

#[test]
fn test_inherit_spacing_from_gridded_parent() {
    let grid = child_grid(0.0);
    let samples = BoundaryResolver::new(SpacingPolicy::InheritFromSource)
        .resolve(&grid, &parent_grid())
        .unwrap();
    assert_eq!(samples.spacing, 0.5);
    // Perimeter 2 * (3 + 2) = 10
    assert_eq!(samples.len(), 20);
    assert!(samples.warning.is_none());
}

#[test]
fn test_aligned_spacing_divides_grid_sides() {
    let grid = child_grid(0.0);
    let samples = BoundaryResolver::new(SpacingPolicy::Aligned)
        .resolve(&grid, &parent_grid())
        .unwrap();
    // Sides 3 and 2 at native 0.5 -> 6 and 4 intervals of 0.5
    assert!((samples.spacing - 0.5).abs() < 1e-12);

    // Coarse parent: native 4.0 exceeds both sides -> 3 intervals per side
    let axis = vec![-4.0, 0.0, 4.0];
    let coarse = GriddedDataset::new("hs", axis.clone(), axis, 1, vec![0.0; 9]).unwrap();
    let spacing = BoundaryResolver::new(SpacingPolicy::Aligned)
        .resolve_spacing(&grid, &coarse)
        .unwrap();
    assert!((spacing - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_gridded_parent_sampled_with_idw() {
    let grid = child_grid(0.0);
    let nested = NestingBoundary::new("hs_bnd")
        .with_spacing(SpacingPolicy::Explicit(0.25))
        .with_sampler(SamplerConfig::idw(Some(0.75)))
        .build(&grid, &parent_grid())
        .unwrap();
    assert_eq!(nested.data.n_missing(), 0);
    // The parent field is linear and the weights sum to one
    for (i, p) in nested.samples.points.iter().enumerate() {
        let value = nested.data.record(i)[0];
        let lo = (p.x - 0.75) + 10.0 * (p.y - 0.75);
        let hi = (p.x + 0.75) + 10.0 * (p.y + 0.75);
        assert!(value >= lo && value <= hi, "site {i} at {p}: {value}");
    }
}

#[test]
fn test_station_parent_nearest() {
    let grid = child_grid(30.0);
    let parent = parent_grid().sites();
    let nested = NestingBoundary::new("stations")
        .with_sampler(SamplerConfig::nearest(Some(0.5)))
        .build(&grid, &parent)
        .unwrap();
    assert!((nested.samples.spacing - 0.5).abs() < 1e-12);
    for i in 0..nested.data.n_sites() {
        let selection = nested.data.selection(i);
        assert_eq!(selection.indices.len(), 1);
        assert_eq!(selection.weights, vec![1.0]);
    }
}

#[test]
fn test_empty_parent_after_crop() {
    let grid = child_grid(0.0);
    let far = StationDataset::new("efth", vec![500.0, 501.0], vec![500.0, 500.0], 1, vec![1.0, 2.0])
        .unwrap();
    let err = NestingBoundary::new("far")
        .with_spacing(SpacingPolicy::Explicit(0.5))
        .with_sampler(SamplerConfig::idw(Some(1.0)))
        .build(&grid, &far)
        .unwrap_err();
    assert!(matches!(err, BoundaryError::EmptyResampledDataset { .. }));
}

#[test]
fn test_pipeline_is_bit_identical() {
    init_logging();
    let run = || {
        let spec = RegularGridSpec::new(0.5, 0.25, 271.5, 0.25, 0.25, 13, 9).unwrap();
        let grid = GridGeometry::from_regular(&spec);
        NestingBoundary::new("repeat")
            .with_sampler(SamplerConfig::idw(Some(1.0)))
            .build(&grid, &parent_grid().sites())
            .unwrap()
    };
    let a = run();
    let b = run();
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    let coords = |p: &[Point2D]| {
        p.iter()
            .flat_map(|q| [q.x.to_bits(), q.y.to_bits()])
            .collect::<Vec<_>>()
    };
    assert_eq!(a.samples.spacing.to_bits(), b.samples.spacing.to_bits());
    assert_eq!(coords(&a.samples.points), coords(&b.samples.points));
    assert_eq!(bits(a.data.values()), bits(b.data.values()));
}

#[cfg(feature = "serde")]
#[test]
fn test_boundary_from_json() {
    let json = r#"{
        "id": "swan",
        "spacing": { "explicit": 0.5 },
        "sampler": { "method": "nearest", "tolerance": 2.0 },
        "crop_source": false
    }"#;
    let boundary: NestingBoundary = serde_json::from_str(json).unwrap();
    assert_eq!(boundary.spacing, SpacingPolicy::Explicit(0.5));
    assert_eq!(boundary.sampler, SamplerConfig::nearest(Some(2.0)));
    assert!(!boundary.crop_source);
}
