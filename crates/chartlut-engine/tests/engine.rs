//! End-to-end engine tests: the full analyze -> map -> build -> write
//! pipeline across strategies.

use approx::assert_abs_diff_eq;
use chartlut_engine::{
    builder, cube, range, EngineConfig, EngineError, PatchSet, RangeMappingMode, Strategy,
};
use chartlut_math::Vec3;

/// A plausible 24-patch chart: grays plus primaries/secondaries at two
/// exposure levels.
fn chart_patches() -> Vec<Vec3> {
    let mut colors = Vec::new();
    for i in 0..6 {
        colors.push(Vec3::splat(i as f32 / 5.0));
    }
    let hues = [
        Vec3::new(0.8, 0.1, 0.1),
        Vec3::new(0.1, 0.8, 0.1),
        Vec3::new(0.1, 0.1, 0.8),
        Vec3::new(0.8, 0.8, 0.1),
        Vec3::new(0.8, 0.1, 0.8),
        Vec3::new(0.1, 0.8, 0.8),
        Vec3::new(0.6, 0.3, 0.1),
        Vec3::new(0.3, 0.5, 0.7),
        Vec3::new(0.5, 0.2, 0.4),
    ];
    for &h in &hues {
        colors.push(h);
        colors.push(h * 0.5);
    }
    colors
}

/// A camera rendition: darkened and slightly desaturated reference.
fn camera_render(reference: &[Vec3]) -> Vec<Vec3> {
    reference
        .iter()
        .map(|&c| {
            let gray = Vec3::splat(chartlut_color::luminance(c));
            (c * 0.8 + gray * 0.1).clamp01()
        })
        .collect()
}

fn range_mapping(
    reference: &PatchSet,
    camera: &PatchSet,
    config: &EngineConfig,
) -> chartlut_engine::RangeMapping {
    let ref_stats = range::analyze(reference.colors(), config).unwrap();
    let cam_stats = range::analyze(camera.colors(), config).unwrap();
    range::map_ranges(&ref_stats, &cam_stats, RangeMappingMode::Linear, config)
}

#[test]
fn every_strategy_fills_the_lattice_in_range() {
    let config = EngineConfig::default();
    let reference = PatchSet::from_colors(chart_patches());
    let camera = PatchSet::from_colors(camera_render(reference.colors()));
    let mapping = range_mapping(&reference, &camera, &config);

    for strategy in [
        Strategy::Standard,
        Strategy::RangeAware,
        Strategy::Tetrahedral,
        Strategy::Perceptual,
    ] {
        for size in [2, 5, 9] {
            let mapping_arg = strategy.requires_range_mapping().then_some(&mapping);
            let lut = builder::build(strategy, &reference, &camera, size, mapping_arg, &config)
                .unwrap_or_else(|e| panic!("{strategy} size {size}: {e}"));
            assert_eq!(lut.data.len(), size * size * size, "{strategy} size {size}");
            assert!(
                lut.data
                    .iter()
                    .all(|c| c.iter().all(|&v| (0.0..=1.0).contains(&v))),
                "{strategy} size {size} produced out-of-range channels"
            );
        }
    }
}

#[test]
fn reference_colors_reproduce_their_camera_colors() {
    // Querying at a reference color is a zero-distance hit whose 1e6
    // weight swamps the other neighbors: the paired camera color comes
    // back, whatever the rest of the chart looks like.
    let config = EngineConfig::default();
    let reference = chart_patches();
    let camera = camera_render(&reference);
    let interp = chartlut_engine::Interpolator::new(
        Strategy::Standard,
        reference.clone(),
        camera.clone(),
        None,
        &config,
    )
    .unwrap();

    for (r, c) in reference.iter().zip(&camera) {
        let out = interp.sample(*r);
        for ch in 0..3 {
            assert_abs_diff_eq!(out[ch], c[ch], epsilon = 1e-3);
        }
    }
}

#[test]
fn three_patch_chart_passes_corners_through() {
    // Three gray patches, identical camera set, size 2: corners map to
    // themselves despite only 3 of the requested 4 neighbors existing.
    let config = EngineConfig::default();
    let patches =
        PatchSet::from_colors(vec![Vec3::ZERO, Vec3::splat(0.5), Vec3::ONE]);
    let lut = builder::build(Strategy::Standard, &patches, &patches, 2, None, &config).unwrap();

    let black = lut.get(0, 0, 0);
    let white = lut.get(1, 1, 1);
    for ch in 0..3 {
        assert_abs_diff_eq!(black[ch], 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(white[ch], 1.0, epsilon = 1e-3);
    }
}

#[test]
fn range_aware_without_mapping_fails_first() {
    let config = EngineConfig::default();
    let reference = PatchSet::from_colors(vec![Vec3::ZERO, Vec3::ONE]);
    let camera = PatchSet::from_colors(vec![Vec3::ZERO]);
    let err = builder::build(Strategy::RangeAware, &reference, &camera, 17, None, &config);
    assert!(matches!(err, Err(EngineError::MissingRangeData)));
}

#[test]
fn mismatched_sets_fail() {
    let config = EngineConfig::default();
    let reference = PatchSet::from_colors(vec![Vec3::ZERO, Vec3::ONE]);
    let camera = PatchSet::from_colors(vec![Vec3::ZERO, Vec3::splat(0.5), Vec3::ONE]);
    let err = builder::build(Strategy::Standard, &reference, &camera, 17, None, &config);
    assert!(matches!(
        err,
        Err(EngineError::InsufficientSamples {
            reference: 2,
            camera: 3
        })
    ));
}

#[test]
fn self_mapping_is_identity_with_full_compatibility() {
    let config = EngineConfig::default();
    let stats = range::analyze(&chart_patches(), &config).unwrap();
    let mapping = range::map_ranges(&stats, &stats, RangeMappingMode::Linear, &config);
    assert_abs_diff_eq!(mapping.scale, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(mapping.offset, 0.0, epsilon = 1e-5);
    assert_eq!(mapping.compatibility_score, 1.0);
}

#[test]
fn darkened_camera_lowers_scale() {
    let config = EngineConfig::default();
    let reference = chart_patches();
    let camera: Vec<Vec3> = reference.iter().map(|&c| c * 0.5).collect();
    let ref_stats = range::analyze(&reference, &config).unwrap();
    let cam_stats = range::analyze(&camera, &config).unwrap();
    let mapping = range::map_ranges(&ref_stats, &cam_stats, RangeMappingMode::Linear, &config);
    assert_abs_diff_eq!(mapping.scale, 0.5, epsilon = 1e-3);
}

#[test]
fn generated_lut_serializes_in_cube_order() {
    let config = EngineConfig::default();
    let patches = PatchSet::from_colors(chart_patches());
    let lut = builder::build(Strategy::Standard, &patches, &patches, 2, None, &config).unwrap();

    let mut out = Vec::new();
    cube::write_3d(&mut out, &lut, Some("calibration")).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "TITLE \"calibration\"");
    assert_eq!(lines[1], "LUT_3D_SIZE 2");
    assert_eq!(lines.len(), 2 + 8);
    // First data line is the black corner, last the white corner.
    assert_eq!(lines[2], "0.000000 0.000000 0.000000");
    assert_eq!(lines[9], "1.000000 1.000000 1.000000");
}

#[test]
fn unknown_strategy_name_is_rejected() {
    let err = "trilinear".parse::<Strategy>();
    match err {
        Err(EngineError::UnknownStrategy(name)) => assert_eq!(name, "trilinear"),
        other => panic!("expected UnknownStrategy, got {other:?}"),
    }
}
