//! Integration tests for the complete capture → compare → store workflow
//!
//! These tests exercise the public API end to end:
//! - Golden sRGB to Lab conversions
//! - Region sampling and representative color choice
//! - Two-reference classification and its invariants
//! - Record persistence, recheck and interchange

use chrono::Utc;
use image::{Rgba, RgbaImage};
use swatch_match::color::{delta_e76, rgb_to_lab, to_hex, Lab, Rgb};
use swatch_match::image_loader::Selection;
use swatch_match::workflow::{self, ComparisonSession};
use swatch_match::{
    classify, sample_region, ColorData, ComparisonClassifier, ComparisonRepository,
    InMemoryRepository, JsonFileRepository, MatchConfig, MatchError, SeparationLabel,
};

fn color(r: f64, g: f64, b: f64) -> ColorData {
    ColorData::from_rgb(Rgb::new(r, g, b)).unwrap()
}

// ============================================================================
// Engine Properties
// ============================================================================

#[test]
fn test_golden_conversions() {
    let red = rgb_to_lab(Rgb::new(255.0, 0.0, 0.0)).unwrap();
    assert!((red.l - 53.24).abs() < 0.1);
    assert!((red.a - 80.09).abs() < 0.1);
    assert!((red.b - 67.20).abs() < 0.1);

    let white = rgb_to_lab(Rgb::new(255.0, 255.0, 255.0)).unwrap();
    assert!((white.l - 100.0).abs() < 0.05);
    assert!(white.a.abs() < 0.05 && white.b.abs() < 0.05);

    let black = rgb_to_lab(Rgb::new(0.0, 0.0, 0.0)).unwrap();
    assert!(black.l.abs() < 1e-12 && black.a.abs() < 1e-12 && black.b.abs() < 1e-12);
}

#[test]
fn test_hex_examples() {
    assert_eq!(to_hex(Rgb::new(255.0, 0.0, 128.0)), "#ff0080");
    assert_eq!(to_hex(Rgb::new(-5.0, 300.0, 127.6)), "#00ff80");
}

#[test]
fn test_delta_e_reflexive_and_symmetric() {
    let x = rgb_to_lab(Rgb::new(12.0, 99.0, 200.0)).unwrap();
    let y = rgb_to_lab(Rgb::new(180.0, 40.0, 7.0)).unwrap();
    assert_eq!(delta_e76(x, x).unwrap(), 0.0);
    assert_eq!(delta_e76(x, y).unwrap(), delta_e76(y, x).unwrap());
}

#[test]
fn test_median_examples() {
    let odd: Vec<u8> = [10u8, 50, 90].iter().flat_map(|&r| [r, 0, 0, 255]).collect();
    assert_eq!(sample_region(&odd, 1, 3).unwrap().median.r, 50.0);

    let even: Vec<u8> = [10u8, 50, 90, 100].iter().flat_map(|&r| [r, 0, 0, 255]).collect();
    assert_eq!(sample_region(&even, 1, 4).unwrap().median.r, 70.0);
}

#[test]
fn test_empty_region_is_error_not_panic() {
    let err = sample_region(&[], 0, 0).unwrap_err();
    assert!(matches!(err, MatchError::EmptyRegion { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_red_versus_blue_end_to_end() {
    let red = color(255.0, 0.0, 0.0);
    let blue = color(0.0, 0.0, 255.0);

    let metrics = classify(&red, &red, &blue).unwrap();
    assert!((metrics.toward_a - 100.0).abs() < 1e-9);
    assert!(metrics.toward_b.abs() < 1e-9);
    assert_eq!(metrics.separation_label, SeparationLabel::Strong);
}

#[test]
fn test_swap_invariance() {
    let sample = color(140.0, 60.0, 200.0);
    let a = color(200.0, 40.0, 40.0);
    let b = color(30.0, 60.0, 220.0);

    let forward = classify(&sample, &a, &b).unwrap();
    let swapped = classify(&sample, &b, &a).unwrap();
    assert!((forward.toward_a - swapped.toward_b).abs() < 1e-9);
    assert!((forward.toward_b - swapped.toward_a).abs() < 1e-9);
    assert!((forward.toward_a + forward.toward_b - 100.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_tie() {
    let gray = color(90.0, 90.0, 90.0);
    let metrics = classify(&gray, &gray, &gray).unwrap();
    assert_eq!((metrics.toward_a, metrics.toward_b), (50.0, 50.0));
    assert_eq!(metrics.separation, 0.0);
    assert_eq!(metrics.separation_label, SeparationLabel::Indistinguishable);
}

#[test]
fn test_extreme_finite_inputs_fail_cleanly() {
    let err = ColorData::from_rgb(Rgb::new(1e131, 0.0, 0.0)).unwrap_err();
    assert!(matches!(err, MatchError::InvalidInput { .. }));

    let far = ColorData {
        lab: Lab::new(1e200, 0.0, 0.0),
        ..color(0.0, 0.0, 0.0)
    };
    let opposite = ColorData {
        lab: Lab::new(-1e200, 0.0, 0.0),
        ..color(0.0, 0.0, 0.0)
    };
    let err = classify(&far, &opposite, &opposite).unwrap_err();
    assert!(matches!(err, MatchError::InvalidInput { .. }));
}

// ============================================================================
// Workflow
// ============================================================================

/// Three vertical bands: red, noisy orange, blue
fn still_image() -> RgbaImage {
    RgbaImage::from_fn(30, 10, |x, y| match x {
        0..=9 => Rgba([250, 10, 10, 255]),
        // a few specular pixels inside the sample band
        10..=19 if (x + y) % 7 == 0 => Rgba([255, 255, 255, 255]),
        10..=19 => Rgba([240, 120, 20, 255]),
        _ => Rgba([10, 10, 250, 255]),
    })
}

#[test]
fn test_capture_compare_save_recheck() {
    let image = still_image();
    let config = MatchConfig::default();
    let classifier = config.classifier().unwrap();

    let mut session = ComparisonSession::new();
    session.set_reference_a(
        "Red",
        workflow::capture_from_image(&image, Selection::new(0, 0, 10, 10), &config).unwrap(),
    );
    session.set_reference_b(
        "Blue",
        workflow::capture_from_image(&image, Selection::new(20, 0, 10, 10), &config).unwrap(),
    );
    let sample =
        workflow::capture_from_image(&image, Selection::new(10, 0, 10, 10), &config).unwrap();
    assert_eq!(sample.hex, "#f07814", "median ignores highlights");
    assert!(sample.avg_rgb.g > sample.rgb.g, "mean is pulled by highlights");
    session.set_sample(sample);

    let record = session.to_record(&classifier, "Orange mug", Utc::now()).unwrap();
    assert!(record.metrics.toward_a > 50.0);

    let dir = tempfile::tempdir().unwrap();
    let mut repo = JsonFileRepository::new(dir.path().join("comparisons.json"));
    let id = workflow::save_comparison(&mut repo, record.clone()).unwrap();

    let rechecked = workflow::recheck(&mut repo, id, &classifier, Utc::now()).unwrap();
    assert_eq!(rechecked.previous_metrics, Some(record.metrics));
    assert_eq!(rechecked.metrics, record.metrics);
    assert!(rechecked.last_checked_at.is_some());

    let stored = JsonFileRepository::new(repo.path()).get(id).unwrap();
    assert_eq!(stored, rechecked);
}

#[test]
fn test_selection_too_small_is_reported() {
    let image = still_image();
    let config = MatchConfig::default();
    let err =
        workflow::capture_from_image(&image, Selection::new(0, 0, 1, 1), &config).unwrap_err();
    assert!(matches!(err, MatchError::SelectionTooSmall { .. }));
    assert_eq!(
        err.user_message(),
        "Selection too small. Drag a larger area over the color."
    );
}

#[test]
fn test_json_interchange_between_repositories() {
    let classifier = ComparisonClassifier::new();
    let mut source = InMemoryRepository::new();
    let samples = [
        ("teal", color(0.0, 128.0, 128.0)),
        ("plum", color(142.0, 69.0, 133.0)),
    ];
    for (title, sample) in samples {
        let mut session = ComparisonSession::new();
        session.set_reference_a("Green", color(0.0, 160.0, 0.0));
        session.set_reference_b("Purple", color(128.0, 0.0, 128.0));
        session.set_sample(sample);
        let record = session.to_record(&classifier, title, Utc::now()).unwrap();
        workflow::save_comparison(&mut source, record).unwrap();
    }

    let mut exported = Vec::new();
    workflow::export_all_json(&source, &mut exported).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut target = JsonFileRepository::new(dir.path().join("imported.json"));
    assert_eq!(workflow::import_all_json(&mut target, exported.as_slice()).unwrap(), 2);
    assert_eq!(target.get_all().unwrap(), source.get_all().unwrap());

    target.clear_all().unwrap();
    assert!(target.get_all().unwrap().is_empty());
}
