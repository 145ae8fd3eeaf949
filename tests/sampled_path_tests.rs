use approx::assert_relative_eq;
use glyph_charts::core::{CurveKind, SampledPath, line_path};

#[test]
fn straight_line_length_is_exact() {
    let commands = line_path(&[(0.0, 0.0), (300.0, 400.0)], CurveKind::Linear);
    let sampled = SampledPath::from_commands(&commands);
    assert_relative_eq!(sampled.length(), 500.0, epsilon = 1e-9);
}

#[test]
fn point_at_length_interpolates_along_segments() {
    let commands = line_path(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)], CurveKind::Linear);
    let sampled = SampledPath::from_commands(&commands);

    let (x, y) = sampled.point_at_length(50.0);
    assert_relative_eq!(x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(y, 0.0, epsilon = 1e-9);

    let (x, y) = sampled.point_at_length(150.0);
    assert_relative_eq!(x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(y, 50.0, epsilon = 1e-9);
}

#[test]
fn point_at_length_clamps_to_the_path_extent() {
    let commands = line_path(&[(0.0, 0.0), (100.0, 0.0)], CurveKind::Linear);
    let sampled = SampledPath::from_commands(&commands);
    assert_eq!(sampled.point_at_length(-10.0), (0.0, 0.0));
    assert_eq!(sampled.point_at_length(1e9), (100.0, 0.0));
}

#[test]
fn length_at_x_lands_within_tolerance() {
    let commands = line_path(&[(0.0, 0.0), (400.0, 300.0)], CurveKind::Linear);
    let sampled = SampledPath::from_commands(&commands);

    let length = sampled.length_at_x(200.0, 0.5);
    let (x, _) = sampled.point_at_length(length);
    assert!((x - 200.0).abs() <= 0.5);
}

#[test]
fn length_at_x_tracks_a_monotone_curve() {
    let points: Vec<(f64, f64)> = (0..20)
        .map(|i| (i as f64 * 25.0, (i as f64 * 0.7).sin() * 80.0 + 100.0))
        .collect();
    let commands = line_path(&points, CurveKind::MonotoneX);
    let sampled = SampledPath::from_commands(&commands);

    for target in [10.0, 125.0, 250.0, 333.0, 470.0] {
        let length = sampled.length_at_x(target, 0.5);
        let (x, _) = sampled.point_at_length(length);
        assert!(
            (x - target).abs() <= 1.0,
            "target {target} resolved to x {x}"
        );
    }
}

#[test]
fn lengths_are_monotone_in_x() {
    let commands = line_path(
        &[(0.0, 50.0), (100.0, 10.0), (200.0, 90.0), (300.0, 40.0)],
        CurveKind::MonotoneX,
    );
    let sampled = SampledPath::from_commands(&commands);

    let mut previous = 0.0;
    for target in [0.0, 60.0, 140.0, 220.0, 300.0] {
        let length = sampled.length_at_x(target, 0.25);
        assert!(length >= previous - 0.25);
        previous = length;
    }
}

#[test]
fn empty_path_has_zero_length() {
    let sampled = SampledPath::from_commands(&[]);
    assert_eq!(sampled.length(), 0.0);
    assert_eq!(sampled.point_at_length(10.0), (0.0, 0.0));
}
