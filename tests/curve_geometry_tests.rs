use approx::assert_relative_eq;
use glyph_charts::core::{CurveKind, PathCommand, area_path, line_path, radial_polygon_path};

#[test]
fn fewer_than_two_points_yields_no_path() {
    assert!(line_path(&[], CurveKind::MonotoneX).is_empty());
    assert!(line_path(&[(5.0, 5.0)], CurveKind::Linear).is_empty());
    assert!(area_path(&[(5.0, 5.0)], CurveKind::MonotoneX, 100.0).is_empty());
}

#[test]
fn linear_path_connects_every_point() {
    let commands = line_path(&[(0.0, 10.0), (10.0, 20.0), (20.0, 5.0)], CurveKind::Linear);
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0], PathCommand::MoveTo { x: 0.0, y: 10.0 });
    assert_eq!(commands[1], PathCommand::LineTo { x: 10.0, y: 20.0 });
    assert_eq!(commands[2], PathCommand::LineTo { x: 20.0, y: 5.0 });
}

#[test]
fn monotone_curve_emits_one_cubic_per_segment() {
    let points = [(0.0, 0.0), (10.0, 10.0), (20.0, 15.0), (30.0, 40.0)];
    let commands = line_path(&points, CurveKind::MonotoneX);
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], PathCommand::MoveTo { .. }));
    assert!(
        commands[1..]
            .iter()
            .all(|c| matches!(c, PathCommand::CubicTo { .. }))
    );
}

#[test]
fn monotone_curve_flattens_at_local_extrema() {
    // The middle point is a peak; a monotone fit must not overshoot it.
    let points = [(0.0, 0.0), (10.0, 100.0), (20.0, 0.0)];
    let commands = line_path(&points, CurveKind::MonotoneX);
    for command in &commands {
        if let PathCommand::CubicTo { y1, y2, .. } = *command {
            assert!(y1 <= 100.0 + 1e-9);
            assert!(y2 <= 100.0 + 1e-9);
        }
    }
}

#[test]
fn monotone_control_points_sit_at_the_third_marks() {
    let points = [(0.0, 0.0), (30.0, 30.0)];
    let commands = line_path(&points, CurveKind::MonotoneX);
    let PathCommand::CubicTo { x1, x2, x, y, .. } = commands[1] else {
        panic!("expected a cubic segment");
    };
    assert_relative_eq!(x1, 10.0, epsilon = 1e-9);
    assert_relative_eq!(x2, 20.0, epsilon = 1e-9);
    assert_relative_eq!(x, 30.0, epsilon = 1e-9);
    assert_relative_eq!(y, 30.0, epsilon = 1e-9);
}

#[test]
fn area_path_drops_to_the_baseline_and_closes() {
    let points = [(0.0, 10.0), (10.0, 20.0), (20.0, 5.0)];
    let commands = area_path(&points, CurveKind::Linear, 300.0);

    let len = commands.len();
    assert_eq!(commands[len - 1], PathCommand::Close);
    assert_eq!(commands[len - 2], PathCommand::LineTo { x: 0.0, y: 300.0 });
    assert_eq!(commands[len - 3], PathCommand::LineTo { x: 20.0, y: 300.0 });
}

#[test]
fn radial_polygon_requires_three_vertices_and_closes() {
    assert!(radial_polygon_path(&[(0.0, 0.0), (1.0, 1.0)]).is_empty());

    let commands = radial_polygon_path(&[(0.0, -10.0), (10.0, 5.0), (-10.0, 5.0)]);
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], PathCommand::MoveTo { .. }));
    assert_eq!(commands[3], PathCommand::Close);
}
