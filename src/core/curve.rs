use serde::{Deserialize, Serialize};

/// One SVG-style path command in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    /// Circular arc segment (SVG `A` with rx == ry, no axis rotation).
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

/// Formats commands as an SVG path data string.
#[must_use]
pub fn to_svg(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for command in commands {
        if !out.is_empty() {
            out.push(' ');
        }
        match *command {
            PathCommand::MoveTo { x, y } => out.push_str(&format!("M{x},{y}")),
            PathCommand::LineTo { x, y } => out.push_str(&format!("L{x},{y}")),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => out.push_str(&format!("C{x1},{y1} {x2},{y2} {x},{y}")),
            PathCommand::Arc {
                radius,
                large_arc,
                sweep,
                x,
                y,
            } => out.push_str(&format!(
                "A{radius},{radius} 0 {},{} {x},{y}",
                u8::from(large_arc),
                u8::from(sweep)
            )),
            PathCommand::Close => out.push('Z'),
        }
    }
    out
}

/// Interpolation basis for line/area series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveKind {
    Linear,
    #[default]
    MonotoneX,
}

/// Open curve through `points` (pixel coordinates, ascending x).
///
/// Returns an empty path for fewer than two points; a single point renders
/// nothing rather than a degenerate segment.
#[must_use]
pub fn line_path(points: &[(f64, f64)], kind: CurveKind) -> Vec<PathCommand> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(points.len() + 1);
    commands.push(PathCommand::MoveTo {
        x: points[0].0,
        y: points[0].1,
    });

    match kind {
        CurveKind::Linear => {
            for &(x, y) in &points[1..] {
                commands.push(PathCommand::LineTo { x, y });
            }
        }
        CurveKind::MonotoneX => {
            let tangents = monotone_tangents(points);
            for i in 0..points.len() - 1 {
                let (x0, y0) = points[i];
                let (x1, y1) = points[i + 1];
                let h = x1 - x0;
                commands.push(PathCommand::CubicTo {
                    x1: x0 + h / 3.0,
                    y1: y0 + tangents[i] * h / 3.0,
                    x2: x1 - h / 3.0,
                    y2: y1 - tangents[i + 1] * h / 3.0,
                    x: x1,
                    y: y1,
                });
            }
        }
    }

    commands
}

/// Closed variant of [`line_path`]: the curve dropped to `baseline_y` at both
/// ends, for area fills.
#[must_use]
pub fn area_path(points: &[(f64, f64)], kind: CurveKind, baseline_y: f64) -> Vec<PathCommand> {
    let mut commands = line_path(points, kind);
    if commands.is_empty() {
        return commands;
    }
    let last_x = points[points.len() - 1].0;
    let first_x = points[0].0;
    commands.push(PathCommand::LineTo {
        x: last_x,
        y: baseline_y,
    });
    commands.push(PathCommand::LineTo {
        x: first_x,
        y: baseline_y,
    });
    commands.push(PathCommand::Close);
    commands
}

/// Closed polygon through radial vertices (radar areas, grid rings).
#[must_use]
pub fn radial_polygon_path(vertices: &[(f64, f64)]) -> Vec<PathCommand> {
    if vertices.len() < 3 {
        return Vec::new();
    }
    let mut commands = Vec::with_capacity(vertices.len() + 1);
    commands.push(PathCommand::MoveTo {
        x: vertices[0].0,
        y: vertices[0].1,
    });
    for &(x, y) in &vertices[1..] {
        commands.push(PathCommand::LineTo { x, y });
    }
    commands.push(PathCommand::Close);
    commands
}

/// Fritsch–Carlson tangents preserving monotonicity in x-sorted data.
fn monotone_tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut slopes = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let dx = points[i + 1].0 - points[i].0;
        let dy = points[i + 1].1 - points[i].1;
        slopes.push(if dx != 0.0 { dy / dx } else { 0.0 });
    }

    let mut tangents = vec![0.0; n];
    tangents[0] = slopes[0];
    tangents[n - 1] = slopes[n - 2];
    for i in 1..n - 1 {
        let prev = slopes[i - 1];
        let next = slopes[i];
        if prev * next <= 0.0 {
            // Local extremum: flatten the tangent so the curve does not overshoot.
            tangents[i] = 0.0;
        } else {
            let candidate = (prev + next) / 2.0;
            let limit = 3.0 * prev.abs().min(next.abs());
            tangents[i] = if candidate.abs() > limit {
                limit * candidate.signum()
            } else {
                candidate
            };
        }
    }
    tangents
}
