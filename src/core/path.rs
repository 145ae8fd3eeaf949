use crate::core::curve::PathCommand;

const CUBIC_SEGMENTS: usize = 16;
const ARC_MAX_STEP_RADIANS: f64 = std::f64::consts::PI / 32.0;

/// Arc-length parametrization of a flattened path.
///
/// Used by hover highlighting to locate the path position under a target
/// x pixel without re-walking geometry on every pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPath {
    samples: Vec<(f64, f64)>,
    cumulative: Vec<f64>,
}

impl SampledPath {
    #[must_use]
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut samples: Vec<(f64, f64)> = Vec::new();
        let mut subpath_start = (0.0, 0.0);

        for command in commands {
            match *command {
                PathCommand::MoveTo { x, y } => {
                    subpath_start = (x, y);
                    samples.push((x, y));
                }
                PathCommand::LineTo { x, y } => samples.push((x, y)),
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let from = samples.last().copied().unwrap_or((x, y));
                    for step in 1..=CUBIC_SEGMENTS {
                        let t = step as f64 / CUBIC_SEGMENTS as f64;
                        samples.push(cubic_at(from, (x1, y1), (x2, y2), (x, y), t));
                    }
                }
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    let from = samples.last().copied().unwrap_or((x, y));
                    flatten_arc(&mut samples, from, (x, y), radius, large_arc, sweep);
                }
                PathCommand::Close => samples.push(subpath_start),
            }
        }

        let mut cumulative = Vec::with_capacity(samples.len());
        let mut total = 0.0;
        for (i, sample) in samples.iter().enumerate() {
            if i > 0 {
                let prev = samples[i - 1];
                total += ((sample.0 - prev.0).powi(2) + (sample.1 - prev.1).powi(2)).sqrt();
            }
            cumulative.push(total);
        }

        Self {
            samples,
            cumulative,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at an arc-length position, clamped to the path extent.
    #[must_use]
    pub fn point_at_length(&self, length: f64) -> (f64, f64) {
        if self.samples.is_empty() {
            return (0.0, 0.0);
        }
        let target = length.clamp(0.0, self.length());
        let index = self.cumulative.partition_point(|&l| l < target);
        if index == 0 {
            return self.samples[0];
        }
        if index >= self.samples.len() {
            return self.samples[self.samples.len() - 1];
        }
        let l0 = self.cumulative[index - 1];
        let l1 = self.cumulative[index];
        let t = if l1 > l0 { (target - l0) / (l1 - l0) } else { 0.0 };
        let p0 = self.samples[index - 1];
        let p1 = self.samples[index];
        (p0.0 + (p1.0 - p0.0) * t, p0.1 + (p1.1 - p0.1) * t)
    }

    /// Binary search over parametric length for the position whose x matches
    /// `target_x`.
    ///
    /// Assumes x increases along the path (cartesian line/area strokes).
    /// Iteration count is bounded by `log2(length / tolerance)`.
    #[must_use]
    pub fn length_at_x(&self, target_x: f64, tolerance: f64) -> f64 {
        let tolerance = if tolerance > 0.0 { tolerance } else { 0.5 };
        let mut low = 0.0;
        let mut high = self.length();
        while high - low > tolerance {
            let mid = (low + high) / 2.0;
            if self.point_at_length(mid).0 < target_x {
                low = mid;
            } else {
                high = mid;
            }
        }
        (low + high) / 2.0
    }
}

fn cubic_at(
    p0: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    p1: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let x = u.powi(3) * p0.0
        + 3.0 * u.powi(2) * t * c1.0
        + 3.0 * u * t.powi(2) * c2.0
        + t.powi(3) * p1.0;
    let y = u.powi(3) * p0.1
        + 3.0 * u.powi(2) * t * c1.1
        + 3.0 * u * t.powi(2) * c2.1
        + t.powi(3) * p1.1;
    (x, y)
}

/// Flattens an SVG-style circular arc (endpoint parametrization, F.6.5).
fn flatten_arc(
    samples: &mut Vec<(f64, f64)>,
    from: (f64, f64),
    to: (f64, f64),
    radius: f64,
    large_arc: bool,
    sweep: bool,
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= f64::EPSILON || radius <= 0.0 {
        samples.push(to);
        return;
    }

    let r = radius.max(dist / 2.0);
    let h = (r * r - (dist / 2.0) * (dist / 2.0)).max(0.0).sqrt();
    let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    let perp = (-dy / dist, dx / dist);
    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let center = (mid.0 + sign * h * perp.0, mid.1 + sign * h * perp.1);

    let a0 = (from.1 - center.1).atan2(from.0 - center.0);
    let mut a1 = (to.1 - center.1).atan2(to.0 - center.0);
    if sweep {
        while a1 < a0 {
            a1 += 2.0 * std::f64::consts::PI;
        }
    } else {
        while a1 > a0 {
            a1 -= 2.0 * std::f64::consts::PI;
        }
    }

    let span = a1 - a0;
    let steps = ((span.abs() / ARC_MAX_STEP_RADIANS).ceil() as usize).max(1);
    for step in 1..=steps {
        let angle = a0 + span * step as f64 / steps as f64;
        samples.push((center.0 + r * angle.cos(), center.1 + r * angle.sin()));
    }
}
