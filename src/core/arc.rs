use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::curve::PathCommand;
use crate::error::{ChartError, ChartResult};

/// Converts a polar position to pixel offsets from the chart center.
///
/// Angle convention follows d3-shape: 0 at 12 o'clock, increasing clockwise.
#[must_use]
fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Radial pop-out offset for a slice hovering away from the center.
#[must_use]
pub fn slice_offset(start_angle: f64, end_angle: f64, distance: f64) -> (f64, f64) {
    let mid = (start_angle + end_angle) / 2.0;
    (mid.sin() * distance, -mid.cos() * distance)
}

/// One pie/donut slice: an annulus sector in the d3 angle convention.
///
/// `inner_radius == 0` produces a solid pie wedge; nonzero produces a donut
/// segment. Pad angle is applied half-and-half at both angular edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnulusSector {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
    pub corner_radius: f64,
}

impl AnnulusSector {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.inner_radius, "inner_radius"),
            (self.outer_radius, "outer_radius"),
            (self.start_angle, "start_angle"),
            (self.end_angle, "end_angle"),
            (self.pad_angle, "pad_angle"),
            (self.corner_radius, "corner_radius"),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "sector `{name}` must be finite"
                )));
            }
        }
        if self.inner_radius < 0.0 || self.outer_radius <= self.inner_radius {
            return Err(ChartError::InvalidData(
                "sector radii must satisfy 0 <= inner < outer".to_owned(),
            ));
        }
        if self.end_angle < self.start_angle {
            return Err(ChartError::InvalidData(
                "sector end angle must be >= start angle".to_owned(),
            ));
        }
        if self.pad_angle < 0.0 || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "sector pad angle and corner radius must be >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Angular span after pad removal; clamped at zero for hairline slices.
    #[must_use]
    fn padded_angles(self) -> (f64, f64) {
        let half_pad = self.pad_angle / 2.0;
        let a0 = self.start_angle + half_pad;
        let a1 = self.end_angle - half_pad;
        if a1 <= a0 {
            let mid = self.mid_angle();
            (mid, mid)
        } else {
            (a0, a1)
        }
    }

    /// True when the polar position falls inside the unpadded hit region.
    ///
    /// Hit testing intentionally ignores pad/corner styling so the hit region
    /// stays stable while the visual slice animates.
    #[must_use]
    pub fn contains(self, angle: f64, radius: f64) -> bool {
        if radius < self.inner_radius || radius > self.outer_radius {
            return false;
        }
        let span = self.end_angle - self.start_angle;
        let mut relative = (angle - self.start_angle) % (2.0 * PI);
        if relative < 0.0 {
            relative += 2.0 * PI;
        }
        relative < span
    }

    /// Path for the visual slice, centered on the chart origin.
    pub fn path(self) -> ChartResult<Vec<PathCommand>> {
        let sector = self.validate()?;
        let (a0, a1) = sector.padded_angles();
        if a1 - a0 <= f64::EPSILON {
            return Ok(Vec::new());
        }

        let rc = sector.clamped_corner_radius(a0, a1);

        if rc <= f64::EPSILON {
            return Ok(sector.sharp_path(a0, a1));
        }
        Ok(sector.rounded_path(a0, a1, rc))
    }

    /// Corner radius reduced until both radial edges and the angular span can
    /// accommodate the rounding.
    fn clamped_corner_radius(self, a0: f64, a1: f64) -> f64 {
        let mut rc = self
            .corner_radius
            .min((self.outer_radius - self.inner_radius) / 2.0);
        if rc <= f64::EPSILON {
            return 0.0;
        }
        // The two outer corner arcs may not overlap each other.
        let span = a1 - a0;
        let max_by_span = (self.outer_radius - rc).max(0.0) * (span / 2.0).sin();
        rc = rc.min(max_by_span.abs());
        if rc <= f64::EPSILON { 0.0 } else { rc }
    }

    fn sharp_path(self, a0: f64, a1: f64) -> Vec<PathCommand> {
        let outer = self.outer_radius;
        let inner = self.inner_radius;
        let large_arc = (a1 - a0) > PI;

        let (sx, sy) = polar(outer, a0);
        let (ex, ey) = polar(outer, a1);
        let mut commands = vec![
            PathCommand::MoveTo { x: sx, y: sy },
            PathCommand::Arc {
                radius: outer,
                large_arc,
                sweep: true,
                x: ex,
                y: ey,
            },
        ];

        if inner > 0.0 {
            let (ix, iy) = polar(inner, a1);
            let (jx, jy) = polar(inner, a0);
            commands.push(PathCommand::LineTo { x: ix, y: iy });
            commands.push(PathCommand::Arc {
                radius: inner,
                large_arc,
                sweep: false,
                x: jx,
                y: jy,
            });
        } else {
            commands.push(PathCommand::LineTo { x: 0.0, y: 0.0 });
        }
        commands.push(PathCommand::Close);
        commands
    }

    fn rounded_path(self, a0: f64, a1: f64, rc: f64) -> Vec<PathCommand> {
        let outer = self.outer_radius;
        let inner = self.inner_radius;

        // Corner circles are tangent to the outer/inner circle and the radial edge.
        let outer_offset = (rc / (outer - rc)).min(1.0).asin();
        let outer_edge_r = ((outer - rc).powi(2) - rc.powi(2)).max(0.0).sqrt();

        let (m0x, m0y) = polar(outer_edge_r, a0);
        let mut commands = vec![PathCommand::MoveTo { x: m0x, y: m0y }];

        let (t0x, t0y) = polar(outer, a0 + outer_offset);
        commands.push(PathCommand::Arc {
            radius: rc,
            large_arc: false,
            sweep: true,
            x: t0x,
            y: t0y,
        });

        let sweep_start = a0 + outer_offset;
        let sweep_end = a1 - outer_offset;
        let (t1x, t1y) = polar(outer, sweep_end.max(sweep_start));
        commands.push(PathCommand::Arc {
            radius: outer,
            large_arc: (sweep_end - sweep_start) > PI,
            sweep: true,
            x: t1x,
            y: t1y,
        });

        let (m1x, m1y) = polar(outer_edge_r, a1);
        commands.push(PathCommand::Arc {
            radius: rc,
            large_arc: false,
            sweep: true,
            x: m1x,
            y: m1y,
        });

        if inner > 0.0 {
            let inner_offset = (rc / (inner + rc)).min(1.0).asin();
            let inner_edge_r = ((inner + rc).powi(2) - rc.powi(2)).max(0.0).sqrt();

            let (n1x, n1y) = polar(inner_edge_r, a1);
            commands.push(PathCommand::LineTo { x: n1x, y: n1y });

            let (u1x, u1y) = polar(inner, a1 - inner_offset);
            commands.push(PathCommand::Arc {
                radius: rc,
                large_arc: false,
                sweep: true,
                x: u1x,
                y: u1y,
            });

            let inner_sweep_end = (a0 + inner_offset).min(a1 - inner_offset);
            let (u0x, u0y) = polar(inner, inner_sweep_end);
            commands.push(PathCommand::Arc {
                radius: inner,
                large_arc: (a1 - a0 - 2.0 * inner_offset) > PI,
                sweep: false,
                x: u0x,
                y: u0y,
            });

            let (n0x, n0y) = polar(inner_edge_r, a0);
            commands.push(PathCommand::Arc {
                radius: rc,
                large_arc: false,
                sweep: true,
                x: n0x,
                y: n0y,
            });
        } else {
            commands.push(PathCommand::LineTo { x: 0.0, y: 0.0 });
        }
        commands.push(PathCommand::Close);
        commands
    }
}

/// Endpoint helper shared with tests: pixel position on the sector boundary.
#[must_use]
pub fn sector_point(radius: f64, angle: f64) -> (f64, f64) {
    polar(radius, angle)
}
