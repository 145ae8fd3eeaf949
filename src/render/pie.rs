use crate::api::PieChart;
use crate::composition::ChartChild;
use crate::core::arc::AnnulusSector;
use crate::core::curve::PathCommand;
use crate::error::ChartResult;
use crate::render::frame::{LayeredFrame, LegendRow, Plane};
use crate::render::primitives::{Paint, PathPrimitive, TextHAlign, TextPrimitive};

const CENTER_VALUE_SIZE: f64 = 24.0;
const CENTER_LABEL_SIZE: f64 = 12.0;

/// Builds the full scene for a pie/donut chart.
pub fn build_pie_frame(chart: &PieChart) -> ChartResult<LayeredFrame> {
    let mut frame = LayeredFrame::new(chart.viewport());

    for arc in chart.arcs() {
        let Some(state) = chart.slice_state(arc.index) else {
            continue;
        };
        if state.entrance_scale <= 0.0 {
            continue;
        }

        // The visual slice scales out from the center and may grow or
        // translate on hover; the hit region stays at the base geometry.
        let sector = AnnulusSector {
            inner_radius: arc.sector.inner_radius * state.entrance_scale,
            outer_radius: (arc.sector.outer_radius + state.radius_growth)
                * state.entrance_scale,
            ..arc.sector
        };
        if sector.outer_radius <= sector.inner_radius {
            continue;
        }

        let commands = sector.path()?;
        if commands.is_empty() {
            continue;
        }
        let center = chart.center();
        let origin = (center.0 + state.offset.0, center.1 + state.offset.1);

        let mut slice = PathPrimitive::filled(
            translate(&commands, origin.0, origin.1),
            Paint::Solid(arc.color),
        );
        slice.opacity = state.opacity;
        if state.interaction.is_hovered && chart.slice_shows_glow(arc.index) {
            slice.glow = Some(arc.color);
        }
        frame.push_path(Plane::Series, slice);
    }

    build_legend(chart, &mut frame);
    build_center(chart, &mut frame);

    frame.validate()?;
    Ok(frame)
}

fn build_legend(chart: &PieChart, frame: &mut LayeredFrame) {
    let show_progress = chart.children().iter().any(|child| match child {
        ChartChild::Legend(spec) => spec.show_progress,
        _ => false,
    });
    let has_legend = chart
        .children()
        .iter()
        .any(|child| matches!(child, ChartChild::Legend(_)));
    if !has_legend {
        return;
    }
    for arc in chart.arcs() {
        frame.legend.push(LegendRow {
            label: arc.label.clone(),
            color: arc.color,
            value: format!("{:.0}", arc.value),
            progress: show_progress.then_some(arc.fraction),
        });
    }
}

fn build_center(chart: &PieChart, frame: &mut LayeredFrame) {
    let Some(summary) = chart.center_summary() else {
        return;
    };
    let center = chart.center();
    frame.push_text(
        Plane::Center,
        TextPrimitive {
            x: center.0,
            y: center.1,
            text: format!("{:.0}", summary.value),
            size: CENTER_VALUE_SIZE,
            color: crate::render::primitives::Color::rgb(0.95, 0.95, 0.95),
            h_align: TextHAlign::Center,
        },
    );
    frame.push_text(
        Plane::Center,
        TextPrimitive {
            x: center.0,
            y: center.1 + CENTER_VALUE_SIZE * 0.8,
            text: summary.label,
            size: CENTER_LABEL_SIZE,
            color: crate::render::primitives::Color::rgba(0.8, 0.8, 0.8, 0.9),
            h_align: TextHAlign::Center,
        },
    );
}

fn translate(commands: &[PathCommand], dx: f64, dy: f64) -> Vec<PathCommand> {
    commands
        .iter()
        .map(|command| match *command {
            PathCommand::MoveTo { x, y } => PathCommand::MoveTo { x: x + dx, y: y + dy },
            PathCommand::LineTo { x, y } => PathCommand::LineTo { x: x + dx, y: y + dy },
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => PathCommand::CubicTo {
                x1: x1 + dx,
                y1: y1 + dy,
                x2: x2 + dx,
                y2: y2 + dy,
                x: x + dx,
                y: y + dy,
            },
            PathCommand::Arc {
                radius,
                large_arc,
                sweep,
                x,
                y,
            } => PathCommand::Arc {
                radius,
                large_arc,
                sweep,
                x: x + dx,
                y: y + dy,
            },
            PathCommand::Close => PathCommand::Close,
        })
        .collect()
}
