use crate::api::RadarChart;
use crate::composition::{ChartChild, RadarAreaSpec, RadarAxisSpec, RadarGridSpec};
use crate::core::curve::radial_polygon_path;
use crate::error::ChartResult;
use crate::render::frame::{LayeredFrame, LegendRow, Plane};
use crate::render::primitives::{
    CirclePrimitive, Color, LinePrimitive, Paint, PathPrimitive, Stroke, TextHAlign,
    TextPrimitive,
};

const METRIC_LABEL_SIZE: f64 = 11.0;
const METRIC_LABEL_GAP: f64 = 16.0;
const AREA_FILL_ALPHA: f64 = 0.25;
const VERTEX_DOT_RADIUS: f64 = 3.5;

/// Builds the full scene for a radar chart: rings, spokes and labels, then
/// series polygons in declaration order.
pub fn build_radar_frame(chart: &RadarChart) -> ChartResult<LayeredFrame> {
    let mut frame = LayeredFrame::new(chart.viewport());

    for &index in &chart.plan().base {
        match &chart.children()[index] {
            ChartChild::RadarGrid(spec) => build_grid(chart, spec, &mut frame),
            ChartChild::RadarAxis(spec) => build_axis(chart, spec, &mut frame),
            _ => {}
        }
    }

    for &index in &chart.plan().series {
        if let ChartChild::RadarArea(spec) = &chart.children()[index] {
            build_area(chart, spec, &mut frame);
        }
    }

    build_legend(chart, &mut frame);

    frame.validate()?;
    Ok(frame)
}

fn ring_vertices(chart: &RadarChart, radius: f64) -> Vec<(f64, f64)> {
    let center = chart.center();
    (0..chart.metrics().len())
        .map(|index| {
            let angle = chart.scale().angle(index);
            (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            )
        })
        .collect()
}

fn build_grid(chart: &RadarChart, spec: &RadarGridSpec, frame: &mut LayeredFrame) {
    let levels = chart.config().levels;
    let outer = chart.scale().radius();
    // Rings draw innermost first, each springing out to its resting radius.
    for level in 0..levels {
        let progress = chart.grid_level_progress(level);
        if progress <= 0.0 {
            continue;
        }
        let radius = outer * (level + 1) as f64 / levels as f64 * progress;
        let commands = radial_polygon_path(&ring_vertices(chart, radius));
        if commands.is_empty() {
            continue;
        }
        let mut ring = PathPrimitive::stroked(commands, Stroke::solid(spec.color, 1.0));
        ring.opacity = progress;
        frame.push_path(Plane::Base, ring);
    }
}

fn build_axis(chart: &RadarChart, spec: &RadarAxisSpec, frame: &mut LayeredFrame) {
    let progress = chart.axis_progress();
    if progress <= 0.0 {
        return;
    }
    let center = chart.center();
    let outer = chart.scale().radius();

    for (index, metric) in chart.metrics().iter().enumerate() {
        let angle = chart.scale().angle(index);
        let (dx, dy) = (angle.cos(), angle.sin());
        frame.push_line(
            Plane::Base,
            LinePrimitive {
                x1: center.0,
                y1: center.1,
                x2: center.0 + dx * outer * progress,
                y2: center.1 + dy * outer * progress,
                stroke_width: 1.0,
                color: spec.color,
                dash: None,
                opacity: progress,
            },
        );
        let label_radius = outer + METRIC_LABEL_GAP;
        frame.push_text(
            Plane::Base,
            TextPrimitive {
                x: center.0 + dx * label_radius,
                y: center.1 + dy * label_radius + METRIC_LABEL_SIZE / 2.0,
                text: metric.label.clone(),
                size: METRIC_LABEL_SIZE,
                color: spec.color.with_alpha((spec.color.alpha * progress).min(1.0)),
                h_align: TextHAlign::Center,
            },
        );
    }
}

fn build_area(chart: &RadarChart, spec: &RadarAreaSpec, frame: &mut LayeredFrame) {
    let points = chart.series_points(spec.index);
    if points.len() < 3 {
        return;
    }
    let center = chart.center();
    let vertices: Vec<(f64, f64)> = points
        .iter()
        .map(|&(x, y)| (center.0 + x, center.1 + y))
        .collect();

    let color = chart.series_color(spec.index);
    let opacity = chart.series_opacity(spec.index);
    let interaction = chart.series_interaction(spec.index);

    let mut polygon = PathPrimitive {
        commands: radial_polygon_path(&vertices),
        fill: Some(Paint::Solid(color.with_alpha(AREA_FILL_ALPHA))),
        stroke: Some(Stroke::solid(color, 2.0)),
        opacity,
        clip: None,
        glow: (interaction.is_hovered && spec.show_glow).then_some(color),
    };
    if polygon.commands.is_empty() {
        polygon.fill = None;
    }
    frame.push_path(Plane::Series, polygon);

    if spec.show_points {
        for &(x, y) in &vertices {
            frame.push_circle(
                Plane::Series,
                CirclePrimitive {
                    cx: x,
                    cy: y,
                    radius: VERTEX_DOT_RADIUS,
                    fill: color,
                    stroke: Some((Color::rgb(1.0, 1.0, 1.0), 1.0)),
                    opacity,
                },
            );
        }
    }
}

fn build_legend(chart: &RadarChart, frame: &mut LayeredFrame) {
    let has_legend = chart
        .children()
        .iter()
        .any(|child| matches!(child, ChartChild::Legend(_)));
    if !has_legend {
        return;
    }
    for (index, series) in chart.series().iter().enumerate() {
        let mean = if series.values.is_empty() {
            0.0
        } else {
            series.values.iter().sum::<f64>() / series.values.len() as f64
        };
        frame.legend.push(LegendRow {
            label: series.label.clone(),
            color: chart.series_color(index),
            value: format!("{mean:.0}"),
            progress: None,
        });
    }
}
