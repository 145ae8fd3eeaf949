use crate::api::CartesianChart;
use crate::composition::{
    AreaSpec, AxisOrientation, AxisSpec, BarSpec, ChartChild, GridSpec, LegendSpec, LineSpec,
    MarkerSetSpec, TooltipSpec,
};
use crate::core::curve::{area_path, line_path};
use crate::error::ChartResult;
use crate::render::frame::{LayeredFrame, LegendRow, Plane, TooltipBox};
use crate::render::primitives::{
    CirclePrimitive, ClipRect, Color, DashPattern, GradientDirection, GradientStop, LineCap,
    LinePrimitive, Paint, PathPrimitive, RectPrimitive, Stroke, TextHAlign, TextPrimitive,
};

const AXIS_TEXT_SIZE: f64 = 11.0;
const AXIS_TICK_GAP: f64 = 8.0;
const ACTIVE_DOT_RADIUS: f64 = 4.0;
const MARKER_BADGE_SIZE: f64 = 10.0;
const DEFAULT_MARKER_COLOR: Color = Color::rgb(0.38, 0.65, 0.98);

/// Builds the full scene for a cartesian chart: base decorations, series in
/// data order, then the interaction overlay.
pub fn build_cartesian_frame(chart: &CartesianChart) -> ChartResult<LayeredFrame> {
    let mut frame = LayeredFrame::new(chart.viewport());

    for &index in &chart.plan().base {
        match &chart.children()[index] {
            ChartChild::Grid(spec) => build_grid(chart, spec, &mut frame),
            ChartChild::Axis(spec) => build_axis(chart, spec, &mut frame),
            ChartChild::Legend(spec) => build_legend(chart, spec, &mut frame),
            _ => {}
        }
    }

    for (series_index, &index) in chart.plan().series.iter().enumerate() {
        match &chart.children()[index] {
            ChartChild::Area(spec) => build_area(chart, spec, series_index, &mut frame),
            ChartChild::Line(spec) => build_line(chart, spec, series_index, &mut frame),
            ChartChild::Bar(spec) => build_bars(chart, spec, series_index, &mut frame),
            _ => {}
        }
    }

    for &index in &chart.plan().overlay {
        match &chart.children()[index] {
            ChartChild::Tooltip(spec) => build_tooltip(chart, spec, &mut frame),
            ChartChild::Markers(spec) => build_markers(chart, spec, &mut frame),
            _ => {}
        }
    }

    frame.validate()?;
    Ok(frame)
}

fn plot_points(chart: &CartesianChart, key: &str) -> Vec<(f64, f64)> {
    let margin = chart.margin();
    chart
        .geometry(key)
        .map(|geometry| {
            geometry
                .points
                .iter()
                .map(|&(x, y)| (x + margin.left, y + margin.top))
                .collect()
        })
        .unwrap_or_default()
}

/// Entrance reveal: the plot region clipped to a growing width.
fn entrance_clip(chart: &CartesianChart, series_index: usize) -> Option<ClipRect> {
    let progress = chart.entrance_progress(series_index);
    if progress >= 1.0 {
        return None;
    }
    let margin = chart.margin();
    Some(ClipRect {
        x: margin.left,
        y: 0.0,
        width: chart.inner_width() * progress,
        height: f64::from(chart.viewport().height),
    })
}

fn build_grid(chart: &CartesianChart, spec: &GridSpec, frame: &mut LayeredFrame) {
    let margin = chart.margin();
    let left = margin.left;
    let right = margin.left + chart.inner_width();
    let top = margin.top;
    let bottom = margin.top + chart.inner_height();

    if spec.horizontal {
        for tick in chart.y_scale().ticks(spec.line_count) {
            let y = margin.top + chart.y_scale().apply(tick);
            frame.push_line(
                Plane::Base,
                LinePrimitive::new(left, y, right, y, 1.0, spec.color),
            );
        }
    }
    if spec.vertical {
        for point in chart.data() {
            let x = margin.left + chart.x_scale().apply(point.x());
            frame.push_line(
                Plane::Base,
                LinePrimitive::new(x, top, x, bottom, 1.0, spec.color),
            );
        }
    }
}

fn build_axis(chart: &CartesianChart, spec: &AxisSpec, frame: &mut LayeredFrame) {
    let margin = chart.margin();
    match spec.orientation {
        AxisOrientation::Bottom => {
            let labels = chart.date_labels();
            if labels.is_empty() || spec.label_count == 0 {
                return;
            }
            // Thin labels to at most label_count, always keeping the first.
            let step = labels.len().div_ceil(spec.label_count).max(1);
            let y = margin.top + chart.inner_height() + AXIS_TICK_GAP + AXIS_TEXT_SIZE;
            for (index, label) in labels.iter().enumerate().step_by(step) {
                if label.is_empty() {
                    continue;
                }
                let x = margin.left + chart.x_scale().apply(chart.data()[index].x());
                frame.push_text(
                    Plane::Base,
                    TextPrimitive {
                        x,
                        y,
                        text: label.clone(),
                        size: AXIS_TEXT_SIZE,
                        color: spec.color,
                        h_align: TextHAlign::Center,
                    },
                );
            }
        }
        AxisOrientation::Left => {
            let x = margin.left - AXIS_TICK_GAP;
            for tick in chart.y_scale().ticks(spec.label_count) {
                let y = margin.top + chart.y_scale().apply(tick) + AXIS_TEXT_SIZE / 2.0;
                frame.push_text(
                    Plane::Base,
                    TextPrimitive {
                        x,
                        y,
                        text: format_value(tick),
                        size: AXIS_TEXT_SIZE,
                        color: spec.color,
                        h_align: TextHAlign::Right,
                    },
                );
            }
        }
    }
}

fn build_legend(chart: &CartesianChart, spec: &LegendSpec, frame: &mut LayeredFrame) {
    let Some(last) = chart.data().last() else {
        return;
    };
    let total: f64 = chart
        .series()
        .iter()
        .filter_map(|series| last.field(&series.key))
        .sum();
    for series in chart.series() {
        let value = last.field(&series.key).unwrap_or(0.0);
        frame.legend.push(LegendRow {
            label: series.key.clone(),
            color: series.color,
            value: format_value(value),
            progress: (spec.show_progress && total > 0.0).then(|| value / total),
        });
    }
}

fn series_stroke_paint(spec_color: Color, fade_edges: bool) -> Paint {
    if !fade_edges {
        return Paint::Solid(spec_color);
    }
    // Soft fade into the plot edges so truncated series do not end abruptly.
    Paint::LinearGradient {
        direction: GradientDirection::Horizontal,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: spec_color,
                opacity: 0.0,
            },
            GradientStop {
                offset: 0.15,
                color: spec_color,
                opacity: 1.0,
            },
            GradientStop {
                offset: 0.85,
                color: spec_color,
                opacity: 1.0,
            },
            GradientStop {
                offset: 1.0,
                color: spec_color,
                opacity: 0.0,
            },
        ],
    }
}

fn build_area(chart: &CartesianChart, spec: &AreaSpec, series_index: usize, frame: &mut LayeredFrame) {
    let points = plot_points(chart, &spec.data_key);
    if points.len() < 2 {
        return;
    }
    let clip = spec.animate.then(|| entrance_clip(chart, series_index)).flatten();
    let baseline = chart.margin().top + chart.inner_height();

    let fill = Paint::LinearGradient {
        direction: GradientDirection::Vertical,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: spec.fill,
                opacity: spec.fill_opacity,
            },
            GradientStop {
                offset: 1.0,
                color: spec.fill,
                opacity: spec.gradient_to_opacity,
            },
        ],
    };
    let mut body = PathPrimitive::filled(area_path(&points, spec.curve, baseline), fill);
    body.clip = clip;
    frame.push_path(Plane::Series, body);

    if spec.show_line {
        let stroke_color = spec.stroke.unwrap_or(spec.fill);
        let mut line = PathPrimitive::stroked(
            line_path(&points, spec.curve),
            Stroke {
                paint: series_stroke_paint(stroke_color, spec.fade_edges),
                width: spec.stroke_width,
                dash: None,
                line_cap: LineCap::Round,
            },
        );
        line.clip = clip;
        frame.push_path(Plane::Series, line);
    }

    if spec.show_highlight {
        build_highlight(chart, &spec.data_key, spec.stroke.unwrap_or(spec.fill), spec.stroke_width, spec.curve, frame);
    }
}

fn build_line(chart: &CartesianChart, spec: &LineSpec, series_index: usize, frame: &mut LayeredFrame) {
    let points = plot_points(chart, &spec.data_key);
    if points.len() < 2 {
        return;
    }
    let clip = spec.animate.then(|| entrance_clip(chart, series_index)).flatten();

    let mut line = PathPrimitive::stroked(
        line_path(&points, spec.curve),
        Stroke::solid(spec.stroke, spec.stroke_width),
    );
    line.clip = clip;
    frame.push_path(Plane::Series, line);

    if spec.show_points {
        for &(x, y) in &points {
            frame.push_circle(
                Plane::Series,
                CirclePrimitive {
                    cx: x,
                    cy: y,
                    radius: 3.0,
                    fill: spec.stroke,
                    stroke: None,
                    opacity: 1.0,
                },
            );
        }
    }

    if spec.show_highlight {
        build_highlight(chart, &spec.data_key, spec.stroke, spec.stroke_width, spec.curve, frame);
    }
}

/// Hover highlight: one dash covering the segment around the hovered point,
/// slid into place by its offset spring.
fn build_highlight(
    chart: &CartesianChart,
    key: &str,
    color: Color,
    stroke_width: f64,
    curve: crate::core::curve::CurveKind,
    frame: &mut LayeredFrame,
) {
    let Some((dash_length, total_length, offset)) = chart.highlight_dash(key) else {
        return;
    };
    if dash_length <= 0.0 || total_length <= 0.0 {
        return;
    }
    let points = plot_points(chart, key);
    let mut highlight = PathPrimitive::stroked(
        line_path(&points, curve),
        Stroke {
            paint: Paint::Solid(color),
            width: stroke_width + 1.0,
            dash: Some(DashPattern {
                dash_length,
                gap_length: total_length,
                offset,
            }),
            line_cap: LineCap::Round,
        },
    );
    highlight.glow = Some(color);
    frame.push_path(Plane::Series, highlight);
}

fn build_bars(chart: &CartesianChart, spec: &BarSpec, series_index: usize, frame: &mut LayeredFrame) {
    let margin = chart.margin();
    let bottom = margin.top + chart.inner_height();
    let column = if chart.column_width() > 0.0 {
        chart.column_width()
    } else {
        chart.inner_width()
    };
    let width = (column * spec.width_ratio).max(1.0);
    let progress = if spec.animate {
        chart.entrance_progress(series_index)
    } else {
        1.0
    };

    for point in chart.data() {
        let Some(value) = point.field(&spec.data_key) else {
            continue;
        };
        let x = margin.left + chart.x_scale().apply(point.x()) - width / 2.0;
        let top = margin.top + chart.y_scale().apply(value);
        let height = ((bottom - top) * progress).max(0.0);
        frame.push_rect(
            Plane::Series,
            RectPrimitive {
                x,
                y: bottom - height,
                width,
                height,
                corner_radius: spec.corner_radius.min(width / 2.0),
                fill: Paint::Solid(spec.fill),
                opacity: 1.0,
            },
        );
    }
}

fn build_tooltip(chart: &CartesianChart, spec: &TooltipSpec, frame: &mut LayeredFrame) {
    let Some(state) = chart.tooltip() else {
        return;
    };
    let margin = chart.margin();
    let x = margin.left + state.x;

    // Crosshair under the active dots.
    frame.push_line(
        Plane::Overlay,
        LinePrimitive {
            x1: x,
            y1: margin.top,
            x2: x,
            y2: margin.top + chart.inner_height(),
            stroke_width: 1.0,
            color: Color::rgba(0.5, 0.5, 0.5, 0.5),
            dash: Some(DashPattern {
                dash_length: 4.0,
                gap_length: 4.0,
                offset: 0.0,
            }),
            opacity: 1.0,
        },
    );

    let mut anchor_y = margin.top + chart.inner_height();
    for series in chart.series() {
        let Some(&y) = state.series_y.get(&series.key) else {
            continue;
        };
        let cy = margin.top + y;
        anchor_y = anchor_y.min(cy);
        frame.push_circle(
            Plane::Overlay,
            CirclePrimitive {
                cx: x,
                cy,
                radius: ACTIVE_DOT_RADIUS,
                fill: series.color,
                stroke: Some((Color::rgb(1.0, 1.0, 1.0), 1.5)),
                opacity: 1.0,
            },
        );
    }

    let rows = (spec.rows)(&chart.data()[state.index]);
    if !rows.is_empty() {
        frame.tooltip = Some(TooltipBox {
            x,
            y: anchor_y,
            rows,
        });
    }
}

fn build_markers(chart: &CartesianChart, spec: &MarkerSetSpec, frame: &mut LayeredFrame) {
    let margin = chart.margin();
    let anchor_y = margin.top + chart.inner_height();

    for (group_index, group) in chart.marker_groups().iter().enumerate() {
        let anchor_x = margin.left + group.x;
        let hovered = chart.hovered_marker_group() == Some(group_index);
        let first = &spec.items[group.members[0]];
        let color = first.color.unwrap_or(DEFAULT_MARKER_COLOR);

        frame.push_circle(
            Plane::Overlay,
            CirclePrimitive {
                cx: anchor_x,
                cy: anchor_y,
                radius: spec.size / 2.0,
                fill: color,
                stroke: Some((Color::rgb(1.0, 1.0, 1.0), 2.0)),
                opacity: 1.0,
            },
        );
        frame.push_text(
            Plane::Overlay,
            TextPrimitive {
                x: anchor_x,
                y: anchor_y + AXIS_TEXT_SIZE / 2.0,
                text: first.icon.clone(),
                size: spec.size * 0.5,
                color: Color::rgb(1.0, 1.0, 1.0),
                h_align: TextHAlign::Center,
            },
        );

        if let Some(count) = group.badge_count() {
            let badge_x = anchor_x + spec.size / 2.0;
            let badge_y = anchor_y - spec.size / 2.0;
            frame.push_circle(
                Plane::Overlay,
                CirclePrimitive {
                    cx: badge_x,
                    cy: badge_y,
                    radius: MARKER_BADGE_SIZE / 2.0 + 2.0,
                    fill: Color::rgb(0.85, 0.33, 0.31),
                    stroke: None,
                    opacity: 1.0,
                },
            );
            frame.push_text(
                Plane::Overlay,
                TextPrimitive {
                    x: badge_x,
                    y: badge_y + MARKER_BADGE_SIZE / 2.0 - 1.0,
                    text: count.to_string(),
                    size: MARKER_BADGE_SIZE,
                    color: Color::rgb(1.0, 1.0, 1.0),
                    h_align: TextHAlign::Center,
                },
            );
        }

        if hovered && group.members.len() > 1 {
            // Fan the co-located members out around the anchor.
            for (offset, &member) in spec.fan.positions(group.members.len()).iter().zip(&group.members) {
                let marker = &spec.items[member];
                let cx = anchor_x + offset.0;
                let cy = anchor_y + offset.1;
                frame.push_circle(
                    Plane::Overlay,
                    CirclePrimitive {
                        cx,
                        cy,
                        radius: spec.size / 2.0,
                        fill: marker.color.unwrap_or(DEFAULT_MARKER_COLOR),
                        stroke: Some((Color::rgb(1.0, 1.0, 1.0), 2.0)),
                        opacity: 1.0,
                    },
                );
                frame.push_text(
                    Plane::Overlay,
                    TextPrimitive {
                        x: cx,
                        y: cy + AXIS_TEXT_SIZE / 2.0,
                        text: marker.icon.clone(),
                        size: spec.size * 0.5,
                        color: Color::rgb(1.0, 1.0, 1.0),
                        h_align: TextHAlign::Center,
                    },
                );
            }
        } else if hovered {
            frame.push_text(
                Plane::Overlay,
                TextPrimitive {
                    x: anchor_x,
                    y: anchor_y - spec.size,
                    text: first.title.clone(),
                    size: AXIS_TEXT_SIZE,
                    color: Color::rgb(0.9, 0.9, 0.9),
                    h_align: TextHAlign::Center,
                },
            );
        }
    }
}

fn format_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
