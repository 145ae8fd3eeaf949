use approx::assert_relative_eq;
use glyph_charts::api::{CartesianChart, CartesianChartConfig};
use glyph_charts::composition::{
    AreaSpec, AxisSpec, ChartChild, GridSpec, LegendSpec, MarkerSetSpec, TooltipRow, TooltipSpec,
};
use glyph_charts::core::{SeriesPoint, Viewport};
use glyph_charts::extensions::ChartMarker;
use glyph_charts::render::Color;
use serde_json::json;

const BLUE: Color = Color::rgb(0.38, 0.65, 0.98);

fn revenue_data() -> Vec<SeriesPoint> {
    (0..5)
        .map(|i| SeriesPoint::new(i as f64).with_field("revenue", (i + 1) as f64 * 10.0))
        .collect()
}

fn tooltip_rows(point: &SeriesPoint) -> Vec<TooltipRow> {
    point
        .field("revenue")
        .map(|value| {
            vec![TooltipRow {
                color: BLUE,
                label: "Revenue".to_owned(),
                value: format!("{value:.0}"),
            }]
        })
        .unwrap_or_default()
}

fn revenue_chart() -> CartesianChart {
    let children = vec![
        ChartChild::Grid(GridSpec::default()),
        ChartChild::Axis(AxisSpec::bottom()),
        ChartChild::Area(AreaSpec::new("revenue", BLUE)),
        ChartChild::Legend(LegendSpec {
            show_progress: true,
        }),
        ChartChild::Tooltip(TooltipSpec { rows: tooltip_rows }),
    ];
    CartesianChart::new(
        revenue_data(),
        children,
        Viewport::new(500, 400),
        CartesianChartConfig::default(),
    )
    .expect("chart init")
}

#[test]
fn value_domain_gets_ten_percent_headroom() {
    let chart = revenue_chart();
    let (start, end) = chart.y_scale().domain();
    assert_eq!(start, 0.0);
    assert_relative_eq!(end, 55.0, epsilon = 1e-9);
}

#[test]
fn time_domain_fits_the_data_exactly() {
    let chart = revenue_chart();
    assert_eq!(chart.x_scale().domain(), (0.0, 4.0));
    assert_relative_eq!(chart.inner_width(), 420.0);
    assert_relative_eq!(chart.inner_height(), 320.0);
}

#[test]
fn column_width_divides_the_inner_width() {
    let chart = revenue_chart();
    assert_relative_eq!(chart.column_width(), 105.0, epsilon = 1e-9);
}

#[test]
fn hover_selects_the_nearest_point_and_maps_each_series() {
    let mut chart = revenue_chart();
    chart.tick(1.2);
    assert!(chart.can_interact());

    // Viewport x 250 is plot x 210, exactly the third point.
    assert!(chart.on_pointer_move(250.0, 100.0));
    let tooltip = chart.tooltip().expect("hover sets tooltip state");
    assert_eq!(tooltip.index, 2);
    assert_relative_eq!(tooltip.x, 210.0, epsilon = 1e-9);

    let y = tooltip.series_y["revenue"];
    assert_relative_eq!(y, 320.0 - 30.0 / 55.0 * 320.0, epsilon = 1e-6);
}

#[test]
fn hover_between_points_snaps_to_the_closer_one() {
    let mut chart = revenue_chart();
    chart.tick(1.2);

    // Plot x 200 maps to domain 1.905, closest to index 2.
    assert!(chart.on_pointer_move(240.0, 50.0));
    assert_eq!(chart.tooltip().expect("tooltip").index, 2);
}

#[test]
fn repeated_hover_on_the_same_point_reports_no_change() {
    let mut chart = revenue_chart();
    chart.tick(1.2);
    assert!(chart.on_pointer_move(250.0, 100.0));
    assert!(!chart.on_pointer_move(251.0, 120.0));
}

#[test]
fn pointer_leave_clears_hover_state() {
    let mut chart = revenue_chart();
    chart.tick(1.2);
    chart.on_pointer_move(250.0, 100.0);
    chart.on_pointer_leave();
    assert!(chart.tooltip().is_none());
}

#[test]
fn hover_exposes_a_highlight_segment() {
    let mut chart = revenue_chart();
    chart.tick(1.2);
    chart.on_pointer_move(250.0, 100.0);

    let (dash_length, total_length, _offset) =
        chart.highlight_dash("revenue").expect("hover highlight");
    assert!(dash_length > 0.0);
    assert!(total_length >= dash_length);
}

#[test]
fn set_data_refits_scales_and_clears_hover() {
    let mut chart = revenue_chart();
    chart.tick(1.2);
    chart.on_pointer_move(250.0, 100.0);

    let data: Vec<SeriesPoint> = (0..3)
        .map(|i| SeriesPoint::new(i as f64).with_field("revenue", 200.0))
        .collect();
    chart.set_data(data).expect("set data");

    assert!(chart.tooltip().is_none());
    assert_relative_eq!(chart.y_scale().domain().1, 220.0, epsilon = 1e-9);
    assert_eq!(chart.x_scale().domain(), (0.0, 2.0));
}

#[test]
fn resize_rejects_an_empty_viewport() {
    let mut chart = revenue_chart();
    assert!(chart.resize(Viewport::new(0, 400)).is_err());
    assert!(chart.resize(Viewport::new(800, 600)).is_ok());
    assert_relative_eq!(chart.inner_width(), 720.0);
}

#[test]
fn records_parse_dates_and_numeric_fields() {
    let records = vec![
        json!({"date": "2024-03-01T00:00:00Z", "revenue": 12.5, "note": "ignored"}),
        json!({"date": "2024-03-02T00:00:00Z", "revenue": 14.0}),
    ];
    let points =
        CartesianChart::records_to_points(&records, "date").expect("records parse");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].field("revenue"), Some(12.5));
    assert_eq!(points[0].field("note"), None);
    assert!(points[1].x() > points[0].x());
}

#[test]
fn records_missing_the_x_key_are_rejected() {
    let records = vec![json!({"revenue": 12.5})];
    assert!(CartesianChart::records_to_points(&records, "date").is_err());
}

#[test]
fn duplicate_series_children_fail_construction() {
    let children = vec![
        ChartChild::Area(AreaSpec::new("revenue", BLUE)),
        ChartChild::Area(AreaSpec::new("revenue", BLUE)),
    ];
    let result = CartesianChart::new(
        revenue_data(),
        children,
        Viewport::new(500, 400),
        CartesianChartConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn second_marker_set_fails_construction() {
    // Grouping and hover state track one marker list, so a second set with
    // a different item count must be rejected up front, not at render time.
    let children = vec![
        ChartChild::Area(AreaSpec::new("revenue", BLUE)),
        ChartChild::Markers(MarkerSetSpec::new(vec![
            ChartMarker::new(1.0, "rocket", "Launch"),
            ChartMarker::new(3.0, "flag", "Milestone"),
        ])),
        ChartChild::Markers(MarkerSetSpec::new(Vec::new())),
    ];
    let error = CartesianChart::new(
        revenue_data(),
        children,
        Viewport::new(500, 400),
        CartesianChartConfig::default(),
    )
    .expect_err("second marker set rejected");
    assert!(error.to_string().contains("Markers"));
}
