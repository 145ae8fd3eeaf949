use std::f64::consts::PI;

use approx::assert_relative_eq;
use glyph_charts::api::{RadarChart, RadarChartConfig, RadarMetric, RadarSeries};
use glyph_charts::composition::{ChartChild, RadarAreaSpec, RadarAxisSpec, RadarGridSpec};
use glyph_charts::core::Viewport;

fn metrics() -> Vec<RadarMetric> {
    vec![
        RadarMetric::new("speed", "Speed"),
        RadarMetric::new("power", "Power"),
        RadarMetric::new("range", "Range"),
    ]
}

fn radar(series: Vec<RadarSeries>, children: Vec<ChartChild>) -> RadarChart {
    RadarChart::new(
        metrics(),
        series,
        children,
        Viewport::new(300, 300),
        RadarChartConfig::default(),
    )
    .expect("radar init")
}

#[test]
fn spokes_start_at_twelve_oclock_and_divide_evenly() {
    let chart = radar(vec![RadarSeries::new("a", vec![50.0, 50.0, 50.0])], Vec::new());
    let scale = chart.scale();
    assert_relative_eq!(scale.angle(0), -PI / 2.0, epsilon = 1e-12);
    assert_relative_eq!(scale.angle(1), -PI / 2.0 + 2.0 * PI / 3.0, epsilon = 1e-12);
    assert_relative_eq!(scale.radius(), 90.0, epsilon = 1e-9);
}

#[test]
fn mismatched_row_length_is_rejected() {
    let result = RadarChart::new(
        metrics(),
        vec![RadarSeries::new("short", vec![10.0, 20.0])],
        Vec::new(),
        Viewport::new(300, 300),
        RadarChartConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn vertices_spring_out_from_the_center() {
    let mut chart = radar(vec![RadarSeries::new("a", vec![80.0, 60.0, 40.0])], Vec::new());

    for point in chart.series_points(0) {
        assert_relative_eq!(point.0, 0.0, epsilon = 1e-9);
        assert_relative_eq!(point.1, 0.0, epsilon = 1e-9);
    }

    chart.tick(6.0);
    let points = chart.series_points(0);
    assert_relative_eq!(points[0].0, 0.0, epsilon = 1e-6);
    assert_relative_eq!(points[0].1, -72.0, epsilon = 1e-6);
}

#[test]
fn values_above_the_domain_clamp_to_the_rim() {
    let mut chart = radar(vec![RadarSeries::new("a", vec![500.0, 50.0, 50.0])], Vec::new());
    chart.tick(6.0);
    let points = chart.series_points(0);
    let radius = (points[0].0.powi(2) + points[0].1.powi(2)).sqrt();
    assert_relative_eq!(radius, 90.0, epsilon = 1e-6);
}

#[test]
fn hit_test_finds_the_polygon_under_the_pointer() {
    let children = vec![ChartChild::RadarArea(RadarAreaSpec::new(0))];
    let mut chart = radar(vec![RadarSeries::new("a", vec![80.0, 80.0, 80.0])], children);
    chart.tick(6.0);

    assert_eq!(chart.hit_test(150.0, 150.0), Some(0));
    assert_eq!(chart.hit_test(10.0, 10.0), None);
}

#[test]
fn topmost_declared_polygon_wins_overlapping_hits() {
    let children = vec![
        ChartChild::RadarArea(RadarAreaSpec::new(0)),
        ChartChild::RadarArea(RadarAreaSpec::new(1)),
    ];
    let series = vec![
        RadarSeries::new("big", vec![90.0, 90.0, 90.0]),
        RadarSeries::new("small", vec![40.0, 40.0, 40.0]),
    ];
    let mut chart = radar(series, children);
    chart.tick(6.0);

    // Near the center both polygons overlap; the later declaration is on top.
    assert_eq!(chart.hit_test(150.0, 150.0), Some(1));
}

#[test]
fn hover_fades_the_other_series() {
    let series = vec![
        RadarSeries::new("a", vec![50.0, 50.0, 50.0]),
        RadarSeries::new("b", vec![70.0, 70.0, 70.0]),
    ];
    let mut chart = radar(series, Vec::new());
    chart.tick(6.0);

    assert!(chart.set_hovered_index(Some(0)));
    assert!(chart.series_interaction(0).is_hovered);
    assert!(chart.series_interaction(1).is_faded);

    chart.tick(2.0);
    assert_relative_eq!(chart.series_opacity(0), 1.0, epsilon = 1e-3);
    assert_relative_eq!(chart.series_opacity(1), 0.3, epsilon = 1e-3);
}

#[test]
fn hover_is_gated_until_the_entrance_completes() {
    let mut chart = radar(vec![RadarSeries::new("a", vec![50.0, 50.0, 50.0])], Vec::new());
    assert!(!chart.set_hovered_index(Some(0)));
    chart.tick(6.0);
    assert!(chart.set_hovered_index(Some(0)));
}

#[test]
fn grid_rings_enter_before_series_polygons() {
    let children = vec![
        ChartChild::RadarGrid(RadarGridSpec::default()),
        ChartChild::RadarAxis(RadarAxisSpec::default()),
        ChartChild::RadarArea(RadarAreaSpec::new(0)),
    ];
    let mut chart = radar(vec![RadarSeries::new("a", vec![80.0, 80.0, 80.0])], children);

    // 0.2s in: the first ring moves, the series vertices still wait
    // behind the grid and axis delays.
    for _ in 0..12 {
        chart.tick(1.0 / 60.0);
    }
    assert!(chart.grid_level_progress(0) > 0.0);
    assert_eq!(chart.vertex_progress(0, 0), 0.0);
}
