use glyph_charts::composition::{
    AreaSpec, AxisSpec, BarSpec, ChartChild, ChartFamily, ChildKind, GridSpec, LegendSpec,
    LineSpec, PieCenterSpec, PieSliceSpec, RadarAreaSpec, classify, series_configs,
    validate_family,
};
use glyph_charts::render::Color;

fn sample_children() -> Vec<ChartChild> {
    vec![
        ChartChild::Grid(GridSpec::default()),
        ChartChild::Area(AreaSpec::new("revenue", Color::rgb(0.4, 0.6, 1.0))),
        ChartChild::Axis(AxisSpec::bottom()),
        ChartChild::Line(LineSpec::new("cost", Color::rgb(0.9, 0.4, 0.4))),
        ChartChild::Legend(LegendSpec::default()),
    ]
}

#[test]
fn classification_partitions_by_declared_kind() {
    let plan = classify(&sample_children());
    assert_eq!(plan.base, vec![0, 2, 4]);
    assert_eq!(plan.series, vec![1, 3]);
    assert!(plan.overlay.is_empty());
    assert!(plan.center.is_empty());
}

#[test]
fn classification_is_idempotent() {
    let children = sample_children();
    let first = classify(&children);
    let second = classify(&children);
    assert_eq!(first, second);
}

#[test]
fn child_kinds_are_explicit_tags() {
    assert_eq!(
        ChartChild::PieSlice(PieSliceSpec::new(0)).kind(),
        ChildKind::Series
    );
    assert_eq!(
        ChartChild::PieCenter(PieCenterSpec::default()).kind(),
        ChildKind::CenterContent
    );
    assert_eq!(
        ChartChild::Grid(GridSpec::default()).kind(),
        ChildKind::BaseDecoration
    );
}

#[test]
fn wrong_family_children_are_rejected_loudly() {
    let children = vec![ChartChild::PieSlice(PieSliceSpec::new(0))];
    let error = validate_family(&children, ChartFamily::Cartesian)
        .expect_err("pie slice on a cartesian root must fail");
    assert!(error.to_string().contains("PieSlice"));

    let children = vec![ChartChild::RadarArea(RadarAreaSpec::new(0))];
    assert!(validate_family(&children, ChartFamily::Pie).is_err());
}

#[test]
fn legend_attaches_to_any_family() {
    let children = vec![ChartChild::Legend(LegendSpec::default())];
    assert!(validate_family(&children, ChartFamily::Cartesian).is_ok());
    assert!(validate_family(&children, ChartFamily::Pie).is_ok());
    assert!(validate_family(&children, ChartFamily::Radar).is_ok());
}

#[test]
fn series_configs_derive_in_declaration_order() {
    let configs = series_configs(&sample_children()).expect("valid configuration");
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].key, "revenue");
    assert_eq!(configs[1].key, "cost");
}

#[test]
fn area_series_color_prefers_stroke_over_fill() {
    let fill = Color::rgb(0.1, 0.2, 0.3);
    let stroke = Color::rgb(0.9, 0.8, 0.7);
    let children = vec![ChartChild::Area(
        AreaSpec::new("revenue", fill).with_stroke(stroke, 3.0),
    )];
    let configs = series_configs(&children).expect("valid configuration");
    assert_eq!(configs[0].color, stroke);
    assert_eq!(configs[0].stroke_width, 3.0);
}

#[test]
fn duplicate_series_keys_are_a_configuration_error() {
    let children = vec![
        ChartChild::Area(AreaSpec::new("revenue", Color::rgb(0.4, 0.6, 1.0))),
        ChartChild::Bar(BarSpec::new("revenue", Color::rgb(0.2, 0.8, 0.6))),
    ];
    let error = series_configs(&children).expect_err("duplicate key must fail");
    assert!(error.to_string().contains("revenue"));
}
