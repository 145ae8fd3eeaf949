use glyph_charts::api::{
    CartesianChart, CartesianChartConfig, ChartPhase, Lifecycle, PieChart, PieChartConfig,
    PieDatum,
};
use glyph_charts::composition::{AreaSpec, ChartChild};
use glyph_charts::core::{SeriesPoint, Viewport};
use glyph_charts::render::Color;

fn quick_chart() -> CartesianChart {
    let data: Vec<SeriesPoint> = (0..4)
        .map(|i| SeriesPoint::new(i as f64).with_field("value", 10.0))
        .collect();
    let children = vec![ChartChild::Area(AreaSpec::new(
        "value",
        Color::rgb(0.4, 0.6, 1.0),
    ))];
    CartesianChart::new(
        data,
        children,
        Viewport::new(400, 300),
        CartesianChartConfig::default(),
    )
    .expect("chart init")
}

#[test]
fn lifecycle_promotes_only_after_the_entrance_window() {
    let mut lifecycle = Lifecycle::new(1.1);
    assert_eq!(lifecycle.phase(), ChartPhase::Unmounted);
    assert!(!lifecycle.can_interact());

    lifecycle.mount();
    assert_eq!(lifecycle.phase(), ChartPhase::Mounting);

    lifecycle.tick(0.5);
    assert!(!lifecycle.is_loaded());
    assert!(lifecycle.entrance_progress() > 0.0);

    lifecycle.tick(0.7);
    assert_eq!(lifecycle.phase(), ChartPhase::Ready);
    assert!(lifecycle.can_interact());
    assert_eq!(lifecycle.entrance_progress(), 1.0);
}

#[test]
fn zero_duration_entrance_is_ready_after_one_tick() {
    let mut lifecycle = Lifecycle::new(0.0);
    lifecycle.mount();
    lifecycle.tick(1.0 / 60.0);
    assert!(lifecycle.is_loaded());
}

#[test]
fn pointer_events_are_ignored_while_mounting() {
    let mut chart = quick_chart();
    assert!(!chart.can_interact());
    assert!(!chart.on_pointer_move(200.0, 150.0));
    assert!(chart.tooltip().is_none());
}

#[test]
fn pointer_events_work_once_the_entrance_completes() {
    let mut chart = quick_chart();
    chart.tick(0.5);
    assert!(!chart.on_pointer_move(200.0, 150.0));

    chart.tick(0.7);
    assert!(chart.can_interact());
    assert!(chart.on_pointer_move(200.0, 150.0));
    assert!(chart.tooltip().is_some());
}

#[test]
fn pie_hover_is_gated_until_ready() {
    let data = vec![PieDatum::new("a", 1.0), PieDatum::new("b", 1.0)];
    let mut pie = PieChart::new(
        data,
        Vec::new(),
        Viewport::new(300, 300),
        PieChartConfig::default(),
    )
    .expect("pie init");

    assert!(!pie.set_hovered_index(Some(0)));
    assert_eq!(pie.hovered_index(), None);

    pie.tick(1.2);
    assert!(pie.set_hovered_index(Some(0)));
    assert_eq!(pie.hovered_index(), Some(0));
}

#[test]
fn unmount_cancels_interaction_and_animation() {
    let mut chart = quick_chart();
    chart.tick(1.2);
    chart.on_pointer_move(200.0, 150.0);
    chart.unmount();
    assert!(!chart.can_interact());
    assert!(chart.tooltip().is_none());
    assert!(!chart.on_pointer_move(200.0, 150.0));
}

#[test]
fn entrance_progress_reports_fully_revealed_once_ready() {
    let mut chart = quick_chart();
    chart.tick(5.0);
    assert_eq!(chart.entrance_progress(0), 1.0);
}
