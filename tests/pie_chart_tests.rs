use std::f64::consts::PI;

use approx::assert_relative_eq;
use glyph_charts::api::{PieChart, PieChartConfig, PieDatum};
use glyph_charts::composition::{ChartChild, PieCenterSpec, PieSliceSpec, SliceHoverEffect};
use glyph_charts::core::Viewport;
use glyph_charts::render::Color;

fn equal_slices(count: usize) -> Vec<PieDatum> {
    (0..count)
        .map(|i| PieDatum::new(format!("slice-{i}"), 25.0))
        .collect()
}

fn pie(data: Vec<PieDatum>, children: Vec<ChartChild>) -> PieChart {
    PieChart::new(
        data,
        children,
        Viewport::new(300, 300),
        PieChartConfig::default(),
    )
    .expect("pie init")
}

#[test]
fn arcs_preserve_input_order_and_cover_the_window() {
    let chart = pie(
        vec![
            PieDatum::new("ops", 30.0),
            PieDatum::new("dev", 20.0),
            PieDatum::new("infra", 50.0),
        ],
        Vec::new(),
    );
    let arcs = chart.arcs();

    assert_eq!(arcs[0].label, "ops");
    assert_eq!(arcs[1].label, "dev");
    assert_eq!(arcs[2].label, "infra");

    assert_relative_eq!(arcs[0].fraction, 0.3, epsilon = 1e-9);
    assert_relative_eq!(arcs[0].sector.start_angle, -PI / 2.0, epsilon = 1e-9);
    assert_relative_eq!(
        arcs[0].sector.end_angle,
        -PI / 2.0 + 0.3 * 2.0 * PI,
        epsilon = 1e-9
    );
    // Adjacent slices share a boundary and the last closes the window.
    assert_relative_eq!(
        arcs[1].sector.start_angle,
        arcs[0].sector.end_angle,
        epsilon = 1e-9
    );
    assert_relative_eq!(arcs[2].sector.end_angle, 3.0 * PI / 2.0, epsilon = 1e-9);
}

#[test]
fn negative_values_are_rejected() {
    let result = PieChart::new(
        vec![PieDatum::new("bad", -5.0)],
        Vec::new(),
        Viewport::new(300, 300),
        PieChartConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn outer_radius_leaves_room_for_the_hover_offset() {
    let chart = pie(equal_slices(4), Vec::new());
    assert_relative_eq!(chart.outer_radius(), 138.0, epsilon = 1e-9);
    assert_eq!(chart.center(), (150.0, 150.0));
}

#[test]
fn hit_test_resolves_pointer_to_slice() {
    let chart = pie(equal_slices(4), Vec::new());
    // Upper-left quadrant: first slice of a window starting at 9 o'clock.
    assert_eq!(chart.hit_test(80.0, 80.0), Some(0));
    // Outside the outer radius.
    assert_eq!(chart.hit_test(1.0, 1.0), None);
}

#[test]
fn hit_region_ignores_hover_animation() {
    let mut chart = pie(equal_slices(4), Vec::new());
    chart.tick(2.0);
    let before = chart.hit_test(80.0, 80.0);
    chart.set_hovered_index(Some(0));
    chart.tick(0.5);
    assert_eq!(chart.hit_test(80.0, 80.0), before);
}

#[test]
fn at_most_one_slice_is_hovered() {
    let mut chart = pie(equal_slices(6), Vec::new());
    chart.tick(2.0);

    assert!(chart.set_hovered_index(Some(2)));
    assert!(chart.set_hovered_index(Some(4)));

    for index in 0..6 {
        let state = chart.slice_state(index).expect("slice exists");
        assert_eq!(state.interaction.is_hovered, index == 4);
        assert_eq!(state.interaction.is_faded, index != 4);
    }
}

#[test]
fn non_hovered_slices_fade_toward_forty_percent() {
    let mut chart = pie(equal_slices(3), Vec::new());
    chart.tick(2.0);
    chart.set_hovered_index(Some(0));
    chart.tick(2.0);

    let hovered = chart.slice_state(0).expect("slice exists");
    let faded = chart.slice_state(1).expect("slice exists");
    assert_relative_eq!(hovered.opacity, 1.0, epsilon = 1e-3);
    assert_relative_eq!(faded.opacity, 0.4, epsilon = 1e-3);
}

#[test]
fn translate_effect_offsets_along_the_mid_angle() {
    let mut chart = pie(equal_slices(4), Vec::new());
    chart.tick(2.0);
    chart.set_hovered_index(Some(1));
    chart.tick(2.0);

    let state = chart.slice_state(1).expect("slice exists");
    let magnitude = (state.offset.0.powi(2) + state.offset.1.powi(2)).sqrt();
    assert_relative_eq!(magnitude, 10.0, epsilon = 1e-2);
    assert_relative_eq!(state.radius_growth, 0.0, epsilon = 1e-6);
}

#[test]
fn grow_effect_extends_the_outer_radius_instead() {
    let children = vec![ChartChild::PieSlice(PieSliceSpec {
        hover_effect: SliceHoverEffect::Grow,
        ..PieSliceSpec::new(1)
    })];
    let mut chart = pie(equal_slices(4), children);
    chart.tick(2.0);
    chart.set_hovered_index(Some(1));
    chart.tick(2.0);

    let state = chart.slice_state(1).expect("slice exists");
    assert_relative_eq!(state.radius_growth, 10.0, epsilon = 1e-2);
    assert_relative_eq!(state.offset.0, 0.0, epsilon = 1e-6);
    assert_relative_eq!(state.offset.1, 0.0, epsilon = 1e-6);
}

#[test]
fn pointer_leave_restores_every_slice() {
    let mut chart = pie(equal_slices(3), Vec::new());
    chart.tick(2.0);
    chart.set_hovered_index(Some(1));
    chart.tick(1.0);
    chart.on_pointer_leave();
    chart.tick(2.0);

    for index in 0..3 {
        let state = chart.slice_state(index).expect("slice exists");
        assert!(!state.interaction.is_hovered);
        assert!(!state.interaction.is_faded);
        assert_relative_eq!(state.opacity, 1.0, epsilon = 1e-3);
    }
}

#[test]
fn slices_enter_staggered_from_zero_scale() {
    let mut chart = pie(equal_slices(3), Vec::new());
    assert_eq!(
        chart.slice_state(0).expect("slice exists").entrance_scale,
        0.0
    );

    // 0.15s: the first slice (0.1s delay) has started, the last has not.
    for _ in 0..9 {
        chart.tick(1.0 / 60.0);
    }
    assert!(chart.slice_state(0).expect("slice exists").entrance_scale > 0.0);
    assert_eq!(
        chart.slice_state(2).expect("slice exists").entrance_scale,
        0.0
    );

    chart.tick(4.0);
    assert!(chart.slice_state(2).expect("slice exists").entrance_scale > 0.99);
}

#[test]
fn center_summary_follows_the_hovered_slice() {
    let children = vec![ChartChild::PieCenter(PieCenterSpec {
        label: Some("Total".to_owned()),
        follow_hover: true,
    })];
    let mut chart = pie(
        vec![PieDatum::new("ops", 30.0), PieDatum::new("dev", 70.0)],
        children,
    );

    let summary = chart.center_summary().expect("center child present");
    assert_eq!(summary.label, "Total");
    assert_relative_eq!(summary.value, 100.0);
    assert_relative_eq!(summary.fraction, 1.0);

    chart.tick(2.0);
    chart.set_hovered_index(Some(1));
    let summary = chart.center_summary().expect("center child present");
    assert_eq!(summary.label, "dev");
    assert_relative_eq!(summary.value, 70.0);
    assert_relative_eq!(summary.fraction, 0.7, epsilon = 1e-9);
}

#[test]
fn explicit_slice_colors_override_the_palette() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let chart = pie(
        vec![
            PieDatum::new("a", 1.0).with_color(red),
            PieDatum::new("b", 1.0),
        ],
        Vec::new(),
    );
    assert_eq!(chart.arcs()[0].color, red);
    assert_ne!(chart.arcs()[1].color, red);
}
