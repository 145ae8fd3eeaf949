use glyph_charts::animation::{Spring, SpringConfig, Timeline, stagger_delay};

fn settle(spring: &mut Spring, seconds: f64) {
    let mut remaining = seconds;
    while remaining > 0.0 {
        spring.step(1.0 / 60.0);
        remaining -= 1.0 / 60.0;
    }
}

#[test]
fn spring_settles_on_its_target() {
    let mut spring = Spring::new(0.0, SpringConfig::interactive());
    spring.set_target(10.0);
    settle(&mut spring, 3.0);
    assert!(spring.is_at_rest());
    assert_eq!(spring.current(), 10.0);
    assert_eq!(spring.velocity(), 0.0);
}

#[test]
fn spring_moves_toward_target_monotonically_at_first() {
    let mut spring = Spring::new(0.0, SpringConfig::entrance());
    spring.set_target(1.0);
    let mut last = 0.0;
    for _ in 0..10 {
        let value = spring.step(1.0 / 60.0);
        assert!(value >= last);
        last = value;
    }
    assert!(last > 0.0);
}

#[test]
fn retarget_preserves_inflight_velocity() {
    let mut spring = Spring::new(0.0, SpringConfig::interactive());
    spring.set_target(10.0);
    for _ in 0..6 {
        spring.step(1.0 / 60.0);
    }
    let velocity = spring.velocity();
    assert!(velocity > 0.0);

    spring.set_target(-5.0);
    assert_eq!(spring.velocity(), velocity);
    assert!(!spring.is_at_rest());
}

#[test]
fn jump_teleports_and_rests() {
    let mut spring = Spring::new(0.0, SpringConfig::interactive());
    spring.set_target(10.0);
    spring.step(0.1);
    spring.jump(3.0);
    assert_eq!(spring.current(), 3.0);
    assert!(spring.is_at_rest());
    assert_eq!(spring.step(1.0), 3.0);
}

#[test]
fn large_frame_delta_stays_stable() {
    let mut spring = Spring::new(0.0, SpringConfig::interactive());
    spring.set_target(1.0);
    // One 2-second frame must not explode a stiff spring.
    let value = spring.step(2.0);
    assert!(value.is_finite());
    assert!((value - 1.0).abs() < 0.01);
}

#[test]
fn delayed_target_holds_until_due() {
    let mut timeline = Timeline::new();
    let id = timeline.spawn_delayed(0.0, 1.0, 0.5, SpringConfig::entrance());

    timeline.tick(0.3);
    assert_eq!(timeline.value(id), Some(0.0));
    assert_eq!(timeline.is_at_rest(id), Some(false));

    timeline.tick(0.3);
    timeline.tick(0.1);
    assert!(timeline.value(id).expect("spring exists") > 0.0);
}

#[test]
fn stagger_delays_fire_in_order() {
    let mut timeline = Timeline::new();
    let ids: Vec<_> = (0..3)
        .map(|i| {
            timeline.spawn_delayed(0.0, 1.0, stagger_delay(i, 0.1, 0.08), SpringConfig::entrance())
        })
        .collect();

    // After 0.15s only the first delay (0.1s) has elapsed.
    for _ in 0..9 {
        timeline.tick(1.0 / 60.0);
    }
    let values: Vec<f64> = ids
        .iter()
        .map(|&id| timeline.value(id).expect("spring exists"))
        .collect();
    assert!(values[0] > 0.0);
    assert_eq!(values[1], 0.0);
    assert_eq!(values[2], 0.0);
}

#[test]
fn retarget_supersedes_a_pending_delay() {
    let mut timeline = Timeline::new();
    let id = timeline.spawn_delayed(0.0, 1.0, 10.0, SpringConfig::interactive());
    timeline.retarget(id, -2.0);
    for _ in 0..240 {
        timeline.tick(1.0 / 60.0);
    }
    assert_eq!(timeline.value(id), Some(-2.0));
    assert!(timeline.is_settled());
}

#[test]
fn remove_cancels_spring_and_pending_target() {
    let mut timeline = Timeline::new();
    let id = timeline.spawn_delayed(0.0, 1.0, 0.1, SpringConfig::interactive());
    timeline.remove(id);
    assert_eq!(timeline.value(id), None);
    assert!(timeline.is_empty());
    timeline.tick(1.0);
    assert!(timeline.is_settled());
}

#[test]
fn zero_and_negative_deltas_are_ignored() {
    let mut timeline = Timeline::new();
    let id = timeline.spawn_delayed(0.0, 1.0, 0.0, SpringConfig::interactive());
    timeline.tick(0.0);
    timeline.tick(-1.0);
    assert_eq!(timeline.now_seconds(), 0.0);
    assert_eq!(timeline.value(id), Some(0.0));
}
