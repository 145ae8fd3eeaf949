use glyph_charts::core::LinearScale;
use glyph_charts::interaction::nearest_index;
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let scale = LinearScale::new((domain_start, domain_end), (0.0, 1920.0))
            .expect("valid scale");
        let px = scale.apply(value);
        let recovered = scale.invert(px);

        prop_assert!((recovered - value).abs() <= domain_span * 1e-9 + 1e-7);
    }

    #[test]
    fn inverted_range_round_trip_property(
        value_factor in 0.0f64..1.0,
        height in 10.0f64..4096.0
    ) {
        let value = value_factor * 500.0;
        let scale = LinearScale::new((0.0, 500.0), (height, 0.0)).expect("valid scale");
        let px = scale.apply(value);
        prop_assert!((0.0..=height).contains(&px));
        prop_assert!((scale.invert(px) - value).abs() <= 1e-7);
    }

    #[test]
    fn nearest_index_minimizes_distance_property(
        mut xs in proptest::collection::vec(-1_000.0f64..1_000.0, 1..64),
        target in -1_500.0f64..1_500.0
    ) {
        xs.sort_by(f64::total_cmp);
        xs.dedup();

        let selected = nearest_index(&xs, target).expect("non-empty input");
        let best = xs
            .iter()
            .map(|&x| (x - target).abs())
            .fold(f64::INFINITY, f64::min);

        prop_assert!((xs[selected] - target).abs() <= best + 1e-12);
    }

    #[test]
    fn nearest_index_prefers_later_on_exact_tie_property(
        left in -1_000i64..0,
        half_gap in 1i64..100
    ) {
        // Integer coordinates keep the midpoint exactly representable, so
        // both distances compare equal and the tie rule alone decides.
        let left = left as f64;
        let half_gap = half_gap as f64;
        let xs = [left, left + 2.0 * half_gap];
        let selected = nearest_index(&xs, left + half_gap).expect("non-empty input");
        prop_assert_eq!(selected, 1);
    }
}
