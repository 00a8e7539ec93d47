use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use survey_charts::Record;
use survey_charts::crosstab::CrossTab;
use survey_charts::quantile::GroupSummary;
use survey_charts::scale::{BandScale, LinearScale};
use survey_charts::selection::SelectionBroadcaster;

fn record(chain: &str, payment_method: &str) -> Record {
    Record {
        chain: chain.to_string(),
        payment_method: payment_method.to_string(),
        age: 30,
        income: 1000.0,
        purchase_amount: 10.0,
        family_size: 2,
    }
}

fn pairs() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..5, 0u8..4), 0..60)
}

proptest! {
    #[test]
    fn crosstab_row_totals_match_chain_counts(pairs in pairs()) {
        let records: Vec<Record> = pairs
            .iter()
            .map(|(c, m)| record(&format!("chain{c}"), &format!("method{m}")))
            .collect();
        let tab = CrossTab::by_chain_and_payment(&records);

        prop_assert_eq!(tab.cells().count(), tab.rows().len() * tab.columns().len());
        for chain in tab.rows() {
            let expected = records.iter().filter(|r| &r.chain == chain).count();
            prop_assert_eq!(tab.row_total(chain), Some(expected));
        }
    }

    #[test]
    fn summary_orders_quartiles_and_classifies_outliers(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..80)
    ) {
        let summary = GroupSummary::from_values(values.clone()).unwrap();

        prop_assert!(summary.q1 <= summary.median);
        prop_assert!(summary.median <= summary.q3);

        let outside: Vec<f64> = {
            let mut sorted = values.clone();
            sorted.sort_by(f64::total_cmp);
            sorted
                .into_iter()
                .filter(|&v| v < summary.lower_fence || v > summary.upper_fence)
                .collect()
        };
        prop_assert_eq!(&summary.outliers, &outside);
        for v in &values {
            prop_assert_eq!(summary.within_fences(*v), !summary.outliers.contains(v));
        }
    }

    #[test]
    fn summary_ignores_input_order(
        values in prop::collection::vec(0.0f64..1000.0, 1..50),
        seed in any::<u64>()
    ) {
        let mut shuffled = values.clone();
        let len = shuffled.len();
        // Deterministic rotation plus reversal driven by the seed.
        shuffled.rotate_left((seed as usize) % len);
        if seed % 2 == 0 {
            shuffled.reverse();
        }

        prop_assert_eq!(
            GroupSummary::from_values(values),
            GroupSummary::from_values(shuffled)
        );
    }

    #[test]
    fn linear_scale_maps_domain_ends_exactly(
        d0 in -1.0e6f64..1.0e6,
        span in 1.0e-3f64..1.0e6,
        r0 in -2000.0f64..2000.0,
        r1 in -2000.0f64..2000.0,
    ) {
        let d1 = d0 + span;
        let scale = LinearScale::new(d0, d1, r0, r1, false);

        prop_assert_eq!(scale.map(d0), r0);
        prop_assert_eq!(scale.map(d1), r1);
    }

    #[test]
    fn nice_domain_contains_original(
        lo in -1.0e5f64..1.0e5,
        span in 1.0e-2f64..1.0e5,
    ) {
        let hi = lo + span;
        let (n0, n1) = LinearScale::new(lo, hi, 0.0, 1.0, true).domain();

        let tolerance = 1e-9 * hi.abs().max(lo.abs()).max(1.0);
        prop_assert!(n0 <= lo + tolerance);
        prop_assert!(n1 >= hi - tolerance);
    }

    #[test]
    fn band_scale_bands_are_ordered_and_fit(
        n in 0usize..20,
        r0 in -500.0f64..500.0,
        span in 0.0f64..2000.0,
        padding_inner in 0.0f64..1.0,
        padding_outer in 0.0f64..2.0,
    ) {
        let r1 = r0 + span;
        let scale = BandScale::new((0..n).collect(), r0, r1, padding_inner, padding_outer);
        let bands: Vec<_> = scale.bands().collect();

        prop_assert_eq!(bands.len(), n);
        for (i, (value, _)) in bands.iter().enumerate() {
            prop_assert_eq!(**value, i);
        }
        for pair in bands.windows(2) {
            prop_assert!(pair[0].1.end() <= pair[1].1.start + 1e-6);
        }
        if let (Some(first), Some(last)) = (bands.first(), bands.last()) {
            prop_assert!(first.1.start >= r0 - 1e-6);
            prop_assert!(last.1.end() <= r1 + 1e-6);
            prop_assert!(last.1.end() - first.1.start <= span + 1e-6);
        }
    }

    #[test]
    fn broadcaster_delivers_every_publish_in_order(
        values in prop::collection::vec(any::<u32>(), 0..20)
    ) {
        let channel = SelectionBroadcaster::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        channel.subscribe(move |v: &u32| sink.lock().unwrap().push(*v));

        for v in &values {
            channel.publish(*v);
        }

        prop_assert_eq!(&*seen.lock().unwrap(), &values);
    }
}
