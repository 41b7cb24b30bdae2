//! Property-based tests for the medistock-core inventory pipeline.
//!
//! These use proptest to check boundary and ordering invariants across
//! generated snapshots, catching cases the hand-picked unit tests miss.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use medistock_core::expiry::classify_expiry;
use medistock_core::filter::{apply_filters, FilterAxis};
use medistock_core::pagination::{paginate, total_pages};
use medistock_core::pricing::{derive_cost_per_piece, derive_suggested_selling_price};
use medistock_core::stats::aggregate_stats;
use medistock_core::stock::classify_stock;
use medistock_core::view::build_view;
use medistock_core::{
    ExpiryFilter, ExpiryStatus, FilterCriteria, InventoryLine, Money, StockFilter, StockStatus,
};

// Strategies for generating test data

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
}

fn date_after(reference: DateTime<Utc>, days: i64) -> String {
    (reference.date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn name_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("Paracetamol 500mg".to_string()),
        Just("Amoxicillin".to_string()),
        Just("Cough Syrup".to_string()),
        "[a-z]{3,8}",
    ])
}

fn line_strategy() -> impl Strategy<Value = InventoryLine> {
    (
        (
            prop::option::of(-2i64..60),
            prop::option::of(0i64..12),
            prop::option::of(0i64..40),
            prop::option::of(-60i64..120),
            prop::option::of(0i64..10_000),
        ),
        (
            prop::option::of(1i64..4),
            prop::option::of(1i64..6),
            prop::option::of(prop_oneof![
                Just("Tablet".to_string()),
                Just("Syrup".to_string()),
                Just("Capsule".to_string()),
            ]),
            name_strategy(),
            prop::option::of("B-[0-9]{1,3}"),
            prop::option::of(prop_oneof![Just("HealthCo".to_string()), Just("MedSupply".to_string())]),
        ),
    )
        .prop_map(
            |((units, per_unit, reorder, expiry_in, price), (shop, product, form, name, batch, supplier))| {
                InventoryLine {
                    total_units: units,
                    pieces_per_unit: per_unit,
                    reorder_level: reorder,
                    expiry_date: expiry_in.map(|days| date_after(reference(), days)),
                    selling_price_per_piece: price.map(Money::from_cents),
                    shop,
                    product,
                    form,
                    product_name: name,
                    batch_number: batch,
                    supplier,
                    ..InventoryLine::default()
                }
            },
        )
}

fn snapshot_strategy() -> impl Strategy<Value = Vec<InventoryLine>> {
    prop::collection::vec(line_strategy(), 0..80).prop_map(|mut lines| {
        for (i, line) in lines.iter_mut().enumerate() {
            line.id = i as i64 + 1;
        }
        lines
    })
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop_oneof![
            Just(String::new()),
            Just("para".to_string()),
            Just("AMOX".to_string()),
            Just(" b-1".to_string()),
            Just("health".to_string()),
        ]),
        prop::option::of(1i64..4),
        prop::option::of(1i64..6),
        prop_oneof![
            Just(StockFilter::All),
            Just(StockFilter::InStock),
            Just(StockFilter::LowStock),
            Just(StockFilter::OutOfStock),
        ],
        prop_oneof![
            Just(ExpiryFilter::All),
            Just(ExpiryFilter::Good),
            Just(ExpiryFilter::ExpiringSoon),
            Just(ExpiryFilter::Expired),
            Just(ExpiryFilter::NoExpiry),
        ],
        prop::option::of(prop_oneof![Just("Tablet".to_string()), Just("Syrup".to_string())]),
    )
        .prop_map(|(search, shop, product, stock_status, expiry_status, form)| FilterCriteria {
            search,
            shop,
            product,
            stock_status,
            expiry_status,
            form,
            ..FilterCriteria::default()
        })
}

// Property: the reorder level is inclusive
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn stock_at_reorder_level_is_low(reorder in 1i64..100_000, per_unit in 1i64..50) {
        // Split `reorder` pieces into whole units where possible
        let (units, per_unit) = if reorder % per_unit == 0 {
            (reorder / per_unit, per_unit)
        } else {
            (reorder, 1)
        };
        let at = InventoryLine {
            total_units: Some(units),
            pieces_per_unit: Some(per_unit),
            reorder_level: Some(reorder),
            ..InventoryLine::new(1)
        };
        prop_assert_eq!(classify_stock(&at), StockStatus::LowStock);

        let above = InventoryLine {
            total_units: Some(reorder + 1),
            pieces_per_unit: Some(1),
            reorder_level: Some(reorder),
            ..InventoryLine::new(2)
        };
        prop_assert_eq!(classify_stock(&above), StockStatus::InStock);
    }

    #[test]
    fn zero_pieces_is_always_out_of_stock(reorder in prop::option::of(0i64..1000), per_unit in prop::option::of(0i64..50)) {
        let line = InventoryLine {
            total_units: Some(0),
            pieces_per_unit: per_unit,
            reorder_level: reorder,
            ..InventoryLine::new(1)
        };
        prop_assert_eq!(classify_stock(&line), StockStatus::OutOfStock);
    }
}

// Property: expiry boundaries hold at any time of day
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn expiry_boundaries(day_offset in 0i64..3650, seconds in 0i64..86_400) {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let day = start + Duration::days(day_offset);
        let now = day.and_hms_opt(0, 0, 0).unwrap().and_utc() + Duration::seconds(seconds);

        let status = |days: i64| classify_expiry(Some(&date_after(now, days)), now);
        prop_assert_eq!(status(-1), ExpiryStatus::Expired);
        prop_assert_eq!(status(0), ExpiryStatus::NearExpiry);
        prop_assert_eq!(status(30), ExpiryStatus::NearExpiry);
        prop_assert_eq!(status(31), ExpiryStatus::Fresh);
    }
}

// Property: filter axes commute
proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn filter_order_does_not_matter(
        lines in snapshot_strategy(),
        criteria in criteria_strategy(),
        order in Just(FilterAxis::ALL.to_vec()).prop_shuffle(),
    ) {
        let combined = apply_filters(&lines, &criteria, reference());

        let mut sequential: Vec<&InventoryLine> = lines.iter().collect();
        for axis in &order {
            sequential.retain(|line| criteria.matches_axis(*axis, line, reference()));
        }

        prop_assert_eq!(combined, sequential);
    }

    #[test]
    fn filtering_preserves_input_order(
        lines in snapshot_strategy(),
        criteria in criteria_strategy(),
    ) {
        let ids: Vec<i64> = apply_filters(&lines, &criteria, reference())
            .iter()
            .map(|line| line.id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted);
    }
}

// Property: pages cover the list exactly once
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn pages_reconstruct_the_list(len in 0usize..200, page_size in 1i64..30) {
        let items: Vec<usize> = (0..len).collect();
        let pages = total_pages(items.len(), page_size);

        let rebuilt: Vec<usize> = (1..=pages as i64)
            .flat_map(|page| paginate(&items, page, page_size).items.to_vec())
            .collect();
        prop_assert_eq!(&rebuilt, &items);

        // Nothing beyond the last page
        prop_assert!(paginate(&items, pages as i64 + 1, page_size).items.is_empty());
    }

    #[test]
    fn page_never_exceeds_page_size(len in 0usize..200, page in -5i64..50, page_size in -5i64..30) {
        let items: Vec<usize> = (0..len).collect();
        let slice = paginate(&items, page, page_size);
        prop_assert!(slice.items.len() as i64 <= page_size.max(1));
        prop_assert!(slice.start_index <= slice.end_index);
        prop_assert!(slice.end_index <= len);
    }
}

// Property: stats agree with classification
proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn stats_partition_the_snapshot(lines in snapshot_strategy()) {
        let stats = aggregate_stats(&lines, reference());
        prop_assert_eq!(stats.total_items, lines.len());
        prop_assert_eq!(stats.in_stock + stats.low_stock + stats.out_of_stock, lines.len());

        let low = lines
            .iter()
            .filter(|line| classify_stock(line) == StockStatus::LowStock)
            .count();
        prop_assert_eq!(stats.low_stock, low);

        let value: Money = lines.iter().map(InventoryLine::stock_value).sum();
        prop_assert_eq!(stats.total_value, value);
    }

    #[test]
    fn view_is_pure(lines in snapshot_strategy(), criteria in criteria_strategy()) {
        let before = lines.clone();
        let first = build_view(&lines, &criteria, reference());
        let second = build_view(&lines, &criteria, reference());
        prop_assert_eq!(first, second);
        prop_assert_eq!(lines, before);
    }
}

// Property: pricing
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn suggested_price_is_a_multiple_of_ten(cents in 0i64..1_000_000_000) {
        let suggested = derive_suggested_selling_price(Money::from_cents(cents));
        prop_assert_eq!(suggested.cents() % 1000, 0);
    }

    #[test]
    fn cost_needs_positive_inputs(cents in -1_000_000i64..1_000_000, pieces in -10i64..100) {
        let cost = derive_cost_per_piece(Money::from_cents(cents), pieces).unwrap();
        prop_assert_eq!(cost.is_some(), cents > 0 && pieces > 0);
        if let Some(cost) = cost {
            // One decimal place
            prop_assert_eq!(cost.cents() % 10, 0);
        }
    }
}
