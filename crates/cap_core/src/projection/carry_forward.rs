use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// One year's annual compensation: base amount plus supplemental buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnualAmounts {
    pub amount: f64,
    pub extras: BTreeMap<String, f64>,
}

impl AnnualAmounts {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            extras: BTreeMap::new(),
        }
    }
}

/// Fill gaps in a sparse year map over the athlete's active window.
///
/// Each explicit entry propagates forward until the next explicit entry or
/// the end of the window, whichever comes first. Years before the first
/// explicit entry stay unset, and nothing is ever written past the window:
/// pay doesn't change year to year unless someone says it changed, and it
/// stops when eligibility does. Carried years clone the whole record,
/// buckets included.
pub fn carry_forward(
    sparse: &BTreeMap<u16, AnnualAmounts>,
    window: RangeInclusive<u16>,
) -> BTreeMap<u16, AnnualAmounts> {
    let (start, end) = (*window.start(), *window.end());
    let mut dense = BTreeMap::new();
    if start > end {
        return dense;
    }
    // An explicit entry predating the window still seeds propagation into it.
    let mut last = sparse.range(..start).next_back().map(|(_, amounts)| amounts);
    for year in start..=end {
        if let Some(explicit) = sparse.get(&year) {
            dense.insert(year, explicit.clone());
            last = Some(explicit);
        } else if let Some(carried) = last {
            dense.insert(year, carried.clone());
        }
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amounts(amount: f64) -> AnnualAmounts {
        AnnualAmounts::new(amount)
    }

    #[test]
    fn test_gaps_fill_from_last_explicit_entry() {
        let mut sparse = BTreeMap::new();
        sparse.insert(2023, amounts(50_000.0));
        sparse.insert(2026, amounts(80_000.0));

        let dense = carry_forward(&sparse, 2022..=2027);
        assert!(dense.get(&2022).is_none());
        assert_eq!(dense[&2023].amount, 50_000.0);
        assert_eq!(dense[&2024].amount, 50_000.0);
        assert_eq!(dense[&2025].amount, 50_000.0);
        assert_eq!(dense[&2026].amount, 80_000.0);
        assert_eq!(dense[&2027].amount, 80_000.0);
    }

    #[test]
    fn test_explicit_entries_are_never_overwritten() {
        let mut sparse = BTreeMap::new();
        sparse.insert(2024, amounts(50_000.0));
        sparse.insert(2025, amounts(60_000.0));

        let dense = carry_forward(&sparse, 2024..=2026);
        assert_eq!(dense[&2025].amount, 60_000.0);
        assert_eq!(dense[&2026].amount, 60_000.0);
    }

    #[test]
    fn test_window_bounds_are_hard() {
        let mut sparse = BTreeMap::new();
        sparse.insert(2024, amounts(50_000.0));
        // Raw data beyond the ending year must not leak into the result.
        sparse.insert(2030, amounts(99_000.0));

        let dense = carry_forward(&sparse, 2024..=2026);
        assert_eq!(dense.len(), 3);
        assert!(dense.keys().all(|year| (2024..=2026).contains(year)));
    }

    #[test]
    fn test_entry_before_window_seeds_the_window() {
        let mut sparse = BTreeMap::new();
        sparse.insert(2022, amounts(40_000.0));

        let dense = carry_forward(&sparse, 2024..=2025);
        assert_eq!(dense[&2024].amount, 40_000.0);
        assert_eq!(dense[&2025].amount, 40_000.0);
    }

    #[test]
    fn test_buckets_carry_with_the_year() {
        let mut with_bucket = amounts(50_000.0);
        with_bucket.extras.insert("housing".to_string(), 6_000.0);
        let mut sparse = BTreeMap::new();
        sparse.insert(2024, with_bucket);

        let dense = carry_forward(&sparse, 2024..=2026);
        assert_eq!(dense[&2026].extras["housing"], 6_000.0);
    }

    #[test]
    fn test_empty_input_and_inverted_window() {
        assert!(carry_forward(&BTreeMap::new(), 2024..=2026).is_empty());

        let mut sparse = BTreeMap::new();
        sparse.insert(2024, amounts(50_000.0));
        assert!(carry_forward(&sparse, 2026..=2024).is_empty());
    }

    proptest! {
        /// Carrying forward an already-dense map returns it unchanged.
        #[test]
        fn prop_idempotent_on_dense_maps(
            start in 2000u16..2030,
            span in 0u16..10,
            values in proptest::collection::vec(0.0f64..1_000_000.0, 10)
        ) {
            let end = start + span;
            let mut sparse = BTreeMap::new();
            for (offset, value) in (0..=span).zip(values.iter()) {
                sparse.insert(start + offset, amounts(*value));
            }
            let once = carry_forward(&sparse, start..=end);
            prop_assert_eq!(&once, &sparse);
            let twice = carry_forward(&once, start..=end);
            prop_assert_eq!(twice, once);
        }

        /// No carried value appears outside the window, and every value in
        /// the result matches the newest explicit entry at or before it.
        #[test]
        fn prop_bounded_and_sourced(
            years in proptest::collection::btree_map(2000u16..2040, 0.0f64..1_000_000.0, 0..8),
            start in 2000u16..2035,
            span in 0u16..8,
        ) {
            let end = start + span;
            let sparse: BTreeMap<u16, AnnualAmounts> =
                years.iter().map(|(y, v)| (*y, amounts(*v))).collect();
            let dense = carry_forward(&sparse, start..=end);
            for (year, value) in &dense {
                prop_assert!((start..=end).contains(year));
                let source = sparse.range(..=year).next_back();
                prop_assert_eq!(value, source.map(|(_, v)| v).unwrap());
            }
        }
    }
}
