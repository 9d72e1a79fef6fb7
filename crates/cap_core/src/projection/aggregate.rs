use std::collections::BTreeMap;

use crate::projection::builder::ResolvedAthlete;

/// Sum of fiscal-year compensation over a resolved set. Empty input is
/// simply zero.
pub fn team_total(athletes: &[ResolvedAthlete]) -> f64 {
    athletes.iter().map(|athlete| athlete.compensation).sum()
}

/// Compensation grouped by position, for percentage/variance reporting.
pub fn position_totals(athletes: &[ResolvedAthlete]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for athlete in athletes {
        *totals.entry(athlete.position.clone()).or_insert(0.0) += athlete.compensation;
    }
    totals
}

/// Compensation grouped by arrival season. A recruit's share is read
/// against their arrival cohort rather than the current roster.
pub fn starting_year_totals<'a>(
    athletes: impl Iterator<Item = &'a ResolvedAthlete>,
) -> BTreeMap<u16, f64> {
    let mut totals = BTreeMap::new();
    for athlete in athletes {
        *totals.entry(athlete.starting_season).or_insert(0.0) += athlete.compensation;
    }
    totals
}
