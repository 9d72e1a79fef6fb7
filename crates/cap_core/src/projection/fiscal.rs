use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use fxhash::FxHashMap;

use crate::models::{
    AnnualCompensationRecord, Month, MonthlyBreakdown, MonthlyCompensationRecord,
};
use crate::projection::carry_forward::{carry_forward, AnnualAmounts};
use crate::resolve::{ScenarioPriority, BASELINE_SCENARIO};

/// One explicit monthly entry, kept with its scenario tag so the assembler
/// can tell scenario months from baseline months.
#[derive(Debug, Clone, PartialEq)]
struct MonthlySlot {
    scenario: String,
    amount: f64,
    extras: BTreeMap<String, f64>,
}

/// All compensation data for a single athlete, indexed for month-level
/// lookups. The annual layers are split by scenario so the four-tier
/// fallback can try the active scenario before the baseline.
#[derive(Debug, Clone, Default)]
pub struct CompBook {
    monthly: FxHashMap<(u16, Month), Vec<MonthlySlot>>,
    annual_selected: BTreeMap<u16, AnnualAmounts>,
    annual_baseline: BTreeMap<u16, AnnualAmounts>,
    buckets: BTreeSet<String>,
}

fn to_amounts(amount: f64, extras: &[crate::models::SupplementalAmount]) -> AnnualAmounts {
    let mut amounts = AnnualAmounts::new(amount);
    for extra in extras {
        amounts.extras.insert(extra.bucket.clone(), extra.amount);
    }
    amounts
}

impl CompBook {
    pub fn insert_annual(&mut self, record: &AnnualCompensationRecord, priority: &ScenarioPriority) {
        for extra in &record.extras {
            self.buckets.insert(extra.bucket.clone());
        }
        let amounts = to_amounts(record.amount, &record.extras);
        if record.scenario == BASELINE_SCENARIO {
            self.annual_baseline.insert(record.year, amounts);
        } else if record.scenario == priority.selected() {
            self.annual_selected.insert(record.year, amounts);
        } else {
            // Row outside the scenario union; inbound queries normally
            // filter these before the engine sees them.
            log::warn!(
                "Ignoring annual row for inactive scenario '{}' (athlete {})",
                record.scenario,
                record.athlete_id
            );
        }
    }

    pub fn insert_monthly(&mut self, record: &MonthlyCompensationRecord) {
        for extra in &record.extras {
            self.buckets.insert(extra.bucket.clone());
        }
        let mut extras = BTreeMap::new();
        for extra in &record.extras {
            extras.insert(extra.bucket.clone(), extra.amount);
        }
        self.monthly
            .entry((record.year, record.month))
            .or_default()
            .push(MonthlySlot {
                scenario: record.scenario.clone(),
                amount: record.amount,
                extras,
            });
    }

    /// Backfill both annual layers across the athlete's active window so a
    /// gap year still projects continuously.
    pub fn carry_annuals(&mut self, window: RangeInclusive<u16>) {
        self.annual_selected = carry_forward(&self.annual_selected, window.clone());
        self.annual_baseline = carry_forward(&self.annual_baseline, window);
    }

    pub fn bucket_names(&self) -> &BTreeSet<String> {
        &self.buckets
    }

    fn monthly_slot(&self, year: u16, month: Month, scenario: &str) -> Option<&MonthlySlot> {
        self.monthly
            .get(&(year, month))?
            .iter()
            .find(|slot| slot.scenario == scenario)
    }

    fn annual_layer(&self, scenario: &str) -> &BTreeMap<u16, AnnualAmounts> {
        if scenario == BASELINE_SCENARIO {
            &self.annual_baseline
        } else {
            &self.annual_selected
        }
    }
}

/// A fiscal year assembled from two calendar years of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiscalProjection {
    /// Fiscal-year total; always the sum of the monthly values.
    pub amount: f64,
    pub monthly: MonthlyBreakdown,
    /// Per-bucket fiscal-year totals for the supplemental amounts.
    pub extra_totals: BTreeMap<String, f64>,
}

/// Resolve one month's base amount through the four-tier fallback:
/// monthly record in the active scenario, annual active-scenario amount
/// divided by 12, monthly baseline record, annual baseline amount divided
/// by 12, then zero.
fn month_amount(book: &CompBook, year: u16, month: Month, selected: &str) -> f64 {
    if let Some(slot) = book.monthly_slot(year, month, selected) {
        return slot.amount;
    }
    if let Some(annual) = book.annual_layer(selected).get(&year) {
        return annual.amount / 12.0;
    }
    if let Some(slot) = book.monthly_slot(year, month, BASELINE_SCENARIO) {
        return slot.amount;
    }
    if let Some(annual) = book.annual_baseline.get(&year) {
        return annual.amount / 12.0;
    }
    0.0
}

/// Same fallback order for one supplemental bucket. A monthly record only
/// answers for buckets it actually carries, so each bucket falls through
/// the tiers independently of the base amount.
fn month_extra(book: &CompBook, year: u16, month: Month, selected: &str, bucket: &str) -> f64 {
    if let Some(value) = book
        .monthly_slot(year, month, selected)
        .and_then(|slot| slot.extras.get(bucket))
    {
        return *value;
    }
    if let Some(value) = book
        .annual_layer(selected)
        .get(&year)
        .and_then(|annual| annual.extras.get(bucket))
    {
        return *value / 12.0;
    }
    if let Some(value) = book
        .monthly_slot(year, month, BASELINE_SCENARIO)
        .and_then(|slot| slot.extras.get(bucket))
    {
        return *value;
    }
    if let Some(value) = book
        .annual_baseline
        .get(&year)
        .and_then(|annual| annual.extras.get(bucket))
    {
        return *value / 12.0;
    }
    0.0
}

/// Assemble the fiscal year labelled `year`: `start..December` of `year`
/// followed by `January..start-1` of `year + 1`. Annual layers should
/// already be carried forward over the athlete's active window.
pub fn assemble_fiscal_year(
    book: &CompBook,
    year: u16,
    start: Month,
    priority: &ScenarioPriority,
) -> FiscalProjection {
    let selected = priority.selected();
    let mut projection = FiscalProjection::default();
    for (month, offset) in Month::fiscal_sequence(start) {
        let calendar_year = year + offset;
        let amount = month_amount(book, calendar_year, month, selected);
        projection.monthly.set(month, amount);
        projection.amount += amount;
        for bucket in book.bucket_names() {
            let value = month_extra(book, calendar_year, month, selected, bucket);
            if value != 0.0 {
                *projection.extra_totals.entry(bucket.clone()).or_insert(0.0) += value;
            }
        }
    }
    projection
}
