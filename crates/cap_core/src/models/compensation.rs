use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Month code that marks an annual (whole-year) compensation row.
pub const ANNUAL_MONTH_CODE: &str = "00";

/// Calendar month, serialized by full name as the persistence layer stores it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

pub const ALL_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

static MONTH_BY_NAME: Lazy<FxHashMap<&'static str, Month>> = Lazy::new(|| {
    ALL_MONTHS.iter().map(|m| (m.name(), *m)).collect()
});

impl Month {
    pub const fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MONTH_BY_NAME.get(name).copied()
    }

    /// Zero-based calendar index (January = 0).
    pub const fn index(self) -> usize {
        match self {
            Month::January => 0,
            Month::February => 1,
            Month::March => 2,
            Month::April => 3,
            Month::May => 4,
            Month::June => 5,
            Month::July => 6,
            Month::August => 7,
            Month::September => 8,
            Month::October => 9,
            Month::November => 10,
            Month::December => 11,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 12 {
            Some(ALL_MONTHS[index])
        } else {
            None
        }
    }

    /// The 12 months of a fiscal year anchored at `start`, each paired with
    /// its calendar-year offset from the fiscal label year: months from
    /// `start` through December belong to the label year (offset 0), January
    /// through the month before `start` roll into the next one (offset 1).
    pub fn fiscal_sequence(start: Month) -> [(Month, u16); 12] {
        let mut sequence = [(Month::January, 0u16); 12];
        let start_index = start.index();
        for (slot, entry) in sequence.iter_mut().enumerate() {
            let index = (start_index + slot) % 12;
            let offset = u16::from(index < start_index);
            *entry = (ALL_MONTHS[index], offset);
        }
        sequence
    }
}

/// Named supplemental budget bucket attached to a compensation row
/// (e.g., "housing", "bonus").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SupplementalAmount {
    pub bucket: String,
    pub amount: f64,
}

/// Raw compensation row as fetched from the persistence layer.
///
/// `month == "00"` is an annual row; any real month name is a monthly row.
/// The two kinds are independent: monthly rows are not required to sum to
/// the annual row for the same year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompensationRow {
    pub athlete_id: String,
    pub year: u16,
    pub month: String,
    #[serde(default)]
    pub scenario: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<SupplementalAmount>,
}

/// Annual base amount, unique per (athlete, year, "annual", scenario).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualCompensationRecord {
    pub athlete_id: String,
    pub year: u16,
    pub scenario: String,
    pub amount: f64,
    pub extras: Vec<SupplementalAmount>,
}

/// Explicit amount for one month of one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCompensationRecord {
    pub athlete_id: String,
    pub year: u16,
    pub month: Month,
    pub scenario: String,
    pub amount: f64,
    pub extras: Vec<SupplementalAmount>,
}

/// A compensation row classified by its month code.
#[derive(Debug, Clone, PartialEq)]
pub enum CompRecord {
    Annual(AnnualCompensationRecord),
    Monthly(MonthlyCompensationRecord),
}

impl CompensationRow {
    /// Classify the raw row. An unknown month token is an input-shape
    /// violation, not a degradable condition.
    pub fn classify(&self) -> Result<CompRecord, ProjectionError> {
        if self.athlete_id.is_empty() {
            return Err(ProjectionError::MissingAthleteId {
                context: "compensation row",
            });
        }
        if self.month == ANNUAL_MONTH_CODE {
            return Ok(CompRecord::Annual(AnnualCompensationRecord {
                athlete_id: self.athlete_id.clone(),
                year: self.year,
                scenario: self.scenario.clone(),
                amount: self.amount,
                extras: self.extras.clone(),
            }));
        }
        match Month::from_name(&self.month) {
            Some(month) => Ok(CompRecord::Monthly(MonthlyCompensationRecord {
                athlete_id: self.athlete_id.clone(),
                year: self.year,
                month,
                scenario: self.scenario.clone(),
                amount: self.amount,
                extras: self.extras.clone(),
            })),
            None => Err(ProjectionError::UnknownMonth {
                token: self.month.clone(),
            }),
        }
    }
}

/// Fiscal-year monthly amounts, always serialized in January → December
/// order. Each value is the fiscal-aligned amount for that calendar month,
/// which may come from either of the two calendar years the fiscal year
/// spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MonthlyBreakdown {
    #[serde(rename = "January")]
    pub january: f64,
    #[serde(rename = "February")]
    pub february: f64,
    #[serde(rename = "March")]
    pub march: f64,
    #[serde(rename = "April")]
    pub april: f64,
    #[serde(rename = "May")]
    pub may: f64,
    #[serde(rename = "June")]
    pub june: f64,
    #[serde(rename = "July")]
    pub july: f64,
    #[serde(rename = "August")]
    pub august: f64,
    #[serde(rename = "September")]
    pub september: f64,
    #[serde(rename = "October")]
    pub october: f64,
    #[serde(rename = "November")]
    pub november: f64,
    #[serde(rename = "December")]
    pub december: f64,
}

impl MonthlyBreakdown {
    pub fn get(&self, month: Month) -> f64 {
        match month {
            Month::January => self.january,
            Month::February => self.february,
            Month::March => self.march,
            Month::April => self.april,
            Month::May => self.may,
            Month::June => self.june,
            Month::July => self.july,
            Month::August => self.august,
            Month::September => self.september,
            Month::October => self.october,
            Month::November => self.november,
            Month::December => self.december,
        }
    }

    pub fn set(&mut self, month: Month, amount: f64) {
        match month {
            Month::January => self.january = amount,
            Month::February => self.february = amount,
            Month::March => self.march = amount,
            Month::April => self.april = amount,
            Month::May => self.may = amount,
            Month::June => self.june = amount,
            Month::July => self.july = amount,
            Month::August => self.august = amount,
            Month::September => self.september = amount,
            Month::October => self.october = amount,
            Month::November => self.november = amount,
            Month::December => self.december = amount,
        }
    }

    pub fn sum(&self) -> f64 {
        ALL_MONTHS.iter().map(|m| self.get(*m)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        ALL_MONTHS.iter().map(move |m| (*m, self.get(*m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_round_trip() {
        for month in ALL_MONTHS {
            assert_eq!(Month::from_name(month.name()), Some(month));
        }
        assert_eq!(Month::from_name("Smarch"), None);
        assert_eq!(Month::from_name("00"), None);
    }

    #[test]
    fn test_fiscal_sequence_july_start() {
        let sequence = Month::fiscal_sequence(Month::July);
        assert_eq!(sequence[0], (Month::July, 0));
        assert_eq!(sequence[5], (Month::December, 0));
        assert_eq!(sequence[6], (Month::January, 1));
        assert_eq!(sequence[11], (Month::June, 1));
    }

    #[test]
    fn test_fiscal_sequence_january_start_stays_in_year() {
        let sequence = Month::fiscal_sequence(Month::January);
        assert!(sequence.iter().all(|(_, offset)| *offset == 0));
        assert_eq!(sequence[0].0, Month::January);
        assert_eq!(sequence[11].0, Month::December);
    }

    #[test]
    fn test_classify_annual_and_monthly() {
        let annual = CompensationRow {
            athlete_id: "a1".to_string(),
            year: 2025,
            month: ANNUAL_MONTH_CODE.to_string(),
            scenario: String::new(),
            amount: 120_000.0,
            extras: vec![],
        };
        assert!(matches!(annual.classify(), Ok(CompRecord::Annual(_))));

        let monthly = CompensationRow {
            month: "March".to_string(),
            ..annual.clone()
        };
        match monthly.classify() {
            Ok(CompRecord::Monthly(record)) => assert_eq!(record.month, Month::March),
            other => panic!("expected monthly record, got {:?}", other),
        }

        let junk = CompensationRow {
            month: "Midway".to_string(),
            ..annual.clone()
        };
        assert!(matches!(
            junk.classify(),
            Err(ProjectionError::UnknownMonth { .. })
        ));

        let anonymous = CompensationRow {
            athlete_id: String::new(),
            ..annual
        };
        assert!(matches!(
            anonymous.classify(),
            Err(ProjectionError::MissingAthleteId { .. })
        ));
    }

    #[test]
    fn test_breakdown_serializes_in_calendar_order() {
        let mut breakdown = MonthlyBreakdown::default();
        breakdown.set(Month::March, 15_000.0);
        breakdown.set(Month::January, 10_000.0);

        let json = serde_json::to_string(&breakdown).unwrap();
        let january = json.find("January").unwrap();
        let march = json.find("March").unwrap();
        let december = json.find("December").unwrap();
        assert!(january < march && march < december);

        assert!((breakdown.sum() - 25_000.0).abs() < 1e-9);
    }
}
