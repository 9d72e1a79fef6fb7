use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Academic class progression, ordered FR → GR.
///
/// The ordinal is the number of completed roster years; aging an athlete
/// forward is a direct ordinal lookup rather than a year-by-year loop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ClassYear {
    #[serde(rename = "FR")]
    Freshman,
    #[serde(rename = "SO")]
    Sophomore,
    #[serde(rename = "JR")]
    Junior,
    #[serde(rename = "SR")]
    Senior,
    #[serde(rename = "GR")]
    Graduate,
}

impl ClassYear {
    /// Canonical two-letter class code (e.g., "FR").
    pub const fn code(self) -> &'static str {
        match self {
            ClassYear::Freshman => "FR",
            ClassYear::Sophomore => "SO",
            ClassYear::Junior => "JR",
            ClassYear::Senior => "SR",
            ClassYear::Graduate => "GR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FR" => Some(ClassYear::Freshman),
            "SO" => Some(ClassYear::Sophomore),
            "JR" => Some(ClassYear::Junior),
            "SR" => Some(ClassYear::Senior),
            "GR" => Some(ClassYear::Graduate),
            _ => None,
        }
    }

    pub const fn ordinal(self) -> u8 {
        match self {
            ClassYear::Freshman => 0,
            ClassYear::Sophomore => 1,
            ClassYear::Junior => 2,
            ClassYear::Senior => 3,
            ClassYear::Graduate => 4,
        }
    }

    /// Ordinal back to class, saturating at GR.
    pub const fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 => ClassYear::Freshman,
            1 => ClassYear::Sophomore,
            2 => ClassYear::Junior,
            3 => ClassYear::Senior,
            _ => ClassYear::Graduate,
        }
    }

    /// Class after `years` elapsed seasons, capping at GR.
    pub fn advanced_by(self, years: u16) -> Self {
        let ordinal = u16::from(self.ordinal()).saturating_add(years);
        Self::from_ordinal(ordinal.min(u16::from(ClassYear::Graduate.ordinal())) as u8)
    }
}

/// Redshirt state carried on the base record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum RedshirtStatus {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "has")]
    Available,
    #[serde(rename = "used")]
    Used,
}

/// Base athlete row as fetched from the persistence layer.
///
/// Identity plus the slowly-changing attributes that field overrides can
/// replace during resolution. `ending_season == 0` means "derive the final
/// active year from eligibility"; any other value is an explicit departure
/// year.
///
/// `created_at` / `updated_at` use `#[serde(default)]` so snapshots exported
/// before row timestamps existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AthleteBase {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Seasons of eligibility remaining, 1-5.
    pub elig_remaining: u8,
    pub class_year: ClassYear,
    #[serde(default)]
    pub redshirt: RedshirtStatus,
    /// Scholarship fraction in [0, 1].
    pub scholarship_pct: f64,
    /// First season the athlete is (or will be) active. Future for recruits.
    pub starting_season: u16,
    /// 0 = eligibility-derived end, otherwise the explicit final active year.
    #[serde(default)]
    pub ending_season: u16,
    /// Roster-visibility flag.
    #[serde(default)]
    pub hide: bool,
    /// Scenario tag; empty string is the baseline plan.
    #[serde(default)]
    pub scenario: String,
    /// Recruit commitment flag. `None` = never recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<bool>,
    /// Injury flag. `None` (never recorded) and `Some(false)` are distinct
    /// states and must stay distinct through resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AthleteBase {
    /// Final active year: the explicit ending season when set, otherwise
    /// `starting_season + elig_remaining - 1`.
    pub fn natural_ending_season(&self) -> u16 {
        if self.ending_season != 0 {
            self.ending_season
        } else {
            self.starting_season + u16::from(self.elig_remaining.max(1)) - 1
        }
    }

    /// A recruit has not arrived yet at `target_year`.
    pub fn is_recruit(&self, target_year: u16) -> bool {
        self.starting_season > target_year
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.id.is_empty() {
            return Err("athlete id must not be empty".to_string());
        }
        if !(1..=5).contains(&self.elig_remaining) {
            return Err(format!(
                "elig_remaining must be 1-5, got {}",
                self.elig_remaining
            ));
        }
        if !(0.0..=1.0).contains(&self.scholarship_pct) {
            return Err(format!(
                "scholarship_pct must be within [0, 1], got {}",
                self.scholarship_pct
            ));
        }
        if self.starting_season == 0 {
            return Err("starting_season must be set".to_string());
        }
        Ok(())
    }
}

/// Auxiliary per-athlete figure keyed by a named category, used for the
/// scholarship-breakdown numbers. Values are string-encoded in persistence
/// and parsed numerically during projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdditionalDataRow {
    pub athlete_id: String,
    pub category: String,
    pub value: String,
}
