//! CSV → snapshot conversion.
//!
//! The budget office exports three sheets: athletes, compensation rows, and
//! field overrides. Each gets a flat CSV record type here and converts into
//! the engine's row structs. Supplemental buckets ride in a single `extras`
//! column encoded as `bucket=amount;bucket=amount`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use cap_core::{
    AthleteBase, ClassYear, CompensationRow, FieldOverrideRow, RedshirtStatus, SupplementalAmount,
};

#[derive(Debug, Deserialize)]
struct AthleteCsvRow {
    id: String,
    name: String,
    position: String,
    #[serde(default)]
    image: Option<String>,
    elig_remaining: u8,
    class_year: String,
    #[serde(default)]
    redshirt: Option<String>,
    scholarship_pct: f64,
    starting_season: u16,
    #[serde(default)]
    ending_season: Option<u16>,
    #[serde(default)]
    hide: Option<u8>,
    #[serde(default)]
    scenario: Option<String>,
    #[serde(default)]
    commit: Option<u8>,
    #[serde(default)]
    injury: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct CompensationCsvRow {
    athlete_id: String,
    year: u16,
    month: String,
    #[serde(default)]
    scenario: Option<String>,
    amount: f64,
    #[serde(default)]
    extras: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverrideCsvRow {
    athlete_id: String,
    field: String,
    #[serde(default)]
    scenario: Option<String>,
    season_override: u16,
    #[serde(default)]
    month: Option<String>,
    value: String,
}

fn parse_redshirt(raw: Option<&str>) -> Result<RedshirtStatus> {
    match raw.unwrap_or("") {
        "" | "none" => Ok(RedshirtStatus::None),
        "has" => Ok(RedshirtStatus::Available),
        "used" => Ok(RedshirtStatus::Used),
        other => bail!("unknown redshirt status '{other}'"),
    }
}

fn parse_flag(raw: Option<u8>) -> Option<bool> {
    raw.map(|value| value != 0)
}

/// Parse the `bucket=amount;bucket=amount` extras column. Malformed pairs
/// are dropped with a warning rather than failing the whole export.
fn parse_extras(raw: Option<&str>) -> Vec<SupplementalAmount> {
    let mut extras = Vec::new();
    for pair in raw.unwrap_or("").split(';').filter(|p| !p.is_empty()) {
        match pair.split_once('=').map(|(bucket, amount)| (bucket, amount.trim().parse::<f64>())) {
            Some((bucket, Ok(amount))) if !bucket.is_empty() => {
                extras.push(SupplementalAmount {
                    bucket: bucket.trim().to_string(),
                    amount,
                });
            }
            _ => log::warn!("Skipping malformed extras pair '{pair}'"),
        }
    }
    extras
}

pub fn load_athletes_csv(path: &Path) -> Result<Vec<AthleteBase>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open athletes csv {}", path.display()))?;
    let mut athletes = Vec::new();
    for (line, record) in reader.deserialize::<AthleteCsvRow>().enumerate() {
        let row = record.with_context(|| format!("athletes csv row {}", line + 2))?;
        let class_year = ClassYear::from_code(&row.class_year)
            .with_context(|| format!("unknown class year '{}' (row {})", row.class_year, line + 2))?;
        athletes.push(AthleteBase {
            id: row.id,
            name: row.name,
            position: row.position,
            image: row.image.filter(|s| !s.is_empty()),
            elig_remaining: row.elig_remaining,
            class_year,
            redshirt: parse_redshirt(row.redshirt.as_deref())?,
            scholarship_pct: row.scholarship_pct,
            starting_season: row.starting_season,
            ending_season: row.ending_season.unwrap_or(0),
            hide: row.hide.unwrap_or(0) != 0,
            scenario: row.scenario.unwrap_or_default(),
            commit: parse_flag(row.commit),
            injury: parse_flag(row.injury),
            created_at: None,
            updated_at: None,
        });
    }
    Ok(athletes)
}

pub fn load_compensation_csv(path: &Path) -> Result<Vec<CompensationRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open compensation csv {}", path.display()))?;
    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<CompensationCsvRow>().enumerate() {
        let row = record.with_context(|| format!("compensation csv row {}", line + 2))?;
        rows.push(CompensationRow {
            athlete_id: row.athlete_id,
            year: row.year,
            month: row.month,
            scenario: row.scenario.unwrap_or_default(),
            amount: row.amount,
            extras: parse_extras(row.extras.as_deref()),
        });
    }
    Ok(rows)
}

pub fn load_overrides_csv(path: &Path) -> Result<Vec<FieldOverrideRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open overrides csv {}", path.display()))?;
    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<OverrideCsvRow>().enumerate() {
        let row = record.with_context(|| format!("overrides csv row {}", line + 2))?;
        rows.push(FieldOverrideRow {
            athlete_id: row.athlete_id,
            field: row.field,
            scenario: row.scenario.unwrap_or_default(),
            season_override: row.season_override,
            month: row.month.unwrap_or_else(|| "00".to_string()),
            value: row.value,
        });
    }
    Ok(rows)
}
