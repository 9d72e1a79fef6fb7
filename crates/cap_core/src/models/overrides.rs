use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::models::compensation::ANNUAL_MONTH_CODE;

/// A planner's correction to one base-record field, scoped to a scenario and
/// anchored to a season. Values are string-encoded in persistence; only one
/// row wins per (athlete, field) resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOverrideRow {
    pub athlete_id: String,
    pub field: String,
    #[serde(default)]
    pub scenario: String,
    pub season_override: u16,
    #[serde(default = "default_override_month")]
    pub month: String,
    pub value: String,
}

fn default_override_month() -> String {
    ANNUAL_MONTH_CODE.to_string()
}

/// The overridable base-record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideField {
    Position,
    Name,
    Image,
    ClassYear,
    EligRemaining,
    ScholarshipPct,
    StartingSeason,
    EndingSeason,
    Hide,
    Commit,
    Injury,
}

/// Wire encoding of an override value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    Bool,
    Text,
}

pub const ALL_OVERRIDE_FIELDS: [OverrideField; 11] = [
    OverrideField::Position,
    OverrideField::Name,
    OverrideField::Image,
    OverrideField::ClassYear,
    OverrideField::EligRemaining,
    OverrideField::ScholarshipPct,
    OverrideField::StartingSeason,
    OverrideField::EndingSeason,
    OverrideField::Hide,
    OverrideField::Commit,
    OverrideField::Injury,
];

impl OverrideField {
    pub const fn name(self) -> &'static str {
        match self {
            OverrideField::Position => "position",
            OverrideField::Name => "name",
            OverrideField::Image => "image",
            OverrideField::ClassYear => "class_year",
            OverrideField::EligRemaining => "elig_remaining",
            OverrideField::ScholarshipPct => "scholarship_pct",
            OverrideField::StartingSeason => "starting_season",
            OverrideField::EndingSeason => "ending_season",
            OverrideField::Hide => "hide",
            OverrideField::Commit => "commit",
            OverrideField::Injury => "injury",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "position" => Some(OverrideField::Position),
            "name" => Some(OverrideField::Name),
            "image" => Some(OverrideField::Image),
            "class_year" => Some(OverrideField::ClassYear),
            "elig_remaining" => Some(OverrideField::EligRemaining),
            "scholarship_pct" => Some(OverrideField::ScholarshipPct),
            "starting_season" => Some(OverrideField::StartingSeason),
            "ending_season" => Some(OverrideField::EndingSeason),
            "hide" => Some(OverrideField::Hide),
            "commit" => Some(OverrideField::Commit),
            "injury" => Some(OverrideField::Injury),
            _ => None,
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            OverrideField::EligRemaining
            | OverrideField::StartingSeason
            | OverrideField::EndingSeason => FieldKind::Int,
            OverrideField::ScholarshipPct => FieldKind::Float,
            OverrideField::Hide | OverrideField::Commit | OverrideField::Injury => FieldKind::Bool,
            OverrideField::Position
            | OverrideField::Name
            | OverrideField::Image
            | OverrideField::ClassYear => FieldKind::Text,
        }
    }
}

/// A decoded override value, tagged by field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Decode a raw override value for `field`.
///
/// Boolean fields use the exhaustive legacy `"1"`/`"0"` mapping and fail
/// loudly on anything else. Numeric parse failures degrade to "no override"
/// (the base value stands) with a warning, per the defensive contract.
pub fn decode_value(
    field: OverrideField,
    raw: &str,
) -> Result<Option<OverrideValue>, ProjectionError> {
    let trimmed = raw.trim();
    match field.kind() {
        FieldKind::Bool => match trimmed {
            "1" => Ok(Some(OverrideValue::Bool(true))),
            "0" => Ok(Some(OverrideValue::Bool(false))),
            other => Err(ProjectionError::UnrecognizedBoolToken {
                field: field.name(),
                value: other.to_string(),
            }),
        },
        FieldKind::Int => match trimmed.parse::<i64>() {
            Ok(parsed) => Ok(Some(OverrideValue::Int(parsed))),
            Err(_) => {
                log::warn!(
                    "Dropping unparseable integer override for {}: '{}'",
                    field.name(),
                    raw
                );
                Ok(None)
            }
        },
        FieldKind::Float => match trimmed.parse::<f64>() {
            Ok(parsed) => Ok(Some(OverrideValue::Float(parsed))),
            Err(_) => {
                log::warn!(
                    "Dropping unparseable float override for {}: '{}'",
                    field.name(),
                    raw
                );
                Ok(None)
            }
        },
        FieldKind::Text => Ok(Some(OverrideValue::Text(trimmed.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in ALL_OVERRIDE_FIELDS {
            assert_eq!(OverrideField::from_name(field.name()), Some(field));
        }
        assert_eq!(OverrideField::from_name("jersey_number"), None);
    }

    #[test]
    fn test_bool_decoding_is_exhaustive() {
        assert_eq!(
            decode_value(OverrideField::Hide, "1").unwrap(),
            Some(OverrideValue::Bool(true))
        );
        assert_eq!(
            decode_value(OverrideField::Injury, "0").unwrap(),
            Some(OverrideValue::Bool(false))
        );
        // Anything outside "1"/"0" must fail loudly, never default.
        assert!(matches!(
            decode_value(OverrideField::Commit, "true"),
            Err(ProjectionError::UnrecognizedBoolToken { .. })
        ));
        assert!(matches!(
            decode_value(OverrideField::Hide, ""),
            Err(ProjectionError::UnrecognizedBoolToken { .. })
        ));
    }

    #[test]
    fn test_numeric_decoding_degrades() {
        assert_eq!(
            decode_value(OverrideField::EligRemaining, "3").unwrap(),
            Some(OverrideValue::Int(3))
        );
        assert_eq!(
            decode_value(OverrideField::ScholarshipPct, "0.75").unwrap(),
            Some(OverrideValue::Float(0.75))
        );
        // Malformed numerics are a degradable condition.
        assert_eq!(decode_value(OverrideField::EligRemaining, "lots").unwrap(), None);
        assert_eq!(decode_value(OverrideField::ScholarshipPct, "half").unwrap(), None);
    }

    #[test]
    fn test_text_passes_through() {
        assert_eq!(
            decode_value(OverrideField::Position, "WR").unwrap(),
            Some(OverrideValue::Text("WR".to_string()))
        );
    }

    #[test]
    fn test_override_month_defaults_to_annual() {
        let row: FieldOverrideRow = serde_json::from_str(
            r#"{
                "athlete_id": "a1",
                "field": "position",
                "season_override": 2025,
                "value": "TE"
            }"#,
        )
        .unwrap();
        assert_eq!(row.month, ANNUAL_MONTH_CODE);
        assert_eq!(row.scenario, "");
    }
}
