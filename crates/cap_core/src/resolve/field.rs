use fxhash::FxHashMap;

use crate::error::ProjectionError;
use crate::models::{AthleteBase, FieldOverrideRow, OverrideField};
use crate::resolve::scenario::ScenarioPriority;

/// Immutable lookup over the batch's override rows, keyed by
/// (athlete, field). Rows keep their fetch order within each key.
#[derive(Debug, Default)]
pub struct OverrideIndex {
    by_key: FxHashMap<(String, OverrideField), Vec<FieldOverrideRow>>,
}

impl OverrideIndex {
    /// Index raw rows. A row without an athlete id rejects the batch;
    /// a row naming an unknown field is skipped with a warning.
    pub fn build(rows: &[FieldOverrideRow]) -> Result<Self, ProjectionError> {
        let mut by_key: FxHashMap<(String, OverrideField), Vec<FieldOverrideRow>> =
            FxHashMap::default();
        for row in rows {
            if row.athlete_id.is_empty() {
                return Err(ProjectionError::MissingAthleteId {
                    context: "field override row",
                });
            }
            let Some(field) = OverrideField::from_name(&row.field) else {
                log::warn!(
                    "Skipping override for unknown field '{}' (athlete {})",
                    row.field,
                    row.athlete_id
                );
                continue;
            };
            by_key
                .entry((row.athlete_id.clone(), field))
                .or_default()
                .push(row.clone());
        }
        Ok(Self { by_key })
    }

    pub fn rows_for(&self, athlete_id: &str, field: OverrideField) -> &[FieldOverrideRow] {
        self.by_key
            .get(&(athlete_id.to_string(), field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Latest season an override may apply to: the query year for athletes
/// already active, the arrival year for future recruits. Pre-arrival
/// planning must not pick up overrides intended for the current season.
pub fn override_horizon(athlete: &AthleteBase, target_year: u16) -> u16 {
    if athlete.starting_season <= target_year {
        target_year
    } else {
        athlete.starting_season
    }
}

/// Select the winning override among `rows` for one (athlete, field).
///
/// Candidates at or before the horizon are ordered by scenario priority
/// first, then by most recent season. A season tie across scenarios is
/// broken by scenario priority, never recency.
pub fn resolve_field<'a>(
    rows: &'a [FieldOverrideRow],
    priority: &ScenarioPriority,
    target_year: u16,
    athlete: &AthleteBase,
) -> Option<&'a FieldOverrideRow> {
    let horizon = override_horizon(athlete, target_year);
    let mut best: Option<(usize, u16, &FieldOverrideRow)> = None;
    for row in rows {
        if row.season_override > horizon {
            continue;
        }
        let Some(rank) = priority.rank(&row.scenario) else {
            continue;
        };
        let candidate = (rank, row.season_override, row);
        best = match best {
            None => Some(candidate),
            Some((best_rank, best_season, _))
                if rank < best_rank || (rank == best_rank && row.season_override > best_season) =>
            {
                Some(candidate)
            }
            keep => keep,
        };
    }
    best.map(|(_, _, row)| row)
}
