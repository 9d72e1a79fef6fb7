use std::collections::BTreeMap;

use fxhash::FxHashMap;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::models::{
    decode_value, AdditionalDataRow, AthleteBase, ClassYear, CompRecord, CompensationRow,
    FieldOverrideRow, MonthlyBreakdown, OverrideField, OverrideValue, RedshirtStatus,
    ALL_OVERRIDE_FIELDS,
};
use crate::projection::aggregate;
use crate::projection::context::ResolutionContext;
use crate::projection::fiscal::{assemble_fiscal_year, CompBook};
use crate::resolve::{resolve_field, OverrideIndex};

/// Everything the persistence layer materializes for one (team, year,
/// scenario) query. The engine treats all of it as a read-only snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProjectionInput {
    pub athletes: Vec<AthleteBase>,
    pub compensation: Vec<CompensationRow>,
    pub overrides: Vec<FieldOverrideRow>,
    pub additional: Vec<AdditionalDataRow>,
}

/// An athlete with every overridable field replaced by its winning value,
/// aged to the target year and carrying the assembled fiscal-year
/// compensation. Supplemental bucket totals serialize as flattened
/// `comp_<bucket>` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedAthlete {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub class_year: ClassYear,
    pub elig_remaining: u8,
    pub redshirt: RedshirtStatus,
    pub scholarship_pct: f64,
    pub starting_season: u16,
    /// Explicit departure year; 0 when the end is eligibility-derived.
    pub ending_season: u16,
    pub scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury: Option<bool>,
    /// Fiscal-year total compensation.
    pub compensation: f64,
    /// Fiscal-aligned amounts keyed January through December.
    pub monthly_compensation: MonthlyBreakdown,
    #[serde(flatten)]
    pub extra_compensation: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scholarship_breakdown: BTreeMap<String, f64>,
    pub is_dead_money: bool,
}

/// Full projection for one team/year/scenario query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamProjection {
    /// Active roster at the target year.
    pub players: Vec<ResolvedAthlete>,
    /// Committed athletes who have not arrived yet. Projected, but outside
    /// the team totals until their starting season.
    pub recruits: Vec<ResolvedAthlete>,
    /// Departed athletes whose compensation still counts against history.
    pub dead_money: Vec<ResolvedAthlete>,
    pub total_team_compensation: f64,
    pub position_compensation: BTreeMap<String, f64>,
    /// Totals grouped by arrival season, across players and recruits, used
    /// to normalize a recruit against their arrival cohort.
    pub starting_year_compensation: BTreeMap<u16, f64>,
    pub dead_money_compensation: f64,
}

/// Where a resolved athlete lands in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Player,
    Recruit,
    DeadMoney,
}

/// Resolve and project every athlete in the batch.
///
/// Shape violations (missing ids, unknown month tokens, unrecognized
/// boolean encodings) reject the whole batch; silently dropping
/// identity-bearing rows would corrupt the aggregate totals.
pub fn project_team(input: &ProjectionInput, ctx: &ResolutionContext) -> Result<TeamProjection> {
    for athlete in &input.athletes {
        athlete.validate().map_err(|message| ProjectionError::InvalidAthlete {
            id: athlete.id.clone(),
            message,
        })?;
    }

    let overrides = OverrideIndex::build(&input.overrides)?;
    let books = build_books(&input.compensation, ctx)?;
    let breakdowns = parse_additional(&input.additional)?;

    // Each athlete reads only its own rows, so the set fans out with no
    // coordination. Input order is preserved.
    let resolved: Vec<Option<(Route, ResolvedAthlete)>> = input
        .athletes
        .par_iter()
        .map(|athlete| resolve_one(athlete, &overrides, &books, &breakdowns, ctx))
        .collect::<Result<Vec<_>>>()?;

    let mut projection = TeamProjection::default();
    for entry in resolved.into_iter().flatten() {
        match entry {
            (Route::Player, athlete) => projection.players.push(athlete),
            (Route::Recruit, athlete) => projection.recruits.push(athlete),
            (Route::DeadMoney, athlete) => projection.dead_money.push(athlete),
        }
    }

    projection.total_team_compensation = aggregate::team_total(&projection.players);
    projection.position_compensation = aggregate::position_totals(&projection.players);
    projection.starting_year_compensation = aggregate::starting_year_totals(
        projection.players.iter().chain(projection.recruits.iter()),
    );
    projection.dead_money_compensation = aggregate::team_total(&projection.dead_money);

    log::debug!(
        "Projected {} players, {} recruits, {} dead money for {}",
        projection.players.len(),
        projection.recruits.len(),
        projection.dead_money.len(),
        ctx.target_year
    );
    Ok(projection)
}

fn build_books(
    rows: &[CompensationRow],
    ctx: &ResolutionContext,
) -> Result<FxHashMap<String, CompBook>> {
    let mut books: FxHashMap<String, CompBook> = FxHashMap::default();
    for row in rows {
        let record = row.classify()?;
        let book = books.entry(row.athlete_id.clone()).or_default();
        match &record {
            CompRecord::Annual(annual) => book.insert_annual(annual, &ctx.scenario),
            CompRecord::Monthly(monthly) => book.insert_monthly(monthly),
        }
    }
    Ok(books)
}

fn parse_additional(
    rows: &[AdditionalDataRow],
) -> Result<FxHashMap<String, BTreeMap<String, f64>>> {
    let mut parsed: FxHashMap<String, BTreeMap<String, f64>> = FxHashMap::default();
    for row in rows {
        if row.athlete_id.is_empty() {
            return Err(ProjectionError::MissingAthleteId {
                context: "additional data row",
            });
        }
        let value = row.value.trim().parse::<f64>().unwrap_or_else(|_| {
            log::warn!(
                "Unparseable additional value for {}/{}: '{}'",
                row.athlete_id,
                row.category,
                row.value
            );
            0.0
        });
        parsed
            .entry(row.athlete_id.clone())
            .or_default()
            .insert(row.category.clone(), value);
    }
    Ok(parsed)
}

fn resolve_one(
    base: &AthleteBase,
    overrides: &OverrideIndex,
    books: &FxHashMap<String, CompBook>,
    breakdowns: &FxHashMap<String, BTreeMap<String, f64>>,
    ctx: &ResolutionContext,
) -> Result<Option<(Route, ResolvedAthlete)>> {
    let mut athlete = base.clone();

    // Pre-arrival planning can move the arrival date: for a recruit, any
    // override in the scenario union anchored past the recorded arrival
    // raises the effective starting season to that anchor.
    if base.starting_season > ctx.target_year {
        let mut raised = base.starting_season;
        for field in ALL_OVERRIDE_FIELDS {
            for row in overrides.rows_for(&base.id, field) {
                if ctx.scenario.matches(&row.scenario) && row.season_override > raised {
                    raised = row.season_override;
                }
            }
        }
        athlete.starting_season = raised;
    }

    // Field winners are selected against a fixed view so that an explicit
    // starting/ending override applied mid-merge cannot shift the horizon
    // for the fields after it.
    let resolver_view = athlete.clone();
    for field in ALL_OVERRIDE_FIELDS {
        let rows = overrides.rows_for(&base.id, field);
        let Some(winner) = resolve_field(rows, &ctx.scenario, ctx.target_year, &resolver_view)
        else {
            continue;
        };
        if let Some(value) = decode_value(field, &winner.value)? {
            apply_value(&mut athlete, field, value);
        }
    }

    if athlete.hide {
        return Ok(None);
    }

    let ending_year = athlete.natural_ending_season();

    let mut book = books.get(&athlete.id).cloned().unwrap_or_default();
    book.carry_annuals(athlete.starting_season..=ending_year);
    let fiscal = assemble_fiscal_year(&book, ctx.target_year, ctx.fiscal_start, &ctx.scenario);

    // Age forward by direct ordinal lookup; recruits have not started yet
    // and stay as recorded.
    let elapsed = ctx.target_year.saturating_sub(athlete.starting_season);
    let class_year = athlete.class_year.advanced_by(elapsed);
    let elig_left = i32::from(athlete.elig_remaining) - i32::from(elapsed);

    let is_dead_money =
        athlete.ending_season != 0 && athlete.ending_season < ctx.target_year;
    let route = if is_dead_money {
        Route::DeadMoney
    } else if athlete.is_recruit(ctx.target_year) {
        Route::Recruit
    } else if elig_left <= 0 {
        // Eligibility exhausted naturally; not on the roster, not dead money.
        return Ok(None);
    } else {
        Route::Player
    };

    let mut extra_compensation = BTreeMap::new();
    for (bucket, total) in &fiscal.extra_totals {
        extra_compensation.insert(format!("comp_{bucket}"), *total);
    }

    let resolved = ResolvedAthlete {
        id: athlete.id.clone(),
        name: athlete.name.clone(),
        position: athlete.position.clone(),
        image: athlete.image.clone(),
        class_year,
        elig_remaining: elig_left.max(0) as u8,
        redshirt: athlete.redshirt,
        scholarship_pct: athlete.scholarship_pct,
        starting_season: athlete.starting_season,
        ending_season: athlete.ending_season,
        scenario: athlete.scenario.clone(),
        commit: athlete.commit,
        injury: athlete.injury,
        compensation: fiscal.amount,
        monthly_compensation: fiscal.monthly,
        extra_compensation,
        scholarship_breakdown: breakdowns.get(&athlete.id).cloned().unwrap_or_default(),
        is_dead_money,
    };
    Ok(Some((route, resolved)))
}

/// Merge one decoded override value onto the working record.
fn apply_value(athlete: &mut AthleteBase, field: OverrideField, value: OverrideValue) {
    match (field, value) {
        (OverrideField::Position, OverrideValue::Text(text)) => athlete.position = text,
        (OverrideField::Name, OverrideValue::Text(text)) => athlete.name = text,
        (OverrideField::Image, OverrideValue::Text(text)) => athlete.image = Some(text),
        (OverrideField::ClassYear, OverrideValue::Text(text)) => {
            match ClassYear::from_code(&text) {
                Some(class) => athlete.class_year = class,
                None => log::warn!(
                    "Dropping class year override with unknown code '{}' (athlete {})",
                    text,
                    athlete.id
                ),
            }
        }
        (OverrideField::EligRemaining, OverrideValue::Int(value)) => {
            athlete.elig_remaining = value.clamp(0, 5) as u8;
        }
        (OverrideField::ScholarshipPct, OverrideValue::Float(value)) => {
            athlete.scholarship_pct = value.clamp(0.0, 1.0);
        }
        (OverrideField::StartingSeason, OverrideValue::Int(value)) => {
            athlete.starting_season = value.clamp(0, i64::from(u16::MAX)) as u16;
        }
        (OverrideField::EndingSeason, OverrideValue::Int(value)) => {
            athlete.ending_season = value.clamp(0, i64::from(u16::MAX)) as u16;
        }
        (OverrideField::Hide, OverrideValue::Bool(value)) => athlete.hide = value,
        (OverrideField::Commit, OverrideValue::Bool(value)) => athlete.commit = Some(value),
        (OverrideField::Injury, OverrideValue::Bool(value)) => {
            // Never flip a never-recorded injury to an explicit "not
            // injured"; unset and false are distinct states.
            if value || athlete.injury.is_some() {
                athlete.injury = Some(value);
            }
        }
        (field, value) => {
            log::warn!(
                "Ignoring override value {:?} with mismatched kind for field '{}'",
                value,
                field.name()
            );
        }
    }
}
