//! # cap_core - Scenario-Aware Roster Compensation Projection Engine
//!
//! Given a team's athlete rows, a reporting year, a fiscal-year start month,
//! and an active planning scenario, this library resolves each athlete's
//! effective attributes and compensation by merging base records with
//! layered, time- and scenario-scoped overrides, then projects a 12-month
//! fiscal-year breakdown with carry-forward for years that have no explicit
//! data.
//!
//! ## Features
//! - Scenario priority with clean fallback to the baseline plan
//! - Temporal priority with a bounded horizon for future recruits
//! - Fiscal years anchored at any month, assembled from two calendar years
//! - Pure, deterministic resolution (same snapshot = same projection)
//! - JSON API for easy integration with host applications

pub mod api;
pub mod error;
pub mod models;
pub mod projection;
pub mod resolve;

// Re-export the main API surface
pub use api::{project_team_json, run_projection, ProjectionRequest, ProjectionResponse};
pub use error::{ProjectionError, Result};

// Re-export model types
pub use models::{
    AdditionalDataRow, AthleteBase, ClassYear, CompensationRow, FieldOverrideRow, Month,
    MonthlyBreakdown, RedshirtStatus, SupplementalAmount,
};

// Re-export the projection pipeline
pub use projection::{
    project_team, ProjectionInput, ResolutionContext, ResolvedAthlete, TeamProjection,
};

// Re-export override resolution
pub use resolve::{ScenarioPriority, BASELINE_SCENARIO, NEVER_MATCH_SCENARIO};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster() -> serde_json::Value {
        json!([
            {
                "id": "qb1", "name": "Starter", "position": "QB",
                "elig_remaining": 3, "class_year": "SO",
                "scholarship_pct": 1.0, "starting_season": 2023
            },
            {
                "id": "wr1", "name": "Slot", "position": "WR",
                "elig_remaining": 4, "class_year": "FR",
                "scholarship_pct": 0.5, "starting_season": 2024
            },
            {
                "id": "rec1", "name": "Commit", "position": "QB",
                "elig_remaining": 4, "class_year": "FR",
                "scholarship_pct": 1.0, "starting_season": 2027
            },
            {
                "id": "gone1", "name": "Departed", "position": "RB",
                "elig_remaining": 4, "class_year": "JR",
                "scholarship_pct": 1.0, "starting_season": 2021,
                "ending_season": 2024
            }
        ])
    }

    #[test]
    fn test_full_team_projection() {
        let request = json!({
            "schema_version": 1,
            "year": 2025,
            "month": "July",
            "athletes": roster(),
            "compensation": [
                {"athlete_id": "qb1", "year": 2024, "month": "00", "amount": 120000.0},
                {"athlete_id": "wr1", "year": 2025, "month": "00", "amount": 60000.0}
            ]
        });

        let result = project_team_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        let players = parsed["players"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        let recruits = parsed["recruits"].as_array().unwrap();
        assert_eq!(recruits.len(), 1);
        assert_eq!(recruits[0]["id"], "rec1");
        let dead = parsed["dead_money"].as_array().unwrap();
        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0]["id"], "gone1");

        // qb1 carries the 2024 amount into 2025, but eligibility ends after
        // 2025, so only the Jul-Dec half of the fiscal year pays: 60k. wr1's
        // explicit 2025 row carries across both halves: 60k.
        assert_eq!(parsed["total_team_compensation"], 120000.0);
        assert_eq!(parsed["position_compensation"]["QB"], 60000.0);
        assert_eq!(parsed["position_compensation"]["WR"], 60000.0);
    }

    #[test]
    fn test_projection_is_pure() {
        let request = json!({
            "schema_version": 1,
            "year": 2025,
            "month": "January",
            "scenario": "whatif",
            "athletes": roster(),
            "overrides": [
                {"athlete_id": "qb1", "field": "position", "scenario": "whatif",
                 "season_override": 2025, "value": "TE"}
            ]
        })
        .to_string();

        let first = project_team_json(&request).unwrap();
        let second = project_team_json(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
