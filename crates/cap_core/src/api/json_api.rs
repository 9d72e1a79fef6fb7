use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::models::{
    AdditionalDataRow, AthleteBase, CompensationRow, FieldOverrideRow, Month,
};
use crate::projection::{project_team, ProjectionInput, ResolutionContext, TeamProjection};

/// Stable error-code prefixes for API consumers.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_CAP_001";
    pub const SCHEMA_VERSION: &str = "E_CAP_002";
    pub const INVALID_MONTH: &str = "E_CAP_003";
    pub const PROJECTION_FAILED: &str = "E_CAP_004";
    pub const SERIALIZATION: &str = "E_CAP_005";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

/// One team/year/scenario projection query plus the row snapshot backing it.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProjectionRequest {
    pub schema_version: u8,
    /// Reporting year the projection is anchored to.
    pub year: u16,
    /// First month of the fiscal year, by full name (e.g. "July").
    pub month: String,
    /// Active scenario; empty or absent means the baseline plan.
    #[serde(default)]
    pub scenario: String,
    pub athletes: Vec<AthleteBase>,
    #[serde(default)]
    pub compensation: Vec<CompensationRow>,
    #[serde(default)]
    pub overrides: Vec<FieldOverrideRow>,
    #[serde(default)]
    pub additional: Vec<AdditionalDataRow>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProjectionResponse {
    pub schema_version: u8,
    pub year: u16,
    pub fiscal_start: Month,
    pub scenario: String,
    #[serde(flatten)]
    pub projection: TeamProjection,
}

/// Run one projection from a typed request.
pub fn run_projection(request: &ProjectionRequest) -> Result<ProjectionResponse, ProjectionError> {
    if request.schema_version != crate::SCHEMA_VERSION {
        return Err(ProjectionError::SchemaVersionMismatch {
            found: request.schema_version,
            expected: crate::SCHEMA_VERSION,
        });
    }
    let fiscal_start = Month::from_name(&request.month).ok_or_else(|| {
        ProjectionError::UnknownMonth {
            token: request.month.clone(),
        }
    })?;
    let ctx = ResolutionContext::new(request.year, fiscal_start, &request.scenario);
    let input = ProjectionInput {
        athletes: request.athletes.clone(),
        compensation: request.compensation.clone(),
        overrides: request.overrides.clone(),
        additional: request.additional.clone(),
    };
    let projection = project_team(&input, &ctx)?;
    Ok(ProjectionResponse {
        schema_version: crate::SCHEMA_VERSION,
        year: request.year,
        fiscal_start,
        scenario: request.scenario.clone(),
        projection,
    })
}

/// JSON-in/JSON-out projection entry point for host integrations.
pub fn project_team_json(request_json: &str) -> Result<String, String> {
    let request: ProjectionRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;

    let response = run_projection(&request).map_err(|e| match e {
        ProjectionError::SchemaVersionMismatch { .. } => {
            err_code(error_codes::SCHEMA_VERSION, e)
        }
        ProjectionError::UnknownMonth { ref token } if *token == request.month => {
            err_code(error_codes::INVALID_MONTH, &e)
        }
        other => err_code(error_codes::PROJECTION_FAILED, other),
    })?;

    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZATION, e))
}
