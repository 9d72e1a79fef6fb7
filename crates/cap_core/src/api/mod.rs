pub mod json_api;

pub use json_api::{
    project_team_json, run_projection, ProjectionRequest, ProjectionResponse,
};
