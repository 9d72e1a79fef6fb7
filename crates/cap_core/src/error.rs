use thiserror::Error;

/// Input-shape violations that reject a whole projection batch.
///
/// Degradable conditions (missing compensation rows, unparseable numeric
/// override values, athletes with no override history) never surface here;
/// they fall back to defaults inside the engine. Anything that would corrupt
/// aggregate totals if silently skipped ends up as one of these variants.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Row is missing an athlete id ({context})")]
    MissingAthleteId { context: &'static str },

    #[error("Invalid athlete row '{id}': {message}")]
    InvalidAthlete { id: String, message: String },

    #[error("Unknown month token: '{token}'")]
    UnknownMonth { token: String },

    #[error("Unrecognized boolean token for field '{field}': '{value}'")]
    UnrecognizedBoolToken { field: &'static str, value: String },

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
