//! Override resolution: scenario priority and the per-field winner
//! selection over sparse, string-encoded override rows.

pub mod field;
pub mod scenario;

pub use field::{override_horizon, resolve_field, OverrideIndex};
pub use scenario::{ScenarioPriority, BASELINE_SCENARIO, NEVER_MATCH_SCENARIO};
