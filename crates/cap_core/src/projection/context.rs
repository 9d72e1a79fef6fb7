use crate::models::Month;
use crate::resolve::ScenarioPriority;

/// Explicit inputs of one resolution pass. Threaded by reference into every
/// stage; nothing in the engine reads ambient "current year" state.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// Reporting year the projection is anchored to.
    pub target_year: u16,
    /// First month of the fiscal year.
    pub fiscal_start: Month,
    /// Active scenario layered over the baseline.
    pub scenario: ScenarioPriority,
}

impl ResolutionContext {
    pub fn new(target_year: u16, fiscal_start: Month, selected_scenario: &str) -> Self {
        Self {
            target_year,
            fiscal_start,
            scenario: ScenarioPriority::new(selected_scenario),
        }
    }
}
