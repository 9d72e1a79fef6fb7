use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scenario tag of the baseline/actual plan.
pub const BASELINE_SCENARIO: &str = "";

/// Terminal slot of every priority list. No persisted row carries this tag,
/// so it never matches; it exists so the priority list always has a floor.
pub const NEVER_MATCH_SCENARIO: &str = "__none__";

/// Ordered scenario preference for one resolution pass: the planner's active
/// scenario (when one is selected) beats the unscoped baseline, which beats
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScenarioPriority {
    ordered: Vec<String>,
}

impl ScenarioPriority {
    pub fn new(selected: &str) -> Self {
        let mut ordered = Vec::with_capacity(3);
        if !selected.is_empty() {
            ordered.push(selected.to_string());
        }
        ordered.push(BASELINE_SCENARIO.to_string());
        ordered.push(NEVER_MATCH_SCENARIO.to_string());
        Self { ordered }
    }

    /// The active scenario, or the baseline tag when none is selected.
    pub fn selected(&self) -> &str {
        &self.ordered[0]
    }

    /// Priority index of `scenario`, lower is stronger. The sentinel slot
    /// never matches a row.
    pub fn rank(&self, scenario: &str) -> Option<usize> {
        if scenario == NEVER_MATCH_SCENARIO {
            return None;
        }
        self.ordered.iter().position(|tag| tag == scenario)
    }

    pub fn matches(&self, scenario: &str) -> bool {
        self.rank(scenario).is_some()
    }

    /// The scenario union persistence queries filter rows against.
    pub fn union(&self) -> &[String] {
        &self.ordered
    }
}
