// Shared scenario prompt (rules + fixed + dynamic fragments)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::ParleyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    /// Ground rules every persona must follow
    pub rules: String,

    #[serde(rename = "scenario_fixed")]
    fixed_prompt: String,

    /// Rewritten periodically as the debate develops
    #[serde(rename = "scenario_variable")]
    pub dynamic_prompt: String,
}

impl ScenarioState {
    pub fn new(
        rules: impl Into<String>,
        fixed_prompt: impl Into<String>,
        dynamic_prompt: impl Into<String>,
    ) -> Self {
        Self {
            rules: rules.into(),
            fixed_prompt: fixed_prompt.into(),
            dynamic_prompt: dynamic_prompt.into(),
        }
    }

    pub fn fixed_prompt(&self) -> &str {
        &self.fixed_prompt
    }

    /// Load from a `system_prompt.json`-style file
    pub fn load(path: &Path) -> Result<Self, ParleyError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ParleyError::unreadable("Scenario prompt", path, e))?;
        serde_json::from_str(&contents)
            .map_err(|e| ParleyError::malformed("Scenario prompt", path, e))
    }
}
