// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ParleyError;
use crate::providers::openai::DEFAULT_BASE_URL;
use crate::providers::ModelConfig;

use super::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, DEFAULT_UPDATE_CHARACTER_EVERY,
    DEFAULT_UPDATE_SCENARIO_EVERY,
};

/// Which statement counter drives scenario prompt rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCadence {
    /// Statements made so far by whoever is speaking this turn
    #[default]
    Speaker,
    /// Turns completed by the whole session
    Global,
}

/// How transcript roles are written into scenario rewrite requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRoles {
    /// Each line keeps its speaker's name as the role
    #[default]
    Speaker,
    /// Every line is sent as `user` (for endpoints that reject custom roles)
    User,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f32 {
    DEFAULT_TOP_P
}

fn default_update_character_every() -> u32 {
    DEFAULT_UPDATE_CHARACTER_EVERY
}

fn default_update_scenario_every() -> u32 {
    DEFAULT_UPDATE_SCENARIO_EVERY
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Contents of `config.json` / `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model identifier sent with every request
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus-sampling parameter
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Rewrite a persona's dynamic prompt every N of its statements
    #[serde(
        default = "default_update_character_every",
        alias = "update_dynamic_character_prompt_every_N_statements"
    )]
    pub update_character_every: u32,

    /// Rewrite the scenario's dynamic prompt every N statements
    #[serde(
        default = "default_update_scenario_every",
        alias = "new_dynamic_scenario_prompt_every_N_statements"
    )]
    pub update_scenario_every: u32,

    /// Echo every rewritten prompt to the console
    #[serde(default)]
    pub print_new_dynamic_prompts: bool,

    /// Falls back to `OPENAI_API_KEY` when empty
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub scenario_cadence: ScenarioCadence,

    #[serde(default)]
    pub scenario_history_roles: HistoryRoles,
}

impl Config {
    /// Sampling parameters for the completion gateway
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    pub fn evolution_settings(&self) -> EvolutionSettings {
        EvolutionSettings {
            update_character_every: self.update_character_every,
            update_scenario_every: self.update_scenario_every,
            print_new_dynamic_prompts: self.print_new_dynamic_prompts,
            scenario_cadence: self.scenario_cadence,
            scenario_history_roles: self.scenario_history_roles,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ParleyError> {
        if self.model.trim().is_empty() {
            return Err(ParleyError::InvalidConfig("model must not be empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(ParleyError::InvalidConfig(
                "api_key is empty and OPENAI_API_KEY is not set".into(),
            ));
        }
        if self.update_character_every == 0 {
            return Err(ParleyError::InvalidConfig(
                "update_character_every must be at least 1".into(),
            ));
        }
        if self.update_scenario_every == 0 {
            return Err(ParleyError::InvalidConfig(
                "update_scenario_every must be at least 1".into(),
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ParleyError::InvalidConfig(format!(
                "top_p must be in (0, 1], got {}",
                self.top_p
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ParleyError::InvalidConfig(format!(
                "temperature must be in [0, 2], got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Cadence and reporting knobs for prompt evolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionSettings {
    pub update_character_every: u32,
    pub update_scenario_every: u32,
    pub print_new_dynamic_prompts: bool,
    pub scenario_cadence: ScenarioCadence,
    pub scenario_history_roles: HistoryRoles,
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            update_character_every: DEFAULT_UPDATE_CHARACTER_EVERY,
            update_scenario_every: DEFAULT_UPDATE_SCENARIO_EVERY,
            print_new_dynamic_prompts: false,
            scenario_cadence: ScenarioCadence::default(),
            scenario_history_roles: HistoryRoles::default(),
        }
    }
}

/// Where the startup resources live
#[derive(Debug, Clone)]
pub struct ResourcePaths {
    pub config: PathBuf,
    pub names: PathBuf,
    pub speaker_order: PathBuf,
    pub system_prompt: PathBuf,
    pub persona_dir: PathBuf,
    pub seed_conversation: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config.json"),
            names: PathBuf::from("names.txt"),
            speaker_order: PathBuf::from("speaker_order.txt"),
            system_prompt: PathBuf::from("system_prompt.json"),
            persona_dir: PathBuf::from("."),
            seed_conversation: PathBuf::from("initial_conversation.txt"),
            output_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from_json(json: &str) -> Config {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_legacy_key_names_are_accepted() {
        let config = config_from_json(
            r#"{
                "model": "gpt-4o-mini",
                "max_tokens": 256,
                "temperature": 0.8,
                "top_p": 0.9,
                "update_dynamic_character_prompt_every_N_statements": 3,
                "new_dynamic_scenario_prompt_every_N_statements": 7,
                "print_new_dynamic_prompts": true,
                "api_key": "sk-test",
                "base_url": "http://localhost:1234/v1"
            }"#,
        );
        assert_eq!(config.update_character_every, 3);
        assert_eq!(config.update_scenario_every, 7);
        assert!(config.print_new_dynamic_prompts);
        assert_eq!(config.scenario_cadence, ScenarioCadence::Speaker);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config = config_from_json(r#"{"model": "m", "api_key": "k"}"#);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.scenario_history_roles, HistoryRoles::Speaker);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_zero_cadence_is_rejected() {
        let config = config_from_json(
            r#"{"model": "m", "api_key": "k", "update_character_every": 0}"#,
        );
        assert!(matches!(config.validate(), Err(ParleyError::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_top_p_is_rejected() {
        let config = config_from_json(r#"{"model": "m", "api_key": "k", "top_p": 1.5}"#);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_global_cadence_parses() {
        let config = config_from_json(
            r#"{"model": "m", "api_key": "k", "scenario_cadence": "global", "scenario_history_roles": "user"}"#,
        );
        assert_eq!(config.scenario_cadence, ScenarioCadence::Global);
        assert_eq!(config.scenario_history_roles, HistoryRoles::User);
    }
}
