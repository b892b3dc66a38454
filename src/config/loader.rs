// Startup resource loading
//
// Reads the config file, persona list, persona files, scenario prompt,
// speaker order and seed conversation. Every failure here is fatal.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::ParleyError;

use super::constants::API_KEY_ENV;
use super::persona::{PersonaId, PersonaStore};
use super::scenario::ScenarioState;
use super::settings::{Config, ResourcePaths};

/// Everything a session needs before the first turn
#[derive(Debug, Clone)]
pub struct RunResources {
    pub config: Config,
    pub personas: PersonaStore,
    pub scenario: ScenarioState,
    pub speaker_order: Vec<PersonaId>,
    pub seed_text: String,
}

/// Load and validate every resource named in `paths`
pub fn load_resources(paths: &ResourcePaths) -> Result<RunResources, ParleyError> {
    let config = load_config(&paths.config)?;

    let names = read_name_list(&paths.names, "Persona names list")?;
    validate_names(&names, &paths.names)?;
    let personas = PersonaStore::load(&paths.persona_dir, &names)?;

    let scenario = ScenarioState::load(&paths.system_prompt)?;
    let speaker_order = load_speaker_order(&paths.speaker_order, &personas)?;
    let seed_text = read_text(&paths.seed_conversation, "Initial conversation")?;

    Ok(RunResources {
        config,
        personas,
        scenario,
        speaker_order,
        seed_text,
    })
}

/// Load the config file (`.toml` as TOML, anything else as JSON)
pub fn load_config(path: &Path) -> Result<Config, ParleyError> {
    let contents = read_text(path, "Configuration file")?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let config: Config = if is_toml {
        toml::from_str(&contents)
            .map_err(|e| ParleyError::malformed("Configuration file", path, e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| ParleyError::malformed("Configuration file", path, e))?
    };

    let config = with_api_key_fallback(config, std::env::var(API_KEY_ENV).ok());
    config.validate()?;
    Ok(config)
}

/// Fill an empty `api_key` from the environment
pub fn with_api_key_fallback(mut config: Config, env_key: Option<String>) -> Config {
    if config.api_key.trim().is_empty() {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            config.api_key = key;
        }
    }
    config
}

/// Read a comma- or newline-separated list of names
pub fn read_name_list(path: &Path, what: &str) -> Result<Vec<PersonaId>, ParleyError> {
    Ok(parse_name_list(&read_text(path, what)?))
}

pub fn parse_name_list(text: &str) -> Vec<PersonaId> {
    text.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_names(names: &[PersonaId], path: &Path) -> Result<(), ParleyError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ParleyError::malformed(
                "Persona names list",
                path,
                format!("duplicate persona name '{}'", name),
            ));
        }
    }
    if names.len() < 2 {
        return Err(ParleyError::malformed(
            "Persona names list",
            path,
            "at least two personas are required",
        ));
    }
    Ok(())
}

/// Read the speaker order, rejecting names outside the persona set
pub fn load_speaker_order(
    path: &Path,
    personas: &PersonaStore,
) -> Result<Vec<PersonaId>, ParleyError> {
    let order = read_name_list(path, "Speaker order")?;
    if let Some(unknown) = order.iter().find(|name| !personas.contains(name)) {
        return Err(ParleyError::malformed(
            "Speaker order",
            path,
            format!("'{}' is not a known persona", unknown),
        ));
    }
    Ok(order)
}

fn read_text(path: &Path, what: &str) -> Result<String, ParleyError> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| ParleyError::unreadable(what, path, e))
}
