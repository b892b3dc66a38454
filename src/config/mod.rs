// Configuration module
// Public interface for configuration and startup resource loading

pub mod constants;
mod loader;
pub mod persona;
pub mod scenario;
mod settings;

pub use loader::{
    load_config, load_resources, load_speaker_order, parse_name_list, read_name_list,
    with_api_key_fallback, RunResources,
};
pub use persona::{PersonaId, PersonaProfile, PersonaStore};
pub use scenario::ScenarioState;
pub use settings::{Config, EvolutionSettings, HistoryRoles, ResourcePaths, ScenarioCadence};
