// Defaults for optional configuration keys

/// Default maximum tokens per completion.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

pub const DEFAULT_TEMPERATURE: f32 = 1.0;

pub const DEFAULT_TOP_P: f32 = 1.0;

/// Persona prompt rewrite cadence, in statements by that persona.
pub const DEFAULT_UPDATE_CHARACTER_EVERY: u32 = 5;

/// Scenario prompt rewrite cadence, in statements.
pub const DEFAULT_UPDATE_SCENARIO_EVERY: u32 = 10;

/// Environment variable consulted when the config has no API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
