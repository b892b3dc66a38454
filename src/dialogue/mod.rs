// Dialogue engine
//
// Speaker scheduling, per-persona prompt composition, response cleanup and
// the periodic rewriting of persona and scenario prompts, tied together by
// `DebateSession`.

pub mod compositor;
pub mod evolution;
pub mod sanitizer;
pub mod scheduler;
pub mod seed;
pub mod session;
pub mod transcript;

pub use compositor::{compose, natural_view, persona_view};
pub use evolution::{evolve_persona_prompt, evolve_scenario_prompt, is_due};
pub use sanitizer::sanitize;
pub use scheduler::{choose_speaker, SpeakerScheduler};
pub use seed::parse_seed;
pub use session::{DebateSession, TurnReport};
pub use transcript::{Speaker, Transcript, Utterance};
