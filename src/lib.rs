// Parley - self-evolving debates between LLM personas
// Library exports

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod logging;
pub mod providers;

pub use errors::ParleyError;
