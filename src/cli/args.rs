// Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::ResourcePaths;

/// Run a self-evolving debate between LLM personas
#[derive(Debug, Parser)]
#[command(name = "parley", version, about)]
pub struct Cli {
    /// Config file (JSON, or TOML with a .toml extension)
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Comma-separated persona names
    #[arg(long, default_value = "names.txt")]
    pub names: PathBuf,

    /// Comma-separated speaker order used before random selection
    #[arg(long, default_value = "speaker_order.txt")]
    pub speaker_order: PathBuf,

    /// Scenario rules and prompts
    #[arg(long, default_value = "system_prompt.json")]
    pub system_prompt: PathBuf,

    /// Directory holding `<name>_prompt.json` persona files
    #[arg(long, default_value = ".")]
    pub persona_dir: PathBuf,

    /// Opening lines of the debate
    #[arg(long, default_value = "initial_conversation.txt")]
    pub seed_conversation: PathBuf,

    /// Where the conversation transcript is written
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed for random speaker selection (reproducible runs)
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,

    /// Increase diagnostic logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn resource_paths(&self) -> ResourcePaths {
        ResourcePaths {
            config: self.config.clone(),
            names: self.names.clone(),
            speaker_order: self.speaker_order.clone(),
            system_prompt: self.system_prompt.clone(),
            persona_dir: self.persona_dir.clone(),
            seed_conversation: self.seed_conversation.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
