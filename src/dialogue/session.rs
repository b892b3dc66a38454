// Debate session turn loop
//
// All run state lives here and is threaded through the components
// explicitly. One request is in flight at a time; each turn finishes
// (including any prompt rewrites) before the next speaker is chosen.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cli::{Console, ConsoleEvent};
use crate::config::{EvolutionSettings, PersonaId, PersonaStore, ScenarioCadence, ScenarioState};
use crate::logging::TranscriptLog;
use crate::providers::{CompletionGateway, ModelConfig};

use super::compositor::compose;
use super::evolution::{evolve_persona_prompt, evolve_scenario_prompt, is_due};
use super::sanitizer::sanitize;
use super::scheduler::SpeakerScheduler;
use super::seed::parse_seed;
use super::transcript::{Speaker, Transcript, Utterance};

/// What happened during one turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub speaker: PersonaId,
    /// The appended line, or `None` when the model returned nothing usable
    pub line: Option<String>,
    pub persona_evolved: bool,
    pub scenario_evolved: bool,
}

pub struct DebateSession {
    gateway: Arc<dyn CompletionGateway>,
    model: ModelConfig,
    settings: EvolutionSettings,
    personas: PersonaStore,
    scenario: ScenarioState,
    scheduler: SpeakerScheduler,
    transcript: Transcript,
    log: Option<TranscriptLog>,
    console: Console,
    turns_completed: usize,
}

impl DebateSession {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        model: ModelConfig,
        settings: EvolutionSettings,
        personas: PersonaStore,
        scenario: ScenarioState,
        scheduler: SpeakerScheduler,
    ) -> Self {
        Self {
            gateway,
            model,
            settings,
            personas,
            scenario,
            scheduler,
            transcript: Transcript::new(),
            log: None,
            console: Console::stdout(false),
            turns_completed: 0,
        }
    }

    pub fn with_log(mut self, log: TranscriptLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Parse the seed conversation and record every line of it
    pub fn seed_from_text(&mut self, text: &str) -> Result<usize> {
        let utterances = parse_seed(text, &self.personas);
        let count = utterances.len();
        for utterance in utterances {
            self.record(utterance)?;
        }
        info!(
            "Seeded {} lines, last speaker {:?}",
            count,
            self.transcript.last_speaker()
        );
        Ok(count)
    }

    /// Run turns until an error surfaces
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting debate loop with gateway '{}'", self.gateway.name());
        loop {
            self.step().await?;
        }
    }

    /// Take a single turn
    pub async fn step(&mut self) -> Result<TurnReport> {
        let last = self.transcript.last_speaker().map(str::to_string);
        let speaker = self.scheduler.next_speaker(last.as_deref());
        self.console.show(ConsoleEvent::Thinking {
            speaker: speaker.clone(),
        });

        // Counted before this turn's line is appended
        let count = self.transcript.statements_by(&speaker);
        let mut report = TurnReport {
            speaker: speaker.clone(),
            line: None,
            persona_evolved: false,
            scenario_evolved: false,
        };

        if is_due(count, self.settings.update_character_every) {
            self.evolve_persona(&speaker).await?;
            report.persona_evolved = true;
        }

        let messages = compose(&self.transcript, &speaker, &self.personas, &self.scenario)?;
        debug!("Requesting line for {} ({} messages)", speaker, messages.len());
        let request = self.model.request(messages);
        let raw = self
            .gateway
            .complete(&request)
            .await
            .with_context(|| format!("Completion for {}'s turn failed", speaker))?;

        let clean = sanitize(&raw, &self.personas.ids());
        if clean.is_empty() {
            warn!("{} produced an empty line; nothing appended", speaker);
        } else {
            let line = format!("{}: {}", speaker, clean);
            self.record(Utterance::new(Speaker::Persona(speaker.clone()), line.clone()))?;
            report.line = Some(line);
        }

        let scenario_count = match self.settings.scenario_cadence {
            ScenarioCadence::Speaker => count,
            ScenarioCadence::Global => self.turns_completed,
        };
        if is_due(scenario_count, self.settings.update_scenario_every) {
            self.evolve_scenario().await?;
            report.scenario_evolved = true;
        }

        if report.line.is_some() {
            self.turns_completed += 1;
        }
        Ok(report)
    }

    async fn evolve_persona(&mut self, speaker: &str) -> Result<()> {
        let persona = self.personas.get(speaker)?;
        let prompt =
            evolve_persona_prompt(self.gateway.as_ref(), &self.model, persona, &self.transcript)
                .await?;

        info!("Rewrote dynamic prompt for {}", speaker);
        if self.settings.print_new_dynamic_prompts {
            self.console.show(ConsoleEvent::PersonaPrompt {
                speaker: speaker.to_string(),
                prompt: prompt.clone(),
            });
        }
        self.personas.get_mut(speaker)?.dynamic_prompt = prompt;
        Ok(())
    }

    async fn evolve_scenario(&mut self) -> Result<()> {
        let prompt = evolve_scenario_prompt(
            self.gateway.as_ref(),
            &self.model,
            &self.scenario,
            &self.transcript,
            self.settings.scenario_history_roles,
        )
        .await?;

        info!("Rewrote dynamic scenario prompt");
        if self.settings.print_new_dynamic_prompts {
            self.console.show(ConsoleEvent::ScenarioPrompt {
                prompt: prompt.clone(),
            });
        }
        self.scenario.dynamic_prompt = prompt;
        Ok(())
    }

    fn record(&mut self, utterance: Utterance) -> Result<()> {
        if let Some(log) = &self.log {
            log.append(&utterance.text)?;
        }
        self.console.show(ConsoleEvent::Utterance {
            text: utterance.text.clone(),
        });
        self.transcript.push(utterance);
        Ok(())
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn personas(&self) -> &PersonaStore {
        &self.personas
    }

    pub fn scenario(&self) -> &ScenarioState {
        &self.scenario
    }

    pub fn scheduler(&self) -> &SpeakerScheduler {
        &self.scheduler
    }

    pub fn turns_completed(&self) -> usize {
        self.turns_completed
    }
}
