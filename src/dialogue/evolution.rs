// Prompt evolution: periodic rewrites of the dynamic prompt fragments
//
// Every so often the model is shown the debate so far and asked to write a
// fresh variable prompt for one persona, or for the scenario itself. The
// response replaces the old fragment verbatim (trimmed, no sanitizing).

use anyhow::{Context, Result};

use crate::config::{HistoryRoles, PersonaProfile, ScenarioState};
use crate::providers::{ChatMessage, CompletionGateway, ModelConfig};

use super::compositor::{natural_view, persona_view};
use super::transcript::Transcript;

/// True when a counter value lands on the cadence (0 included)
pub fn is_due(count: usize, every: u32) -> bool {
    every > 0 && count % every as usize == 0
}

pub fn persona_instruction(persona: &PersonaProfile) -> String {
    let name = &persona.id;
    format!(
        "Read the conversation paying special attention to the lines written by {name}. \
         Do not write a new line continuing the conversation. \
         Your job is to write a new LLM system prompt for the {name} character. \
         The {name} character currently has the following fixed prompt: \"{fixed}\" and \
         the variable prompt: \"{variable}\". In the light of the debate so far, how would \
         you change the variable part of the system prompt in order to keep the conversation \
         fresh and interesting, and reflect the character's changing point of view and \
         priorities? Respond with the new variable prompt only. Write the response as if \
         you're specifying a prompt for another LLM, i.e. use \"you\" not \"I\" or the \
         character name. Do not write about your reasoning for the prompt, or prefix it in \
         any way, write only the new variable prompt for the character {name}.",
        fixed = persona.fixed_prompt(),
        variable = persona.dynamic_prompt,
    )
}

pub fn scenario_instruction(scenario: &ScenarioState) -> String {
    format!(
        "Read the conversation paying special attention to how the scenario has developed \
         over time. Do not write a new line continuing the conversation. \
         Your job is to write a new LLM system prompt for the scenario. \
         The scenario currently has the following fixed prompt: \"{fixed}\" and \
         the variable prompt: \"{variable}\". In the light of the debate so far, how would \
         you change the variable part of the system prompt in order to keep the conversation \
         fresh and interesting, and reflect the way the conversation has changed? \
         Respond with the new dynamic prompt only. Write the response as if you're \
         specifying a prompt for another LLM, i.e. use \"you\" not \"I\" or the character \
         names. Do not write about your reasoning for the prompt, or prefix it in any way, \
         write only the new variable prompt for the dynamic scenario.",
        fixed = scenario.fixed_prompt(),
        variable = scenario.dynamic_prompt,
    )
}

/// Messages for a persona rewrite: instruction, persona view, instruction again
pub fn persona_evolution_messages(
    persona: &PersonaProfile,
    transcript: &Transcript,
) -> Vec<ChatMessage> {
    let instruction = persona_instruction(persona);
    let mut messages = vec![ChatMessage::system(instruction.clone())];
    messages.extend(persona_view(transcript, &persona.id));
    messages.push(ChatMessage::user(instruction));
    messages
}

/// Messages for a scenario rewrite, history kept in its natural roles
pub fn scenario_evolution_messages(
    scenario: &ScenarioState,
    transcript: &Transcript,
    roles: HistoryRoles,
) -> Vec<ChatMessage> {
    let instruction = scenario_instruction(scenario);
    let mut messages = vec![ChatMessage::system(instruction.clone())];
    messages.extend(natural_view(transcript, roles));
    messages.push(ChatMessage::user(instruction));
    messages
}

/// Ask the model for a new dynamic prompt for `persona`
pub async fn evolve_persona_prompt(
    gateway: &dyn CompletionGateway,
    model: &ModelConfig,
    persona: &PersonaProfile,
    transcript: &Transcript,
) -> Result<String> {
    let request = model.request(persona_evolution_messages(persona, transcript));
    let response = gateway
        .complete(&request)
        .await
        .with_context(|| format!("Persona prompt evolution for '{}' failed", persona.id))?;
    Ok(response.trim().to_string())
}

/// Ask the model for a new dynamic scenario prompt
pub async fn evolve_scenario_prompt(
    gateway: &dyn CompletionGateway,
    model: &ModelConfig,
    scenario: &ScenarioState,
    transcript: &Transcript,
    roles: HistoryRoles,
) -> Result<String> {
    let request = model.request(scenario_evolution_messages(scenario, transcript, roles));
    let response = gateway
        .complete(&request)
        .await
        .context("Scenario prompt evolution failed")?;
    Ok(response.trim().to_string())
}
