// Prompt composition
//
// Every persona sees the same transcript, but from its own side: its lines
// become `assistant` turns and everybody else's become `user` turns.

use crate::config::{HistoryRoles, PersonaStore, ScenarioState};
use crate::errors::ParleyError;
use crate::providers::{ChatMessage, ChatRole};

use super::transcript::{Speaker, Transcript};

/// Relabel the transcript from `speaker_id`'s point of view
pub fn persona_view(transcript: &Transcript, speaker_id: &str) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|u| {
            if u.speaker.is(speaker_id) {
                ChatMessage::assistant(u.text.clone())
            } else {
                ChatMessage::user(u.text.clone())
            }
        })
        .collect()
}

/// The transcript with each line's own speaker as its role
pub fn natural_view(transcript: &Transcript, roles: HistoryRoles) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|u| {
            let role = match (&u.speaker, roles) {
                (Speaker::Persona(id), HistoryRoles::Speaker) => ChatRole::Speaker(id.clone()),
                _ => ChatRole::User,
            };
            ChatMessage {
                role,
                content: u.text.clone(),
            }
        })
        .collect()
}

/// System instruction for `speaker_id`'s turn.
///
/// The persona's fixed prompt appears twice; generated output has always
/// been produced with this layout.
pub fn system_instruction(
    speaker_id: &str,
    personas: &PersonaStore,
    scenario: &ScenarioState,
) -> Result<String, ParleyError> {
    let persona = personas.get(speaker_id)?;
    Ok([
        persona.fixed_prompt(),
        persona.fixed_prompt(),
        scenario.rules.as_str(),
        scenario.fixed_prompt(),
        scenario.dynamic_prompt.as_str(),
    ]
    .concat())
}

/// Build the full message list for `speaker_id`'s next line
pub fn compose(
    transcript: &Transcript,
    speaker_id: &str,
    personas: &PersonaStore,
    scenario: &ScenarioState,
) -> Result<Vec<ChatMessage>, ParleyError> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage::system(system_instruction(
        speaker_id, personas, scenario,
    )?));
    messages.extend(persona_view(transcript, speaker_id));
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersonaProfile;
    use crate::dialogue::transcript::Utterance;

    fn store() -> PersonaStore {
        PersonaStore::new(vec![
            PersonaProfile::new("alice", "[A]", "alice-dyn"),
            PersonaProfile::new("bob", "[B]", "bob-dyn"),
        ])
    }

    fn scenario() -> ScenarioState {
        ScenarioState::new("[rules]", "[fixed]", "[dynamic]")
    }

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.push(Utterance::new(Speaker::persona("alice"), "alice: hello"));
        t.push(Utterance::new(Speaker::persona("bob"), "bob: hi"));
        t.push(Utterance::new(Speaker::persona("alice"), "alice: how are you"));
        t
    }

    #[test]
    fn test_system_instruction_duplicates_fixed_prompt() {
        let instruction = system_instruction("alice", &store(), &scenario()).unwrap();
        assert_eq!(instruction, "[A][A][rules][fixed][dynamic]");
    }

    #[test]
    fn test_compose_relabels_roles() {
        let messages = compose(&transcript(), "bob", &store(), &scenario()).unwrap();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[0].content, "[B][B][rules][fixed][dynamic]");
        assert_eq!(messages[1], ChatMessage::user("alice: hello"));
        assert_eq!(messages[2], ChatMessage::assistant("bob: hi"));
        assert_eq!(messages[3], ChatMessage::user("alice: how are you"));
    }

    #[test]
    fn test_compose_unknown_speaker() {
        let err = compose(&transcript(), "zed", &store(), &scenario()).unwrap_err();
        assert!(matches!(err, ParleyError::UnknownPersona(_)));
    }

    #[test]
    fn test_unattributed_is_user_in_every_view() {
        let mut t = Transcript::new();
        t.push(Utterance::new(Speaker::Unattributed, "The hall falls silent."));

        assert_eq!(persona_view(&t, "alice")[0].role, ChatRole::User);
        assert_eq!(natural_view(&t, HistoryRoles::Speaker)[0].role, ChatRole::User);
    }

    #[test]
    fn test_natural_view_roles() {
        let speaker_roles = natural_view(&transcript(), HistoryRoles::Speaker);
        assert_eq!(speaker_roles[1].role, ChatRole::Speaker("bob".to_string()));

        let user_roles = natural_view(&transcript(), HistoryRoles::User);
        assert!(user_roles.iter().all(|m| m.role == ChatRole::User));
    }
}
