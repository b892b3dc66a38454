// Shared transcript of the debate

use crate::config::PersonaId;

/// Who said an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speaker {
    Persona(PersonaId),
    /// Seed text that could not be attributed to any persona
    Unattributed,
}

impl Speaker {
    pub fn persona(id: impl Into<PersonaId>) -> Self {
        Speaker::Persona(id.into())
    }

    pub fn is(&self, id: &str) -> bool {
        matches!(self, Speaker::Persona(p) if p == id)
    }

    pub fn persona_id(&self) -> Option<&str> {
        match self {
            Speaker::Persona(id) => Some(id),
            Speaker::Unattributed => None,
        }
    }
}

/// One line of the debate; `text` already carries the `name: ` prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

/// Append-only sequence of utterances
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, utterance: Utterance) {
        self.utterances.push(utterance);
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.utterances.last()
    }

    /// Persona behind the most recent utterance, if any
    pub fn last_speaker(&self) -> Option<&str> {
        self.last().and_then(|u| u.speaker.persona_id())
    }

    /// Number of utterances authored by `id`
    pub fn statements_by(&self, id: &str) -> usize {
        self.utterances.iter().filter(|u| u.speaker.is(id)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utterance> {
        self.utterances.iter()
    }

    pub fn as_slice(&self) -> &[Utterance] {
        &self.utterances
    }
}
