// Initial conversation parsing
//
// A seed file is free text where each turn starts with `<name>: `. Lines
// that don't start with a known name continue the current turn and are
// glued onto it without a separator.

use crate::config::PersonaStore;

use super::transcript::{Speaker, Utterance};

/// Fold a seed blob into one utterance per contiguous speaker block
pub fn parse_seed(text: &str, personas: &PersonaStore) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut current: Option<String> = None;
    let mut rolling = String::new();
    let mut discarded_prelude = false;

    for line in text.lines() {
        let line = line.trim();
        let name = line.split(':').next().unwrap_or_default();

        if personas.contains(name) {
            match current.take() {
                Some(speaker) => {
                    utterances.push(Utterance::new(
                        Speaker::Persona(speaker),
                        std::mem::take(&mut rolling),
                    ));
                }
                None => {
                    discarded_prelude = !rolling.is_empty();
                    rolling.clear();
                }
            }
            current = Some(name.to_string());
            rolling.push_str(line);
        } else {
            rolling.push_str(line);
        }
    }

    match current {
        Some(speaker) => utterances.push(Utterance::new(Speaker::Persona(speaker), rolling)),
        None if !rolling.is_empty() => {
            utterances.push(Utterance::new(Speaker::Unattributed, rolling));
        }
        None => {}
    }

    if discarded_prelude {
        tracing::warn!("Seed text before the first persona line was discarded");
    }

    utterances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersonaProfile;

    fn store() -> PersonaStore {
        PersonaStore::new(vec![
            PersonaProfile::new("alice", "", ""),
            PersonaProfile::new("bob", "", ""),
        ])
    }

    #[test]
    fn test_folds_multiline_statements() {
        let seed = "alice: I think\nthat tea\nis best.\nbob: Nonsense.\n";
        let utterances = parse_seed(seed, &store());

        assert_eq!(
            utterances,
            vec![
                Utterance::new(Speaker::persona("alice"), "alice: I thinkthat teais best."),
                Utterance::new(Speaker::persona("bob"), "bob: Nonsense."),
            ]
        );
    }

    #[test]
    fn test_same_speaker_twice_gives_two_utterances() {
        let seed = "alice: one\nalice: two\nbob: three";
        let utterances = parse_seed(seed, &store());
        assert_eq!(utterances.len(), 3);
        assert_eq!(utterances[1].text, "alice: two");
    }

    #[test]
    fn test_unknown_name_is_continuation() {
        let seed = "alice: hello\ncarol: not a persona";
        let utterances = parse_seed(seed, &store());
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].text, "alice: hellocarol: not a persona");
    }

    #[test]
    fn test_prelude_before_first_persona_is_dropped() {
        let seed = "The debate begins.\nbob: Ready.";
        let utterances = parse_seed(seed, &store());
        assert_eq!(
            utterances,
            vec![Utterance::new(Speaker::persona("bob"), "bob: Ready.")]
        );
    }

    #[test]
    fn test_no_persona_lines_gives_unattributed() {
        let seed = "A quiet room.\nNobody speaks.";
        let utterances = parse_seed(seed, &store());
        assert_eq!(
            utterances,
            vec![Utterance::new(Speaker::Unattributed, "A quiet room.Nobody speaks.")]
        );
    }

    #[test]
    fn test_empty_seed() {
        assert!(parse_seed("", &store()).is_empty());
        assert!(parse_seed("\n\n", &store()).is_empty());
    }
}
