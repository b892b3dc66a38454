// Post-processing of raw model output
//
// Models sometimes prefix their line with a speaker label, or close the
// quoted speech and then keep narrating. Both are stripped here.

/// Clean a raw completion into a single utterance body
pub fn sanitize<S: AsRef<str>>(raw: &str, persona_ids: &[S]) -> String {
    let mut text = raw.trim().to_string();
    for id in persona_ids {
        text = text.replace(&format!("{}: ", id.as_ref()), "");
    }
    truncate_after_closing_quote(&text).to_string()
}

/// Drop anything after the last `"` when the text opens with a quote.
// The closing quote may sit on a later line; legacy debater output was only
// trimmed when both quotes were on the first line.
fn truncate_after_closing_quote(text: &str) -> &str {
    let Some(rest) = text.strip_prefix('"') else {
        return text;
    };
    if !rest.contains('"') {
        return text;
    }
    match text.rfind('"') {
        Some(last) => &text[..=last],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PERSONAS: [&str; 0] = [];

    #[test]
    fn test_truncates_trailing_narration() {
        assert_eq!(
            sanitize("\"Hello there.\" extra junk", &NO_PERSONAS),
            "\"Hello there.\""
        );
    }

    #[test]
    fn test_unquoted_text_untouched() {
        assert_eq!(
            sanitize("Hello there, no quotes", &NO_PERSONAS),
            "Hello there, no quotes"
        );
    }

    #[test]
    fn test_removes_speaker_prefix() {
        assert_eq!(sanitize("alice: I agree.", &["alice"]), "I agree.");
    }

    #[test]
    fn test_removes_every_known_prefix() {
        let ids = vec!["alice".to_string(), "bob".to_string()];
        assert_eq!(
            sanitize("  bob: Fine. alice: Indeed.  ", &ids),
            "Fine. Indeed."
        );
    }

    #[test]
    fn test_single_leading_quote_untouched() {
        assert_eq!(sanitize("\"unterminated speech", &NO_PERSONAS), "\"unterminated speech");
    }

    #[test]
    fn test_quote_in_middle_only_untouched() {
        assert_eq!(
            sanitize("He said \"no\" and left", &NO_PERSONAS),
            "He said \"no\" and left"
        );
    }

    #[test]
    fn test_cuts_at_last_quote_across_lines() {
        assert_eq!(
            sanitize("\"First.\"\n*nods* \"Second.\" (walks off)", &NO_PERSONAS),
            "\"First.\"\n*nods* \"Second.\""
        );
    }

    #[test]
    fn test_prefix_then_quote() {
        assert_eq!(
            sanitize("alice: \"Yes.\" She smiles.", &["alice"]),
            "\"Yes.\""
        );
    }
}
