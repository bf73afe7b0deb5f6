//! Prompt assembly: persona preamble, woven transcript, the new human
//! utterance, and the open agent label that cues the backend to reply.

use crate::persona::PersonaContext;
use crate::text::normalize;

/// Build the exact text sent to the generation backend.
///
/// Layout, top to bottom: persona preamble, the transcript woven from
/// accepted history, a `"<human>: <utterance>"` line, and a bare
/// `"<agent>:"` line with nothing after the colon — the backend is expected
/// to complete it. The whole prompt is normalized with the same rule as
/// woven transcripts, so an empty transcript leaves no stray blank lines.
#[must_use]
pub fn build_prompt(persona: &PersonaContext, transcript: &str, utterance: &str) -> String {
    normalize(&format!(
        "{preamble}\n\n{transcript}\n{human} {utterance}\n{agent}",
        preamble = persona.preamble(),
        human = persona.human_label(),
        agent = persona.agent_label(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> PersonaContext {
        PersonaContext::new("You are {agent}, a rubber ducky.", "Tony", "Harmony")
    }

    #[test]
    fn prompt_ends_with_open_agent_label() {
        let prompt = build_prompt(&persona(), "", "hello");
        assert!(prompt.ends_with("Harmony:"));
    }

    #[test]
    fn prompt_with_empty_transcript_has_no_blank_lines() {
        let prompt = build_prompt(&persona(), "", "hello");
        assert_eq!(
            prompt,
            "You are Harmony, a rubber ducky.\nTony: hello\nHarmony:"
        );
    }

    #[test]
    fn prompt_interleaves_transcript_between_preamble_and_utterance() {
        let transcript = "Tony: hi\nHarmony: hello";
        let prompt = build_prompt(&persona(), transcript, "how are you?");
        assert_eq!(
            prompt,
            "You are Harmony, a rubber ducky.\n\
             Tony: hi\n\
             Harmony: hello\n\
             Tony: how are you?\n\
             Harmony:"
        );
    }

    #[test]
    fn prompt_normalizes_ragged_utterances() {
        let prompt = build_prompt(&persona(), "", "  spaced    out  ");
        assert!(prompt.contains("Tony: spaced out\n"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let a = build_prompt(&persona(), "Tony: x\nHarmony: y", "z");
        let b = build_prompt(&persona(), "Tony: x\nHarmony: y", "z");
        assert_eq!(a, b);
    }
}
