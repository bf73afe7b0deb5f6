//! Transcript weaving: interleave label-prefixed sequences into one ordered
//! thread, truncated to the shortest sequence.

use crate::text::normalize;
use std::fmt::Write;

/// Interleave the given `(label, sequence)` threads into a single transcript.
///
/// Row-major: all labels for index `i` are emitted before any line for index
/// `i + 1`, each as `"<label> <item>"`. Output stops at the shortest
/// sequence; excess elements in longer sequences are silently ignored. That
/// truncation is deliberate — it keeps an agent reply from being presented
/// for a human turn that has not yet been paired.
///
/// Pairing each label with its sequence makes the one-label-per-sequence
/// contract structural. Deterministic, no side effects.
#[must_use]
pub fn weave(threads: &[(&str, &[String])]) -> String {
    let rows = threads
        .iter()
        .map(|(_, sequence)| sequence.len())
        .min()
        .unwrap_or(0);

    let mut thread = String::new();
    for row in 0..rows {
        for (label, sequence) in threads {
            let _ = writeln!(thread, "{label} {}", sequence[row]);
        }
    }

    normalize(&thread)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn weave_truncates_to_shortest_sequence() {
        let inputs = seq(&["a", "b", "c"]);
        let outputs = seq(&["x", "y"]);

        let thread = weave(&[("Tony:", &inputs), ("Harmony:", &outputs)]);

        assert_eq!(thread, "Tony: a\nHarmony: x\nTony: b\nHarmony: y");
        assert!(!thread.contains('c'));
    }

    #[test]
    fn weave_is_deterministic() {
        let inputs = seq(&["hello"]);
        let outputs = seq(&["hi there"]);

        let first = weave(&[("Tony:", &inputs), ("Harmony:", &outputs)]);
        let second = weave(&[("Tony:", &inputs), ("Harmony:", &outputs)]);

        assert_eq!(first, second);
    }

    #[test]
    fn weave_empty_sequence_yields_empty_thread() {
        let inputs = seq(&["a"]);
        let outputs: Vec<String> = Vec::new();

        assert_eq!(weave(&[("Tony:", &inputs), ("Harmony:", &outputs)]), "");
    }

    #[test]
    fn weave_single_thread() {
        let notes = seq(&["one", "two"]);

        assert_eq!(weave(&[("[note]", &notes)]), "[note] one\n[note] two");
    }

    #[test]
    fn weave_three_threads_row_major() {
        let a = seq(&["1", "2"]);
        let b = seq(&["x", "y"]);
        let c = seq(&["i", "j"]);

        let thread = weave(&[("A:", &a), ("B:", &b), ("C:", &c)]);

        assert_eq!(thread, "A: 1\nB: x\nC: i\nA: 2\nB: y\nC: j");
    }

    #[test]
    fn weave_normalizes_items_with_ragged_whitespace() {
        let inputs = seq(&["  spaced   out  "]);
        let outputs = seq(&["reply"]);

        let thread = weave(&[("Tony:", &inputs), ("Harmony:", &outputs)]);

        assert_eq!(thread, "Tony: spaced out\nHarmony: reply");
    }

    #[test]
    fn weave_no_threads_yields_empty() {
        assert_eq!(weave(&[]), "");
    }
}
