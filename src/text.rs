//! Whitespace normalization shared by transcript weaving and prompt assembly.

/// Collapse a block of text into transcript form: runs of blank lines (a
/// newline followed by any mix of spaces and newlines) become a single
/// newline, runs of horizontal whitespace become a single space, and the
/// result is trimmed.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                while matches!(chars.peek(), Some(' ' | '\t' | '\n')) {
                    chars.next();
                }
                out.push('\n');
            }
            ' ' | '\t' => {
                while matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                }
                // A run that ends a line is dropped, not collapsed.
                if !matches!(chars.peek(), Some('\n')) {
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}

/// Normalize after folding every newline into a space. Used for persona
/// preambles, which are authored as multi-line blocks but sent as one line.
#[must_use]
pub fn flatten(text: &str) -> String {
    normalize(&text.replace('\n', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_blank_line_runs() {
        assert_eq!(normalize("a\n\n\nb"), "a\nb");
        assert_eq!(normalize("a\n   \n  b"), "a\nb");
    }

    #[test]
    fn normalize_collapses_space_runs() {
        assert_eq!(normalize("a    b\tc"), "a b c");
    }

    #[test]
    fn normalize_trims_ends() {
        assert_eq!(normalize("  \n hello \n  "), "hello");
    }

    #[test]
    fn normalize_drops_whitespace_before_newline() {
        assert_eq!(normalize("a  \nb"), "a\nb");
    }

    #[test]
    fn normalize_keeps_single_newlines() {
        assert_eq!(normalize("Tony: hi\nHarmony: hello"), "Tony: hi\nHarmony: hello");
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\n  "), "");
    }

    #[test]
    fn normalize_strips_indentation_after_newline() {
        // Indented continuation lines lose their leading whitespace.
        assert_eq!(normalize("first\n    second\n\tthird"), "first\nsecond\nthird");
    }

    #[test]
    fn flatten_folds_to_one_line() {
        assert_eq!(flatten("Your name is\n\"Harmony\",\n\na duck."), "Your name is \"Harmony\", a duck.");
    }

    #[test]
    fn flatten_of_empty_is_empty() {
        assert_eq!(flatten("\n\n"), "");
    }
}
