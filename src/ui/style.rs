use console::style;
use std::fmt::Display;

/// Green bold — success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold — section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — subtitles, secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow — warnings, recoverable failures
pub fn warn<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold — errors, scrubbed turns
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Blue — the agent's voice
pub fn agent<D: Display>(text: D) -> String {
    style(text).blue().to_string()
}

/// White inverse — the operator's echoed utterance
pub fn operator<D: Display>(text: D) -> String {
    style(text).white().reverse().to_string()
}
