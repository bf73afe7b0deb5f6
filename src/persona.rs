//! Immutable persona context: the preamble and display names fixed at
//! startup, plus the labels and stop sequences derived from them.

use crate::text::flatten;

/// Persona configuration resolved into its runtime form.
///
/// Created once at startup and never mutated or persisted; conversation
/// snapshots carry history only, so the same history can be replayed under a
/// reworded persona.
#[derive(Debug, Clone)]
pub struct PersonaContext {
    preamble: String,
    human_name: String,
    agent_name: String,
    human_label: String,
    agent_label: String,
}

impl PersonaContext {
    /// Build the context from an authored preamble and the two display names.
    ///
    /// `{human}` and `{agent}` placeholders in the preamble are substituted
    /// with the configured names, and the preamble is flattened to a single
    /// line before use.
    #[must_use]
    pub fn new(preamble: &str, human_name: &str, agent_name: &str) -> Self {
        let preamble = flatten(
            &preamble
                .replace("{human}", human_name)
                .replace("{agent}", agent_name),
        );

        Self {
            preamble,
            human_name: human_name.to_string(),
            agent_name: agent_name.to_string(),
            human_label: format!("{human_name}:"),
            agent_label: format!("{agent_name}:"),
        }
    }

    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    #[must_use]
    pub fn human_name(&self) -> &str {
        &self.human_name
    }

    #[must_use]
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Prompt-transcript label for human turns, e.g. `"Tony:"`.
    #[must_use]
    pub fn human_label(&self) -> &str {
        &self.human_label
    }

    /// Prompt-transcript label for agent replies, e.g. `"Harmony:"`.
    #[must_use]
    pub fn agent_label(&self) -> &str {
        &self.agent_label
    }

    /// Bracketed label used by `.dump` output, e.g. `"[Tony]"`.
    #[must_use]
    pub fn human_dump_label(&self) -> String {
        format!("[{}]", self.human_name)
    }

    /// Bracketed label used by `.dump` output, e.g. `"[Harmony]"`.
    #[must_use]
    pub fn agent_dump_label(&self) -> String {
        format!("[{}]", self.agent_name)
    }

    /// Stop sequences handed to the generation backend: the two label
    /// terminators, so the backend cannot impersonate the other speaker by
    /// continuing past its own turn.
    #[must_use]
    pub fn stop_sequences(&self) -> [String; 2] {
        [
            format!("\n{}", self.agent_label),
            format!("\n{}", self.human_label),
        ]
    }
}
