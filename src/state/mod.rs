//! Conversation history: the three aligned sequences and their invariants.

pub mod store;

pub use store::SnapshotStore;

use serde::{Deserialize, Serialize};

/// The conversation's persistent history.
///
/// Three sequences stay aligned at all times:
///
/// * `accepted_inputs` — human turns committed to canonical history
/// * `accepted_outputs` — the agent replies paired with them
/// * `raw_outputs` — every reply the backend ever produced, kept or not
///
/// Invariants: accepted inputs and outputs always have equal length (a turn
/// commits as a pair or not at all); `raw_outputs` is at least as long as
/// `accepted_outputs`; and accepted replies appear in `raw_outputs` in the
/// same relative order they were generated. Fields are private so the only
/// mutations are [`record_raw`](Self::record_raw) and
/// [`commit`](Self::commit), which preserve all three by construction.
///
/// Serialized field names (`inputs`, `outputs`, `egoOuts`) are the snapshot
/// wire format and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(rename = "inputs")]
    accepted_inputs: Vec<String>,

    #[serde(rename = "outputs")]
    accepted_outputs: Vec<String>,

    #[serde(rename = "egoOuts")]
    raw_outputs: Vec<String>,
}

impl ConversationState {
    /// Empty history for a fresh conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn accepted_inputs(&self) -> &[String] {
        &self.accepted_inputs
    }

    #[must_use]
    pub fn accepted_outputs(&self) -> &[String] {
        &self.accepted_outputs
    }

    #[must_use]
    pub fn raw_outputs(&self) -> &[String] {
        &self.raw_outputs
    }

    /// Number of committed turns.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.accepted_inputs.len()
    }

    /// Record a freshly generated reply. Every reply lands here exactly once,
    /// before the keep/scrub decision is made, so the raw record survives a
    /// scrub.
    pub fn record_raw(&mut self, reply: String) {
        self.raw_outputs.push(reply);
    }

    /// Commit a resolved turn into canonical history as a pair. The reply
    /// must already have been recorded with [`record_raw`](Self::record_raw).
    pub fn commit(&mut self, input: String, reply: String) {
        self.accepted_inputs.push(input);
        self.accepted_outputs.push(reply);
    }

    /// Verify the three alignment invariants. Used when loading snapshots,
    /// where a hand-edited or corrupted file could otherwise smuggle in a
    /// state no sequence of turns can produce.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.accepted_inputs.len() != self.accepted_outputs.len() {
            return Err(format!(
                "accepted history is unpaired: {} inputs vs {} outputs",
                self.accepted_inputs.len(),
                self.accepted_outputs.len()
            ));
        }

        if self.raw_outputs.len() < self.accepted_outputs.len() {
            return Err(format!(
                "raw history shorter than accepted history: {} raw vs {} accepted",
                self.raw_outputs.len(),
                self.accepted_outputs.len()
            ));
        }

        if !is_subsequence(&self.accepted_outputs, &self.raw_outputs) {
            return Err("accepted replies are not an ordered subsequence of raw replies".into());
        }

        Ok(())
    }
}

/// Two-pointer subsequence check: every element of `needle` appears in
/// `haystack` in the same relative order.
fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut candidates = haystack.iter();
    needle
        .iter()
        .all(|wanted| candidates.any(|candidate| candidate == wanted))
}
