//! The turn state machine: Idle → Generating → AwaitingDecision →
//! {Committed | Discarded} → Idle.

use crate::error::{DuckyError, TurnError};
use crate::persona::PersonaContext;
use crate::prompt::build_prompt;
use crate::providers::{CompletionRequest, Generator};
use crate::state::{ConversationState, SnapshotStore};
use crate::weave::weave;
use std::sync::Arc;

/// The operator's verdict on a pending turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Scrub,
}

impl Decision {
    /// Anything short of an explicit affirmative scrubs the pending turn.
    /// This is a deliberate fail-safe policy — canonical history only grows
    /// on a deliberate keep — not a parsing shortcut.
    #[must_use]
    pub fn from_affirmation(affirmed: bool) -> Self {
        if affirmed { Self::Keep } else { Self::Scrub }
    }
}

/// One generated-but-undecided exchange. Alive only between generation and
/// the keep/scrub decision; never persisted.
#[derive(Debug)]
pub struct PendingTurn {
    input: String,
    reply: String,
    transcript: String,
}

impl PendingTurn {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// The conversation as actually spoken so far — woven from the raw reply
    /// history, scrubbed replies included.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }
}

/// The two transcript views `.dump` renders.
#[derive(Debug)]
pub struct Transcripts {
    /// Canonical history: accepted turns only.
    pub accepted: String,
    /// Everything the agent ever said, scrubbed replies included.
    pub raw: String,
}

/// Owns the conversation state and drives one turn at a time.
///
/// At most one turn is in flight: starting a turn while one awaits a
/// decision fails with [`TurnError::TurnInFlight`], and resolving with no
/// pending turn fails with [`TurnError::NoPendingTurn`]. The generation call
/// is the only suspension point; nothing else touches the state while it is
/// outstanding.
pub struct TurnController {
    generator: Arc<dyn Generator>,
    persona: PersonaContext,
    store: SnapshotStore,
    state: ConversationState,
    max_tokens: u32,
    pending: Option<PendingTurn>,
}

impl TurnController {
    #[must_use]
    pub fn new(
        generator: Arc<dyn Generator>,
        persona: PersonaContext,
        store: SnapshotStore,
        state: ConversationState,
        max_tokens: u32,
    ) -> Self {
        Self {
            generator,
            persona,
            store,
            state,
            max_tokens,
            pending: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    #[must_use]
    pub fn persona(&self) -> &PersonaContext {
        &self.persona
    }

    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Update the response token limit used by future turns.
    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = max_tokens;
    }

    /// Run the Generating transition for a new human utterance.
    ///
    /// Builds the prompt from accepted history only, invokes the generation
    /// capability, and on a non-empty reply records it in raw history and
    /// parks the turn for a decision. On backend failure the turn is
    /// abandoned with no mutation anywhere and the controller is Idle again.
    pub async fn begin_turn(&mut self, input: &str) -> Result<&PendingTurn, DuckyError> {
        if self.pending.is_some() {
            return Err(TurnError::TurnInFlight.into());
        }

        let accepted = weave(&[
            (self.persona.human_label(), self.state.accepted_inputs()),
            (self.persona.agent_label(), self.state.accepted_outputs()),
        ]);
        let prompt = build_prompt(&self.persona, &accepted, input);

        let reply = self
            .generator
            .complete(CompletionRequest {
                prompt: &prompt,
                max_tokens: self.max_tokens,
                stop: self.persona.stop_sequences(),
            })
            .await?;

        self.state.record_raw(reply.clone());
        let spoken = weave(&[
            (self.persona.human_label(), self.state.accepted_inputs()),
            (self.persona.agent_label(), self.state.raw_outputs()),
        ]);

        Ok(self.pending.insert(PendingTurn {
            input: input.to_string(),
            reply,
            transcript: spoken,
        }))
    }

    /// Resolve the pending turn. Keep commits the (utterance, reply) pair
    /// into canonical history; scrub leaves it untouched — the raw record
    /// already exists. Either way the state is autosaved; an autosave
    /// failure is logged and the in-memory state carries on.
    pub fn resolve(&mut self, decision: Decision) -> Result<Decision, TurnError> {
        let pending = self.pending.take().ok_or(TurnError::NoPendingTurn)?;

        if decision == Decision::Keep {
            self.state.commit(pending.input, pending.reply);
        }

        if let Err(error) = self.store.autosave(&self.state) {
            tracing::warn!(%error, "autosave failed; conversation kept in memory");
        }

        Ok(decision)
    }

    /// Whether a turn is awaiting a decision.
    #[must_use]
    pub fn awaiting_decision(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the in-memory state, e.g. after `.load`. Refused while a turn
    /// is pending so a load can never break the pairing mid-decision.
    pub fn replace_state(&mut self, state: ConversationState) -> Result<(), TurnError> {
        if self.pending.is_some() {
            return Err(TurnError::TurnInFlight);
        }
        self.state = state;
        Ok(())
    }

    /// Render both `.dump` transcript views without mutating anything.
    #[must_use]
    pub fn transcripts(&self) -> Transcripts {
        let human = self.persona.human_dump_label();
        let agent = self.persona.agent_dump_label();

        Transcripts {
            accepted: weave(&[
                (human.as_str(), self.state.accepted_inputs()),
                (agent.as_str(), self.state.accepted_outputs()),
            ]),
            raw: weave(&[
                (human.as_str(), self.state.accepted_inputs()),
                (agent.as_str(), self.state.raw_outputs()),
            ]),
        }
    }
}
