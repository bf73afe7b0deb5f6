//! Interactive line loop: dot-command dispatch, turn flow, and the
//! keep/scrub decision prompt. Presentation only — every state transition
//! happens inside [`TurnController`].

pub mod commands;

use crate::error::StoreError;
use crate::turn::{Decision, TurnController};
use crate::ui::style;
use commands::Command;
use dialoguer::{Confirm, Input};
use std::fs;
use std::path::PathBuf;

const DUMP_FILE: &str = "dump.md";

const HELP: &str = "\
.save [path]   save a named snapshot
.load [path]   load a named snapshot
.t N           set the response token limit
.dump          show the accepted and raw transcripts
.quit          leave";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    controller: TurnController,
    mbox_dir: PathBuf,
    fresh_start: bool,
}

impl Repl {
    #[must_use]
    pub fn new(controller: TurnController, mbox_dir: PathBuf, fresh_start: bool) -> Self {
        Self {
            controller,
            mbox_dir,
            fresh_start,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.maybe_resume();

        loop {
            let line: String = match Input::new()
                .with_prompt("input>")
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => line,
                // EOF or an interrupt while idle ends the session; the last
                // autosave already holds every resolved turn.
                Err(_) => break,
            };

            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Some(Ok(command)) => {
                    if self.execute(command) == Flow::Quit {
                        break;
                    }
                }
                Some(Err(error)) => println!("{}", style::warn(error)),
                None => self.take_turn(&line).await,
            }
        }

        Ok(())
    }

    /// Offer to resume the autosaved conversation. Load failures are never
    /// fatal: the session continues with the in-memory (empty) state.
    fn maybe_resume(&mut self) {
        if self.fresh_start {
            return;
        }

        let resume = !Confirm::new()
            .with_prompt("New conversation?")
            .default(false)
            .interact()
            .unwrap_or(true);
        if !resume {
            return;
        }

        let autosave = self.controller.store().autosave_path().to_path_buf();
        match self.controller.store().load(&autosave) {
            Ok(state) => {
                if self.controller.replace_state(state).is_ok() {
                    println!("{} {}", style::success("State loaded!"), autosave.display());
                }
            }
            Err(StoreError::NotFound(_)) => {
                println!("{}", style::dim("no autosave yet; starting fresh"));
            }
            Err(error) => {
                tracing::warn!(%error, "autosave did not load");
                println!("{}", style::warn(format!("load failed: {error}")));
            }
        }
    }

    fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.controller.store().snapshot_path().into());
                match self.controller.store().save(&path, self.controller.state()) {
                    Ok(()) => println!("{} {}", style::success("State saved!"), path.display()),
                    Err(error) => println!("{}", style::warn(format!("save failed: {error}"))),
                }
            }
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| self.controller.store().snapshot_path().into());
                match self.controller.store().load(&path) {
                    Ok(state) => {
                        if self.controller.replace_state(state).is_ok() {
                            println!("{} {}", style::success("State loaded!"), path.display());
                        }
                    }
                    Err(error) => println!("{}", style::warn(format!("load failed: {error}"))),
                }
            }
            Command::SetTokenLimit(limit) => {
                self.controller.set_max_tokens(limit);
                println!("token limit set to: {limit}");
            }
            Command::Dump => self.dump(),
            Command::Help => {
                println!("{}", style::dim(HELP));
            }
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn dump(&self) {
        let transcripts = self.controller.transcripts();

        println!("{}", style::header("── conversation ──"));
        println!("{}", transcripts.accepted);
        println!("{}", style::dim("── raw (scrubbed replies included) ──"));
        println!("{}", transcripts.raw);
        println!("{}", style::dim(format!("token limit: {}", self.controller.max_tokens())));

        let dump_path = self.mbox_dir.join(DUMP_FILE);
        if let Err(error) = fs::write(&dump_path, &transcripts.accepted) {
            tracing::warn!(%error, path = %dump_path.display(), "could not write dump file");
        }
    }

    async fn take_turn(&mut self, line: &str) {
        let reply = match self.controller.begin_turn(line).await {
            Ok(pending) => pending.reply().to_string(),
            Err(error) => {
                // The turn is abandoned; nothing was committed anywhere.
                println!("{}", style::error(format!("generation failed: {error}")));
                return;
            }
        };

        let persona = self.controller.persona();
        println!("\n{} {}", persona.human_label(), style::operator(line));
        println!("\n{} {}", persona.agent_label(), style::agent(&reply));

        let affirmed = Confirm::new()
            .with_prompt("Keep this reply?")
            .default(false)
            .interact()
            .unwrap_or(false);
        let decision = Decision::from_affirmation(affirmed);

        match self.controller.resolve(decision) {
            Ok(Decision::Keep) => println!("{}", style::success("kept")),
            Ok(Decision::Scrub) => println!("{}", style::error("scrubbed")),
            Err(error) => tracing::warn!(%error, "turn resolution failed"),
        }
    }
}
