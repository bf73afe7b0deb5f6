use crate::error::CommandError;
use std::path::PathBuf;

/// A parsed dot-command. Lines that don't start with a dot are utterances
/// for the agent, not commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `.save [path]` — write a named snapshot.
    Save(Option<PathBuf>),
    /// `.load [path]` — replace in-memory state from a snapshot.
    Load(Option<PathBuf>),
    /// `.t N` — set the response token limit for future turns.
    SetTokenLimit(u32),
    /// `.dump` — print both transcript views.
    Dump,
    /// `.help` — list commands.
    Help,
    /// `.quit` — leave the session.
    Quit,
}

impl Command {
    /// `None` when the line is conversation input rather than a command.
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let trimmed = line.trim();
        if !trimmed.starts_with('.') {
            return None;
        }

        let mut parts = trimmed.split_whitespace();
        let head = parts.next()?;
        let arg = parts.next();

        Some(match head {
            ".save" => Ok(Self::Save(arg.map(PathBuf::from))),
            ".load" => Ok(Self::Load(arg.map(PathBuf::from))),
            ".t" => match arg {
                Some(raw) => raw.parse::<u32>().map(Self::SetTokenLimit).map_err(|_| {
                    CommandError::InvalidArgument(format!("not a token count: '{raw}'"))
                }),
                None => Err(CommandError::InvalidArgument(
                    ".t needs a token count, e.g. `.t 50`".into(),
                )),
            },
            ".dump" => Ok(Self::Dump),
            ".help" => Ok(Self::Help),
            ".quit" | ".exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utterances_are_not_commands() {
        assert!(Command::parse("hello duck").is_none());
        assert!(Command::parse("  what about .save mid-line").is_none());
    }

    #[test]
    fn save_and_load_take_optional_paths() {
        assert_eq!(Command::parse(".save").unwrap().unwrap(), Command::Save(None));
        assert_eq!(
            Command::parse(".save /tmp/alt.json").unwrap().unwrap(),
            Command::Save(Some(PathBuf::from("/tmp/alt.json")))
        );
        assert_eq!(
            Command::parse(".load backup.json").unwrap().unwrap(),
            Command::Load(Some(PathBuf::from("backup.json")))
        );
    }

    #[test]
    fn token_limit_parses_valid_numbers() {
        assert_eq!(
            Command::parse(".t 20").unwrap().unwrap(),
            Command::SetTokenLimit(20)
        );
        assert_eq!(
            Command::parse(".t 0").unwrap().unwrap(),
            Command::SetTokenLimit(0)
        );
    }

    #[test]
    fn token_limit_rejects_negative_and_garbage() {
        assert!(matches!(
            Command::parse(".t -5").unwrap().unwrap_err(),
            CommandError::InvalidArgument(_)
        ));
        assert!(matches!(
            Command::parse(".t lots").unwrap().unwrap_err(),
            CommandError::InvalidArgument(_)
        ));
        assert!(matches!(
            Command::parse(".t").unwrap().unwrap_err(),
            CommandError::InvalidArgument(_)
        ));
    }

    #[test]
    fn unknown_dot_commands_are_reported() {
        assert!(matches!(
            Command::parse(".frobnicate").unwrap().unwrap_err(),
            CommandError::Unknown(_)
        ));
    }

    #[test]
    fn whitespace_around_commands_is_tolerated() {
        assert_eq!(Command::parse("  .dump  ").unwrap().unwrap(), Command::Dump);
        assert_eq!(Command::parse(".quit").unwrap().unwrap(), Command::Quit);
        assert_eq!(Command::parse(".exit").unwrap().unwrap(), Command::Quit);
    }
}
