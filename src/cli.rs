use clap::Parser;

/// `rubberducky` - Conversational rubber-duck companion.
#[derive(Parser, Debug)]
#[command(name = "rubberducky")]
#[command(version = "0.1.0")]
#[command(about = "Talk to the duck; keep or scrub each reply.", long_about = None)]
pub struct Cli {
    /// Start a fresh conversation without offering to resume the autosave
    #[arg(long)]
    pub new: bool,

    /// Completions model to use
    #[arg(long)]
    pub model: Option<String>,

    /// Response token limit for generated replies
    #[arg(short = 't', long)]
    pub max_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }
}
