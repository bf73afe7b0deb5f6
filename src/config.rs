//! TOML configuration: API credential, model, token limit, persona block,
//! and the mbox directory holding snapshots.

use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Snapshot directory - computed from home, not serialized
    #[serde(skip)]
    pub mbox_dir: PathBuf,

    pub api_key: Option<String>,

    /// Completions model used by the generation backend.
    #[serde(default = "default_model")]
    pub model: String,

    /// Response token limit; adjustable at runtime with `.t N`.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default file name for `.save`/`.load` inside the mbox directory.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    #[serde(default)]
    pub persona: PersonaConfig,
}

// ── Persona ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    #[serde(default = "default_human_name")]
    pub human_name: String,

    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Authored persona block; `{human}` and `{agent}` are substituted with
    /// the configured names, and the text is flattened to one line at
    /// startup.
    #[serde(default = "default_preamble")]
    pub preamble: String,
}

fn default_human_name() -> String {
    "Tony".into()
}

fn default_agent_name() -> String {
    "Harmony".into()
}

fn default_preamble() -> String {
    r#"
Your name is "{agent}" a rubber ducky,
floating in a red bucket of coffee.

Your short and concise replies is what landed you
the position at an independent research company that
specializes in decentralization.

You work as advisor to a self-thinker who is simply known as "{human}".
Please don't drown him in words.

Think, compress, simplify, say.
Plain language appreciated.

Our mission is to help ideas grow into a healthy
non-pyramid shaped organizations,
and to develop peer-to-peer apps cause they're cool.
"#
    .into()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            human_name: default_human_name(),
            agent_name: default_agent_name(),
            preamble: default_preamble(),
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────

fn default_model() -> String {
    "gpt-3.5-turbo-instruct".into()
}

fn default_max_tokens() -> u32 {
    50
}

fn default_snapshot_file() -> String {
    "harmony-3.json".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            mbox_dir: PathBuf::new(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            snapshot_file: default_snapshot_file(),
            persona: PersonaConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.rubberducky/config.toml`, creating the directory tree and a
    /// default config on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        Self::load_from_dir(&home.join(".rubberducky"))
    }

    /// Same as [`load_or_init`](Self::load_or_init) against an explicit base
    /// directory.
    pub fn load_from_dir(base_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = base_dir.join("config.toml");
        let mbox_dir = base_dir.join("mbox");

        if !mbox_dir.exists() {
            fs::create_dir_all(&mbox_dir)?;
        }

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|error| ConfigError::Load(error.to_string()))?;
            // Set computed paths that are skipped during serialization
            config.config_path = config_path;
            config.mbox_dir = mbox_dir;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                mbox_dir,
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) =
            std::env::var("RUBBERDUCKY_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|error| ConfigError::Load(error.to_string()))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}
