#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod persona;
pub mod prompt;
pub mod providers;
pub mod repl;
pub mod state;
pub mod text;
pub mod turn;
pub mod ui;
pub mod weave;

pub use config::Config;
pub use error::{DuckyError, Result};
