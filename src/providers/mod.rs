//! Generation backends. The core talks to [`traits::Generator`] only; the
//! concrete HTTP binding lives behind it.

pub mod openai;
pub mod traits;

pub use openai::OpenAiCompletions;
pub use traits::{CompletionRequest, Generator};
