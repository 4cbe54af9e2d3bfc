//! Prompt assembly and answer generation

mod generator;
pub mod prompt;

pub use generator::ResponseGenerator;
pub use prompt::{PromptBuilder, PromptRequest};
