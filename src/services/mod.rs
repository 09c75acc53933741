pub mod interpreter;
pub mod openai_client;
pub mod prompt;

pub use interpreter::{extract_content, interpret_completion};
pub use openai_client::{ChatCompletionRequest, OpenAIClient};
pub use prompt::{build_system_prompt, build_user_prompt};
