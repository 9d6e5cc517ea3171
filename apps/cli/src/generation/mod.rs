// Cover letter generation: the two LLM calls and the filename they produce.
// All LLM calls go through llm_client — no direct HTTP here.

pub mod letter;
pub mod prompts;
pub mod title;

pub use letter::{generate_letter, generate_title};
pub use title::sanitize_title;
