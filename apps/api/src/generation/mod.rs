// CV generation: the offline rule-based generator and the AI writer prompt.
// All LLM calls go through llm_client.

pub mod cv_generator;
pub mod handlers;
pub mod prompts;
pub mod word_banks;
