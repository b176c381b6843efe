// Resume generation pipeline: keyword extraction, prompt composition,
// section assembly, HTTP handlers.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod handlers;
pub mod keywords;
pub mod pipeline;
pub mod prompts;
