// Relevance filtering: the decision core of the search pipeline.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod filter;
pub mod llm_scorer;
pub mod payload;
pub mod prompts;
pub mod scorer;
