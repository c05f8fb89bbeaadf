// Career recommendations: context aggregation, LLM generation with schema repair,
// the static fallback payload, and persisted recommendation history.

pub mod aggregator;
pub mod fallback;
pub mod handlers;
pub mod payload;
pub mod prompts;
pub mod store;
