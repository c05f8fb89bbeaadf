// Free-form career counseling chat, relayed from the streaming LLM gateway.

pub mod handlers;
