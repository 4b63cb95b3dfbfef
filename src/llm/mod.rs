// src/llm/mod.rs
pub mod client;
pub mod rate_limiter;
pub mod types;

pub use client::{ChatBackend, GroqClient, LlmError};
pub use rate_limiter::RateLimiter;
pub use types::{ChatMessage, ChatRequest};
