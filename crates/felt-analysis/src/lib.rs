//! OpenAI-backed implementation of the hand-analysis seam.
//!
//! A thin wrapper over the chat-completions endpoint: one templated user
//! message in, the first choice's content out. Nothing here touches storage;
//! persisting the commentary belongs to the caller.

mod client;

pub mod prompt;

pub use client::{OpenAiAnalyst, OpenAiConfig};
