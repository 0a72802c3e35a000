//! The /chat endpoint: prompt construction and request handling.

pub mod handlers;
pub mod prompt;
