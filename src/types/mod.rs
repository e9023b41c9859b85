//! Type definitions for the Solar API.

pub mod chat;

pub use chat::{
    AssistantMessage, ChatRequest, ChatRequestBuilder, ChatResponse, Choice, FinishReason,
    Message, Role, Usage,
};
