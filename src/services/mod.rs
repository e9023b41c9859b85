//! API services for the Solar client.

pub mod completions;

pub use completions::CompletionService;
