//! Study-aid generation relay for the Upstage Solar API.
//!
//! A small HTTP service that forwards lecture or course text to the Upstage
//! Solar completion API and returns generated study aids: a summary, a quiz,
//! and assignment ideas. One endpoint validates and truncates the input,
//! issues up to three sequential completion calls with fixed prompt
//! templates, and reassembles the responses into a single JSON object.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use studyaid::client::SolarClient;
//! use studyaid::generate::{self, GenerateRequest, Mode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SolarClient::builder()
//!         .api_key("up_your_api_key")
//!         .build()?;
//!
//!     let request = GenerateRequest {
//!         text: "Today we covered the TCP three-way handshake...".to_string(),
//!         mode: Mode::Summary,
//!     };
//!
//!     let response = generate::generate(&client, request).await?;
//!     println!("{}", response.summary.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! # Running the server
//!
//! The `studyaid-server` binary reads `UPSTAGE_API_KEY` from the environment
//! (startup fails without it), binds `127.0.0.1:8000` by default, and exposes
//! `POST /api/generate` and `GET /health`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod generate;
pub mod server;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{SolarClient, SolarClientBuilder};
pub use config::SolarConfig;
pub use errors::{SolarError, SolarResult};
pub use generate::{GenerateRequest, GenerateResponse, Mode};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
