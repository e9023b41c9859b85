//! Study-aid generation: request/response model and the handler logic.
//!
//! One request produces up to three study aids from the same source text.
//! The flow is validate, truncate, then one sequential completion call per
//! requested kind. Any failure aborts the remainder and discards partial
//! results; a request either yields every requested field or an error.

mod prompts;

pub use prompts::{GenerationKind, SamplingProfile};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::client::SolarClient;
use crate::errors::SolarError;

/// Maximum number of input characters forwarded upstream.
///
/// Longer input is silently cut at this many characters (not bytes) to bound
/// upstream token cost. The caller is not told that truncation occurred.
pub const MAX_INPUT_CHARS: usize = 15_000;

/// Which study aids to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Summary only.
    Summary,
    /// Quiz only.
    Quiz,
    /// Assignment ideas only.
    Assignments,
    /// All three, in the fixed order summary, quiz, assignments.
    #[default]
    All,
}

impl Mode {
    /// The generation kinds this mode selects, in generation order.
    pub fn kinds(self) -> &'static [GenerationKind] {
        match self {
            Mode::Summary => &[GenerationKind::Summary],
            Mode::Quiz => &[GenerationKind::Quiz],
            Mode::Assignments => &[GenerationKind::Assignments],
            Mode::All => &GenerationKind::ORDER,
        }
    }
}

/// A study-aid generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The source material.
    pub text: String,
    /// Which aids to generate. Defaults to all three.
    #[serde(default)]
    pub mode: Mode,
}

/// A study-aid generation response.
///
/// Fields not selected by the request mode serialize as explicit `null`,
/// never as omitted keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated summary, when requested.
    pub summary: Option<String>,
    /// Generated quiz, when requested.
    pub quiz: Option<String>,
    /// Generated assignment ideas, when requested.
    pub assignments: Option<String>,
}

/// Errors surfaced by [`generate`].
///
/// Exactly the two user-visible failure kinds: bad input, and anything that
/// went wrong talking to the completion API.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input text was empty or whitespace-only.
    #[error("text must not be empty")]
    EmptyText,

    /// A completion call failed.
    #[error(transparent)]
    Completion(#[from] SolarError),
}

/// Generates the requested study aids from the given source text.
///
/// Validates and truncates the input, then issues one completion call per
/// requested kind, strictly sequentially. The first failure aborts the
/// remaining calls and the whole request fails; no partial results are
/// returned.
#[instrument(skip(client, request), fields(mode = ?request.mode))]
pub async fn generate(
    client: &SolarClient,
    request: GenerateRequest,
) -> Result<GenerateResponse, GenerateError> {
    if request.text.trim().is_empty() {
        return Err(GenerateError::EmptyText);
    }

    let text = truncate_chars(&request.text, MAX_INPUT_CHARS);
    info!(
        input_chars = request.text.chars().count(),
        sent_chars = text.chars().count(),
        "generating study aids"
    );

    let mut response = GenerateResponse::default();

    for &kind in request.mode.kinds() {
        let generated = client
            .complete(kind.system_prompt(), &kind.user_prompt(text), kind.sampling())
            .await?;

        match kind {
            GenerationKind::Summary => response.summary = Some(generated),
            GenerationKind::Quiz => response.quiz = Some(generated),
            GenerationKind::Assignments => response.assignments = Some(generated),
        }
    }

    Ok(response)
}

/// Returns the first `max_chars` characters of `text`.
///
/// Cuts on a `char` boundary, so multi-byte input never splits a code point.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
