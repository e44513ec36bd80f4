use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::card::{Flashcard, FlashcardDeck};
use crate::error::GenerationError;

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```json\s*|\s*```$").unwrap());

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn from_prompt(text: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [RequestPart { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ErrorResponse {
    pub fn message(&self) -> &str {
        &self.error.message
    }
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Drops a leading ```` ```json ```` marker and a trailing ```` ``` ````
/// marker. Fences in any other shape are left alone.
pub fn strip_code_fence(raw: &str) -> String {
    CODE_FENCE_RE.replace_all(raw, "").into_owned()
}

pub fn parse_flashcards(raw: &str) -> Result<Vec<Flashcard>, GenerationError> {
    let cleaned = strip_code_fence(raw);
    let deck: FlashcardDeck = serde_json::from_str(&cleaned)?;
    Ok(deck.flashcards)
}
