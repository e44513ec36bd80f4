use std::path::{Path, PathBuf};

use crate::card::Flashcard;
use crate::error::{AppError, GenerationError, InputError};
use crate::export::export_cards;
use crate::llm::{CardGenerator, CredentialStore};
use crate::print::print_cards;
use crate::utils::{strip_controls_and_escapes, trim_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Success,
    Failed,
}

/// What the surface should currently show or allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub generate_enabled: bool,
    pub loading: bool,
    pub actions_visible: bool,
}

impl Phase {
    pub fn controls(self) -> Controls {
        match self {
            Phase::Idle | Phase::Failed => Controls {
                generate_enabled: true,
                loading: false,
                actions_visible: false,
            },
            Phase::Generating => Controls {
                generate_enabled: false,
                loading: true,
                actions_visible: false,
            },
            Phase::Success => Controls {
                generate_enabled: true,
                loading: false,
                actions_visible: true,
            },
        }
    }
}

/// Inputs captured when a generation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub api_key: String,
}

/// Owns everything that lives for the whole session: the inputs, the phase,
/// and the cards from the last successful generation.
pub struct Controller<G, S> {
    generator: G,
    credentials: S,
    phase: Phase,
    topic: String,
    api_key: String,
    cards: Vec<Flashcard>,
}

impl<G: CardGenerator, S: CredentialStore> Controller<G, S> {
    /// Starts idle with whatever key the store already holds.
    pub fn new(generator: G, credentials: S) -> Self {
        let api_key = credentials.load().unwrap_or_default();
        Self::with_api_key(generator, credentials, api_key)
    }

    /// Starts idle with a key the caller already resolved. The store is only
    /// written to from here on.
    pub fn with_api_key(generator: G, credentials: S, api_key: impl Into<String>) -> Self {
        Self {
            generator,
            credentials,
            phase: Phase::Idle,
            topic: String::new(),
            api_key: api_key.into(),
            cards: Vec::new(),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn controls(&self) -> Controls {
        self.phase.controls()
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Validates the inputs and moves into `Generating`.
    ///
    /// On error nothing changes: the phase, the stored cards and the saved
    /// key are left as they were.
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, InputError> {
        if self.phase == Phase::Generating {
            return Err(InputError::Busy);
        }
        let topic = trim_line(&self.topic).ok_or(InputError::MissingTopic)?;
        let api_key = trim_line(&strip_controls_and_escapes(&self.api_key))
            .ok_or(InputError::MissingApiKey)?;

        self.credentials.save(&api_key);
        self.cards.clear();
        self.phase = Phase::Generating;
        tracing::debug!(topic = %topic, "generation started");

        Ok(GenerationRequest { topic, api_key })
    }

    /// Applies the generator's outcome. An empty deck still counts as success.
    pub fn finish_generation(
        &mut self,
        result: Result<Vec<Flashcard>, GenerationError>,
    ) -> Result<&[Flashcard], GenerationError> {
        match result {
            Ok(cards) => {
                self.cards = cards;
                self.phase = Phase::Success;
                Ok(&self.cards)
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation failed");
                self.cards.clear();
                self.phase = Phase::Failed;
                Err(err)
            }
        }
    }

    /// One full cycle from the current inputs.
    pub async fn generate(&mut self) -> Result<&[Flashcard], AppError> {
        let request = self.begin_generation()?;
        let result = self
            .generator
            .generate(&request.topic, &request.api_key)
            .await;
        Ok(self.finish_generation(result)?)
    }

    fn require_success(&self, action: &'static str) -> Result<(), AppError> {
        if self.phase == Phase::Success {
            Ok(())
        } else {
            Err(AppError::Unavailable(action))
        }
    }

    pub fn export(&self, dir: &Path) -> Result<PathBuf, AppError> {
        self.require_success("Export")?;
        Ok(export_cards(&self.cards, &self.topic, dir)?)
    }

    pub fn print(&self, dir: &Path) -> Result<PathBuf, AppError> {
        self.require_success("Print")?;
        Ok(print_cards(&self.topic, &self.cards, dir)?)
    }
}
