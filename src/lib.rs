pub mod card;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod llm;
pub mod logging;
pub mod palette;
pub mod print;
pub mod render;
pub mod tui;
pub mod utils;

pub use card::Flashcard;
pub use controller::{Controller, Controls, Phase};
