use serde::{Deserialize, Serialize};

/// One generated study unit: a prompt on the front, the answer on the back.
///
/// The provider is asked for `frente`/`verso` keys, so those are the wire
/// names. A card missing either side keeps an empty string rather than
/// failing the whole batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(rename = "frente", default)]
    pub front: String,
    #[serde(rename = "verso", default)]
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Top-level object the model is told to return.
#[derive(Debug, Deserialize)]
pub struct FlashcardDeck {
    pub flashcards: Vec<Flashcard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_names() {
        let deck: FlashcardDeck =
            serde_json::from_str(r#"{"flashcards":[{"frente":"Q","verso":"A"}]}"#).unwrap();
        assert_eq!(deck.flashcards, vec![Flashcard::new("Q", "A")]);
    }

    #[test]
    fn missing_side_becomes_empty() {
        let deck: FlashcardDeck =
            serde_json::from_str(r#"{"flashcards":[{"frente":"only front"}]}"#).unwrap();
        assert_eq!(deck.flashcards[0].front, "only front");
        assert_eq!(deck.flashcards[0].back, "");
    }

    #[test]
    fn missing_flashcards_key_is_an_error() {
        let deck = serde_json::from_str::<FlashcardDeck>(r#"{"cards":[]}"#);
        assert!(deck.is_err());
    }
}
