/// Number of cards the model is asked for. Not enforced on the response.
pub const REQUESTED_CARDS: usize = 10;

const PROMPT_FORMAT: &str = r#"
Every flashcard must have a question or term (front) and an answer or definition (back).
Your answer MUST be a valid JSON object with a single key "flashcards" holding an array of objects.
Each object in the array must have exactly two keys: "frente" (the front) and "verso" (the back).
Do not include any text, explanation or markdown formatting before or after the JSON object.
Expected format:
{
  "flashcards": [
    {
      "frente": "Question 1",
      "verso": "Answer 1"
    },
    {
      "frente": "Question 2",
      "verso": "Answer 2"
    }
  ]
}
"#;

pub fn flashcard_prompt(topic: &str) -> String {
    format!(
        "You are an educational assistant. Create exactly {REQUESTED_CARDS} flashcards about the topic \"{topic}\".\n{PROMPT_FORMAT}"
    )
}
