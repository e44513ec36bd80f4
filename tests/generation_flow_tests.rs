use cardsmith::controller::{Controller, Phase};
use cardsmith::export::encode_csv;
use cardsmith::llm::{CredentialStore, GeminiClient, MemoryStore, Provider};
use cardsmith::render::render_text;
use cardsmith::Flashcard;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";
const PHOTOSYNTHESIS: &str =
    r#"{"flashcards":[{"frente":"What is chlorophyll?","verso":"A green pigment..."}]}"#;

fn model_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    }))
}

fn controller(server: &MockServer, topic: &str, key: &str) -> Controller<GeminiClient, MemoryStore> {
    let client = GeminiClient::new(Provider::new(Some(server.uri().as_str()), None));
    let mut controller = Controller::new(client, MemoryStore::default());
    controller.set_topic(topic);
    controller.set_api_key(key);
    controller
}

#[tokio::test]
async fn photosynthesis_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "K-123"))
        .respond_with(model_reply(PHOTOSYNTHESIS))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller(&server, "Photosynthesis", "K-123");
    let cards = controller.generate().await.unwrap().to_vec();

    assert_eq!(cards, vec![Flashcard::new("What is chlorophyll?", "A green pigment...")]);
    assert_eq!(controller.phase(), Phase::Success);
    assert!(controller.controls().actions_visible);

    let rendered = render_text(Some(controller.cards()));
    assert!(rendered.contains("What is chlorophyll?"));

    let dir = TempDir::new().unwrap();
    let first = std::fs::read(controller.export(dir.path()).unwrap()).unwrap();
    let second = std::fs::read(controller.export(dir.path()).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "\u{feff}\"What is chlorophyll?\";\"A green pigment...\"".as_bytes()
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(
        body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Photosynthesis")
    );
}

#[tokio::test]
async fn key_is_persisted_when_generation_starts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GeminiClient::new(Provider::new(Some(server.uri().as_str()), None));
    let store = MemoryStore::with_key("old");
    let mut controller = Controller::new(client, &store);
    controller.set_topic("Rust");
    controller.set_api_key("  fresh-key ");

    assert!(controller.generate().await.is_err());
    assert_eq!(store.load().as_deref(), Some("fresh-key"));
}

#[tokio::test]
async fn provider_error_leaves_no_cards() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(model_reply(PHOTOSYNTHESIS))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource has been exhausted"}
        })))
        .mount(&server)
        .await;

    let mut controller = controller(&server, "Photosynthesis", "key");
    controller.generate().await.unwrap();
    assert_eq!(controller.cards().len(), 1);

    let err = controller.generate().await.unwrap_err();
    assert_eq!(err.to_string(), "API error: Resource has been exhausted");
    assert!(controller.cards().is_empty());
    assert_eq!(controller.phase(), Phase::Failed);
    assert!(!controller.controls().actions_visible);
}

#[tokio::test]
async fn fenced_reply_matches_bare_reply() {
    let bare_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(model_reply(PHOTOSYNTHESIS))
        .mount(&bare_server)
        .await;
    let fenced_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(model_reply(&format!("```json\n{PHOTOSYNTHESIS}\n```")))
        .mount(&fenced_server)
        .await;

    let mut bare = controller(&bare_server, "Photosynthesis", "key");
    let mut fenced = controller(&fenced_server, "Photosynthesis", "key");
    let bare_cards = bare.generate().await.unwrap().to_vec();
    let fenced_cards = fenced.generate().await.unwrap().to_vec();

    assert_eq!(bare_cards, fenced_cards);
    assert_eq!(encode_csv(&bare_cards), encode_csv(&fenced_cards));
}

#[tokio::test]
async fn blank_topic_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(model_reply(PHOTOSYNTHESIS))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller(&server, "   ", "key");
    let err = controller.generate().await.unwrap_err();

    assert!(err.is_warning());
    assert_eq!(controller.phase(), Phase::Idle);
}
