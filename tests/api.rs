//! End-to-end router tests with a canned text backend.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use mythogen::backend::TextBackend;
use mythogen::error::ApiError;
use mythogen::generator::ReligionGenerator;
use mythogen::server::{router, AppState};
use mythogen::store::ReligionStore;

/// Backend double replaying canned completions in order.
struct ScriptedBackend {
    responses: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
        })
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ApiError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(ApiError::Generation("scripted backend exhausted".into()));
        }
        Ok(responses.remove(0))
    }
}

/// Backend double that takes a fixed amount of time per completion.
struct SlowBackend {
    delay: Duration,
    text: String,
}

#[async_trait]
impl TextBackend for SlowBackend {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ApiError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.text.clone())
    }
}

fn app(responses: &[&str]) -> Router {
    let backend = ScriptedBackend::new(responses);
    let state = AppState {
        store: Arc::new(ReligionStore::new()),
        generator: Arc::new(ReligionGenerator::new(backend, "English")),
    };
    router(state, 1)
}

fn religion_text(name: &str) -> String {
    json!({
        "name": name,
        "description": "A faith of tides",
        "deity_type": "animistic",
        "language": "English",
        "deities": [
            {"name": "Orma", "title": "Tide Mother", "domain": "sea",
             "description": "", "attributes": ["patient"], "symbols": ["wave"]}
        ],
        "rituals": [{"name": "First Light", "purpose": "greeting the day"}],
        "core_beliefs": ["balance"]
    })
    .to_string()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_store_size() {
    let app = app(&[]);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["generated_religions_count"], 0);
}

#[tokio::test]
async fn index_lists_endpoints() {
    let app = app(&[]);
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["endpoints"]["generate_religion"],
        "POST /religions/generate"
    );
}

#[tokio::test]
async fn generate_then_get_round_trips() {
    let text = religion_text("Veydral");
    let app = app(&[text.as_str()]);

    let request = json!({"theme": "nature", "deity_type": "animistic", "language": "English"});
    let (status, created) =
        send(&app, Method::POST, "/religions/generate", Some(request)).await;
    assert_eq!(status, StatusCode::OK);

    let religion = &created["religion"];
    assert_eq!(religion["deity_type"], "animistic");
    assert_eq!(religion["language"], "English");
    assert!(!religion["deities"].as_array().unwrap().is_empty());
    // Every list-typed field is present even when the backend omitted it.
    for field in [
        "sacred_texts",
        "moral_rules",
        "legends",
        "symbols",
        "practices",
        "holy_places",
    ] {
        assert!(religion[field].is_array(), "missing list field {field}");
    }

    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("religion_"));

    let (status, fetched) = send(&app, Method::GET, &format!("/religions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["religion"], created["religion"]);

    let (status, listing) = send(&app, Method::GET, "/religions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total_count"], 1);
    assert_eq!(listing["religions"][0]["name"], "Veydral");

    let (status, summary) =
        send(&app, Method::GET, &format!("/religions/{id}/summary"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["deity_count"], 1);
    assert_eq!(summary["ritual_count"], 1);
}

#[tokio::test]
async fn failed_generation_returns_bad_gateway_and_stores_nothing() {
    let app = app(&["I am sorry, I cannot produce JSON today."]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/religions/generate",
        Some(json!({"language": "English"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body["detail"].as_str().unwrap().is_empty());

    let (_, listing) = send(&app, Method::GET, "/religions", None).await;
    assert_eq!(listing["total_count"], 0);
}

#[tokio::test]
async fn unknown_id_is_404_with_detail() {
    let app = app(&[]);
    for uri in [
        "/religions/religion_42_0",
        "/religions/religion_42_0/summary",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("religion_42_0"));
    }
}

#[tokio::test]
async fn delete_removes_the_record() {
    let text = religion_text("Veydral");
    let app = app(&[text.as_str()]);

    let (_, created) = send(
        &app,
        Method::POST,
        "/religions/generate",
        Some(json!({"language": "English"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/religions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_religion"], "Veydral");

    let (status, _) = send(&app, Method::GET, &format!("/religions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn component_generation_validates_type() {
    let app = app(&[r#"{"name": "Orun", "title": "Sky Father"}"#]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/components/generate",
        Some(json!({"component_type": "prophecy"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("prophecy"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/components/generate",
        Some(json!({"component_type": "deity", "context": "storm god"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["component_type"], "deity");
    assert_eq!(body["component"]["name"], "Orun");
}

#[tokio::test]
async fn variations_are_stored_and_counted() {
    let first = religion_text("First");
    let second = religion_text("Second");
    let app = app(&[first.as_str(), second.as_str()]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/religions/variations",
        Some(json!({"base_theme": "storms", "count": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["base_theme"], "storms");
    let ids: Vec<&str> = body["variations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert!(ids.iter().all(|id| id.starts_with("variation_storms_")));

    let (_, listing) = send(&app, Method::GET, "/religions", None).await;
    assert_eq!(listing["total_count"], 2);
}

#[tokio::test(start_paused = true)]
async fn full_variation_batch_outlives_the_single_generation_budget() {
    // Ten sequential backend calls take longer than one generation's request
    // budget; the variations route completes and stores every result anyway.
    let backend = Arc::new(SlowBackend {
        delay: Duration::from_secs(1),
        text: religion_text("Tidesworn"),
    });
    let state = AppState {
        store: Arc::new(ReligionStore::new()),
        generator: Arc::new(ReligionGenerator::new(backend, "English")),
    };
    let app = router(state, 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/religions/variations",
        Some(json!({"base_theme": "tides", "count": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);

    let (_, listing) = send(&app, Method::GET, "/religions", None).await;
    assert_eq!(listing["total_count"], 10);
}

#[tokio::test(start_paused = true)]
async fn hung_backend_times_out_and_stores_nothing() {
    let backend = Arc::new(SlowBackend {
        delay: Duration::from_secs(600),
        text: religion_text("Never"),
    });
    let state = AppState {
        store: Arc::new(ReligionStore::new()),
        generator: Arc::new(ReligionGenerator::new(backend, "English")),
    };
    let app = router(state, 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/religions/generate",
        Some(json!({"language": "English"})),
    )
    .await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    let (_, listing) = send(&app, Method::GET, "/religions", None).await;
    assert_eq!(listing["total_count"], 0);
}

#[tokio::test]
async fn variations_reject_bad_count() {
    let app = app(&[]);
    for count in [0, 11] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/religions/variations",
            Some(json!({"base_theme": "storms", "count": count})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn expand_appends_one_component_and_restores_under_same_id() {
    let text = religion_text("Veydral");
    let legend = r#"{"title": "The Drowning", "story": "...", "characters": ["Ys"]}"#;
    let app = app(&[text.as_str(), legend]);

    let (_, created) = send(
        &app,
        Method::POST,
        "/religions/generate",
        Some(json!({"language": "English"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let deities_before = created["religion"]["deities"].clone();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/religions/{id}/expand?component_type=legend"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["added_component"], "legend");
    assert_eq!(body["religion_id"], *id);

    // The payload carries the religion itself, not the store record.
    assert_eq!(body["religion"]["name"], "Veydral");
    let legends = body["religion"]["legends"].as_array().unwrap();
    assert_eq!(legends.len(), 1);
    assert_eq!(legends[0]["title"], "The Drowning");
    // Untouched fields survive the expansion.
    assert_eq!(body["religion"]["deities"], deities_before);

    // The stored record reflects the expansion.
    let (_, fetched) = send(&app, Method::GET, &format!("/religions/{id}"), None).await;
    assert_eq!(fetched["religion"]["legends"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn expand_validates_type_and_id() {
    let app = app(&[]);

    let (status, _) = send(
        &app,
        Method::POST,
        "/religions/religion_1_0/expand?component_type=hymn",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/religions/religion_1_0/expand?component_type=deity",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
