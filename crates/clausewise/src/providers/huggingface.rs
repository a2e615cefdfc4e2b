//! Hosted inference API client with status-based retry

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::InferenceConfig;
use crate::error::Result;
use crate::heuristics::head_chars;

use super::inference::{GeneratedText, InferenceProvider, InferenceTask};
use super::models::ModelRegistry;

/// Generated text must be longer than this (after trimming) to be used
const MIN_GENERATED_CHARS: usize = 10;

/// Characters of the prompt sent to summarization models when no markers apply
const SUMMARIZATION_INPUT_CHARS: usize = 500;

/// What to do after a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusAction {
    /// 200: read the body
    Accept,
    /// 503: the model is loading, wait and retry
    Loading,
    /// 404/401: retrying cannot help
    Stop(&'static str),
    /// Anything else: retry after the normal delay
    Retry,
}

fn classify_status(status: StatusCode) -> StatusAction {
    match status {
        StatusCode::OK => StatusAction::Accept,
        StatusCode::SERVICE_UNAVAILABLE => StatusAction::Loading,
        StatusCode::NOT_FOUND => StatusAction::Stop("model not found"),
        StatusCode::UNAUTHORIZED => StatusAction::Stop("authentication failed, check the API key"),
        _ => StatusAction::Retry,
    }
}

/// Client for a Hugging Face compatible inference API
pub struct HuggingFaceClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: InferenceConfig,
    /// Backend redirects
    registry: ModelRegistry,
}

impl HuggingFaceClient {
    /// Create a new client
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder().pool_max_idle_per_host(5).build()?;

        Ok(Self {
            client,
            registry: ModelRegistry::new(config),
            config: config.clone(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.config.base_url.trim_end_matches('/'), model)
    }

    fn post(&self, model: &str, payload: &Value, timeout: Duration) -> reqwest::RequestBuilder {
        let request = self
            .client
            .post(self.model_url(model))
            .timeout(timeout)
            .json(payload);

        match self.config.api_key.as_deref() {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Query a model, retrying on loading and transient failures.
    ///
    /// Network and API failures are logged and yield `Ok(None)`.
    pub async fn query(&self, model: &str, payload: &Value) -> Result<Option<Value>> {
        let timeout = Duration::from_secs(self.config.query_timeout_secs);
        self.send_with_retry(model, payload, timeout).await
    }

    /// Retry loop shared by `query` and `generate`
    async fn send_with_retry(
        &self,
        model: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<Option<Value>> {
        let max_attempts = self.config.max_retries.max(1);

        for attempt in 1..=max_attempts {
            let has_next = attempt < max_attempts;
            let mut delay = Duration::from_millis(self.config.retry_delay_ms);

            match self.post(model, payload, timeout).send().await {
                Ok(response) => match classify_status(response.status()) {
                    StatusAction::Accept => match response.json::<Value>().await {
                        Ok(value) => return Ok(Some(value)),
                        Err(e) => tracing::warn!(
                            model,
                            attempt,
                            max_attempts,
                            "unreadable response body: {}",
                            e
                        ),
                    },
                    StatusAction::Loading => {
                        tracing::info!(model, attempt, max_attempts, "model is loading, waiting");
                        delay = Duration::from_millis(self.config.loading_delay_ms);
                    }
                    StatusAction::Stop(reason) => {
                        tracing::warn!(model, status = %response.status(), "{}", reason);
                        return Ok(None);
                    }
                    StatusAction::Retry => tracing::warn!(
                        model,
                        attempt,
                        max_attempts,
                        status = %response.status(),
                        "inference API returned an error status"
                    ),
                },
                Err(e) if e.is_timeout() => {
                    tracing::warn!(model, attempt, max_attempts, "request timed out")
                }
                Err(e) => tracing::warn!(model, attempt, max_attempts, "request failed: {}", e),
            }

            if has_next {
                sleep(delay).await;
            }
        }

        tracing::warn!(model, max_attempts, "inference request gave up");
        Ok(None)
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceClient {
    async fn generate(
        &self,
        model: &str,
        task: InferenceTask,
        prompt: &str,
    ) -> Result<Option<GeneratedText>> {
        let invoked = self.registry.resolve(model);
        let payload = build_payload(invoked, task, prompt);
        let timeout = Duration::from_secs(self.config.generate_timeout_secs);

        tracing::info!(model = invoked, %task, "calling inference API");

        let Some(body) = self.send_with_retry(invoked, &payload, timeout).await? else {
            return Ok(None);
        };

        match extract_generated_text(invoked, &body) {
            Some(text) if text.trim().chars().count() > MIN_GENERATED_CHARS => {
                tracing::info!(model = invoked, %task, chars = text.len(), "model responded");
                Ok(Some(GeneratedText {
                    text,
                    model: invoked.to_string(),
                }))
            }
            _ => {
                tracing::warn!(model = invoked, %task, "low-confidence response, using local processing");
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> Result<bool> {
        let model = self.registry.resolve(self.registry.model_for(InferenceTask::Summarization));
        let mut request = self.client.get(self.model_url(model)).timeout(Duration::from_secs(10));
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

/// Summarization-family models only take the text to condense
fn is_summarization_model(model: &str) -> bool {
    model.to_lowercase().contains("bart")
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)? + start.len();
    let to = text.find(end)?;
    (to > from).then(|| text[from..to].trim())
}

/// Input text for a summarization-family model
fn summarization_input(task: InferenceTask, prompt: &str) -> &str {
    match task {
        InferenceTask::Summarization => {
            if prompt.contains("Professional Summary:") {
                between(prompt, "Legal Document:", "Professional Summary:").unwrap_or(prompt)
            } else {
                prompt
            }
        }
        InferenceTask::QuestionAnswering => between(prompt, "Document Content:", "User Question:")
            .unwrap_or_else(|| head_chars(prompt, SUMMARIZATION_INPUT_CHARS)),
        InferenceTask::DetailedAnalysis => head_chars(prompt, SUMMARIZATION_INPUT_CHARS),
    }
}

/// Build the request body for a model family and task
fn build_payload(model: &str, task: InferenceTask, prompt: &str) -> Value {
    if is_summarization_model(model) {
        json!({
            "inputs": summarization_input(task, prompt),
            "parameters": {
                "max_length": 200,
                "min_length": 30,
                "do_sample": false,
                "early_stopping": true,
            }
        })
    } else {
        json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": 300,
                "temperature": 0.3,
                "do_sample": true,
                "top_p": 0.9,
            }
        })
    }
}

/// Pull the generated text out of an object or one-element list response
fn extract_generated_text(model: &str, body: &Value) -> Option<String> {
    let result = match body {
        Value::Array(items) => items.first()?,
        Value::Object(_) => body,
        _ => return None,
    };

    let field = |name: &str| result.get(name).and_then(Value::as_str).map(str::to_string);

    if is_summarization_model(model) {
        field("summary_text")
    } else {
        field("generated_text").or_else(|| field("summary_text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, routing::post, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const BART: &str = "facebook/bart-large-cnn";

    #[derive(Clone)]
    struct Stub {
        replies: Arc<Vec<(StatusCode, Value)>>,
        hits: Arc<AtomicUsize>,
    }

    async fn reply(State(stub): State<Stub>) -> (axum::http::StatusCode, Json<Value>) {
        let n = stub.hits.fetch_add(1, Ordering::SeqCst);
        let (status, body) = stub
            .replies
            .get(n)
            .or_else(|| stub.replies.last())
            .cloned()
            .unwrap();
        (
            axum::http::StatusCode::from_u16(status.as_u16()).unwrap(),
            Json(body),
        )
    }

    async fn spawn_stub(replies: Vec<(StatusCode, Value)>) -> (HuggingFaceClient, Arc<AtomicUsize>) {
        let stub = Stub {
            replies: Arc::new(replies),
            hits: Arc::new(AtomicUsize::new(0)),
        };
        let hits = Arc::clone(&stub.hits);

        let app = Router::new()
            .route("/models/*model", post(reply))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = InferenceConfig {
            base_url: format!("http://{}", addr),
            api_key: Some("hf_test".to_string()),
            loading_delay_ms: 0,
            retry_delay_ms: 0,
            ..Default::default()
        };
        (HuggingFaceClient::new(&config).unwrap(), hits)
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify_status(StatusCode::OK), StatusAction::Accept);
        assert_eq!(classify_status(StatusCode::SERVICE_UNAVAILABLE), StatusAction::Loading);
        assert!(matches!(classify_status(StatusCode::NOT_FOUND), StatusAction::Stop(_)));
        assert!(matches!(classify_status(StatusCode::UNAUTHORIZED), StatusAction::Stop(_)));
        assert_eq!(classify_status(StatusCode::INTERNAL_SERVER_ERROR), StatusAction::Retry);
        assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS), StatusAction::Retry);
    }

    #[test]
    fn test_bart_summarization_payload_uses_document_text() {
        let prompt = "Please summarize.\n\nLegal Document:\nThe tenant shall pay rent.\n\nProfessional Summary:";
        let payload = build_payload(BART, InferenceTask::Summarization, prompt);
        assert_eq!(payload["inputs"], "The tenant shall pay rent.");
        assert_eq!(payload["parameters"]["max_length"], 200);
        assert_eq!(payload["parameters"]["do_sample"], false);
    }

    #[test]
    fn test_bart_question_payload() {
        let prompt = "Document Content:\nRent is $900.\n\nUser Question: how much?\n\nAnswer:";
        let payload = build_payload(BART, InferenceTask::QuestionAnswering, prompt);
        assert_eq!(payload["inputs"], "Rent is $900.");

        let long = "x".repeat(800);
        let payload = build_payload(BART, InferenceTask::QuestionAnswering, &long);
        assert_eq!(payload["inputs"].as_str().unwrap().len(), 500);
    }

    #[test]
    fn test_generative_payload_keeps_prompt() {
        let payload = build_payload("org/instruct-model", InferenceTask::DetailedAnalysis, "Analyze this");
        assert_eq!(payload["inputs"], "Analyze this");
        assert_eq!(payload["parameters"]["max_new_tokens"], 300);
        assert_eq!(payload["parameters"]["top_p"], 0.9);
    }

    #[test]
    fn test_extract_generated_text() {
        let list = json!([{ "summary_text": "A lease between two parties." }]);
        assert_eq!(
            extract_generated_text(BART, &list).as_deref(),
            Some("A lease between two parties.")
        );

        let object = json!({ "generated_text": "Generated answer text" });
        assert_eq!(extract_generated_text(BART, &object), None);
        assert_eq!(
            extract_generated_text("org/instruct-model", &object).as_deref(),
            Some("Generated answer text")
        );

        let fallback = json!({ "summary_text": "Summary only" });
        assert_eq!(
            extract_generated_text("org/instruct-model", &fallback).as_deref(),
            Some("Summary only")
        );
        assert_eq!(extract_generated_text(BART, &json!([0.1, 0.2])), None);
    }

    #[tokio::test]
    async fn test_query_retries_while_loading() {
        let (client, hits) = spawn_stub(vec![
            (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "loading" })),
            (StatusCode::OK, json!([{ "summary_text": "done" }])),
        ])
        .await;

        let result = client.query(BART, &json!({ "inputs": "text" })).await.unwrap();
        assert_eq!(result, Some(json!([{ "summary_text": "done" }])));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_query_stops_on_not_found_and_unauthorized() {
        for status in [StatusCode::NOT_FOUND, StatusCode::UNAUTHORIZED] {
            let (client, hits) = spawn_stub(vec![(status, json!({}))]).await;
            let result = client.query(BART, &json!({ "inputs": "text" })).await.unwrap();
            assert!(result.is_none());
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_query_gives_up_after_max_retries() {
        let (client, hits) =
            spawn_stub(vec![(StatusCode::INTERNAL_SERVER_ERROR, json!({}))]).await;
        let result = client.query(BART, &json!({ "inputs": "text" })).await.unwrap();
        assert!(result.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_generate_reports_invoked_model() {
        let (client, _) = spawn_stub(vec![(
            StatusCode::OK,
            json!([{ "summary_text": "The tenant pays rent monthly to the landlord." }]),
        )])
        .await;

        let generated = client
            .generate(BART, InferenceTask::Summarization, "Legal Document: x Professional Summary:")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(generated.model, BART);
        assert!(generated.text.starts_with("The tenant"));
    }

    #[tokio::test]
    async fn test_generate_waits_for_loading_model() {
        let (client, hits) = spawn_stub(vec![
            (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "Model is currently loading" })),
            (
                StatusCode::OK,
                json!([{ "summary_text": "The buyer pays the seller on delivery of the goods." }]),
            ),
        ])
        .await;

        let generated = client
            .generate(BART, InferenceTask::Summarization, "Legal Document: x Professional Summary:")
            .await
            .unwrap()
            .unwrap();
        assert!(generated.text.starts_with("The buyer pays"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_generate_does_not_retry_missing_model() {
        let (client, hits) = spawn_stub(vec![(StatusCode::NOT_FOUND, json!({}))]).await;
        let generated = client
            .generate(BART, InferenceTask::Summarization, "prompt")
            .await
            .unwrap();
        assert!(generated.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generate_rejects_short_text() {
        let (client, _) =
            spawn_stub(vec![(StatusCode::OK, json!([{ "summary_text": "  too short " }]))]).await;
        let generated = client
            .generate(BART, InferenceTask::Summarization, "prompt")
            .await
            .unwrap();
        assert!(generated.is_none());
    }

    #[tokio::test]
    async fn test_generate_unreachable_host_degrades() {
        let config = InferenceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("hf_test".to_string()),
            loading_delay_ms: 0,
            retry_delay_ms: 0,
            ..Default::default()
        };
        let client = HuggingFaceClient::new(&config).unwrap();
        let generated = client
            .generate(BART, InferenceTask::QuestionAnswering, "prompt")
            .await
            .unwrap();
        assert!(generated.is_none());
    }
}
