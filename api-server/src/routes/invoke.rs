//! Agent invocation endpoint
//!
//! Upstream problems are reported inside the `text` field with a 200
//! status; only a malformed request body is answered with 400.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use filegen_core::agent::{AgentAnswer, AgentInvocation, ConversationMessage};

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AgentSettings {
    #[serde(default, alias = "Dify API Endpoint")]
    pub endpoint: Option<String>,
    #[serde(default, alias = "Dify API Secret Key")]
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<ConversationMessage>>,
    #[serde(default)]
    pub settings: Option<AgentSettings>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl From<InvokeRequest> for AgentInvocation {
    fn from(req: InvokeRequest) -> Self {
        let settings = req.settings.unwrap_or_default();
        Self {
            prompt: req.prompt.unwrap_or_default(),
            history: req.history.unwrap_or_default(),
            endpoint: settings.endpoint.unwrap_or_default(),
            api_key: settings.key.unwrap_or_default(),
            conversation_id: req.conversation_id,
        }
    }
}

/// POST /invoke - Forward a prompt to the agent and return its full answer
async fn invoke_agent(
    State(state): State<AppState>,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<AgentAnswer>, ApiError> {
    let Json(req) = payload.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let answer = state.agent_client().invoke(req.into()).await;
    Ok(Json(answer))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/invoke", post(invoke_agent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{build_state, json_request, send_json};
    use filegen_core::agent::CREDENTIALS_MISSING_TEXT;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn missing_credentials_return_sentinel() {
        let (state, _temp_dir) = build_state().await;
        let mock_server = MockServer::start().await;

        let (status, payload) = send_json(
            router().with_state(state),
            json_request(
                "POST",
                "/invoke",
                json!({
                    "prompt": "hello",
                    "settings": { "endpoint": mock_server.uri() }
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["text"], CREDENTIALS_MISSING_TEXT);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn streams_answer_from_agent() {
        let (state, _temp_dir) = build_state().await;
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat-messages"))
            .and(header("authorization", "Bearer app-secret"))
            .and(body_partial_json(json!({
                "query": "Save the last response",
                "inputs": { "last_assistant_message": "Summary text" },
                "conversation_id": "abc"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                concat!(
                    "data: {\"event\": \"agent_message\", \"answer\": \"Saved \"}\n\n",
                    "data: not-json\n\n",
                    "data: {\"event\": \"agent_message\", \"answer\": \"summary.pdf\"}\n\n",
                ),
                "text/event-stream",
            ))
            .mount(&mock_server)
            .await;

        let (status, payload) = send_json(
            router().with_state(state),
            json_request(
                "POST",
                "/invoke",
                json!({
                    "prompt": "Save the last response",
                    "history": [
                        { "role": "user", "content": "Summarize" },
                        { "role": "assistant", "content": "Summary text" }
                    ],
                    "settings": {
                        "Dify API Endpoint": format!("{}/v1", mock_server.uri()),
                        "Dify API Secret Key": "app-secret"
                    },
                    "conversation_id": "abc"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["text"], "Saved summary.pdf");
    }

    #[tokio::test]
    async fn upstream_failure_is_reported_as_text() {
        let (state, _temp_dir) = build_state().await;
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let (status, payload) = send_json(
            router().with_state(state),
            json_request(
                "POST",
                "/invoke",
                json!({
                    "prompt": "hi",
                    "settings": { "endpoint": mock_server.uri(), "key": "k" }
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(payload["text"]
            .as_str()
            .unwrap()
            .starts_with("Error calling agent: "));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let (state, _temp_dir) = build_state().await;

        let (status, payload) = send_json(
            router().with_state(state),
            json_request(
                "POST",
                "/invoke",
                json!({ "prompt": "hi", "history": [{ "role": "system", "content": "x" }] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].is_string());
    }

    #[test]
    fn request_defaults_resolve_at_construction() {
        let req: InvokeRequest = serde_json::from_value(json!({ "history": null })).unwrap();
        let invocation = AgentInvocation::from(req);

        assert_eq!(invocation.prompt, "");
        assert!(invocation.history.is_empty());
        assert!(!invocation.has_credentials());
        assert_eq!(invocation.conversation_id, None);
    }
}
