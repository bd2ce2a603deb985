//! Capability manifest for AnythingLLM-style agent hosts

use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use serde::Serialize;

use super::request_host_url;
use crate::state::AppState;

const AGENT_NAME: &str = "File Generator Agent";
const SCHEMA_NAME: &str = "file-generator";

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub version: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub entrypoint: String,
    pub schemas: Vec<AgentSchema>,
}

#[derive(Debug, Serialize)]
pub struct AgentSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub provider: String,
    pub description: String,
    pub settings: Vec<SettingDescriptor>,
    pub examples: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub value: String,
    pub required: bool,
}

impl SettingDescriptor {
    fn required(name: &str, kind: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            description: description.to_string(),
            value: String::new(),
            required: true,
        }
    }
}

impl Manifest {
    /// Descriptor whose entrypoint is the `/invoke` route under `host_url`
    pub fn new(host_url: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: AGENT_NAME.to_string(),
            description: "An agent that can generate files (PDF, DOCX, XLSX), save chat history, \
                          or save the last response using an upstream agent."
                .to_string(),
            kind: "agent".to_string(),
            entrypoint: format!("{}invoke", host_url),
            schemas: vec![AgentSchema {
                kind: "agent".to_string(),
                name: SCHEMA_NAME.to_string(),
                provider: "dify".to_string(),
                description: "Use this agent to create files from content, save the full \
                              conversation, or save the last response."
                    .to_string(),
                settings: vec![
                    SettingDescriptor::required(
                        "endpoint",
                        "text",
                        "Your agent application's API endpoint (e.g., https://api.dify.ai/v1)",
                    ),
                    SettingDescriptor::required(
                        "key",
                        "secret",
                        "Your agent application's secret key.",
                    ),
                ],
                examples: vec![
                    "Create a PDF named 'report.pdf' with the content 'This is a test'.".to_string(),
                    "Save this conversation as a DOCX file named 'chat_log.docx'.".to_string(),
                    "Save the last response as a file named 'summary.pdf'.".to_string(),
                ],
            }],
        }
    }
}

/// GET /anythingllm-manifest.json
async fn manifest(State(state): State<AppState>, headers: HeaderMap) -> Json<Manifest> {
    Json(Manifest::new(&request_host_url(&state, &headers)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/anythingllm-manifest.json", get(manifest))
}
