//! Upstream agent HTTP client
//!
//! Sends `POST {endpoint}/chat-messages` in streaming mode and folds the
//! returned events into one answer. Missing credentials and transport
//! failures come back as answer text, never as an error.

use futures::TryStreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::history::{flatten, last_assistant_message};
use super::model::{AgentAnswer, AgentInvocation};
use super::stream::{fold_answer, parse_line, LineDecoder};
use crate::{Error, Result};

/// Answer returned when the endpoint or key is missing
pub const CREDENTIALS_MISSING_TEXT: &str = "Agent API credentials are not configured.";

const USER_PREFIX: &str = "anythingllm-user-";

/// Configuration for the agent client
#[derive(Debug, Clone)]
pub struct AgentClientConfig {
    /// Upper bound on one whole call, stream included
    pub timeout: Option<Duration>,
}

impl Default for AgentClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(300)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatInputs {
    last_assistant_message: String,
    formatted_chat_history: String,
}

#[derive(Debug, Serialize)]
struct ChatMessagesRequest {
    inputs: ChatInputs,
    query: String,
    response_mode: &'static str,
    user: String,
    conversation_id: String,
    files: Vec<serde_json::Value>,
}

impl ChatMessagesRequest {
    fn from_invocation(invocation: &AgentInvocation) -> Self {
        Self {
            inputs: ChatInputs {
                last_assistant_message: last_assistant_message(&invocation.history),
                formatted_chat_history: flatten(&invocation.history),
            },
            query: invocation.prompt.clone(),
            response_mode: "streaming",
            user: format!("{}{}", USER_PREFIX, Uuid::new_v4()),
            conversation_id: invocation.conversation_id.clone().unwrap_or_default(),
            files: Vec::new(),
        }
    }
}

/// Client for the streaming chat-messages API
#[derive(Debug, Clone)]
pub struct AgentStreamClient {
    client: Client,
}

impl AgentStreamClient {
    pub fn new(config: AgentClientConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            }),
        }
    }

    /// Run one invocation to completion.
    pub async fn invoke(&self, invocation: AgentInvocation) -> AgentAnswer {
        if !invocation.has_credentials() {
            info!("Agent call skipped: {}", Error::UpstreamConfig);
            return AgentAnswer::new(CREDENTIALS_MISSING_TEXT);
        }

        match self.stream_answer(&invocation).await {
            Ok(text) => {
                info!("Agent answered with {} bytes", text.len());
                AgentAnswer::new(text)
            }
            Err(e) => {
                warn!("Agent call failed: {}", e);
                AgentAnswer::new(format!("Error calling agent: {}", e))
            }
        }
    }

    async fn stream_answer(&self, invocation: &AgentInvocation) -> Result<String> {
        let url = format!("{}/chat-messages", invocation.endpoint.trim_end_matches('/'));
        let request = ChatMessagesRequest::from_invocation(invocation);
        debug!("Calling agent at {} as {}", url, request.user);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&invocation.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Error::transport)?
            .error_for_status()
            .map_err(Error::transport)?;

        let (decoder, answer) = response
            .bytes_stream()
            .map_err(Error::transport)
            .try_fold(
                (LineDecoder::new(), String::new()),
                |(mut decoder, answer), chunk| async move {
                    let answer = decoder
                        .push(&chunk)
                        .iter()
                        .map(|line| parse_line(line))
                        .fold(answer, fold_answer);
                    Ok::<_, Error>((decoder, answer))
                },
            )
            .await?;

        Ok(match decoder.finish() {
            Some(line) => fold_answer(answer, parse_line(&line)),
            None => answer,
        })
    }
}

impl Default for AgentStreamClient {
    fn default() -> Self {
        Self::new(AgentClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ConversationMessage;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_stream(lines: &[&str]) -> ResponseTemplate {
        let body = lines.iter().map(|l| format!("{}\n\n", l)).collect::<String>();
        ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
    }

    async fn setup_mock_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat-messages"))
            .and(header("authorization", "Bearer test_api_key"))
            .respond_with(response)
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn invocation(server: &MockServer) -> AgentInvocation {
        AgentInvocation::new("Create a PDF")
            .with_credentials(format!("{}/v1", server.uri()), "test_api_key")
    }

    #[tokio::test]
    async fn test_missing_credentials_make_no_request() {
        let mock_server = setup_mock_server(event_stream(&[])).await;
        let client = AgentStreamClient::default();

        let no_key = AgentInvocation::new("hi").with_credentials(mock_server.uri(), "");
        let no_endpoint = AgentInvocation::new("hi").with_credentials("", "test_api_key");

        assert_eq!(client.invoke(no_key).await.text, CREDENTIALS_MISSING_TEXT);
        assert_eq!(client.invoke(no_endpoint).await.text, CREDENTIALS_MISSING_TEXT);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_aggregates_agent_messages() {
        let mock_server = setup_mock_server(event_stream(&[
            r#"data: {"event": "agent_thought", "thought": "planning"}"#,
            r#"data: {"event": "agent_message", "answer": "Your file "}"#,
            "event: ping",
            r#"data: {"event": "agent_message", "answer": "is ready."}"#,
            r#"data: {"event": "message_end", "conversation_id": "c-1"}"#,
        ]))
        .await;

        let answer = AgentStreamClient::default()
            .invoke(invocation(&mock_server))
            .await;

        assert_eq!(answer.text, "Your file is ready.");
    }

    #[tokio::test]
    async fn test_malformed_event_is_skipped() {
        let mock_server = setup_mock_server(event_stream(&[
            "data: {\"event\": \"agent_message\", \"answer\": ",
            r#"data: {"event": "agent_message", "answer": "ok"}"#,
        ]))
        .await;

        let answer = AgentStreamClient::default()
            .invoke(invocation(&mock_server))
            .await;

        assert_eq!(answer.text, "ok");
    }

    #[tokio::test]
    async fn test_empty_stream_yields_empty_answer() {
        let mock_server = setup_mock_server(event_stream(&[])).await;

        let answer = AgentStreamClient::default()
            .invoke(invocation(&mock_server))
            .await;

        assert_eq!(answer.text, "");
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_used() {
        let response = ResponseTemplate::new(200).set_body_raw(
            r#"data: {"event": "agent_message", "answer": "tail"}"#,
            "text/event-stream",
        );
        let mock_server = setup_mock_server(response).await;

        let answer = AgentStreamClient::default()
            .invoke(invocation(&mock_server))
            .await;

        assert_eq!(answer.text, "tail");
    }

    #[tokio::test]
    async fn test_request_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat-messages"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "inputs": {
                    "last_assistant_message": "C",
                    "formatted_chat_history": "Assistant: A\n\nUser: B\n\nAssistant: C"
                },
                "query": "Save this",
                "response_mode": "streaming",
                "conversation_id": "conv-7",
                "files": []
            })))
            .respond_with(event_stream(&[
                r#"data: {"event": "agent_message", "answer": "matched"}"#,
            ]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let invocation = AgentInvocation::new("Save this")
            .with_history(vec![
                ConversationMessage::assistant("A"),
                ConversationMessage::user("B"),
                ConversationMessage::assistant("C"),
            ])
            .with_credentials(format!("{}/", mock_server.uri()), "key")
            .with_conversation_id("conv-7");

        let answer = AgentStreamClient::default().invoke(invocation).await;
        assert_eq!(answer.text, "matched");

        let requests = mock_server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let user = body["user"].as_str().unwrap();
        assert!(user.starts_with(USER_PREFIX));
        assert!(Uuid::parse_str(&user[USER_PREFIX.len()..]).is_ok());
    }

    #[tokio::test]
    async fn test_conversation_id_defaults_to_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "conversation_id": "" })))
            .respond_with(event_stream(&[
                r#"data: {"event": "agent_message", "answer": "new conversation"}"#,
            ]))
            .mount(&mock_server)
            .await;

        let answer = AgentStreamClient::default()
            .invoke(AgentInvocation::new("hi").with_credentials(mock_server.uri(), "key"))
            .await;

        assert_eq!(answer.text, "new conversation");
    }

    #[tokio::test]
    async fn test_error_status_becomes_answer_text() {
        let mock_server =
            setup_mock_server(ResponseTemplate::new(401).set_body_string("bad key")).await;

        let answer = AgentStreamClient::default()
            .invoke(invocation(&mock_server))
            .await;

        assert!(answer.text.starts_with("Error calling agent: "));
        assert!(answer.text.contains("401"));
    }

    #[tokio::test]
    async fn test_connection_failure_becomes_answer_text() {
        let mock_server = MockServer::start().await;
        let endpoint = mock_server.uri();
        drop(mock_server);

        let answer = AgentStreamClient::default()
            .invoke(AgentInvocation::new("hi").with_credentials(endpoint, "key"))
            .await;

        assert!(answer.text.starts_with("Error calling agent: "));
    }

    /// Serve one request with a 200 that promises more body than it sends,
    /// then hang up.
    async fn spawn_truncating_server(partial_body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                let Some(header_end) = text.find("\r\n\r\n") else {
                    if n == 0 {
                        break;
                    }
                    continue;
                };
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let line = line.to_ascii_lowercase();
                        line.strip_prefix("content-length:")
                            .map(|value| value.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if n == 0 || request.len() >= header_end + 4 + content_length {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: 5000\r\n\r\n{}",
                partial_body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
        });

        format!("http://{}/v1", addr)
    }

    #[tokio::test]
    async fn test_disconnect_mid_stream_becomes_answer_text() {
        let endpoint = spawn_truncating_server(
            "data: {\"event\": \"agent_message\", \"answer\": \"partial\"}\n\n",
        )
        .await;

        let answer = AgentStreamClient::default()
            .invoke(AgentInvocation::new("hi").with_credentials(endpoint, "key"))
            .await;

        assert!(answer.text.starts_with("Error calling agent: "), "{}", answer.text);
        assert!(!answer.text.contains("partial"));
        // the underlying cause follows the top-level message
        let detail = &answer.text["Error calling agent: ".len()..];
        assert!(detail.contains(": "), "{}", answer.text);
    }

    #[tokio::test]
    async fn test_timeout_becomes_answer_text() {
        let mock_server = setup_mock_server(
            event_stream(&[r#"data: {"event": "agent_message", "answer": "late"}"#])
                .set_delay(Duration::from_secs(5)),
        )
        .await;
        let client = AgentStreamClient::new(AgentClientConfig {
            timeout: Some(Duration::from_millis(200)),
        });

        let answer = client.invoke(invocation(&mock_server)).await;

        assert!(answer.text.starts_with("Error calling agent: "));
    }
}
