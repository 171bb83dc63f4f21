//! Assistant-backed querying for the risk pipeline's retrieval branch.
//!
//! Thin wrapper over the OpenAI Assistants API: create a thread, post the
//! query, start a run, then poll until the run reaches a terminal state or
//! the wait budget runs out. A timeout or any non-success terminal state is a
//! "no answer" signal (`Ok(None)`), not an error — the caller decides how to
//! degrade. No attempt is made to cancel the in-flight remote run.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::llm_client::LlmError;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ASSISTANTS_BETA_HEADER: &str = "assistants=v2";

/// Total wait budget for one assistant run.
const POLL_TIMEOUT: Duration = Duration::from_secs(60);

/// Interval between run-status checks.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    role: String,
    content: Vec<MessageContent>,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<MessageText>,
}

#[derive(Debug, Deserialize)]
struct MessageText {
    value: String,
}

/// Client for one configured assistant (file-search over the policy corpus).
#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    api_key: String,
    assistant_id: String,
}

impl AssistantClient {
    pub fn new(api_key: String, assistant_id: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            assistant_id,
        }
    }

    /// Sends `query` to the assistant and waits for the run to complete.
    ///
    /// Returns `Ok(None)` when the run times out or ends in any state other
    /// than `completed`, and `Err` only for transport-level failures.
    pub async fn ask(&self, query: &str) -> Result<Option<String>, LlmError> {
        let thread: ThreadObject = self
            .post("/threads", &json!({}))
            .await?;
        debug!(thread_id = %thread.id, "assistant thread created");

        let _: serde_json::Value = self
            .post(
                &format!("/threads/{}/messages", thread.id),
                &json!({ "role": "user", "content": query }),
            )
            .await?;

        let mut run: RunObject = self
            .post(
                &format!("/threads/{}/runs", thread.id),
                &json!({ "assistant_id": self.assistant_id }),
            )
            .await?;
        debug!(run_id = %run.id, "assistant run started");

        let started = Instant::now();
        while matches!(run.status.as_str(), "queued" | "in_progress") {
            if started.elapsed() > POLL_TIMEOUT {
                warn!(run_id = %run.id, "assistant run timed out");
                return Ok(None);
            }
            sleep(POLL_INTERVAL).await;
            run = self
                .get(&format!("/threads/{}/runs/{}", thread.id, run.id))
                .await?;
            debug!(run_id = %run.id, status = %run.status, "assistant run polled");
        }

        if run.status != "completed" {
            warn!(run_id = %run.id, status = %run.status, "assistant run did not complete");
            return Ok(None);
        }

        let messages: MessageList = self
            .get(&format!("/threads/{}/messages", thread.id))
            .await?;

        let answer = messages
            .data
            .iter()
            .find(|message| message.role == "assistant")
            .and_then(|message| {
                message
                    .content
                    .iter()
                    .find(|block| block.kind == "text")
                    .and_then(|block| block.text.as_ref())
            })
            .map(|text| text.value.clone());

        if answer.is_none() {
            warn!(thread_id = %thread.id, "assistant run completed without a text answer");
        }
        Ok(answer)
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, LlmError> {
        let response = self
            .client
            .post(format!("{OPENAI_BASE_URL}{path}"))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, LlmError> {
        let response = self
            .client
            .get(format!("{OPENAI_BASE_URL}{path}"))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, LlmError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_list_extracts_assistant_text() {
        let raw = r#"{
            "data": [
                {"role": "user", "content": [{"type": "text", "text": {"value": "q"}}]},
                {"role": "assistant", "content": [
                    {"type": "image_file", "text": null},
                    {"type": "text", "text": {"value": "the answer"}}
                ]}
            ]
        }"#;
        let list: MessageList = serde_json::from_str(raw).unwrap();
        let answer = list
            .data
            .iter()
            .find(|m| m.role == "assistant")
            .and_then(|m| m.content.iter().find(|b| b.kind == "text"))
            .and_then(|b| b.text.as_ref())
            .map(|t| t.value.clone());
        assert_eq!(answer.as_deref(), Some("the answer"));
    }

    #[test]
    fn test_run_object_parses_status() {
        let run: RunObject = serde_json::from_str(r#"{"id": "run_1", "status": "queued"}"#).unwrap();
        assert_eq!(run.status, "queued");
    }
}
