use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::error::WidgetError;
use crate::proxy::{CompletionReply, CompletionRequest};

/// Where the widget gets its replies from.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, WidgetError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Value,
}

/// Talks to the completion proxy over HTTP.
pub struct ProxyClient {
    client: Client,
    url: String,
}

impl ProxyClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl CompletionBackend for ProxyClient {
    async fn complete(&self, prompt: &str) -> Result<String, WidgetError> {
        let request = CompletionRequest {
            prompt: prompt.to_string(),
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorBody>().await {
                Ok(ErrorBody {
                    error: Value::String(message),
                }) => message,
                Ok(ErrorBody { error }) => error.to_string(),
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(WidgetError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let reply: CompletionReply = response.json().await?;
        Ok(reply.bot)
    }
}
