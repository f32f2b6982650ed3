use std::sync::Arc;

use async_trait::async_trait;

use super::completer::{Completer, CompletionError};

/// Answers every prompt with a fixed reply, or fails when `reply` is `None`.
pub(crate) struct StubCompleter {
    reply: Option<String>,
}

impl StubCompleter {
    pub(crate) fn answering(reply: &str) -> Arc<dyn Completer> {
        Arc::new(StubCompleter {
            reply: Some(reply.to_string()),
        })
    }

    pub(crate) fn failing() -> Arc<dyn Completer> {
        Arc::new(StubCompleter { reply: None })
    }
}

#[async_trait]
impl Completer for StubCompleter {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.reply
            .clone()
            .ok_or_else(|| CompletionError::Other("quota exceeded".to_string()))
    }
}
