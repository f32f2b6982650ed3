use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::animation::{show_loading_indicator, type_out_text, MessageSlot};
use super::client::CompletionBackend;
use super::conversation::{Conversation, Turn};
use super::error::WidgetError;
use super::types::{Outcome, Update};

/// Drives turns of the chat: each accepted prompt gets a loader on its reply
/// slot, one backend call, and then either the typed-out reply or an error.
#[derive(Clone)]
pub struct ChatWidget {
    backend: Arc<dyn CompletionBackend>,
    tx: UnboundedSender<Update>,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn CompletionBackend>, tx: UnboundedSender<Update>) -> ChatWidget {
        ChatWidget { backend, tx }
    }

    /// Appends the prompt and its reply slot to `conversation` and returns the
    /// task that fills the slot in. Updates reach the conversation through the
    /// widget's channel.
    pub fn submit_prompt(
        &self,
        conversation: &mut Conversation,
        prompt: &str,
    ) -> Result<impl Future<Output = ()> + Send + 'static, WidgetError> {
        let turn = conversation.begin_turn(prompt)?;
        debug!(id = %turn.reply_id, "prompt submitted");
        let widget = self.clone();
        Ok(async move { widget.run_turn(turn).await })
    }

    async fn run_turn(self, turn: Turn) {
        let slot = MessageSlot::new(self.tx.clone(), turn.reply_id.clone());

        let (loader, loading) = show_loading_indicator(slot.clone());
        tokio::spawn(loader);
        let result = self.backend.complete(&turn.prompt).await;
        loading.stop();

        match result {
            Ok(text) => {
                self.resolve(&turn, Outcome::Reply);
                type_out_text(&slot, text.trim()).await;
                debug!(id = %turn.reply_id, "reply shown");
            }
            Err(err) => {
                warn!(id = %turn.reply_id, error = %err, "turn failed");
                self.resolve(&turn, Outcome::Failed(format!("Error: {}", err)));
            }
        }
    }

    fn resolve(&self, turn: &Turn, outcome: Outcome) {
        _ = self.tx.send(Update::Resolve {
            id: turn.reply_id.clone(),
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::types::{RenderState, Role};
    use async_trait::async_trait;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::{sleep, Duration};

    struct SlowBackend {
        delay: Duration,
        reply: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl CompletionBackend for SlowBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, WidgetError> {
            sleep(self.delay).await;
            self.reply
                .map(str::to_string)
                .map_err(|detail| WidgetError::Upstream {
                    status: 500,
                    detail: detail.to_string(),
                })
        }
    }

    fn widget(backend: SlowBackend) -> (ChatWidget, UnboundedReceiver<Update>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChatWidget::new(Arc::new(backend), tx), rx)
    }

    fn drain(rx: &mut UnboundedReceiver<Update>, conversation: &mut Conversation) {
        while let Ok(update) = rx.try_recv() {
            conversation.apply(update);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_types_out_reply() {
        let (widget, mut rx) = widget(SlowBackend {
            delay: Duration::from_millis(700),
            reply: Ok("  4\n"),
        });
        let mut conversation = Conversation::new();

        let task = widget.submit_prompt(&mut conversation, "2+2=").unwrap();
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[0].role, Role::User);
        assert_eq!(conversation.messages()[1].role, Role::Bot);
        let reply_id = conversation.messages()[1].id.clone();

        let running = tokio::spawn(task);
        sleep(Duration::from_millis(650)).await;
        drain(&mut rx, &mut conversation);
        let slot = conversation.get(&reply_id).unwrap();
        assert_eq!(slot.state, RenderState::Loading);
        assert_eq!(slot.content, "..");

        running.await.unwrap();
        drain(&mut rx, &mut conversation);
        let slot = conversation.get(&reply_id).unwrap();
        assert_eq!(slot.state, RenderState::Complete);
        assert_eq!(slot.content, "4");
        assert!(!conversation.is_busy());

        // The loader was stopped with the turn.
        sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_turn_ends_in_error_message() {
        let (widget, mut rx) = widget(SlowBackend {
            delay: Duration::from_millis(100),
            reply: Err("quota exceeded"),
        });
        let mut conversation = Conversation::new();

        let task = widget.submit_prompt(&mut conversation, "2+2=").unwrap();
        task.await;
        drain(&mut rx, &mut conversation);

        let slot = &conversation.messages()[1];
        assert_eq!(slot.state, RenderState::Failed);
        assert_eq!(slot.content, "Error: server answered 500: quota exceeded");
        assert!(!conversation.is_busy());

        sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_prompt_waits_for_reply() {
        let (widget, mut rx) = widget(SlowBackend {
            delay: Duration::from_millis(100),
            reply: Ok("ok"),
        });
        let mut conversation = Conversation::new();

        let task = widget.submit_prompt(&mut conversation, "one").unwrap();
        assert!(matches!(
            widget.submit_prompt(&mut conversation, "two"),
            Err(WidgetError::ReplyPending)
        ));
        assert_eq!(conversation.messages().len(), 2);

        task.await;
        drain(&mut rx, &mut conversation);
        let task = widget.submit_prompt(&mut conversation, "two").unwrap();
        task.await;
        drain(&mut rx, &mut conversation);

        let contents: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|msg| msg.content.as_str())
            .collect();
        assert_eq!(contents, ["one", "ok", "two", "ok"]);
    }
}
