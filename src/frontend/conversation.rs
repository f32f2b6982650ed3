use std::collections::HashMap;

use super::error::WidgetError;
use super::types::{Message, MessageId, Outcome, RenderState, Update};

/// A submitted prompt and the bot slot reserved for its reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub prompt: String,
    pub reply_id: MessageId,
}

/// Append-only list of messages in display order.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    index: HashMap<MessageId, usize>,
    in_flight: Option<MessageId>,
}

impl Conversation {
    pub fn new() -> Conversation {
        Conversation::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.index.get(id).map(|&i| &self.messages[i])
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Appends the user's prompt followed by a placeholder for the reply.
    /// Only one reply may be outstanding at a time.
    pub fn begin_turn(&mut self, prompt: &str) -> Result<Turn, WidgetError> {
        if self.is_busy() {
            return Err(WidgetError::ReplyPending);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(WidgetError::EmptyPrompt);
        }

        self.push(Message::user(prompt.to_string()));
        let placeholder = Message::placeholder();
        let reply_id = placeholder.id.clone();
        self.push(placeholder);
        self.in_flight = Some(reply_id.clone());

        Ok(Turn {
            prompt: prompt.to_string(),
            reply_id,
        })
    }

    /// Applies an update, returning whether anything changed. Updates that
    /// don't fit the target's current state are dropped.
    pub fn apply(&mut self, update: Update) -> bool {
        match update {
            Update::Frame { id, text } => {
                let Some(msg) = self.get_mut(&id) else {
                    return false;
                };
                if msg.state.is_resolved() {
                    return false;
                }
                msg.state = RenderState::Loading;
                msg.content = text;
                true
            }
            Update::Resolve { id, outcome } => {
                let Some(msg) = self.get_mut(&id) else {
                    return false;
                };
                if msg.state.is_resolved() {
                    return false;
                }
                match outcome {
                    Outcome::Reply => {
                        msg.state = RenderState::Complete;
                        msg.content.clear();
                    }
                    Outcome::Failed(detail) => {
                        msg.state = RenderState::Failed;
                        msg.content = detail;
                    }
                }
                if self.in_flight.as_ref() == Some(&id) {
                    self.in_flight = None;
                }
                true
            }
            Update::Reveal { id, ch } => {
                let Some(msg) = self.get_mut(&id) else {
                    return false;
                };
                if msg.state != RenderState::Complete {
                    return false;
                }
                msg.content.push(ch);
                true
            }
        }
    }

    fn push(&mut self, message: Message) {
        self.index.insert(message.id.clone(), self.messages.len());
        self.messages.push(message);
    }

    fn get_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        let i = *self.index.get(id)?;
        self.messages.get_mut(i)
    }
}
