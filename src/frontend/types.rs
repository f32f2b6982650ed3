use std::fmt;

use rand::Rng;

use crate::utils::unix_millis;

/// Identity of one message in the conversation view, `id-<millis>-<hex>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn generate() -> MessageId {
        let random: u64 = rand::thread_rng().gen();
        MessageId(format!("id-{}-{:x}", unix_millis(), random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Slot reserved, no loader frame drawn yet.
    Pending,
    Loading,
    Complete,
    Failed,
}

impl RenderState {
    pub fn is_resolved(self) -> bool {
        matches!(self, RenderState::Complete | RenderState::Failed)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RenderState::Pending => "pending",
            RenderState::Loading => "loading",
            RenderState::Complete => "complete",
            RenderState::Failed => "failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub state: RenderState,
}

impl Message {
    pub fn user(content: String) -> Message {
        Message {
            id: MessageId::generate(),
            role: Role::User,
            content,
            state: RenderState::Complete,
        }
    }

    pub fn placeholder() -> Message {
        Message {
            id: MessageId::generate(),
            role: Role::Bot,
            content: String::new(),
            state: RenderState::Pending,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The reply arrived; its text follows as `Reveal` updates.
    Reply,
    Failed(String),
}

/// A change to one message of the view, addressed by id.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    Frame { id: MessageId, text: String },
    Resolve { id: MessageId, outcome: Outcome },
    Reveal { id: MessageId, ch: char },
}
