use serde::{Deserialize, Serialize};

pub static LIVENESS_MESSAGE: &str = "Hello from AI";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Liveness {
    pub message: String,
}

impl Default for Liveness {
    fn default() -> Self {
        Liveness {
            message: LIVENESS_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CompletionReply {
    pub bot: String,
}
