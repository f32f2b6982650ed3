mod completer;
mod routes;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use completer::{Completer, CompletionError, OpenAiCompleter};
pub use routes::{router, ProxyError};
pub use types::{CompletionReply, CompletionRequest, Liveness, LIVENESS_MESSAGE};
