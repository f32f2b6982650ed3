use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("a reply is still pending")]
    ReplyPending,

    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {detail}")]
    Upstream { status: u16, detail: String },
}
