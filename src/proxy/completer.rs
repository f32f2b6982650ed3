use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{self as openai_types},
    Client,
};
use async_trait::async_trait;
use lazy_static::lazy_static;
use thiserror::Error;

use crate::config::Config;

type Request = openai_types::CreateCompletionRequest;
type RequestArgs = openai_types::CreateCompletionRequestArgs;

pub const TEMPERATURE: f32 = 0.9;
pub const MAX_TOKENS: u16 = 3000;
pub const TOP_P: f32 = 1.0;
pub const FREQUENCY_PENALTY: f32 = 0.5;
pub const PRESENCE_PENALTY: f32 = 0.0;

lazy_static! {
    static ref SAMPLING_INIT: RequestArgs = RequestArgs::default()
        .temperature(TEMPERATURE)
        .max_tokens(MAX_TOKENS)
        .top_p(TOP_P)
        .frequency_penalty(FREQUENCY_PENALTY)
        .presence_penalty(PRESENCE_PENALTY)
        .to_owned();
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error(transparent)]
    OpenAI(#[from] OpenAIError),

    #[error("upstream returned no completion choices")]
    NoChoices,

    #[error("{0}")]
    Other(String),
}

/// Prompt in, text out.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

pub struct OpenAiCompleter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompleter {
    pub fn new(config: &Config) -> OpenAiCompleter {
        let mut openai = OpenAIConfig::new().with_api_key(config.api_key.as_str());
        if let Some(base) = &config.api_base {
            openai = openai.with_api_base(base.as_str());
        }
        OpenAiCompleter {
            client: Client::with_config(openai),
            model: config.model.clone(),
        }
    }

    fn build_request(&self, prompt: &str) -> Result<Request, CompletionError> {
        let request = SAMPLING_INIT
            .to_owned()
            .model(self.model.as_str())
            .prompt(prompt)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = self.build_request(prompt)?;
        let text = self
            .client
            .completions()
            .create(request)
            .await?
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::NoChoices)?
            .text;
        Ok(text)
    }
}
