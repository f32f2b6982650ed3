use std::net::SocketAddr;

use dotenvy::dotenv;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MODEL: &str = "text-davinci-003";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY hasn't been set; export it or add it to a .env file")]
    MissingApiKey,

    #[error("LISTEN_ADDR `{value}` is not a valid socket address: {source}")]
    InvalidListenAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: Option<String>,
    pub model: String,
    pub listen_addr: SocketAddr,
    /// host:port the browser uses to reach this server, needed for the
    /// websocket glue script.
    pub reachable_addr: String,
    /// Where the chat widget posts prompts.
    pub proxy_url: String,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = var("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let listen = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr =
            listen
                .parse()
                .map_err(|source| ConfigError::InvalidListenAddr {
                    value: listen.clone(),
                    source,
                })?;

        let reachable_addr = var("REACHABLE_ADDR").unwrap_or_else(|| listen_addr.to_string());
        let proxy_url = var("PROXY_URL").unwrap_or_else(|| format!("http://{reachable_addr}/"));

        Ok(Config {
            api_key,
            api_base: var("OPENAI_API_BASE"),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            listen_addr,
            reachable_addr,
            proxy_url,
        })
    }
}
