use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::frontend::{self, CompletionBackend, ProxyClient};
use crate::proxy::{self, Completer, OpenAiCompleter};

/// Serves the completion proxy and the chat widget on one listener.
pub async fn start_server(config: Config) -> Result<()> {
    let completer: Arc<dyn Completer> = Arc::new(OpenAiCompleter::new(&config));
    let backend: Arc<dyn CompletionBackend> = Arc::new(ProxyClient::new(&config.proxy_url));

    let app = proxy::router(completer).merge(frontend::router(&config.reachable_addr, backend));

    let server = axum::Server::try_bind(&config.listen_addr)
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    info!("Server is running on http://{}", config.listen_addr);
    info!("Chat is served at http://{}/chat", config.reachable_addr);

    server.serve(app.into_make_service()).await?;
    Ok(())
}
