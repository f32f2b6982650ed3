use std::sync::Arc;

use axum::{
    extract::ws::WebSocketUpgrade,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use indoc::formatdoc;
use tracing::{debug, warn};

use super::app::{app, AppProps};
use super::client::CompletionBackend;

static BOT_SVG: &str = include_str!("./assets/bot.svg");
static USER_SVG: &str = include_str!("./assets/user.svg");

fn page(reachable_addr: &str) -> String {
    formatdoc!(
        r#"
        <!DOCTYPE html>
        <html>
            <head>
                <title>Ask the AI</title>
                <meta name="viewport"
                content="width=device-width,
                initial-scale=1,
                minimum-scale=1,
                maximum-scale=1,
                user-scalable=no">
            </head>
            <body> <div id="main"></div> </body>
            {glue}
        </html>
        "#,
        glue = dioxus_liveview::interpreter_glue(&format!("ws://{reachable_addr}/ws"))
    )
}

fn svg(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], body)
}

/// The chat page, its websocket and its avatars.
pub fn router(reachable_addr: &str, backend: Arc<dyn CompletionBackend>) -> Router {
    let view = dioxus_liveview::LiveViewPool::new();
    let html = page(reachable_addr);

    Router::new()
        .route("/chat", get(move || async move { Html(html) }))
        .route(
            "/ws",
            get(move |ws: WebSocketUpgrade| async move {
                ws.on_upgrade(move |socket| async move {
                    debug!("chat session opened");
                    let props = AppProps { backend };
                    let session = view
                        .launch_with_props(dioxus_liveview::axum_socket(socket), app, props)
                        .await;
                    if let Err(err) = session {
                        warn!(error = ?err, "chat session ended with an error");
                    }
                })
            }),
        )
        .route("/assets/bot.svg", get(|| async { svg(BOT_SVG) }))
        .route("/assets/user.svg", get(|| async { svg(USER_SVG) }))
}
