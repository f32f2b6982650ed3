mod animation;
mod app;
mod client;
mod components;
mod conversation;
mod error;
mod render;
mod server_liveview;
mod types;
mod widget;

pub use animation::{
    loader_frame, show_loading_indicator, type_out_text, LoadingHandle, MessageSlot, TextSlot,
    LOADER_TICK, MAX_DOTS, TYPE_TICK,
};
pub use app::{app, AppProps};
pub use client::{CompletionBackend, ProxyClient};
pub use conversation::{Conversation, Turn};
pub use error::WidgetError;
pub use render::render_message;
pub use server_liveview::router;
pub use types::{Message, MessageId, Outcome, RenderState, Role, Update};
pub use widget::ChatWidget;
