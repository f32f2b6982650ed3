use std::sync::Arc;

use dioxus::html::input_data::keyboard_types::{Key, Modifiers};
use dioxus::prelude::*;
use tokio::sync::mpsc;
use tracing::debug;

use super::client::CompletionBackend;
use super::components::*;
use super::conversation::Conversation;
use super::types::Update;
use super::widget::ChatWidget;

pub struct AppProps {
    pub backend: Arc<dyn CompletionBackend>,
}

pub fn app(cx: Scope<AppProps>) -> Element {
    let (tx, rx) = mpsc::unbounded_channel::<Update>();

    let widget = use_ref(cx, || ChatWidget::new(cx.props.backend.clone(), tx));
    let conversation = use_ref(cx, Conversation::new);
    let draft = use_ref(cx, String::new);

    use_future(cx, (), move |_| {
        let mut rx = rx;
        to_owned![conversation];
        async move {
            while let Some(update) = rx.recv().await {
                if conversation.write_silent().apply(update) {
                    conversation.needs_update();
                }
            }
        }
    });

    let submit = move |_| {
        let prompt = draft.read().clone();
        let task = widget
            .read()
            .submit_prompt(&mut conversation.write(), &prompt);
        match task {
            Ok(task) => {
                draft.set(String::new());
                cx.spawn(task);
            }
            Err(err) => debug!(error = %err, "prompt not submitted"),
        }
    };

    let submit_enter = move |e: Event<KeyboardData>| {
        if e.data.key() == Key::Enter && !e.data.modifiers().contains(Modifiers::SHIFT) {
            submit(());
        }
    };

    cx.render(rsx!(
        style { include_str!("./style.css") }
        div {
            id: "header",
            h1 {"Ask the AI"}
            h2 {"Powered by OpenAI"}
        }
        div {
            id: "chat_container",
            class: "chat-window",
            div {
                class: "chat-log",
                for msg in conversation.read().messages() {
                    MessageStripe {
                        key: "{msg.id}",
                        message: msg.clone(),
                    }
                }
            }
        }
        form {
            id: "prompt-form",
            prevent_default: "onsubmit",
            onsubmit: move |_| submit(()),
            PromptInput {
                draft: draft,
                on_release: submit_enter,
            }
            button {
                id: "send-button",
                r#type: "submit",
                "Send"
            }
        }
    ))
}
