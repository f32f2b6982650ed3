#![allow(non_snake_case)]

use dioxus::prelude::*;

use super::render::render_message;
use super::types::Message;

#[derive(PartialEq, Props)]
pub struct StripeProps {
    message: Message,
}

pub fn MessageStripe(cx: Scope<StripeProps>) -> Element {
    let msg = &cx.props.message;
    let markup = render_message(msg.role, &msg.content, &msg.id);
    let state = msg.state.css_class();
    cx.render(rsx!(
        div {
            class: "stripe {state}",
            dangerous_inner_html: "{markup}",
        }
    ))
}

#[derive(Props)]
pub struct PromptProps<'a> {
    draft: &'a UseRef<String>,
    on_release: EventHandler<'a, KeyboardEvent>,
}

pub fn PromptInput<'a>(cx: Scope<'a, PromptProps<'a>>) -> Element<'a> {
    let draft = cx.props.draft;
    cx.render(rsx!(textarea {
        id: "user-input",
        name: "prompt",
        rows: "1",
        placeholder: "Ask the AI...",
        value: "{draft.read()}",
        oninput: move |e| draft.set(e.value.clone()),
        onkeyup: move |e| cx.props.on_release.call(e),
    }))
}
