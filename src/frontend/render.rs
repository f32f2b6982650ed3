use indoc::formatdoc;

use super::types::{MessageId, Role};
use crate::utils::escape_html;

pub static BOT_AVATAR: &str = "/assets/bot.svg";
pub static USER_AVATAR: &str = "/assets/user.svg";

/// Markup for one chat stripe: the avatar for `role` next to the message text,
/// whose container carries `id`. Pure; `content` is escaped.
pub fn render_message(role: Role, content: &str, id: &MessageId) -> String {
    let (wrapper, avatar, alt) = match role {
        Role::Bot => ("wrapper ai", BOT_AVATAR, "bot"),
        Role::User => ("wrapper", USER_AVATAR, "user"),
    };
    formatdoc!(
        r#"
        <div class="{wrapper}">
          <div class="chat">
            <div class="profile">
              <img src="{avatar}" alt="{alt}" />
            </div>
            <div class="message" id="{id}">{content}</div>
          </div>
        </div>
        "#,
        wrapper = wrapper,
        avatar = avatar,
        alt = alt,
        id = escape_html(id.as_str()),
        content = escape_html(content),
    )
}
