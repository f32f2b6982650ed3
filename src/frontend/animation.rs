use std::future::Future;
use std::sync::{Arc, Mutex};

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval_at, Duration, Instant};

use super::types::{MessageId, Update};

pub const LOADER_TICK: Duration = Duration::from_millis(300);
pub const TYPE_TICK: Duration = Duration::from_millis(20);
pub const MAX_DOTS: usize = 4;

/// Somewhere text can be drawn into.
pub trait TextSlot: Send + Sync + 'static {
    fn set_text(&self, text: String);
    fn push_char(&self, ch: char);
}

impl TextSlot for Arc<Mutex<String>> {
    fn set_text(&self, text: String) {
        if let Ok(mut slot) = self.lock() {
            *slot = text;
        }
    }

    fn push_char(&self, ch: char) {
        if let Ok(mut slot) = self.lock() {
            slot.push(ch);
        }
    }
}

/// Draws into one message of the conversation view by sending it updates.
#[derive(Clone)]
pub struct MessageSlot {
    tx: UnboundedSender<Update>,
    id: MessageId,
}

impl MessageSlot {
    pub fn new(tx: UnboundedSender<Update>, id: MessageId) -> MessageSlot {
        MessageSlot { tx, id }
    }
}

impl TextSlot for MessageSlot {
    fn set_text(&self, text: String) {
        // A closed channel means the view is gone.
        _ = self.tx.send(Update::Frame {
            id: self.id.clone(),
            text,
        });
    }

    fn push_char(&self, ch: char) {
        _ = self.tx.send(Update::Reveal {
            id: self.id.clone(),
            ch,
        });
    }
}

/// Frame `step` of the loading cycle: zero to four dots, then back to none.
pub fn loader_frame(step: usize) -> String {
    ".".repeat(step % (MAX_DOTS + 1))
}

/// Owned by the message being loaded. Stopping or dropping it ends the
/// animation.
#[derive(Debug)]
pub struct LoadingHandle {
    abort: AbortHandle,
}

impl LoadingHandle {
    pub fn stop(self) {
        self.abort.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for LoadingHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Clears `slot` and then redraws it with the next loader frame every tick.
/// The returned future runs until its handle is stopped; the caller spawns it.
pub fn show_loading_indicator<S: TextSlot>(
    slot: S,
) -> (impl Future<Output = ()> + Send + 'static, LoadingHandle) {
    let (abort, registration) = AbortHandle::new_pair();
    let ticker = async move {
        slot.set_text(loader_frame(0));
        let mut ticks = interval_at(Instant::now() + LOADER_TICK, LOADER_TICK);
        let mut step = 0;
        loop {
            ticks.tick().await;
            step = (step + 1) % (MAX_DOTS + 1);
            slot.set_text(loader_frame(step));
        }
    };
    let task = async move {
        _ = Abortable::new(ticker, registration).await;
    };
    (task, LoadingHandle { abort })
}

/// Reveals `text` into `slot` one character per tick.
pub async fn type_out_text<S: TextSlot>(slot: &S, text: &str) {
    let mut ticks = interval_at(Instant::now() + TYPE_TICK, TYPE_TICK);
    for ch in text.chars() {
        ticks.tick().await;
        slot.push_char(ch);
    }
}
