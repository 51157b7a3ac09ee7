//! Announcement mailbox for the speech collaborator.
//!
//! Speech is fire-and-forget with a depth-1 channel: issuing a new
//! announcement replaces any in-flight one, matching a TTS backend that
//! cancels the current utterance before speaking. The engine fills the
//! slot; the frontend drains it with [`VoiceBox::take`]. If nothing drains
//! it (headless, no speech backend) the mailbox degrades silently.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceBox {
    slot: Option<String>,
}

impl VoiceBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an announcement, preempting any undelivered one.
    pub fn say(&mut self, text: impl Into<String>) {
        self.slot = Some(text.into());
    }

    /// Take the pending announcement for delivery.
    pub fn take(&mut self) -> Option<String> {
        self.slot.take()
    }

    /// Look at the pending announcement without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Drop any pending announcement.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}
