/*!
 * Rolling conversation window.
 *
 * The window carries the few-shot pair followed by prior exchanges. It never
 * stores the system message; that is prepended when a request is built.
 */

use crate::providers::{ChatMessage, Role};
use crate::translation::prompts::FewShotPair;

/// Bounded, ordered list of chat turns carried between requests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationWindow {
    messages: Vec<ChatMessage>,
}

impl ConversationWindow {
    /// Window holding only the few-shot example exchange
    pub fn seeded(sample: &FewShotPair) -> Self {
        Self {
            messages: vec![
                ChatMessage::user(sample.user.clone()),
                ChatMessage::assistant(sample.assistant.clone()),
            ],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn pop(&mut self) -> Option<ChatMessage> {
        self.messages.pop()
    }

    /// Drop the oldest messages until at most `max` remain, returning them
    pub fn trim_to(&mut self, max: usize) -> Vec<ChatMessage> {
        if self.messages.len() <= max {
            return Vec::new();
        }
        let excess = self.messages.len() - max;
        self.messages.drain(..excess).collect()
    }

    /// Put messages evicted by [`trim_to`](Self::trim_to) back in front
    pub fn restore_front(&mut self, evicted: Vec<ChatMessage>) {
        if !evicted.is_empty() {
            self.messages.splice(0..0, evicted);
        }
    }

    /// System message followed by every window message
    pub fn with_system(&self, system: ChatMessage) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.push(system);
        messages.extend(self.messages.iter().cloned());
        messages
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
