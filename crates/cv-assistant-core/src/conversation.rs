//! Append-only conversation transcript.

use crate::error::ConversationError;
use crate::state::{ChatMessage, ChatRole};

/// Ordered list of exchanged messages. Insertion order is display order.
///
/// The store is always seeded with a greeting from the assistant, so it is
/// never empty. Messages can only be appended.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<ChatMessage>,
    revision: u64,
}

impl ConversationStore {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(greeting)],
            revision: 0,
        }
    }

    /// Append a visitor message. Empty or whitespace-only text is rejected
    /// and leaves the store untouched.
    pub fn append_user(&mut self, text: &str) -> Result<&ChatMessage, ConversationError> {
        if text.trim().is_empty() {
            return Err(ConversationError::EmptyMessage);
        }
        Ok(self.push(ChatMessage::user(text)))
    }

    /// Append an assistant message (an answer or the fallback error text)
    pub fn append_assistant(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::assistant(text))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        self.revision += 1;
        // Just pushed, so the vec is non-empty
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; kept alongside `len` for the usual pairing.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Bumped on every append. Front ends compare it to know when to
    /// re-render and jump to the latest message.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn count_by_role(&self, role: ChatRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
