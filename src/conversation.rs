// src/conversation.rs

use crate::models::{Message, Sender};
use std::sync::{Mutex, MutexGuard};

/// Somewhere rendered messages go.
pub trait MessageSink: Send + Sync {
    fn append(&self, text: &str, sender: Sender);
}

/// Append-only, ordered chat history shared between the input loop and the
/// tasks that settle commands.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        // A poisoned log still holds valid, append-only data.
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// Walks the log newest first until `visit` returns `false`.
    pub fn visit_recent<F>(&self, mut visit: F)
    where
        F: FnMut(&Message) -> bool,
    {
        for message in self.lock().iter().rev() {
            if !visit(message) {
                break;
            }
        }
    }

    /// Messages appended at or after `from`, for front-ends that print
    /// incrementally.
    pub fn since(&self, from: usize) -> Vec<Message> {
        self.lock().iter().skip(from).cloned().collect()
    }
}

impl MessageSink for MessageLog {
    fn append(&self, text: &str, sender: Sender) {
        self.lock().push(Message::new(text, sender));
    }
}
