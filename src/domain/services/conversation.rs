#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::configuration::WELCOME_MESSAGE;
use crate::domain::models::ConversationSnapshot;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Turn;

/// The ordered message history and the streaming-update protocol on top of
/// it. All transitions happen here; IO and the remote session live in the
/// chat service.
#[derive(Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn is_typing(&self) -> bool {
        // At most one message is ever streaming, and it is always the last
        // one appended.
        return self
            .messages
            .last()
            .map_or(false, |message| return message.is_streaming);
    }

    /// Submissions are rejected for blank input and while a reply is still
    /// streaming, keeping a single request outstanding.
    pub fn can_submit(&self, text: &str) -> bool {
        return !text.trim().is_empty() && !self.is_typing();
    }

    /// Appends the user's turn and an empty streaming placeholder for the
    /// model reply. Returns the placeholder id fragments get routed to.
    pub fn begin_exchange(&mut self, user_text: &str) -> String {
        self.messages.push(Message::new(Role::User, user_text));

        let pending = Message::new_streaming(Role::Model);
        let pending_id = pending.id.clone();
        self.messages.push(pending);

        return pending_id;
    }

    /// Routes one streamed fragment to the pending message. A miss on the id
    /// is a no-op, so late fragments for a superseded reply land nowhere.
    pub fn append_fragment(&mut self, id: &str, text: &str) {
        if let Some(message) = self.messages.iter_mut().find(|e| return e.id == id) {
            if message.is_streaming {
                message.append(text);
            }
        }
    }

    pub fn finalize(&mut self, id: &str) {
        if let Some(message) = self.messages.iter_mut().find(|e| return e.id == id) {
            message.finalize();
        }
    }

    pub fn restore(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Completed turns in insertion order. Must be read before `normalize`
    /// when restoring, so that a streaming leftover from a crashed run stays
    /// out of the replay history while remaining visible in the transcript.
    pub fn replay_turns(&self) -> Vec<Turn> {
        return self
            .messages
            .iter()
            .filter(|e| return e.is_replayable())
            .map(|e| return Turn::new(e.role, &e.text))
            .collect();
    }

    /// Clears any leftover streaming flag after a restore. Nothing resumes a
    /// reply from a previous run, and a permanently streaming message would
    /// wedge the submission guard.
    pub fn normalize(&mut self) {
        for message in self.messages.iter_mut() {
            message.finalize();
        }
    }

    pub fn reset_with_welcome(&mut self) {
        self.messages.clear();
        self.messages.push(Message::new(Role::Model, WELCOME_MESSAGE));
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        return ConversationSnapshot {
            messages: self.messages.clone(),
            is_typing: self.is_typing(),
        };
    }
}
