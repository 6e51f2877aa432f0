use super::Message;

/// Immutable view of the conversation handed to the presentation layer. The
/// UI renders from the latest snapshot and never mutates state through it.
#[derive(Clone, Default)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub is_typing: bool,
}
