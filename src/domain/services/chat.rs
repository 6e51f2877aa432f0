#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::Conversation;
use super::HistoryStore;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::infrastructure::gemini::Gemini;

/// Owns the conversation, the remote session, and the history slot, and
/// drives all three from presentation-layer actions. Runs as a single task:
/// the action loop suspends inside a streaming reply, which serializes
/// submissions and keeps one request outstanding at most.
pub struct ChatService {
    conversation: Conversation,
    session: Gemini,
    store: HistoryStore,
    tx: mpsc::UnboundedSender<Event>,
}

impl ChatService {
    /// Restores the persisted conversation when there is one, rebuilding the
    /// remote session from its completed turns, and starts fresh with the
    /// welcome message otherwise.
    pub async fn init(
        store: HistoryStore,
        tx: mpsc::UnboundedSender<Event>,
    ) -> Result<ChatService> {
        let mut conversation = Conversation::default();

        let session = match store.load().await {
            Some(messages) => {
                conversation.restore(messages);
                // Replay is read before normalize: an unfinished reply from a
                // crashed run stays visible but is not part of the session
                // context.
                let session = Gemini::create(&conversation.replay_turns())?;
                conversation.normalize();
                session
            }
            None => {
                conversation.reset_with_welcome();
                Gemini::create(&[])?
            }
        };

        let service = ChatService {
            conversation,
            session,
            store,
            tx,
        };
        service.publish()?;
        service.persist().await?;

        return Ok(service);
    }

    pub async fn start(&mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                return Ok(());
            }

            match action.unwrap() {
                Action::SubmitPrompt(text) => {
                    self.submit(&text).await?;
                }
                Action::ResetConversation() => {
                    self.reset().await?;
                }
            }
        }
    }

    async fn submit(&mut self, text: &str) -> Result<()> {
        let prompt = text.trim();
        if !self.conversation.can_submit(prompt) {
            return Ok(());
        }

        let pending_id = self.conversation.begin_exchange(prompt);
        self.publish()?;
        self.persist().await?;

        let mut reply = self.session.send_turn(prompt).await;
        while let Some(fragment) = reply.next().await {
            self.conversation.append_fragment(&pending_id, &fragment);
            self.publish()?;
            self.persist().await?;
        }

        // Reached on success and on the apology path alike, so the pending
        // message can never stay streaming forever.
        self.session.finish_turn(&reply);
        self.conversation.finalize(&pending_id);
        self.publish()?;
        self.persist().await?;

        return Ok(());
    }

    /// The presentation layer has already confirmed: wipe the slot, drop the
    /// session context, and restart from the welcome message.
    async fn reset(&mut self) -> Result<()> {
        self.store.clear().await?;
        self.session.reset();
        self.conversation.reset_with_welcome();

        self.publish()?;
        self.persist().await?;

        return Ok(());
    }

    fn publish(&self) -> Result<()> {
        self.tx
            .send(Event::ConversationUpdated(self.conversation.snapshot()))?;
        return Ok(());
    }

    async fn persist(&self) -> Result<()> {
        return self.store.save(self.conversation.messages()).await;
    }
}
