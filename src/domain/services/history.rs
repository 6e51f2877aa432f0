#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Message;

const HISTORY_FILE: &str = "history.json";

/// One durable slot holding the whole conversation as a JSON snapshot.
/// Writes happen at typing cadence on a small message list, so every save is
/// a full overwrite rather than an incremental update.
pub struct HistoryStore {
    pub data_dir: path::PathBuf,
}

impl Default for HistoryStore {
    fn default() -> HistoryStore {
        return HistoryStore::new(path::PathBuf::from(Config::get(ConfigKey::HistoryDir)));
    }
}

impl HistoryStore {
    pub fn new(data_dir: path::PathBuf) -> HistoryStore {
        return HistoryStore { data_dir };
    }

    pub fn file_path(&self) -> path::PathBuf {
        return self.data_dir.join(HISTORY_FILE);
    }

    /// Reads the stored conversation back, timestamps included. Unreadable or
    /// corrupt history is treated as no history at all, never as an error the
    /// caller has to deal with.
    pub async fn load(&self) -> Option<Vec<Message>> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return None;
        }

        let payload = match fs::read_to_string(&file_path).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read history, starting fresh");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Message>>(&payload) {
            Ok(messages) => return Some(messages),
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to parse history, starting fresh");
                return None;
            }
        }
    }

    /// Full-snapshot overwrite. Saving an empty conversation is skipped so a
    /// mid-reset state never clobbers the slot.
    pub async fn save(&self, messages: &[Message]) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }

        let payload = serde_json::to_string(messages)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let mut file = fs::File::create(self.file_path()).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
