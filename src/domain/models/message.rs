#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Role;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub is_streaming: bool,
}

impl Message {
    pub fn new(role: Role, text: &str) -> Message {
        return Message {
            id: Message::create_id(),
            role,
            text: text.to_string(),
            timestamp: Local::now(),
            is_streaming: false,
        };
    }

    /// An empty placeholder for a model reply that is still streaming in.
    pub fn new_streaming(role: Role) -> Message {
        let mut message = Message::new(role, "");
        message.is_streaming = true;
        return message;
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");
    }

    pub fn append(&mut self, text: &str) {
        self.text += text;
    }

    pub fn finalize(&mut self) {
        self.is_streaming = false;
    }

    /// Completed turns only. Streaming leftovers and empty placeholders do
    /// not represent finished exchanges and never count as replay history.
    pub fn is_replayable(&self) -> bool {
        return !self.is_streaming && !self.text.trim().is_empty();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word.len() + 1;
                } else {
                    current_lines.push(word);
                    char_count += word.len() + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
