#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::pin::Pin;

use anyhow::bail;
use anyhow::Result;
use bytes::Bytes;
use futures::stream::Stream;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::io::Lines;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::ERROR_REPLY;
use crate::configuration::SYSTEM_INSTRUCTION;
use crate::domain::models::Role;
use crate::domain::models::Turn;

const TEMPERATURE: f32 = 0.7;

type ReplyBytes = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;
type ReplyLines = Lines<StreamReader<ReplyBytes, Bytes>>;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentPart>,
}

impl Content {
    fn text(role: &str, text: &str) -> Content {
        return Content {
            role: role.to_string(),
            parts: vec![ContentPart {
                text: text.to_string(),
            }],
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionCandidate {
    content: Option<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    candidates: Vec<CompletionCandidate>,
}

fn parse_delta(line: &str) -> Option<String> {
    let mut cleaned_line = line.trim().to_string();
    if !cleaned_line.starts_with("data:") {
        return None;
    }
    cleaned_line = cleaned_line.split_off(5).trim().to_string();
    if cleaned_line.is_empty() || cleaned_line == "[DONE]" {
        return None;
    }

    let res: CompletionResponse = match serde_json::from_str(&cleaned_line) {
        Ok(res) => res,
        Err(err) => {
            tracing::debug!(error = ?err, "Skipping unparseable stream line");
            return None;
        }
    };

    let text = res
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .map(|part| return part.text.as_str())
        .collect::<String>();

    if text.is_empty() {
        return None;
    }

    return Some(text);
}

/// Fragment sequence for one model reply, consumed in arrival order. The
/// sequence always terminates: a transport failure surfaces as a single
/// apologetic fragment followed by the end of the stream, never as an error
/// the caller has to recover from.
pub struct ReplyStream {
    lines: Option<ReplyLines>,
    reply: String,
    failed: bool,
    done: bool,
}

impl ReplyStream {
    fn streaming(lines: ReplyLines) -> ReplyStream {
        return ReplyStream {
            lines: Some(lines),
            reply: String::new(),
            failed: false,
            done: false,
        };
    }

    fn apology_only() -> ReplyStream {
        return ReplyStream {
            lines: None,
            reply: String::new(),
            failed: false,
            done: false,
        };
    }

    pub async fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let lines = match self.lines.as_mut() {
            Some(lines) => lines,
            None => return Some(self.fail()),
        };

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(fragment) = parse_delta(&line) {
                        self.reply += &fragment;
                        return Some(fragment);
                    }
                }
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Gemini stream was interrupted");
                    return Some(self.fail());
                }
            }
        }
    }

    fn fail(&mut self) -> String {
        self.done = true;
        self.failed = true;
        return ERROR_REPLY.to_string();
    }

    pub fn failed(&self) -> bool {
        return self.failed;
    }

    /// The clean reply accumulated so far, apology fragment excluded.
    pub fn reply(&self) -> &str {
        return &self.reply;
    }
}

/// A chat session against the Gemini API. Owns the turn history it replays
/// on every request; there is exactly one of these alive at a time, held by
/// the chat service.
pub struct Gemini {
    url: String,
    token: String,
    model: String,
    contents: Vec<Content>,
}

impl Gemini {
    /// Builds a session primed with the given replay history. A missing API
    /// token is a startup precondition failure, not something to recover
    /// from at runtime.
    pub fn create(replay: &[Turn]) -> Result<Gemini> {
        let token = Config::get(ConfigKey::GeminiToken);
        if token.is_empty() {
            bail!("Gemini API token is not set. Export GEMINI_API_KEY or set gemini-token in the config file.");
        }

        let mut session = Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token,
            model: Config::get(ConfigKey::Model),
            contents: vec![],
        };
        session.prime(replay);

        return Ok(session);
    }

    fn prime(&mut self, replay: &[Turn]) {
        for turn in replay {
            self.contents
                .push(Content::text(turn.role.as_wire(), &turn.text));
        }
    }

    /// Drops all accumulated turns. The next exchange starts a fresh
    /// conversation with the model.
    pub fn reset(&mut self) {
        self.contents.clear();
    }

    /// Sends one user turn and returns the streaming reply. Request failures
    /// are converted locally into the apologetic fragment; the caller always
    /// gets a stream that completes.
    pub async fn send_turn(&mut self, text: &str) -> ReplyStream {
        self.contents
            .push(Content::text(Role::User.as_wire(), text));

        let req = CompletionRequest {
            contents: self.contents.clone(),
            system_instruction: Content::text(Role::User.as_wire(), SYSTEM_INSTRUCTION),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:streamGenerateContent?alt=sse&key={key}",
                url = self.url,
                model = self.model,
                key = self.token,
            ))
            .json(&req)
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Gemini is not reachable");
                return ReplyStream::apology_only();
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Gemini"
            );
            return ReplyStream::apology_only();
        }

        let stream: ReplyBytes = Box::pin(res.bytes_stream().map_err(convert_err));

        return ReplyStream::streaming(StreamReader::new(stream).lines());
    }

    /// Closes the turn. A clean reply joins the session history; a failed
    /// exchange is dropped from it entirely, so the apology text is never
    /// replayed to the model as its own words.
    pub fn finish_turn(&mut self, reply: &ReplyStream) {
        if reply.failed() || reply.reply().is_empty() {
            self.contents.pop();
            return;
        }

        self.contents
            .push(Content::text(Role::Model.as_wire(), reply.reply()));
    }
}

#[cfg(test)]
impl Gemini {
    pub fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            model: "model-1".to_string(),
            contents: vec![],
        };
    }

    pub fn history_len(&self) -> usize {
        return self.contents.len();
    }
}
