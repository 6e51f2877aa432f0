use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::ASSISTANT_NAME;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire role string, shared between the persisted history and Gemini API
    /// requests.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::User => return "user",
            Role::Model => return "model",
        }
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::User => return Config::get(ConfigKey::Username),
            Role::Model => return ASSISTANT_NAME.to_string(),
        }
    }
}
