use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const SYSTEM_SENDER: &str = "system";
pub const FRONTEND_RECIPIENT: &str = "frontend";

/// Who a message was addressed to. The service sends either a bare actor id
/// or a list of them. Anything else is kept as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Recipient {
    Single(String),
    Multiple(Vec<String>),
}

impl Recipient {
    pub fn display(&self) -> String {
        match self {
            Recipient::Single(name) => name.clone(),
            Recipient::Multiple(names) => names.join(", "),
        }
    }
}

impl<'de> Deserialize<'de> for Recipient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Recipient::Multiple(items.iter().map(value_text).collect()),
            other => Recipient::Single(value_text(&other)),
        })
    }
}

/// `null` is empty, strings are verbatim, everything else is compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value_text(&value))
}

impl Default for Recipient {
    fn default() -> Self {
        Recipient::Single(String::new())
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// An agent's reply: plain text, or whatever structured value the agent
/// produced (decisions, task lists, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Text(String),
    Structured(serde_json::Value),
}

impl Response {
    /// Text is shown verbatim; anything else is pretty-printed JSON with
    /// two-space indentation.
    pub fn display(&self) -> String {
        match self {
            Response::Text(text) => text.clone(),
            Response::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Response::Structured(serde_json::Value::Null)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// One transcript entry. Unknown fields from the service are dropped and
/// odd `from`/`to` values never fail the whole transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: String,
    #[serde(default)]
    pub to: Recipient,
    #[serde(default)]
    pub response: Response,
}

impl Message {
    pub fn new(from: impl Into<String>, to: Recipient, response: Response) -> Self {
        Self {
            from: from.into(),
            to,
            response,
        }
    }

    /// The locally fabricated entry that stands in for a failed run.
    pub fn system_error(description: &str) -> Self {
        Self {
            from: SYSTEM_SENDER.to_string(),
            to: Recipient::Single(FRONTEND_RECIPIENT.to_string()),
            response: Response::Text(format!("Error: {}", description)),
        }
    }

    pub fn is_system(&self) -> bool {
        self.from == SYSTEM_SENDER
    }

    /// `"CEO → CTO, Designer"`
    pub fn header(&self) -> String {
        format!("{} → {}", self.from, self.to.display())
    }

    pub fn body(&self) -> String {
        self.response.display()
    }
}
