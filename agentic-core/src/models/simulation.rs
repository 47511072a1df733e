use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::Message;

pub const DEFAULT_PROMPT: &str = "We need to build an AI-powered personal finance assistant.";
pub const DEFAULT_ROUNDS: u32 = 2;
pub const MIN_ROUNDS: u32 = 1;

/// Body of `POST /simulate`. Exactly these two fields go on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub prompt: String,
    pub max_rounds: u32,
}

impl SimulationRequest {
    pub fn new(prompt: impl Into<String>, max_rounds: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_rounds: max_rounds.max(MIN_ROUNDS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub conversation: Option<Vec<Message>>,
    /// Set by the service when an agent signalled completion before the
    /// round limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl SimulationResponse {
    pub fn into_conversation(self) -> Vec<Message> {
        self.conversation.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Failed,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "completed"),
            RunOutcome::Failed => write!(f, "failed"),
        }
    }
}

/// What the last finished run looked like, for status lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub rounds: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: RunOutcome,
    pub message_count: usize,
    pub done: Option<bool>,
}

impl RunSummary {
    pub fn duration_millis(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == RunOutcome::Failed
    }

    /// One-line status text, e.g. `"completed: 9 messages in 4.2s (stopped early)"`.
    pub fn status_line(&self) -> String {
        let secs = self.duration_millis() as f64 / 1000.0;
        let mut line = format!(
            "{}: {} message{} in {:.1}s",
            self.outcome,
            self.message_count,
            if self.message_count == 1 { "" } else { "s" },
            secs
        );
        if self.done == Some(true) {
            line.push_str(" (stopped early)");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = SimulationRequest::new(DEFAULT_PROMPT, 2);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "prompt": "We need to build an AI-powered personal finance assistant.",
                "max_rounds": 2
            })
        );
    }

    #[test]
    fn test_request_clamps_rounds() {
        assert_eq!(SimulationRequest::new("p", 0).max_rounds, 1);
    }

    #[test]
    fn test_response_without_conversation_is_empty() {
        let response: SimulationResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_conversation().is_empty());

        let response: SimulationResponse =
            serde_json::from_value(json!({"conversation": null})).unwrap();
        assert!(response.into_conversation().is_empty());
    }

    #[test]
    fn test_response_done_flag() {
        let response: SimulationResponse = serde_json::from_value(json!({
            "conversation": [{"from": "CEO", "to": "CTO", "response": "DONE"}],
            "done": true
        }))
        .unwrap();
        assert_eq!(response.done, Some(true));
        assert_eq!(response.into_conversation().len(), 1);
    }

    #[test]
    fn test_odd_message_does_not_fail_transcript() {
        let response: SimulationResponse = serde_json::from_str(
            r#"{"conversation":[
                {"from":"CEO","to":null,"response":"x"},
                {"from":"CTO","to":["CFO",3],"response":"y"}
            ]}"#,
        )
        .unwrap();
        let conversation = response.into_conversation();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0].header(), "CEO → ");
        assert_eq!(conversation[1].header(), "CTO → CFO, 3");
    }

    #[test]
    fn test_summary_status_line() {
        let started_at = Utc::now();
        let summary = RunSummary {
            id: Uuid::new_v4(),
            rounds: 2,
            started_at,
            finished_at: started_at + Duration::milliseconds(4200),
            outcome: RunOutcome::Completed,
            message_count: 9,
            done: Some(true),
        };
        assert_eq!(summary.status_line(), "completed: 9 messages in 4.2s (stopped early)");
        assert!(!summary.is_failure());
    }
}
