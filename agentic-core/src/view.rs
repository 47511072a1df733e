//! The simulation view: every piece of interface state plus the single
//! request lifecycle.
//!
//! [`ViewState`] is the plain state container with one transition per user
//! action. [`SimulationView`] shares it behind an async lock so a front-end
//! can keep drawing while a run is in flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::SimulationService;
use crate::config::SimulationDefaults;
use crate::error::{AgenticError, AgenticResult};
use crate::models::{
    Message, RunOutcome, RunSummary, SimulationRequest, SimulationResponse, DEFAULT_PROMPT,
    DEFAULT_ROUNDS, MIN_ROUNDS,
};

pub const READY_LABEL: &str = "Start Simulation";
pub const RUNNING_LABEL: &str = "Running…";
pub const EMPTY_TRANSCRIPT: &str = "No messages yet.";

/// Proof that the in-flight flag is held. Only [`ViewState::begin_run`]
/// hands these out and only [`ViewState::finish_run`] takes them back.
#[must_use = "a RunTicket must be passed to finish_run or the view stays loading"]
#[derive(Debug)]
pub struct RunTicket {
    id: Uuid,
    request: SimulationRequest,
    started_at: DateTime<Utc>,
}

impl RunTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    prompt: String,
    rounds: u32,
    loading: bool,
    conversation: Vec<Message>,
    last_run: Option<RunSummary>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_PROMPT, DEFAULT_ROUNDS)
    }

    pub fn with_defaults(prompt: impl Into<String>, rounds: u32) -> Self {
        Self {
            prompt: prompt.into(),
            rounds: rounds.max(MIN_ROUNDS),
            loading: false,
            conversation: Vec::new(),
            last_run: None,
        }
    }

    pub fn from_config(defaults: &SimulationDefaults) -> Self {
        Self::with_defaults(defaults.prompt.clone(), defaults.rounds)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    pub fn can_run(&self) -> bool {
        !self.loading
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.loading {
            RUNNING_LABEL
        } else {
            READY_LABEL
        }
    }

    /// Stores the raw editor contents as-is.
    pub fn edit_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    /// Parses a round count typed by the user. Values below the minimum are
    /// raised to it; anything that is not a whole number is rejected and the
    /// previous value kept.
    pub fn edit_rounds(&mut self, raw: &str) -> AgenticResult<u32> {
        let parsed: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AgenticError::InvalidRounds(raw.to_string()))?;
        let rounds = u32::try_from(parsed.max(MIN_ROUNDS as i64))
            .map_err(|_| AgenticError::InvalidRounds(raw.to_string()))?;
        self.rounds = rounds;
        Ok(rounds)
    }

    pub fn set_rounds(&mut self, rounds: u32) {
        self.rounds = rounds.max(MIN_ROUNDS);
    }

    /// Marks the view as running and drops the previous transcript.
    pub fn begin_run(&mut self) -> AgenticResult<RunTicket> {
        if self.loading {
            return Err(AgenticError::RunInProgress);
        }

        self.loading = true;
        self.conversation.clear();

        Ok(RunTicket {
            id: Uuid::new_v4(),
            request: SimulationRequest::new(self.prompt.clone(), self.rounds),
            started_at: Utc::now(),
        })
    }

    /// Applies the outcome of a run in one step and releases the in-flight
    /// flag. A failure becomes a single synthetic system message.
    pub fn finish_run(
        &mut self,
        ticket: RunTicket,
        result: AgenticResult<SimulationResponse>,
    ) -> &RunSummary {
        let (outcome, done) = match result {
            Ok(response) => {
                let done = response.done;
                self.conversation = response.into_conversation();
                (RunOutcome::Completed, done)
            }
            Err(err) => {
                self.conversation = vec![Message::system_error(&err.description())];
                (RunOutcome::Failed, None)
            }
        };
        self.loading = false;

        self.last_run.insert(RunSummary {
            id: ticket.id,
            rounds: ticket.request.max_rounds,
            started_at: ticket.started_at,
            finished_at: Utc::now(),
            outcome,
            message_count: self.conversation.len(),
            done,
        })
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives runs against a [`SimulationService`] while sharing [`ViewState`]
/// with whoever renders it.
pub struct SimulationView {
    state: Arc<RwLock<ViewState>>,
    service: Arc<dyn SimulationService>,
}

impl SimulationView {
    pub fn new(service: Arc<dyn SimulationService>) -> Self {
        Self::with_state(service, ViewState::new())
    }

    pub fn with_state(service: Arc<dyn SimulationService>, state: ViewState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            service,
        }
    }

    pub fn state(&self) -> Arc<RwLock<ViewState>> {
        Arc::clone(&self.state)
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub fn endpoint(&self) -> String {
        self.service.endpoint()
    }

    pub async fn edit_prompt(&self, text: impl Into<String>) {
        self.state.write().await.edit_prompt(text);
    }

    pub async fn edit_rounds(&self, raw: &str) -> AgenticResult<u32> {
        self.state.write().await.edit_rounds(raw)
    }

    /// Runs one simulation round trip. The only error is
    /// [`AgenticError::RunInProgress`]; request failures land in the
    /// transcript instead.
    pub async fn run(&self) -> AgenticResult<RunSummary> {
        let ticket = self.state.write().await.begin_run()?;
        info!(
            run_id = %ticket.id(),
            rounds = ticket.request().max_rounds,
            "Simulation run started"
        );

        // The call runs in its own task so a panicking service still
        // releases the in-flight flag below.
        let service = Arc::clone(&self.service);
        let request = ticket.request().clone();
        let result = match tokio::spawn(async move { service.simulate(&request).await }).await {
            Ok(result) => result,
            Err(join_err) => Err(AgenticError::Internal(format!(
                "simulation task aborted: {}",
                join_err
            ))),
        };

        if let Err(ref err) = result {
            warn!(run_id = %ticket.id(), code = err.error_code(), "Simulation run failed: {}", err);
        }

        let mut state = self.state.write().await;
        let summary = state.finish_run(ticket, result).clone();
        info!(
            run_id = %summary.id,
            outcome = %summary.outcome,
            messages = summary.message_count,
            elapsed_ms = summary.duration_millis(),
            "Simulation run finished"
        );
        Ok(summary)
    }

    /// Starts [`run`](Self::run) in the background.
    pub fn spawn_run(self: &Arc<Self>) -> JoinHandle<AgenticResult<RunSummary>> {
        let view = Arc::clone(self);
        tokio::spawn(async move { view.run().await })
    }
}
