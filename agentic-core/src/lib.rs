pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod view;

pub use client::{HttpSimulationClient, SimulationService, SIMULATE_PATH};
pub use config::{
    default_config_file, ensure_data_dir, get_config_dir, get_data_dir, AgenticConfig,
    LoggingConfig, ServiceConfig, SimulationDefaults, TuiConfig,
};
pub use error::{AgenticError, AgenticResult};
pub use models::{
    Message, Recipient, Response, RunOutcome, RunSummary, SimulationRequest, SimulationResponse,
    DEFAULT_PROMPT, DEFAULT_ROUNDS, MIN_ROUNDS,
};
pub use view::{
    RunTicket, SimulationView, ViewState, EMPTY_TRANSCRIPT, READY_LABEL, RUNNING_LABEL,
};
