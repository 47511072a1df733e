mod message;
mod simulation;

pub use message::{Message, Recipient, Response, FRONTEND_RECIPIENT, SYSTEM_SENDER};
pub use simulation::{
    RunOutcome, RunSummary, SimulationRequest, SimulationResponse, DEFAULT_PROMPT, DEFAULT_ROUNDS,
    MIN_ROUNDS,
};
