pub mod config;
pub mod run;

pub use config::{handle_config_command, ConfigCommand};
pub use run::{handle_run_command, OutputFormat, RunArgs};
