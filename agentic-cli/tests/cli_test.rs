use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs the binary with a cleared environment and its config and data
/// directories inside `home`, so no `AGENTIC_*` setting of the developer's
/// leaks in.
fn run_agentic(home: &Path, args: &[&str]) -> Output {
    run_agentic_with_env(home, args, Vec::new())
}

fn run_agentic_with_env(home: &Path, args: &[&str], env_vars: Vec<(&str, &str)>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agentic"));
    cmd.args(args)
        .current_dir(home)
        .env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1");
    for (key, value) in env_vars {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute agentic command")
}

async fn run_agentic_async(home: &Path, args: Vec<String>) -> Output {
    let home = home.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_agentic(&home, &args)
    })
    .await
    .expect("command task panicked")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn sample_body() -> Value {
    json!({
        "conversation": [
            {"from": "CEO", "to": ["CTO", "CFO"], "response": "Plan the MVP."},
            {"from": "CTO", "to": "CEO", "response": {"steps": 3}},
            {"from": "CFO", "to": "CEO", "response": "Budget approved."}
        ],
        "done": true
    })
}

mod version_command_tests {
    use super::*;

    #[test]
    fn test_version_command_basic() {
        let home = TempDir::new().unwrap();
        let output = run_agentic(home.path(), &["version"]);

        assert!(output.status.success());
        assert_eq!(stdout_of(&output).trim(), "agentic 0.1.0");
    }

    #[test]
    fn test_version_command_detailed() {
        let home = TempDir::new().unwrap();
        let output = run_agentic(home.path(), &["version", "--detailed"]);
        let stdout = stdout_of(&output);

        assert!(output.status.success());
        assert!(stdout.contains("Version:"));
        assert!(stdout.contains("/simulate"));
    }
}

mod config_command_tests {
    use super::*;

    #[test]
    fn test_config_init_refuses_to_overwrite() {
        let home = TempDir::new().unwrap();
        let target = home.path().join("agentic.toml");
        let target_arg = target.to_string_lossy().to_string();

        let first = run_agentic(home.path(), &["config", "init", "--path", &target_arg]);
        assert!(first.status.success(), "stderr: {}", stderr_of(&first));
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("base_url = \"http://127.0.0.1:8000\""));
        assert!(written.contains("rounds = 2"));

        let second = run_agentic(home.path(), &["config", "init", "--path", &target_arg]);
        assert!(!second.status.success());
        assert!(stderr_of(&second).contains("already exists"));

        let forced = run_agentic(
            home.path(),
            &["config", "init", "--path", &target_arg, "--force"],
        );
        assert!(forced.status.success());
    }

    #[test]
    fn test_config_show_reads_working_directory_file() {
        let home = TempDir::new().unwrap();
        std::fs::write(
            home.path().join("agentic.toml"),
            "[simulation]\nrounds = 7\n",
        )
        .unwrap();

        let output = run_agentic(home.path(), &["config", "show"]);
        let stdout = stdout_of(&output);

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        assert!(stdout.contains("rounds = 7"));
        assert!(stdout.contains("[service]"));
    }

    #[test]
    fn test_layered_env_overrides_config() {
        let home = TempDir::new().unwrap();
        let output = run_agentic_with_env(
            home.path(),
            &["config", "show"],
            vec![("AGENTIC_SERVICE__BASE_URL", "http://sim.internal:9000")],
        );

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        assert!(stdout_of(&output).contains("base_url = \"http://sim.internal:9000\""));
    }

    #[test]
    fn test_inherited_layered_env_does_not_reach_binary() {
        std::env::set_var("AGENTIC_SIMULATION__ROUNDS", "9");
        let home = TempDir::new().unwrap();
        let output = run_agentic(home.path(), &["config", "show"]);
        std::env::remove_var("AGENTIC_SIMULATION__ROUNDS");

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        let stdout = stdout_of(&output);
        assert!(stdout.contains("rounds = 2"));
        assert!(stdout.contains("base_url = \"http://127.0.0.1:8000\""));
    }

    #[test]
    fn test_config_path_points_at_app_dir() {
        let home = TempDir::new().unwrap();
        let output = run_agentic(home.path(), &["config", "path"]);

        assert!(output.status.success());
        assert!(stdout_of(&output).contains("agentic-sim"));
    }
}

mod run_command_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_prints_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/simulate"))
            .and(body_json(json!({"prompt": "Ship it", "max_rounds": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let output = run_agentic_async(
            home.path(),
            vec![
                "run".into(),
                "--url".into(),
                server.uri(),
                "--prompt".into(),
                "Ship it".into(),
                "--rounds".into(),
                "3".into(),
            ],
        )
        .await;
        let stdout = stdout_of(&output);

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        assert!(stdout.contains("CEO → CTO, CFO"));
        assert!(stdout.contains("    \"steps\": 3"));
        assert!(stdout.contains("completed: 3 messages"));
        assert!(stdout.contains("(stopped early)"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_json_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let output = run_agentic_async(
            home.path(),
            vec![
                "run".into(),
                "--url".into(),
                server.uri(),
                "--format".into(),
                "json".into(),
            ],
        )
        .await;

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        let value: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
        assert_eq!(value["conversation"], sample_body()["conversation"]);
        assert_eq!(value["done"], json!(true));
        assert_eq!(value["run"]["rounds"], json!(2));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_raises_low_rounds_to_one() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "prompt": "We need to build an AI-powered personal finance assistant.",
                "max_rounds": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let output = run_agentic_async(
            home.path(),
            vec!["run".into(), "--url".into(), server.uri(), "--rounds".into(), "-4".into()],
        )
        .await;

        assert!(output.status.success(), "stderr: {}", stderr_of(&output));
        assert!(stdout_of(&output).contains("No messages yet."));
    }

    #[test]
    fn test_run_rejects_non_numeric_rounds() {
        let home = TempDir::new().unwrap();
        let output = run_agentic(home.path(), &["run", "--rounds", "many"]);

        assert!(!output.status.success());
        assert!(stderr_of(&output).contains("Enter a whole number of rounds"));
    }

    #[test]
    fn test_run_against_unreachable_service_reports_error_message() {
        let home = TempDir::new().unwrap();
        let output = run_agentic(home.path(), &["run", "--url", "http://127.0.0.1:1"]);
        let stdout = stdout_of(&output);

        assert!(!output.status.success());
        assert!(stdout.contains("system → frontend"));
        assert!(stdout.contains("  Error: "));
        assert!(stdout.contains("failed: 1 message"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_http_error_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/simulate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        let output = run_agentic_async(
            home.path(),
            vec!["run".into(), "--url".into(), server.uri()],
        )
        .await;

        assert!(!output.status.success());
        assert!(stdout_of(&output).contains("Error: HTTP 500: boom"));
    }
}
