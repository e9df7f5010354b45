// ABOUTME: External verification of a deployed site.
// ABOUTME: Spawns the configured test command against the resolved entry URL.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Placeholder replaced with the entry URL in verifier arguments.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Runs external verification against an entry URL.
#[async_trait]
pub trait VerifierOps: Send + Sync {
    /// Run the verifier once. Pass/fail is reported via the returned
    /// report; `Err` means the verifier could not be run at all.
    async fn verify(&self, entry_url: &str) -> Result<VerifierReport, VerifyError>;
}

/// Result of running the verifier process.
#[derive(Debug)]
pub struct VerifierReport {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Errors launching the verifier.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("verifier command is empty")]
    EmptyCommand,

    #[error("failed to launch verifier: {0}")]
    Spawn(String),
}

/// Verifier that invokes an external test process, e.g.
/// `go test -v ./infrastructure/site_test.go -domain={url}`.
pub struct ProcessVerifier {
    command: Vec<String>,
}

impl ProcessVerifier {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Build the argv for a run: every `{url}` occurrence is replaced
    /// with the entry URL; if no argument contains the placeholder, the
    /// URL is appended as the final argument.
    fn argv_for(&self, entry_url: &str) -> Vec<String> {
        let mut argv: Vec<String> = self
            .command
            .iter()
            .map(|arg| arg.replace(URL_PLACEHOLDER, entry_url))
            .collect();

        if !self.command.iter().any(|arg| arg.contains(URL_PLACEHOLDER)) {
            argv.push(entry_url.to_string());
        }

        argv
    }
}

#[async_trait]
impl VerifierOps for ProcessVerifier {
    async fn verify(&self, entry_url: &str) -> Result<VerifierReport, VerifyError> {
        if self.command.is_empty() {
            return Err(VerifyError::EmptyCommand);
        }

        let argv = self.argv_for(entry_url);
        let (program, args) = argv.split_first().expect("argv is non-empty");

        tracing::info!(command = %argv.join(" "), "running verifier");

        let output = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| VerifyError::Spawn(e.to_string()))?;

        let report = VerifierReport {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if report.success {
            tracing::info!("verifier passed");
        } else {
            tracing::warn!(exit_code = ?report.exit_code, "verifier failed");
        }

        Ok(report)
    }
}
