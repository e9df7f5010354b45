// ABOUTME: Standalone verify command implementation.
// ABOUTME: Runs the configured verifier against an explicit URL.

use crate::deploy::DeployError;
use crate::error::Result;
use crate::output::Output;
use crate::verifier::VerifierOps;

/// Run the configured verifier against `url` and report the result.
pub async fn verify<V: VerifierOps>(url: &str, verifier: &V, output: &Output) -> Result<()> {
    run_once(url, verifier, output).await?;
    output.success("Verification passed");
    Ok(())
}

/// Invoke the verifier once; a non-success result is fatal.
pub(crate) async fn run_once<V: VerifierOps>(
    url: &str,
    verifier: &V,
    output: &Output,
) -> Result<()> {
    let report = verifier
        .verify(url)
        .await
        .map_err(|e| DeployError::Verification {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !report.stdout.is_empty() {
        output.progress(&report.stdout);
    }

    if !report.success {
        if !report.stderr.is_empty() {
            eprintln!("{}", report.stderr);
        }
        return Err(DeployError::Verification {
            url: url.to_string(),
            reason: match report.exit_code {
                Some(code) => format!("verifier exited with status {code}"),
                None => "verifier was terminated by a signal".to_string(),
            },
        }
        .into());
    }

    Ok(())
}
