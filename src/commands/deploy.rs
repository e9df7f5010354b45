// ABOUTME: Deploy command implementation.
// ABOUTME: Drives provision, output resolution, and upload per region, then verifies once.

use crate::cloud::{ProvisionOps, StorageOps};
use crate::config::Config;
use crate::deploy::{DeployMode, Release, StackOutputs};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::output::Output;
use crate::types::{DeploymentId, Region, StackName};
use crate::verifier::VerifierOps;

/// What a successful run produced.
#[derive(Debug)]
pub struct DeploySummary {
    /// Entry URL of the last region processed; this is the URL that was
    /// verified when a verifier is configured.
    pub entry_url: String,
    pub regions: usize,
    pub verified: bool,
}

/// Deploy to all configured regions, strictly in order, then verify the
/// last region's entry endpoint.
///
/// The first stage failure aborts the whole run; remaining regions are
/// not attempted and nothing already provisioned or uploaded is cleaned
/// up. When more than one region is configured, earlier regions'
/// endpoints are never verified; that gap is surfaced as a warning.
pub async fn deploy<C, V>(
    config: &Config,
    mode: DeployMode,
    identity: &DeploymentId,
    cloud: &C,
    verifier: Option<&V>,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<DeploySummary>
where
    C: ProvisionOps + StorageOps,
    V: VerifierOps,
{
    let stack = StackName::for_deployment(&config.stack_prefix, identity)
        .map_err(|e| Error::InvalidConfig(format!("bad stack name: {e}")))?;
    let template_body = config.template_body()?;

    output.progress(&format!(
        "Deploying stack {} to {} region(s)",
        stack,
        config.regions.len()
    ));

    let mut last_outputs: Option<StackOutputs> = None;

    for region in &config.regions {
        output.progress(&format!("  → Deploying to {region}..."));
        let outputs = run_release(
            region.clone(),
            stack.clone(),
            mode,
            cloud,
            &template_body,
            config,
            output,
        )
        .await?;

        output.progress(&format!("  ✓ Deployed to {region}"));
        last_outputs = Some(outputs);
    }

    if mode == DeployMode::Update {
        diag.warn(Warning::update_not_awaited(format!(
            "update of stack {stack} was requested but completion was not awaited"
        )));
    }

    let outputs = last_outputs.expect("regions list is non-empty");

    if config.regions.len() > 1 {
        let unverified: Vec<String> = config
            .regions
            .iter()
            .take(config.regions.len() - 1)
            .map(ToString::to_string)
            .collect();
        diag.warn(Warning::verify_coverage(format!(
            "only the last region's endpoint gets verified; not verified: {}",
            unverified.join(", ")
        )));
    }

    let mut verified = false;
    if let Some(verifier) = verifier {
        output.progress(&format!("  → Verifying {}...", outputs.entry_url()));
        super::verify::run_once(outputs.entry_url(), verifier, output).await?;
        verified = true;
    }

    Ok(DeploySummary {
        entry_url: outputs.entry_url().to_string(),
        regions: config.regions.len(),
        verified,
    })
}

/// Run one region through the release state machine.
async fn run_release<C: ProvisionOps + StorageOps>(
    region: Region,
    stack: StackName,
    mode: DeployMode,
    cloud: &C,
    template_body: &str,
    config: &Config,
    output: &Output,
) -> Result<StackOutputs> {
    let release = Release::new(region, stack, mode);

    output.progress("  → Provisioning stack...");
    let release = release
        .provision(
            cloud,
            template_body,
            config.provision_timeout,
            config.poll_interval,
        )
        .await?;

    output.progress("  → Resolving stack outputs...");
    let release = release.resolve_outputs(cloud).await?;

    output.progress(&format!(
        "  → Uploading site assets to {}...",
        release.outputs().bucket()
    ));
    let release = release.upload_assets(cloud, &config.site_dir).await?;

    Ok(release.finish())
}
