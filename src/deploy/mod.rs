// ABOUTME: Release orchestration using the type state pattern.
// ABOUTME: Exports state markers and the Release struct for compile-time safe pipelines.

mod error;
mod outputs;
mod release;
mod state;
mod transitions;

pub use error::DeployError;
pub use outputs::{ENTRY_URL_OUTPUT, OutputError, StackOutputs, WEBSITE_URL_OUTPUT};
pub use release::{DeployMode, Release};
pub use state::{Completed, Initialized, OutputsResolved, Provisioned};

/// The site assets uploaded for every release, in upload order. The
/// list is fixed by the site template, not user-configurable.
pub const SITE_ASSETS: &[&str] = &["index.html", "error.html"];
