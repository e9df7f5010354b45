// ABOUTME: Command implementations behind the CLI surface.
// ABOUTME: deploy drives the full pipeline; verify runs the external checker alone.

pub mod deploy;
pub mod verify;

pub use deploy::{DeploySummary, deploy};
pub use verify::verify;
