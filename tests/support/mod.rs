// ABOUTME: Test support utilities.
// ABOUTME: Provides fake cloud clients and config helpers for integration tests.

use nonempty::NonEmpty;
use std::path::Path;
use std::sync::Once;
use stratos::config::Config;
use stratos::types::Region;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fakes;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("stratos=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Build a config for the given regions, backed by a real (empty)
/// template file inside `dir` so `template_body()` succeeds.
#[allow(dead_code)]
pub fn test_config(dir: &Path, regions: &[&str]) -> Config {
    let template = dir.join("template.yaml");
    std::fs::write(&template, "Resources: {}\n").unwrap();

    let regions: Vec<Region> = regions.iter().map(|r| Region::new(r).unwrap()).collect();

    let mut config = Config::template();
    config.stack_prefix = "site".to_string();
    config.regions = NonEmpty::from_vec(regions).expect("at least one region");
    config.template = template;
    config.site_dir = dir.to_path_buf();
    config.provision_timeout = std::time::Duration::from_secs(5);
    config.poll_interval = std::time::Duration::from_millis(1);
    config
}
