// ABOUTME: Configuration types and parsing for stratos.yml.
// ABOUTME: Handles YAML parsing, config discovery, and the init scaffold.

use crate::error::{Error, Result};
use crate::types::Region;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "stratos.yml";
pub const CONFIG_FILENAME_ALT: &str = "stratos.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stratos/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prefix for generated stack names; the per-run deployment id is
    /// appended to it.
    pub stack_prefix: String,

    #[serde(deserialize_with = "deserialize_regions")]
    pub regions: NonEmpty<Region>,

    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    #[serde(default = "default_provision_timeout", with = "humantime_serde")]
    pub provision_timeout: Duration,

    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    #[serde(default)]
    pub verifier: Option<VerifierConfig>,
}

/// External verification command. `{url}` in any argument is replaced
/// with the entry URL; without a placeholder the URL is appended.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    pub command: Vec<String>,
}

fn default_template() -> PathBuf {
    PathBuf::from("infrastructure/create-resources.yaml")
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("infrastructure")
}

fn default_provision_timeout() -> Duration {
    Duration::from_secs(10 * 60)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Read the provisioning template file this config points at.
    pub fn template_body(&self) -> Result<String> {
        if !self.template.exists() {
            return Err(Error::TemplateNotFound(self.template.clone()));
        }
        Ok(std::fs::read_to_string(&self.template)?)
    }

    pub fn template() -> Self {
        Config {
            stack_prefix: "simple-site".to_string(),
            regions: NonEmpty::new(Region::new("us-east-1").unwrap()),
            template: default_template(),
            site_dir: default_site_dir(),
            provision_timeout: default_provision_timeout(),
            poll_interval: default_poll_interval(),
            verifier: None,
        }
    }
}

pub fn init_config(dir: &Path, stack_prefix: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(prefix) = stack_prefix {
        config.stack_prefix = prefix.to_string();
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"stack_prefix: {}
regions:
  - {}
template: {}
site_dir: {}
# verifier:
#   command: ["go", "test", "-v", "./infrastructure/site_test.go", "-domain={{url}}"]
"#,
        config.stack_prefix,
        config.regions.first(),
        config.template.display(),
        config.site_dir.display(),
    )
}

// Custom deserializers

fn deserialize_regions<'de, D>(deserializer: D) -> std::result::Result<NonEmpty<Region>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<Region> = Vec::deserialize(deserializer)?;
    NonEmpty::from_vec(values)
        .ok_or_else(|| serde::de::Error::custom("at least one region is required"))
}
