use anyhow::Context;
use std::collections::BTreeMap;
use validator::Validate;

pub const DEFAULT_NAME_SUFFIX: &str = " (TF managed)";

/// ProviderConfig is the configuration block of the provider.
/// Each setting may be supplied by the host, or else taken from the environment.
#[derive(Debug, Clone, clap::Parser, Validate)]
#[clap(name = "instana-provider", rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// API token used to authenticate with the Instana Web REST API.
    #[clap(long, env = "INSTANA_API_TOKEN", hide_env_values = true)]
    #[validate(length(min = 1))]
    pub api_token: String,
    /// Host name of the Instana tenant and unit, without scheme.
    #[clap(long, env = "INSTANA_ENDPOINT")]
    #[validate(length(min = 1))]
    pub endpoint: String,
    /// Prefix prepended to the names of managed resources.
    #[clap(long, env = "INSTANA_DEFAULT_NAME_PREFIX", default_value = "")]
    pub default_name_prefix: String,
    /// Suffix appended to the names of managed resources.
    #[clap(long, env = "INSTANA_DEFAULT_NAME_SUFFIX", default_value = DEFAULT_NAME_SUFFIX)]
    pub default_name_suffix: String,
    /// Default level of emitted logs, overridden by RUST_LOG.
    #[clap(long, env = "INSTANA_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl ProviderConfig {
    /// Build a ProviderConfig from the host's configuration block, whose keys
    /// are the snake_case names of settings. Supplied values take precedence
    /// over the environment.
    pub fn from_host_block(block: &BTreeMap<String, String>) -> anyhow::Result<Self> {
        let args = block
            .iter()
            .map(|(key, value)| format!("--{}={value}", key.replace('_', "-")));

        let config = <Self as clap::Parser>::try_parse_from(
            std::iter::once("instana-provider".to_string()).chain(args),
        )
        .context("invalid provider configuration")?;

        config
            .validate()
            .context("invalid provider configuration")?;

        Ok(config)
    }
}
