use crate::cli::Cli;
use crate::config::SitepackConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "sitepack.config.json";

/// Prefix of environment variable overrides (`SITEPACK_PORT=8080`).
pub const ENV_PREFIX: &str = "SITEPACK_";

/// Flags that were actually given on the command line.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    dev: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    watch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ts: Option<PathBuf>,
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            dev: cli.dev,
            watch: cli.watch,
            port: cli.port,
            output: cli.output.clone(),
            public: cli.public.clone(),
            ts: cli.ts.clone(),
        }
    }
}

impl SitepackConfig {
    /// Load configuration from every source and validate it.
    ///
    /// `cwd` locates the default config file and resolves a relative
    /// `--config` path.
    pub fn load(cli: &Cli, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match &cli.config {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    cwd.join(path)
                };
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let path = cwd.join(CONFIG_FILE);
                path.is_file().then_some(path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));
        figment = figment.merge(Serialized::defaults(CliOverrides::from(cli)));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;
        config.validate()?;

        tracing::debug!(?config, "Resolved configuration");
        Ok(config)
    }
}
