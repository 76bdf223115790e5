use crate::config::SitepackConfig;
use crate::error::{ConfigError, Result};
use std::path::Path;

fn require_path(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: "\"\"".to_string(),
            hint: format!("'{field}' must name a path"),
        }
        .into());
    }
    Ok(())
}

impl SitepackConfig {
    /// Validate values that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: "0".to_string(),
                hint: "Use a port between 1 and 65535".to_string(),
            }
            .into());
        }

        require_path("output", &self.output)?;
        require_path("public", &self.public)?;
        require_path("ts", &self.ts)?;

        Ok(())
    }
}
