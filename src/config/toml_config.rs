use crate::core::{ConfigProvider, Coordinate, KeySeparator, LegPolicy};
use crate::domain::ports::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::utils::error::{Result, RouteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: ProviderConfig,
    pub route: Option<RouteConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub legacy_key_separator: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub leg_policy: Option<LegPolicy>,
    /// `"lat,lng"` used when no origin is supplied, e.g. before a location fix.
    pub default_origin: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RouteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RouteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RouteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn default_origin(&self) -> Result<Option<Coordinate>> {
        let Some(text) = self.route.as_ref().and_then(|r| r.default_origin.as_deref()) else {
            return Ok(None);
        };
        text.parse::<Coordinate>()
            .map(Some)
            .map_err(|reason| RouteError::InvalidConfigValueError {
                field: "route.default_origin".to_string(),
                value: text.to_string(),
                reason,
            })
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_api_key("provider.api_key", &self.provider.api_key)?;
        validation::validate_url("provider.base_url", self.base_url())?;

        if let Some(seconds) = self.provider.timeout_seconds {
            validation::validate_range("provider.timeout_seconds", seconds, 1, 120)?;
        }

        if let Some(origin) = self.default_origin()? {
            validation::validate_coordinate("route.default_origin", &origin)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_key(&self) -> &str {
        &self.provider.api_key
    }

    fn base_url(&self) -> &str {
        self.provider.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn timeout(&self) -> Duration {
        self.provider
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn key_separator(&self) -> KeySeparator {
        if self.provider.legacy_key_separator.unwrap_or(false) {
            KeySeparator::Legacy
        } else {
            KeySeparator::Ampersand
        }
    }

    fn leg_policy(&self) -> LegPolicy {
        self.route
            .as_ref()
            .and_then(|r| r.leg_policy)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
