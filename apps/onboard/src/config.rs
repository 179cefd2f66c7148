//! # Application Configuration
//!
//! Settings are read from an optional TOML file, then overridden by
//! environment variables.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! rate_limit = 100
//! cors_origins = ["http://localhost:3000"]
//!
//! [auth]
//! jwt_secret = "change-me"
//! token_minutes = 120
//!
//! [onboarding]
//! total_steps = 6
//! advance = "permissive"
//! ```
//!
//! ## Environment Overrides
//!
//! - `ONBOARD_JWT_SECRET`: token signing secret
//! - `ONBOARD_RATE_LIMIT`: requests per second (0 disables)
//! - `ONBOARD_CORS_ORIGINS`: comma-separated origins, or `*`
//! - `ONBOARD_TOTAL_STEPS`: size of the step catalog

use onboard_core::{OnboardError, OnboardingConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "onboard.toml";

/// Largest accepted config file (64 KiB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// SECTIONS
// =============================================================================

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second, 0 disables rate limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. Empty means localhost only, `["*"]` means any.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            rate_limit: 100,
            cors_origins: Vec::new(),
        }
    }
}

/// `[auth]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. When absent an ephemeral one is generated.
    pub jwt_secret: Option<String>,
    /// Token lifetime in minutes.
    pub token_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_minutes: 120,
        }
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub onboarding: OnboardingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present and built-in defaults otherwise. Environment
    /// overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, OnboardError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, OnboardError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            OnboardError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(OnboardError::InvalidInput(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| OnboardError::IoError(format!("Read config: {}", e)))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, OnboardError> {
        toml::from_str(text)
            .map_err(|e| OnboardError::InvalidInput(format!("Invalid config: {}", e)))
    }

    /// Apply `ONBOARD_*` overrides looked up through `lookup`.
    ///
    /// Empty values are ignored, unparsable numbers too.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(secret) = var("ONBOARD_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(rate) = var("ONBOARD_RATE_LIMIT").and_then(|v| v.trim().parse().ok()) {
            self.server.rate_limit = rate;
        }
        if let Some(origins) = var("ONBOARD_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(steps) = var("ONBOARD_TOTAL_STEPS").and_then(|v| v.trim().parse().ok()) {
            self.onboarding.total_steps = steps;
        }
    }

    pub fn validate(&self) -> Result<(), OnboardError> {
        self.onboarding.validate()?;
        if self.auth.token_minutes <= 0 {
            return Err(OnboardError::InvalidInput(format!(
                "token_minutes must be positive, got {}",
                self.auth.token_minutes
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use onboard_core::AdvancePolicy;
    use std::collections::BTreeMap;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.rate_limit, 100);
        assert_eq!(config.auth.token_minutes, 120);
        assert_eq!(config.onboarding.total_steps, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [onboarding]
            total_steps = 4
            advance = "monotonic"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.onboarding.total_steps, 4);
        assert_eq!(config.onboarding.advance, AdvancePolicy::Monotonic);
        assert_eq!(config.auth.token_minutes, 120);
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(AppConfig::from_toml("[server\nport = 1").is_err());
        assert!(AppConfig::from_toml("[onboarding]\nadvance = \"sideways\"").is_err());
    }

    #[test]
    fn env_overrides_win() {
        let env: BTreeMap<&str, &str> = [
            ("ONBOARD_JWT_SECRET", "from-env"),
            ("ONBOARD_RATE_LIMIT", "0"),
            ("ONBOARD_CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("ONBOARD_TOTAL_STEPS", "8"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.auth.jwt_secret.as_deref(), Some("from-env"));
        assert_eq!(config.server.rate_limit, 0);
        assert_eq!(
            config.server.cors_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.onboarding.total_steps, 8);
    }

    #[test]
    fn bad_env_values_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            "ONBOARD_RATE_LIMIT" => Some("lots".to_string()),
            "ONBOARD_JWT_SECRET" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.server.rate_limit, 100);
        assert!(config.auth.jwt_secret.is_none());
    }

    #[test]
    fn invalid_step_count_rejected() {
        let mut config = AppConfig::default();
        config.onboarding.total_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("onboard.toml");
        std::fs::write(&path, "[auth]\ntoken_minutes = 15\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.auth.token_minutes, 15);
    }
}
