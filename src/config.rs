use std::env;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Process-wide configuration is read exactly once at startup and passed down
// explicitly. Nothing below main() touches environment variables.
//
// ============================================================================

/// Diagnostic verbosity mode, selected by APP_ENV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Production,
}

impl Environment {
    /// "dev" selects Dev; every other value (including unset) collapses to
    /// Production so the verbose branch is never reachable by accident.
    pub fn from_app_env(value: &str) -> Self {
        match value {
            "dev" => Environment::Dev,
            _ => Environment::Production,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Environment::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub http_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = env::var("APP_ENV")
            .map(|value| Environment::from_app_env(&value))
            .unwrap_or(Environment::Production);

        let http_port = env::var("HTTP_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        Self {
            environment,
            http_port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            http_port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_selects_dev_mode() {
        assert_eq!(Environment::from_app_env("dev"), Environment::Dev);
        assert!(Environment::from_app_env("dev").is_dev());
    }

    #[test]
    fn test_everything_else_is_production() {
        assert_eq!(Environment::from_app_env("prod"), Environment::Production);
        assert_eq!(Environment::from_app_env("test"), Environment::Production);
        assert_eq!(Environment::from_app_env("DEV"), Environment::Production);
        assert_eq!(Environment::from_app_env(""), Environment::Production);
    }

    #[test]
    fn test_default_config_is_production() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.http_port, 8080);
    }
}
