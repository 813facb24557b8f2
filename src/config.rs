use crate::error::{CardpayError, Result};
use crate::infrastructure::rest::{LIVE_URL, SANDBOX_URL};
use clap::ValueEnum;
use secrecy::SecretString;
use std::time::Duration;

/// Which gateway deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

/// Settings for reaching the gateway, resolved once at startup and passed
/// down explicitly.
#[derive(Debug)]
pub struct GatewayConfig {
    pub environment: Environment,
    /// Overrides the environment's base URL when set.
    pub endpoint: Option<String>,
    pub client_id: String,
    pub client_secret: SecretString,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Builds a config, rejecting blank credentials and a zero timeout.
    pub fn new(
        environment: Environment,
        endpoint: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client_id = client_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CardpayError::ConfigError("client id is required".to_string()))?;
        let client_secret = client_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| CardpayError::ConfigError("client secret is required".to_string()))?;
        if timeout_secs == 0 {
            return Err(CardpayError::ConfigError(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            environment,
            endpoint,
            client_id,
            client_secret: SecretString::new(client_secret.into()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        match (&self.endpoint, self.environment) {
            (Some(endpoint), _) => endpoint.as_str(),
            (None, Environment::Sandbox) => SANDBOX_URL,
            (None, Environment::Live) => LIVE_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_base_url_resolution() {
        let sandbox = GatewayConfig::new(
            Environment::Sandbox,
            None,
            Some("id".into()),
            Some("secret".into()),
            30,
        )
        .unwrap();
        assert_eq!(sandbox.base_url(), SANDBOX_URL);
        assert_eq!(sandbox.client_secret.expose_secret(), "secret");

        let live = GatewayConfig::new(Environment::Live, None, Some("id".into()), Some("secret".into()), 30)
            .unwrap();
        assert_eq!(live.base_url(), LIVE_URL);

        let custom = GatewayConfig::new(
            Environment::Live,
            Some("http://127.0.0.1:8080".into()),
            Some("id".into()),
            Some("secret".into()),
            5,
        )
        .unwrap();
        assert_eq!(custom.base_url(), "http://127.0.0.1:8080");
        assert_eq!(custom.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_credentials() {
        let result = GatewayConfig::new(Environment::Sandbox, None, None, Some("secret".into()), 30);
        assert!(matches!(result, Err(CardpayError::ConfigError(_))));

        let result = GatewayConfig::new(Environment::Sandbox, None, Some("  ".into()), Some("secret".into()), 30);
        assert!(matches!(result, Err(CardpayError::ConfigError(_))));

        let result = GatewayConfig::new(Environment::Sandbox, None, Some("id".into()), None, 30);
        assert!(matches!(result, Err(CardpayError::ConfigError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = GatewayConfig::new(Environment::Sandbox, None, Some("id".into()), Some("secret".into()), 0);
        assert!(matches!(result, Err(CardpayError::ConfigError(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = GatewayConfig::new(
            Environment::Sandbox,
            None,
            Some("id".into()),
            Some("EO422dn3gQLgDbuwqTjzrFgFtaRLRR5BdHEESmha49TM".into()),
            30,
        )
        .unwrap();
        assert!(!format!("{config:?}").contains("EO422dn3gQLgDbuwqTjzrFgFtaRLRR5BdHEESmha49TM"));
    }
}
