use super::payment::{Payment, PaymentResult};
use crate::error::{AuthError, GatewayError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Short-lived bearer credential issued by the gateway.
#[derive(Debug)]
pub struct AccessToken {
    token: SecretString,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            token: SecretString::new(token.into_boxed_str()),
            expires_in: None,
        }
    }

    pub fn with_expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    pub fn expose(&self) -> &str {
        self.token.expose_secret()
    }

    /// Lifetime in seconds as reported when the token was issued.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

/// Per-call credentials: the access token plus an optional request id the
/// gateway uses to deduplicate retried submissions.
#[derive(Debug)]
pub struct Credentials {
    access_token: AccessToken,
    request_id: Option<String>,
}

impl Credentials {
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            access_token,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// Submits assembled payments to a payment gateway.
///
/// Implementations own their retry policy and must document it.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn submit(
        &self,
        payment: &Payment,
        credentials: &Credentials,
    ) -> Result<PaymentResult, GatewayError>;
}

/// Exchanges client credentials for an access token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn access_token(
        &self,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<AccessToken, AuthError>;
}

pub type GatewayClientBox = Box<dyn GatewayClient>;
pub type AuthenticatorBox = Box<dyn Authenticator>;
