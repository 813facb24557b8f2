use crate::domain::payment::{Payment, PaymentResult};
use crate::domain::ports::{AccessToken, Authenticator, Credentials, GatewayClient};
use crate::error::{AuthError, GatewayError};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

pub const SANDBOX_URL: &str = "https://api.sandbox.paypal.com";
pub const LIVE_URL: &str = "https://api.paypal.com";

const TOKEN_PATH: &str = "/v1/oauth2/token";
const PAYMENTS_PATH: &str = "/v1/payments/payment";

/// Header carrying the caller's idempotency key.
pub const REQUEST_ID_HEADER: &str = "PayPal-Request-Id";

/// Gateway adapter speaking the REST payments API over HTTPS.
///
/// Implements both [`Authenticator`] (client-credentials token exchange) and
/// [`GatewayClient`] (payment creation). Every call is a single HTTP request:
/// the adapter performs no retries and keeps no token cache, so callers that
/// want either must build it on top.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl RestGateway {
    /// Creates an adapter for the given API root, e.g. [`SANDBOX_URL`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Replaces the default HTTP client, e.g. to set proxy or TLS options.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Authenticator for RestGateway {
    async fn access_token(
        &self,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<AccessToken, AuthError> {
        let response = self
            .client
            .post(self.url(TOKEN_PATH))
            .basic_auth(client_id, Some(client_secret.expose_secret()))
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        debug!(expires_in = ?token.expires_in, "Obtained access token");

        let access_token = AccessToken::new(token.access_token);
        Ok(match token.expires_in {
            Some(seconds) => access_token.with_expires_in(seconds),
            None => access_token,
        })
    }
}

#[async_trait]
impl GatewayClient for RestGateway {
    async fn submit(
        &self,
        payment: &Payment,
        credentials: &Credentials,
    ) -> Result<PaymentResult, GatewayError> {
        let mut request = self
            .client
            .post(self.url(PAYMENTS_PATH))
            .bearer_auth(credentials.access_token().expose())
            .json(payment);
        if let Some(request_id) = credentials.request_id() {
            request = request.header(REQUEST_ID_HEADER, request_id);
        }

        debug!(base_url = %self.base_url, intent = %payment.intent(), "Submitting payment");
        let response = request.send().await.map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GatewayError::MalformedResponse {
                reason: e.to_string(),
                body: body.clone(),
            })?;
        PaymentResult::from_response(raw).ok_or_else(|| GatewayError::MalformedResponse {
            reason: "response has no id or state".to_string(),
            body,
        })
    }
}

fn network_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = RestGateway::new("https://api.sandbox.paypal.com/");
        assert_eq!(gateway.base_url(), SANDBOX_URL);
        assert_eq!(
            gateway.url(PAYMENTS_PATH),
            "https://api.sandbox.paypal.com/v1/payments/payment"
        );
    }
}
