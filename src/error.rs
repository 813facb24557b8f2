use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;

/// Rejection raised while building an [`Amount`](crate::domain::amount::Amount).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAmountError {
    #[error("unsupported currency code: {0:?}")]
    UnsupportedCurrency(String),
    #[error("total must be positive, got {0}")]
    NonPositiveTotal(Decimal),
    #[error("{field} must not be negative, got {value}")]
    NegativeComponent { field: &'static str, value: Decimal },
    #[error("total {total} does not match subtotal + tax + shipping = {sum}")]
    SumMismatch { total: Decimal, sum: Decimal },
    #[error("subtotal + tax + shipping overflows")]
    Overflow,
}

/// Rejection raised while building a
/// [`FundingInstrument`](crate::domain::funding::FundingInstrument).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFundingInstrumentError {
    #[error("funding instrument needs either a credit card or a credit card token")]
    Missing,
    #[error("funding instrument cannot carry both a credit card and a credit card token")]
    Ambiguous,
    #[error("credit card token id must not be empty")]
    EmptyCardId,
    #[error("invalid credit card: {0}")]
    InvalidCard(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPayerError {
    #[error("payment method {0} requires at least one funding instrument")]
    MissingFundingInstruments(&'static str),
}

/// Local validation failure. Never leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Amount(#[from] InvalidAmountError),
    #[error(transparent)]
    FundingInstrument(#[from] InvalidFundingInstrumentError),
    #[error(transparent)]
    Payer(#[from] InvalidPayerError),
    #[error("a payment needs at least one transaction")]
    EmptyTransactions,
    #[error("unknown payment intent: {0:?}")]
    UnknownIntent(String),
    #[error("unknown payment method: {0:?}")]
    UnknownPaymentMethod(String),
}

/// Failure reported by a [`GatewayClient`](crate::domain::ports::GatewayClient).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("gateway call timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("gateway responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed gateway response ({reason}): {body}")]
    MalformedResponse { reason: String, body: String },
}

impl GatewayError {
    /// Raw response payload, when the gateway sent one back.
    pub fn raw_payload(&self) -> Option<&str> {
        match self {
            GatewayError::Status { body, .. } | GatewayError::MalformedResponse { body, .. } => {
                Some(body)
            }
            GatewayError::Timeout(_) | GatewayError::Network(_) => None,
        }
    }
}

/// Failure reported by an [`Authenticator`](crate::domain::ports::Authenticator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("network error: {0}")]
    Network(String),
    #[error("token request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
    #[error("token request timed out after {0:?}")]
    Timeout(Duration),
}

/// Outcome of a failed submission attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("invalid payment request: {0}")]
    Invalid(#[from] ValidationError),
    #[error("gateway failure: {0}")]
    Gateway(#[from] GatewayError),
}

impl From<InvalidAmountError> for SubmissionError {
    fn from(err: InvalidAmountError) -> Self {
        SubmissionError::Invalid(err.into())
    }
}

impl From<InvalidFundingInstrumentError> for SubmissionError {
    fn from(err: InvalidFundingInstrumentError) -> Self {
        SubmissionError::Invalid(err.into())
    }
}

impl From<InvalidPayerError> for SubmissionError {
    fn from(err: InvalidPayerError) -> Self {
        SubmissionError::Invalid(err.into())
    }
}

impl SubmissionError {
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            SubmissionError::Invalid(_) => None,
            SubmissionError::Gateway(err) => err.raw_payload(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SubmissionError::Gateway(GatewayError::Timeout(_)))
    }
}

#[derive(Error, Debug)]
pub enum CardpayError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),
    #[error("Submission error: {0}")]
    SubmissionError(#[from] SubmissionError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CardpayError>;
