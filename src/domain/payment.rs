use super::payer::Payer;
use super::transaction::Transaction;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gateway-level semantics of a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    Sale,
    Authorize,
    Order,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Sale => "sale",
            Intent::Authorize => "authorize",
            Intent::Order => "order",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(Intent::Sale),
            "authorize" => Ok(Intent::Authorize),
            "order" => Ok(Intent::Order),
            other => Err(ValidationError::UnknownIntent(other.to_string())),
        }
    }
}

/// A payment request, ready to hand to a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaymentWire")]
pub struct Payment {
    intent: Intent,
    payer: Payer,
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct PaymentWire {
    intent: Intent,
    payer: Payer,
    transactions: Vec<Transaction>,
}

impl TryFrom<PaymentWire> for Payment {
    type Error = ValidationError;

    fn try_from(wire: PaymentWire) -> Result<Self, Self::Error> {
        Self::new(wire.intent, wire.payer, wire.transactions)
    }
}

impl Payment {
    pub fn new(
        intent: Intent,
        payer: Payer,
        transactions: Vec<Transaction>,
    ) -> Result<Self, ValidationError> {
        let payment = Self {
            intent,
            payer,
            transactions,
        };
        payment.validate()?;
        Ok(payment)
    }

    /// Re-checks every invariant of the request graph.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.transactions.is_empty() {
            return Err(ValidationError::EmptyTransactions);
        }
        for tx in &self.transactions {
            tx.validate()?;
        }
        self.payer.validate()?;
        Ok(())
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn payer(&self) -> &Payer {
        &self.payer
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// Lifecycle state reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentState {
    Created,
    Approved,
    Failed,
    Canceled,
    Expired,
    Pending,
    Other(String),
}

impl PaymentState {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentState::Created => "created",
            PaymentState::Approved => "approved",
            PaymentState::Failed => "failed",
            PaymentState::Canceled => "canceled",
            PaymentState::Expired => "expired",
            PaymentState::Pending => "pending",
            PaymentState::Other(state) => state,
        }
    }
}

impl From<String> for PaymentState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "created" => PaymentState::Created,
            "approved" => PaymentState::Approved,
            "failed" => PaymentState::Failed,
            "canceled" => PaymentState::Canceled,
            "expired" => PaymentState::Expired,
            "pending" => PaymentState::Pending,
            _ => PaymentState::Other(value),
        }
    }
}

impl From<PaymentState> for String {
    fn from(state: PaymentState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment as accepted by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    pub id: String,
    pub state: PaymentState,
    /// Full response body, kept for diagnostics.
    pub raw: serde_json::Value,
}

impl PaymentResult {
    pub fn new(id: impl Into<String>, state: PaymentState) -> Self {
        let id = id.into();
        let raw = serde_json::json!({ "id": id, "state": state.as_str() });
        Self { id, state, raw }
    }

    /// Extracts `id` and `state` from a gateway response body.
    pub fn from_response(raw: serde_json::Value) -> Option<Self> {
        let id = raw.get("id")?.as_str()?.to_string();
        let state = PaymentState::from(raw.get("state")?.as_str()?.to_string());
        Some(Self { id, state, raw })
    }
}
