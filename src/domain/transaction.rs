use super::amount::Amount;
use crate::error::InvalidAmountError;
use serde::{Deserialize, Serialize};

/// What a payment is for: an amount and an optional description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Transaction {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn validate(&self) -> Result<(), InvalidAmountError> {
        self.amount.validate()
    }
}
