use super::funding::FundingInstrument;
use crate::error::{InvalidPayerError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
        }
    }

    /// Whether the payer must carry funding instruments for this method.
    pub fn requires_funding(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            other => Err(ValidationError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// The party funding a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PayerWire")]
pub struct Payer {
    payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    funding_instruments: Vec<FundingInstrument>,
}

#[derive(Deserialize)]
struct PayerWire {
    payment_method: PaymentMethod,
    #[serde(default)]
    funding_instruments: Vec<FundingInstrument>,
}

impl TryFrom<PayerWire> for Payer {
    type Error = InvalidPayerError;

    fn try_from(wire: PayerWire) -> Result<Self, Self::Error> {
        Self::new(wire.payment_method, wire.funding_instruments)
    }
}

impl Payer {
    pub fn new(
        payment_method: PaymentMethod,
        funding_instruments: Vec<FundingInstrument>,
    ) -> Result<Self, InvalidPayerError> {
        let payer = Self {
            payment_method,
            funding_instruments,
        };
        payer.validate()?;
        Ok(payer)
    }

    /// A credit-card payer funded by a single instrument.
    pub fn credit_card(instrument: FundingInstrument) -> Self {
        Self {
            payment_method: PaymentMethod::CreditCard,
            funding_instruments: vec![instrument],
        }
    }

    pub fn validate(&self) -> Result<(), InvalidPayerError> {
        if self.payment_method.requires_funding() && self.funding_instruments.is_empty() {
            return Err(InvalidPayerError::MissingFundingInstruments(
                self.payment_method.as_str(),
            ));
        }
        Ok(())
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn funding_instruments(&self) -> &[FundingInstrument] {
        &self.funding_instruments
    }
}
