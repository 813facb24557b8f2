use crate::error::InvalidAmountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO-4217 codes the gateway accepts.
pub const SUPPORTED_CURRENCIES: [&str; 25] = [
    "AUD", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "ILS", "JPY",
    "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RUB", "SEK", "SGD", "THB", "TWD", "USD",
];

/// A validated, upper-case ISO-4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self, InvalidAmountError> {
        if SUPPORTED_CURRENCIES.contains(&code) {
            Ok(Self(code.to_string()))
        } else {
            Err(InvalidAmountError::UnsupportedCurrency(code.to_string()))
        }
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Currency {
    type Error = InvalidAmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Breakdown of an amount. Every component is non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DetailsWire")]
pub struct Details {
    subtotal: Decimal,
    tax: Decimal,
    shipping: Decimal,
}

#[derive(Deserialize)]
struct DetailsWire {
    subtotal: Decimal,
    tax: Decimal,
    shipping: Decimal,
}

impl TryFrom<DetailsWire> for Details {
    type Error = InvalidAmountError;

    fn try_from(wire: DetailsWire) -> Result<Self, Self::Error> {
        Self::new(wire.subtotal, wire.tax, wire.shipping)
    }
}

impl Details {
    pub fn new(subtotal: Decimal, tax: Decimal, shipping: Decimal) -> Result<Self, InvalidAmountError> {
        for (field, value) in [("subtotal", subtotal), ("tax", tax), ("shipping", shipping)] {
            if value < Decimal::ZERO {
                return Err(InvalidAmountError::NegativeComponent { field, value });
            }
        }
        Ok(Self {
            subtotal,
            tax,
            shipping,
        })
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn shipping(&self) -> Decimal {
        self.shipping
    }

    /// Exact decimal sum of the three components, `None` past `Decimal::MAX`.
    pub fn sum(&self) -> Option<Decimal> {
        self.subtotal
            .checked_add(self.tax)?
            .checked_add(self.shipping)
    }
}

/// A payment amount in a single currency.
///
/// When `details` is present the total always equals
/// `subtotal + tax + shipping`, compared with exact decimal arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AmountWire")]
pub struct Amount {
    currency: Currency,
    total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
}

#[derive(Deserialize)]
struct AmountWire {
    currency: Currency,
    total: Decimal,
    #[serde(default)]
    details: Option<Details>,
}

impl TryFrom<AmountWire> for Amount {
    type Error = InvalidAmountError;

    fn try_from(wire: AmountWire) -> Result<Self, Self::Error> {
        let amount = Self {
            currency: wire.currency,
            total: wire.total,
            details: wire.details,
        };
        amount.validate()?;
        Ok(amount)
    }
}

impl Amount {
    pub fn new(
        currency: &str,
        total: Decimal,
        details: Option<Details>,
    ) -> Result<Self, InvalidAmountError> {
        let amount = Self {
            currency: Currency::new(currency)?,
            total,
            details,
        };
        amount.validate()?;
        Ok(amount)
    }

    /// Checks the total against the breakdown.
    pub fn validate(&self) -> Result<(), InvalidAmountError> {
        if self.total <= Decimal::ZERO {
            return Err(InvalidAmountError::NonPositiveTotal(self.total));
        }
        if let Some(details) = &self.details {
            let sum = details.sum().ok_or(InvalidAmountError::Overflow)?;
            if sum != self.total {
                return Err(InvalidAmountError::SumMismatch {
                    total: self.total,
                    sum,
                });
            }
        }
        Ok(())
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }
}
