use crate::error::InvalidFundingInstrumentError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Discover,
    Amex,
}

/// Primary account number. `Debug` only shows the last four digits.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardNumber(String);

impl CardNumber {
    pub fn new(number: &str) -> Result<Self, InvalidFundingInstrumentError> {
        if !(12..=19).contains(&number.len()) || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFundingInstrumentError::InvalidCard(
                "card number must be 12 to 19 digits".to_string(),
            ));
        }
        Ok(Self(number.to_string()))
    }

    pub fn last4(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardNumber {
    type Error = InvalidFundingInstrumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CardNumber> for String {
    fn from(number: CardNumber) -> Self {
        number.0
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardNumber(****{})", self.last4())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country_code: String,
}

/// Full card data for a one-off card payment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CreditCardWire")]
pub struct CreditCard {
    number: CardNumber,
    #[serde(rename = "type")]
    card_type: CardType,
    expire_month: u8,
    expire_year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvv2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_address: Option<Address>,
}

#[derive(Deserialize)]
struct CreditCardWire {
    number: CardNumber,
    #[serde(rename = "type")]
    card_type: CardType,
    expire_month: u8,
    expire_year: u16,
    #[serde(default)]
    cvv2: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    billing_address: Option<Address>,
}

impl TryFrom<CreditCardWire> for CreditCard {
    type Error = InvalidFundingInstrumentError;

    fn try_from(wire: CreditCardWire) -> Result<Self, Self::Error> {
        let card = Self {
            number: wire.number,
            card_type: wire.card_type,
            expire_month: wire.expire_month,
            expire_year: wire.expire_year,
            cvv2: wire.cvv2,
            first_name: wire.first_name,
            last_name: wire.last_name,
            billing_address: wire.billing_address,
        };
        card.validate()?;
        Ok(card)
    }
}

impl CreditCard {
    pub fn new(
        number: &str,
        card_type: CardType,
        expire_month: u8,
        expire_year: u16,
    ) -> Result<Self, InvalidFundingInstrumentError> {
        let card = Self {
            number: CardNumber::new(number)?,
            card_type,
            expire_month,
            expire_year,
            cvv2: None,
            first_name: None,
            last_name: None,
            billing_address: None,
        };
        card.validate()?;
        Ok(card)
    }

    pub fn with_cvv2(mut self, cvv2: impl Into<String>) -> Result<Self, InvalidFundingInstrumentError> {
        self.cvv2 = Some(cvv2.into());
        self.validate()?;
        Ok(self)
    }

    pub fn with_holder(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_billing_address(
        mut self,
        address: Address,
    ) -> Result<Self, InvalidFundingInstrumentError> {
        self.billing_address = Some(address);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), InvalidFundingInstrumentError> {
        if !(1..=12).contains(&self.expire_month) {
            return Err(InvalidFundingInstrumentError::InvalidCard(format!(
                "expiry month {} is out of range",
                self.expire_month
            )));
        }
        if let Some(cvv2) = &self.cvv2
            && (!(3..=4).contains(&cvv2.len()) || !cvv2.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(InvalidFundingInstrumentError::InvalidCard(
                "cvv2 must be 3 or 4 digits".to_string(),
            ));
        }
        if let Some(address) = &self.billing_address
            && (address.country_code.len() != 2
                || !address.country_code.bytes().all(|b| b.is_ascii_uppercase()))
        {
            return Err(InvalidFundingInstrumentError::InvalidCard(format!(
                "billing country code {:?} is not a 2-letter code",
                address.country_code
            )));
        }
        Ok(())
    }

    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub fn expire_month(&self) -> u8 {
        self.expire_month
    }

    pub fn expire_year(&self) -> u16 {
        self.expire_year
    }

    pub fn cvv2(&self) -> Option<&str> {
        self.cvv2.as_deref()
    }

    pub fn billing_address(&self) -> Option<&Address> {
        self.billing_address.as_ref()
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &self.number)
            .field("card_type", &self.card_type)
            .field("expire_month", &self.expire_month)
            .field("expire_year", &self.expire_year)
            .field("cvv2", &self.cvv2.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

/// Reference to a card previously stored with the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CreditCardTokenWire")]
pub struct CreditCardToken {
    credit_card_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer_id: Option<String>,
}

#[derive(Deserialize)]
struct CreditCardTokenWire {
    credit_card_id: String,
    #[serde(default)]
    payer_id: Option<String>,
}

impl TryFrom<CreditCardTokenWire> for CreditCardToken {
    type Error = InvalidFundingInstrumentError;

    fn try_from(wire: CreditCardTokenWire) -> Result<Self, Self::Error> {
        let token = Self::new(wire.credit_card_id)?;
        Ok(match wire.payer_id {
            Some(payer_id) => token.with_payer_id(payer_id),
            None => token,
        })
    }
}

impl CreditCardToken {
    pub fn new(credit_card_id: impl Into<String>) -> Result<Self, InvalidFundingInstrumentError> {
        let credit_card_id = credit_card_id.into();
        if credit_card_id.trim().is_empty() {
            return Err(InvalidFundingInstrumentError::EmptyCardId);
        }
        Ok(Self {
            credit_card_id,
            payer_id: None,
        })
    }

    /// Payer the card was stored for, required by the gateway when the
    /// card was saved with one.
    pub fn with_payer_id(mut self, payer_id: impl Into<String>) -> Self {
        self.payer_id = Some(payer_id.into());
        self
    }

    pub fn credit_card_id(&self) -> &str {
        &self.credit_card_id
    }

    pub fn payer_id(&self) -> Option<&str> {
        self.payer_id.as_deref()
    }
}

/// How a payment is funded. Exactly one source per instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "FundingInstrumentWire")]
pub enum FundingInstrument {
    CreditCard(CreditCard),
    CreditCardToken(CreditCardToken),
}

#[derive(Deserialize)]
struct FundingInstrumentWire {
    #[serde(default)]
    credit_card: Option<CreditCard>,
    #[serde(default)]
    credit_card_token: Option<CreditCardToken>,
}

impl TryFrom<FundingInstrumentWire> for FundingInstrument {
    type Error = InvalidFundingInstrumentError;

    fn try_from(wire: FundingInstrumentWire) -> Result<Self, Self::Error> {
        Self::new(wire.credit_card, wire.credit_card_token)
    }
}

impl FundingInstrument {
    /// Builds an instrument from optional sources, failing unless exactly
    /// one is set.
    pub fn new(
        credit_card: Option<CreditCard>,
        credit_card_token: Option<CreditCardToken>,
    ) -> Result<Self, InvalidFundingInstrumentError> {
        match (credit_card, credit_card_token) {
            (Some(card), None) => Ok(Self::CreditCard(card)),
            (None, Some(token)) => Ok(Self::CreditCardToken(token)),
            (Some(_), Some(_)) => Err(InvalidFundingInstrumentError::Ambiguous),
            (None, None) => Err(InvalidFundingInstrumentError::Missing),
        }
    }

    pub fn saved_card(credit_card_id: impl Into<String>) -> Result<Self, InvalidFundingInstrumentError> {
        Ok(Self::CreditCardToken(CreditCardToken::new(credit_card_id)?))
    }

    pub fn credit_card(&self) -> Option<&CreditCard> {
        match self {
            Self::CreditCard(card) => Some(card),
            Self::CreditCardToken(_) => None,
        }
    }

    pub fn credit_card_token(&self) -> Option<&CreditCardToken> {
        match self {
            Self::CreditCardToken(token) => Some(token),
            Self::CreditCard(_) => None,
        }
    }
}
