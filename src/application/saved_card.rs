use crate::domain::amount::{Amount, Details};
use crate::domain::funding::FundingInstrument;
use crate::domain::payer::Payer;
use crate::domain::payment::Intent;
use crate::domain::transaction::Transaction;
use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A payment charged to a card previously stored with the gateway.
///
/// Fields line up with the batch CSV columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedCardPayment {
    pub card_id: String,
    pub currency: String,
    pub total: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

impl SavedCardPayment {
    /// Builds the validated request pieces: intent, a single transaction and
    /// a credit-card payer funded by the stored card.
    pub fn into_parts(self) -> Result<(Intent, Vec<Transaction>, Payer), ValidationError> {
        let details = Details::new(self.subtotal, self.tax, self.shipping)?;
        let amount = Amount::new(&self.currency, self.total, Some(details))?;

        let transaction = match self.description {
            Some(description) => Transaction::new(amount).with_description(description),
            None => Transaction::new(amount),
        };
        let payer = Payer::credit_card(FundingInstrument::saved_card(self.card_id)?);

        Ok((self.intent.unwrap_or_default(), vec![transaction], payer))
    }
}
