use super::saved_card::SavedCardPayment;
use crate::domain::payer::Payer;
use crate::domain::payment::{Intent, Payment, PaymentResult};
use crate::domain::ports::{Credentials, GatewayClientBox};
use crate::domain::transaction::Transaction;
use crate::error::{GatewayError, SubmissionError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Builds payment requests and submits each one exactly once.
///
/// `PaymentAssembler` validates the whole request graph before anything
/// leaves the process, then hands the payment to its gateway, bounded by
/// the timeout given at construction. It never retries: a failed attempt is
/// returned to the caller as a [`SubmissionError`].
pub struct PaymentAssembler {
    gateway: GatewayClientBox,
    timeout: Duration,
}

impl PaymentAssembler {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new `PaymentAssembler`.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The client payments are submitted through.
    /// * `timeout` - Upper bound for a single outbound submission.
    pub fn new(gateway: GatewayClientBox, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validates and submits a payment.
    ///
    /// Invalid input yields [`SubmissionError::Invalid`] and the gateway is
    /// never contacted.
    #[tracing::instrument(skip_all, fields(intent = %intent, transactions = transactions.len()))]
    pub async fn build_and_submit(
        &self,
        intent: Intent,
        transactions: Vec<Transaction>,
        payer: Payer,
        credentials: &Credentials,
    ) -> Result<PaymentResult, SubmissionError> {
        let payment = Payment::new(intent, payer, transactions).inspect_err(|err| {
            debug!(error = %err, "Rejected payment request before submission");
        })?;
        self.submit(&payment, credentials).await
    }

    /// Charges a previously stored card.
    pub async fn create_payment_with_saved_card(
        &self,
        request: SavedCardPayment,
        credentials: &Credentials,
    ) -> Result<PaymentResult, SubmissionError> {
        let (intent, transactions, payer) = request.into_parts().inspect_err(|err| {
            debug!(error = %err, "Rejected saved card payment before submission");
        })?;
        self.build_and_submit(intent, transactions, payer, credentials)
            .await
    }

    async fn submit(
        &self,
        payment: &Payment,
        credentials: &Credentials,
    ) -> Result<PaymentResult, SubmissionError> {
        match tokio::time::timeout(self.timeout, self.gateway.submit(payment, credentials)).await {
            Ok(Ok(result)) => {
                info!(id = %result.id, state = %result.state, "Created payment");
                Ok(result)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Gateway failed to create payment");
                Err(err.into())
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Gateway call timed out");
                Err(GatewayError::Timeout(self.timeout).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::{Amount, Details};
    use crate::domain::funding::FundingInstrument;
    use crate::domain::payment::PaymentState;
    use crate::domain::ports::AccessToken;
    use crate::error::{InvalidAmountError, ValidationError};
    use crate::infrastructure::in_memory::InMemoryGateway;
    use rust_decimal_macros::dec;

    fn credentials() -> Credentials {
        Credentials::new(AccessToken::new("test-token"))
    }

    fn transaction() -> Transaction {
        let details = Details::new(dec!(5), dec!(1), dec!(1)).unwrap();
        Transaction::new(Amount::new("USD", dec!(7), Some(details)).unwrap())
    }

    fn payer() -> Payer {
        Payer::credit_card(FundingInstrument::saved_card("CARD-5BT058015C739554AKE2GCEI").unwrap())
    }

    #[tokio::test]
    async fn test_build_and_submit_success() {
        let gateway = InMemoryGateway::new();
        let assembler = PaymentAssembler::new(Box::new(gateway.clone()), PaymentAssembler::DEFAULT_TIMEOUT);
        assert_eq!(assembler.timeout(), Duration::from_secs(30));

        let result = assembler
            .build_and_submit(Intent::Sale, vec![transaction()], payer(), &credentials())
            .await
            .unwrap();

        assert_eq!(result.id, "PAY-1");
        assert_eq!(result.state, PaymentState::Created);
        assert_eq!(gateway.submission_count().await, 1);

        let submitted = gateway.submissions().await;
        assert_eq!(submitted[0].intent(), Intent::Sale);
        assert_eq!(submitted[0].transactions(), &[transaction()]);
    }

    #[tokio::test]
    async fn test_empty_transactions_never_reach_gateway() {
        let gateway = InMemoryGateway::new();
        let assembler = PaymentAssembler::new(Box::new(gateway.clone()), PaymentAssembler::DEFAULT_TIMEOUT);

        let result = assembler
            .build_and_submit(Intent::Sale, vec![], payer(), &credentials())
            .await;

        assert_eq!(
            result,
            Err(SubmissionError::Invalid(ValidationError::EmptyTransactions))
        );
        assert_eq!(gateway.submission_count().await, 0);
    }

    #[tokio::test]
    async fn test_mismatched_saved_card_amount_never_reaches_gateway() {
        let gateway = InMemoryGateway::new();
        let assembler = PaymentAssembler::new(Box::new(gateway.clone()), PaymentAssembler::DEFAULT_TIMEOUT);

        let request = SavedCardPayment {
            card_id: "CARD-1".to_string(),
            currency: "USD".to_string(),
            total: dec!(8),
            subtotal: dec!(5),
            tax: dec!(1),
            shipping: dec!(1),
            description: None,
            intent: None,
        };
        let result = assembler
            .create_payment_with_saved_card(request, &credentials())
            .await;

        assert!(matches!(
            result,
            Err(SubmissionError::Invalid(ValidationError::Amount(
                InvalidAmountError::SumMismatch { .. }
            )))
        ));
        assert_eq!(gateway.submission_count().await, 0);
    }

    #[tokio::test]
    async fn test_saved_card_payment_uses_requested_intent() {
        let gateway = InMemoryGateway::new();
        let assembler = PaymentAssembler::new(Box::new(gateway.clone()), PaymentAssembler::DEFAULT_TIMEOUT);

        let request = SavedCardPayment {
            card_id: "CARD-1".to_string(),
            currency: "EUR".to_string(),
            total: dec!(10.50),
            subtotal: dec!(10),
            tax: dec!(0.50),
            shipping: dec!(0),
            description: None,
            intent: Some(Intent::Authorize),
        };
        assembler
            .create_payment_with_saved_card(request, &credentials())
            .await
            .unwrap();

        let submitted = gateway.submissions().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].intent(), Intent::Authorize);
    }
}
