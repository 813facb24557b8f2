use crate::domain::payment::{Payment, PaymentResult, PaymentState};
use crate::domain::ports::{Credentials, GatewayClient};
use crate::error::GatewayError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A gateway that accepts every payment without leaving the process.
///
/// Ids are assigned sequentially (`PAY-1`, `PAY-2`, ...) and every accepted
/// payment is recorded, so clones share one submission log. Backs `--dry-run`
/// and the tests.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    submissions: Arc<RwLock<Vec<Payment>>>,
}

impl InMemoryGateway {
    /// Creates a new gateway with an empty submission log.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submissions(&self) -> Vec<Payment> {
        self.submissions.read().await.clone()
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl GatewayClient for InMemoryGateway {
    async fn submit(
        &self,
        payment: &Payment,
        _credentials: &Credentials,
    ) -> Result<PaymentResult, GatewayError> {
        let mut submissions = self.submissions.write().await;
        submissions.push(payment.clone());
        let id = format!("PAY-{}", submissions.len());

        Ok(PaymentResult::new(id, PaymentState::Created))
    }
}
