#![allow(dead_code)]

use async_trait::async_trait;
use cardpay::application::saved_card::SavedCardPayment;
use cardpay::domain::payment::{Payment, PaymentResult, PaymentState};
use cardpay::domain::ports::{AccessToken, Credentials, GatewayClient};
use cardpay::error::GatewayError;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const CARD_ID: &str = "CARD-5BT058015C739554AKE2GCEI";

pub enum Behaviour {
    Accept(&'static str, PaymentState),
    Fail(GatewayError),
    Hang,
}

/// Gateway double that answers every call the same way and counts calls.
pub struct ScriptedGateway {
    behaviour: Behaviour,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGateway {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, still readable after the double is boxed away.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl GatewayClient for ScriptedGateway {
    async fn submit(
        &self,
        _payment: &Payment,
        _credentials: &Credentials,
    ) -> Result<PaymentResult, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Accept(id, state) => Ok(PaymentResult::new(*id, state.clone())),
            Behaviour::Fail(err) => Err(err.clone()),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(GatewayError::Network("unreachable".to_string()))
            }
        }
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(AccessToken::new("A015.test-token"))
}

/// The stored-card sale: 5 subtotal + 1 tax + 1 shipping = 7 USD.
pub fn saved_card_sale() -> SavedCardPayment {
    SavedCardPayment {
        card_id: CARD_ID.to_string(),
        currency: "USD".to_string(),
        total: dec!(7),
        subtotal: dec!(5),
        tax: dec!(1),
        shipping: dec!(1),
        description: Some("This is the payment transaction description.".to_string()),
        intent: None,
    }
}
