use cardpay::domain::amount::{Amount, Details};
use cardpay::domain::funding::{CardType, CreditCard, CreditCardToken, FundingInstrument};
use cardpay::domain::payer::Payer;
use cardpay::domain::payment::{Intent, Payment};
use cardpay::domain::transaction::Transaction;
use cardpay::error::{InvalidAmountError, InvalidFundingInstrumentError};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

fn cents(rng: &mut StdRng, max: i64) -> Decimal {
    Decimal::new(rng.gen_range(0..=max), 2)
}

#[test]
fn test_any_consistent_breakdown_is_accepted() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1_000 {
        let subtotal = Decimal::new(rng.gen_range(1..=10_000_000), 2);
        let tax = cents(&mut rng, 100_000);
        let shipping = cents(&mut rng, 100_000);
        let details = Details::new(subtotal, tax, shipping).unwrap();

        let amount = Amount::new("USD", subtotal + tax + shipping, Some(details));
        assert!(amount.is_ok(), "{subtotal} + {tax} + {shipping} rejected");
    }
}

#[test]
fn test_any_nonzero_difference_is_rejected() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1_000 {
        let subtotal = Decimal::new(rng.gen_range(1..=10_000_000), 2);
        let tax = cents(&mut rng, 100_000);
        let shipping = cents(&mut rng, 100_000);
        let details = Details::new(subtotal, tax, shipping).unwrap();

        // as small as a ten-thousandth, either direction
        let mut delta = Decimal::new(rng.gen_range(1..=1_000_000), 4);
        if rng.gen_bool(0.5) {
            delta = -delta;
        }
        let total = subtotal + tax + shipping + delta;

        assert!(matches!(
            Amount::new("USD", total, Some(details)),
            Err(InvalidAmountError::SumMismatch { .. })
        ));
    }
}

#[test]
fn test_funding_instrument_needs_exactly_one_source() {
    let card = || CreditCard::new("4417119669820331", CardType::Visa, 11, 2030).unwrap();
    let token = || CreditCardToken::new("CARD-5BT058015C739554AKE2GCEI").unwrap();

    assert!(FundingInstrument::new(Some(card()), None).is_ok());
    assert!(FundingInstrument::new(None, Some(token())).is_ok());
    assert_eq!(
        FundingInstrument::new(Some(card()), Some(token())),
        Err(InvalidFundingInstrumentError::Ambiguous)
    );
    assert_eq!(
        FundingInstrument::new(None, None),
        Err(InvalidFundingInstrumentError::Missing)
    );
}

#[test]
fn test_random_payments_survive_wire_round_trip() {
    let mut rng = StdRng::seed_from_u64(3);
    let intents = [Intent::Sale, Intent::Authorize, Intent::Order];
    let currencies = ["USD", "EUR", "GBP", "JPY", "CAD"];

    for i in 0..200 {
        let transactions = (0..rng.gen_range(1..4))
            .map(|n| {
                let subtotal = Decimal::new(rng.gen_range(1..=500_000), 2);
                let tax = cents(&mut rng, 5_000);
                let shipping = cents(&mut rng, 5_000);
                let details = Details::new(subtotal, tax, shipping).unwrap();
                let currency = currencies[rng.gen_range(0..currencies.len())];
                let amount = Amount::new(currency, subtotal + tax + shipping, Some(details)).unwrap();
                Transaction::new(amount).with_description(format!("item {n}"))
            })
            .collect();

        let instrument = if rng.gen_bool(0.5) {
            FundingInstrument::saved_card(format!("CARD-{i}")).unwrap()
        } else {
            let card = CreditCard::new("4417119669820331", CardType::Visa, rng.gen_range(1..=12), 2031)
                .unwrap()
                .with_holder("Joe", "Shopper");
            FundingInstrument::new(Some(card), None).unwrap()
        };
        let payer = Payer::credit_card(instrument);
        let intent = intents[rng.gen_range(0..intents.len())];
        let payment = Payment::new(intent, payer, transactions).unwrap();

        let json = serde_json::to_string(&payment).unwrap();
        let decoded: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.intent(), payment.intent());
        assert_eq!(decoded.transactions(), payment.transactions());
        assert_eq!(decoded.payer(), payment.payer());
    }
}
