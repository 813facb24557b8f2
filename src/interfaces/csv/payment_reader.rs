use crate::application::saved_card::SavedCardPayment;
use crate::error::{CardpayError, Result};
use std::io::Read;

/// Reads saved-card payments from a CSV source.
///
/// Expected header: `card_id, currency, total, subtotal, tax, shipping,
/// description, intent`. The last two columns may be empty or omitted.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes payments, one
    /// item per data row.
    pub fn payments(self) -> impl Iterator<Item = Result<SavedCardPayment>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CardpayError::from))
    }
}
