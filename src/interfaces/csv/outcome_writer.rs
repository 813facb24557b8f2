use crate::domain::payment::PaymentResult;
use crate::error::{Result, SubmissionError};
use serde::Serialize;
use std::io::Write;

/// One output row per submitted input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub row: usize,
    pub payment_id: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl PaymentOutcome {
    pub fn new(row: usize, result: &std::result::Result<PaymentResult, SubmissionError>) -> Self {
        match result {
            Ok(payment) => Self {
                row,
                payment_id: Some(payment.id.clone()),
                state: Some(payment.state.to_string()),
                error: None,
            },
            Err(err) => Self {
                row,
                payment_id: None,
                state: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Writes submission outcomes as CSV with a `row,payment_id,state,error` header.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, outcome: &PaymentOutcome) -> Result<()> {
        self.writer.serialize(outcome)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
