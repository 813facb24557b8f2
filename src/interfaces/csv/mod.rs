//! Batch I/O: saved-card payments in, submission outcomes out.

pub mod outcome_writer;
pub mod payment_reader;
