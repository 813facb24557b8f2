//! Application layer: assembles payment requests and drives a single
//! submission through the [`GatewayClient`](crate::domain::ports::GatewayClient)
//! port. Nothing here holds state between calls.

pub mod assembler;
pub mod saved_card;
