//! Request model for card payments and the ports through which it reaches a
//! gateway. Every type validates itself on construction and on
//! deserialization, so an invalid request graph cannot be built.

pub mod amount;
pub mod funding;
pub mod payer;
pub mod payment;
pub mod ports;
pub mod transaction;
