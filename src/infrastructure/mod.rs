//! Adapters for the domain ports: an HTTP client for the real gateway and an
//! in-memory one for dry runs and tests.

pub mod in_memory;
pub mod rest;
