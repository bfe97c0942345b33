//! Domain layer for the offline calculator.

pub mod local_client;
pub mod service;
