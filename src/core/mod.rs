//! Reusable library components: domain types, the order-book store, the
//! box scanner, venue exchange adapters, and the read API.

pub mod domain;
pub mod exchange;
pub mod read_api;
pub mod scanner;
pub mod store;
