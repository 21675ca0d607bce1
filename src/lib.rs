//! box-scanner - real-time, cross-venue box-spread arbitrage scanner for
//! crypto options.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── core/             # Reusable library components
//! │   ├── domain/       # Pure domain types
//! │   ├── store/        # Consolidated order-book store
//! │   ├── scanner/       # Box-spread detection
//! │   ├── exchange/      # Venue adapters (aevo, lyra)
//! │   └── read_api/      # Ranked snapshot formatting
//! ├── app/              # Configuration and orchestration
//! ├── cli/              # Command-line entry point
//! └── http.rs           # HTTP read surface
//! ```
//!
//! Which venues actually connect is a runtime decision
//! (`[exchanges]` in the config file), not a compile-time one.
//!
//! # Features
//!
//! - `testkit` - scripted venue adapters for integration tests

pub mod app;
pub mod cli;
pub mod core;
pub mod error;
pub mod http;
mod util;

#[cfg(feature = "testkit")]
pub mod testkit;
