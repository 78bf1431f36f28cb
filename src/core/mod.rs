//! Core business logic module
//!
//! This module contains the components that enforce session rules:
//! - `traits` - Trait abstractions for interchangeable implementations
//! - `service` - Session operation rule engine

pub mod service;
pub mod traits;

pub use service::TellerService;
pub use traits::AccountStore;
