//! Shared domain abstractions for the journey crates.
//!
//! This crate defines the error and clock types every other journey crate
//! depends on. It contains no infrastructure code.

pub mod clock;
pub mod error;
