//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates the node conversion that feeds struct values into the
//! flattening engine, plus column name constants.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
