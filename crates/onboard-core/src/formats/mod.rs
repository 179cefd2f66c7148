//! # Formats Module
//!
//! Binary encoding of employee records for the disk-backed store.

mod persistence;

pub use persistence::*;
