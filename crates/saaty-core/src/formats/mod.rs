//! # Formats Module
//!
//! Binary encoding for stored submission records.

mod persistence;

pub use persistence::*;
