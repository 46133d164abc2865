//! Terminal output helpers for nearby-places
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Distance and coordinate formatting
//! - Plain-text rendering of ranked places

#![warn(missing_docs)]

pub mod output;
pub mod table;
