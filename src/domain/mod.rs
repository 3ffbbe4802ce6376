//! Core domain types and logic.

pub mod analyzer;
pub mod error;
pub mod indicator;
pub mod instrument;
pub mod loader;
pub mod price_bar;
