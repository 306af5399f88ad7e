//! Utility modules for tokentrim
//!
//! - `compress/` - Rewrite rules and the tiered pipeline
//! - `tokens` - Token estimation and savings reporting
//! - `clipboard` - Hand the result back to the user

pub mod compress;

pub mod clipboard;
pub mod tokens;
