//! Core module for tokentrim
//!
//! This module contains the request, response and result types exchanged
//! with the integration layer.

mod types;

pub use types::*;
