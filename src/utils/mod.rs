//! Utilities Module
//!
//! Common utilities used across the crate.

pub mod bits;
pub mod config;
pub mod crypto;
pub mod logging;

pub use crypto::*;
