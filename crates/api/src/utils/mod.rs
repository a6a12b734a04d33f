//! Utility helpers for the client crate

pub mod files;
pub mod logging;
