//! Data models.

pub mod config;
pub mod document;
pub mod receipt;
pub mod validation;
