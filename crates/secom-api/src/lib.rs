//! # SECOM API
//!
//! HTTP API client for the SECOM MES quality service.
//! This crate provides typed async access to the quality REST endpoints
//! and a high-level facade with derived quality views.

pub mod client;
pub mod errors;
pub mod sdk;

// Re-export common types for convenience
pub use client::*;
pub use errors::*;
pub use sdk::*;

// Re-export core types that API consumers will need
pub use secom_core::{DefectType, Page, QualityResult, QualityStatistics, QualitySummary};
