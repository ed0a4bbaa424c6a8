//! # SECOM Core
//!
//! Core domain types for the SECOM MES quality client.
//!
//! This crate contains pure data and math with no I/O dependencies:
//! - Entity models mirroring the MES quality REST payloads
//! - Classification and defect vocabulary
//! - Derived quality views (summary flags, aggregate statistics)
//! - Error definitions
//!
//! ## Design Principles
//!
//! - **Pure Functions**: No side effects, easy to test
//! - **Server-Shaped**: Models are snapshots of what the MES returns;
//!   every field is optional and nothing is defaulted on decode
//! - **Dependency-Free**: No networking or persistence dependencies

pub mod errors;
pub mod models;
pub mod stats;

// Re-export commonly used types
pub use errors::{CoreError, Result};
pub use models::{
    DefectType, Equipment, Lot, LotStatus, Operator, Page, ProductType, QualityResult, Shift,
    TimeOfDay, CLASSIFICATION_FAIL, CLASSIFICATION_PASS, DEFAULT_RISK_THRESHOLD,
};
pub use stats::{average_quality_score, pass_rate, QualityStatistics, QualitySummary};
