//! # secom-rs
//!
//! Typed async Rust client for the SECOM MES quality REST API.
//!
//! The workspace splits into a pure domain crate (`secom-core`: entity
//! models, classification vocabulary, derived-view math) and an HTTP crate
//! (`secom-api`: request dispatch, endpoint methods, the [`Secom`] facade).
//! This crate re-exports both surfaces.
//!
//! ```no_run
//! use secom_rs::Secom;
//!
//! # async fn demo() -> secom_rs::Result<()> {
//! let secom = Secom::new();
//! let summary = secom.quality_summary(1).await?;
//! println!(
//!     "passed: {}, high risk: {}",
//!     summary.is_passed, summary.is_high_risk
//! );
//! # Ok(())
//! # }
//! ```

// Re-export main public types
pub use secom_api::{
    ApiConfig, ApiError, HttpError, Result, Secom, SecomApiClient, BASE_URL_ENV,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use secom_core::{
    average_quality_score, pass_rate, CoreError, DefectType, Equipment, Lot, LotStatus, Operator,
    Page, ProductType, QualityResult, QualityStatistics, QualitySummary, Shift, TimeOfDay,
    CLASSIFICATION_FAIL, CLASSIFICATION_PASS, DEFAULT_RISK_THRESHOLD,
};
