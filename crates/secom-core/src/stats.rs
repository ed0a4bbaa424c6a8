//! Derived quality views built from raw server responses.
//!
//! All math in this module is pure; the API crate supplies the fetched
//! pages and the generation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Page, QualityResult};

/// A quality result annotated with client-derived status flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitySummary {
    pub result: QualityResult,
    pub is_passed: bool,
    pub is_high_risk: bool,
    pub has_defects: bool,
    pub summary_generated_at: DateTime<Utc>,
}

impl QualitySummary {
    /// Derive the summary flags from a fetched result.
    pub fn from_result(result: QualityResult, generated_at: DateTime<Utc>) -> Self {
        Self {
            is_passed: result.is_passed(),
            is_high_risk: result.is_high_risk(),
            has_defects: result.has_defects(),
            result,
            summary_generated_at: generated_at,
        }
    }
}

/// Aggregate pass/fail/risk statistics over the quality dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityStatistics {
    pub total_results: i64,
    pub passed_count: i64,
    pub failed_count: i64,
    pub high_risk_count: usize,
    pub pass_rate: f64,
    pub average_quality_score: f64,
    pub statistics_generated_at: DateTime<Utc>,
}

impl QualityStatistics {
    /// Assemble the aggregate view from the four raw server responses.
    ///
    /// Counts come from the server-reported totals. The average quality
    /// score covers only the content of the `all` page passed in, not the
    /// whole dataset.
    pub fn from_responses(
        all: &Page<QualityResult>,
        passed: &Page<QualityResult>,
        failed: &Page<QualityResult>,
        high_risk: &[QualityResult],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let total = all.total_elements.unwrap_or(0);
        let passed_count = passed.total_elements.unwrap_or(0);
        let failed_count = failed.total_elements.unwrap_or(0);
        let content = all.content.as_deref().unwrap_or(&[]);

        Self {
            total_results: total,
            passed_count,
            failed_count,
            high_risk_count: high_risk.len(),
            pass_rate: pass_rate(passed_count, total),
            average_quality_score: average_quality_score(content),
            statistics_generated_at: generated_at,
        }
    }
}

/// Percentage of passed inspections; zero when nothing was inspected.
pub fn pass_rate(passed: i64, total: i64) -> f64 {
    if total > 0 {
        passed as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Arithmetic mean of `qualityScore` over a page's content.
/// A missing score counts as zero; empty content yields zero.
pub fn average_quality_score(results: &[QualityResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let sum: f64 = results
        .iter()
        .map(|r| r.quality_score.unwrap_or(0.0))
        .sum();
    sum / results.len() as f64
}
