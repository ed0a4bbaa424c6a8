use chrono::Utc;
use log::{debug, info, warn};

use crate::client::SecomApiClient;
use crate::errors::{ApiError, HttpError, Result};
use secom_core::{DefectType, Page, QualityResult, QualityStatistics, QualitySummary};

/// High-level facade over the SECOM quality API
pub struct Secom {
    api_client: SecomApiClient,
}

impl Secom {
    /// Create a new facade against the default local MES gateway
    pub fn new() -> Self {
        Self {
            api_client: SecomApiClient::new(None, None),
        }
    }

    /// Create a facade around an existing client
    pub fn with_client(api_client: SecomApiClient) -> Self {
        Self { api_client }
    }

    /// Create from environment configuration
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_client: SecomApiClient::from_env()?,
        })
    }

    /// Access the underlying endpoint client
    pub fn client(&self) -> &SecomApiClient {
        &self.api_client
    }

    /// Fetch a single quality result by ID
    pub async fn result_by_id(&self, result_id: i32) -> Result<QualityResult> {
        self.api_client.get_result_by_id(result_id).await
    }

    /// Fetch a page of all quality results
    pub async fn all_results(
        &self,
        page: Option<i32>,
        size: Option<i32>,
    ) -> Result<Page<QualityResult>> {
        self.api_client.get_all_results(page, size).await
    }

    /// Fetch a page of passed results
    pub async fn passed_results(
        &self,
        page: Option<i32>,
        size: Option<i32>,
    ) -> Result<Page<QualityResult>> {
        self.api_client.get_passed_results(page, size).await
    }

    /// Fetch a page of failed results
    pub async fn failed_results(
        &self,
        page: Option<i32>,
        size: Option<i32>,
    ) -> Result<Page<QualityResult>> {
        self.api_client.get_failed_results(page, size).await
    }

    /// Fetch the quality result recorded for a lot
    pub async fn result_by_lot(&self, lot_id: i32) -> Result<QualityResult> {
        self.api_client.get_result_by_lot_id(lot_id).await
    }

    /// Fetch results above a predicted-risk threshold (default 0.7)
    pub async fn high_risk_results(&self, threshold: Option<f64>) -> Result<Vec<QualityResult>> {
        self.api_client.get_high_risk_results(threshold).await
    }

    /// Fetch results carrying a specific defect type
    pub async fn results_by_defect_type(
        &self,
        defect_type: DefectType,
    ) -> Result<Vec<QualityResult>> {
        self.api_client.get_results_by_defect_type(defect_type).await
    }

    /// Fetch a result and annotate it with derived status flags
    ///
    /// Fails exactly as [`SecomApiClient::get_result_by_id`] fails. The
    /// generation stamp comes from the process clock, not the server.
    pub async fn quality_summary(&self, result_id: i32) -> Result<QualitySummary> {
        debug!("Building quality summary for result {}", result_id);
        let result = self.api_client.get_result_by_id(result_id).await?;
        let summary = QualitySummary::from_result(result, Utc::now());

        info!(
            "Summary for result {}: passed={}, high_risk={}, defects={}",
            result_id, summary.is_passed, summary.is_high_risk, summary.has_defects
        );

        Ok(summary)
    }

    /// Aggregate pass/fail/risk statistics across the quality dataset
    ///
    /// Issues four sequential calls (all, passed, failed, high-risk). The
    /// calls are not snapshot-isolated, so concurrent writes on the server
    /// can skew the aggregate. `average_quality_score` covers only the
    /// first page returned by the unpaged all-results call, not the whole
    /// dataset.
    pub async fn quality_statistics(&self) -> Result<QualityStatistics> {
        debug!("Collecting quality statistics");
        let all = self.api_client.get_all_results(None, None).await?;
        let passed = self.api_client.get_passed_results(None, None).await?;
        let failed = self.api_client.get_failed_results(None, None).await?;
        let high_risk = self.api_client.get_high_risk_results(None).await?;

        let stats = QualityStatistics::from_responses(&all, &passed, &failed, &high_risk, Utc::now());

        info!(
            "Statistics: {} results, pass rate {:.1}%",
            stats.total_results, stats.pass_rate
        );

        Ok(stats)
    }

    /// Look up a result by ID, absorbing absence instead of failing
    ///
    /// A 404 and transport-level failures (connect, timeout) both come
    /// back as `Ok(None)`; other HTTP status faults and decode faults
    /// propagate.
    pub async fn safe_get_result(&self, result_id: i32) -> Result<Option<QualityResult>> {
        match self.api_client.get_result_by_id(result_id).await {
            Ok(result) => Ok(Some(result)),
            Err(ApiError::Http(HttpError::NotFound { .. })) => {
                debug!("Quality result {} not found", result_id);
                Ok(None)
            }
            Err(ApiError::Http(HttpError::Request(e))) => {
                warn!(
                    "Transport failure looking up result {}: {:?}",
                    result_id, e
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for Secom {
    fn default() -> Self {
        Self::new()
    }
}
