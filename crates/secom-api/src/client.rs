use std::time::Duration;

use crate::errors::{ApiError, HttpError, Result};
use log::{debug, error, info, trace};
use reqwest::{Client, Method, Response, StatusCode};
use secom_core::{DefectType, Page, QualityResult, DEFAULT_RISK_THRESHOLD};
use serde_json::Value;
use url::Url;

/// Default base URL of the MES quality service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable consulted by [`SecomApiClient::from_env`].
pub const BASE_URL_ENV: &str = "SECOM_API_URL";

/// Trait for providing configuration to the API client
/// This allows the host application to implement config without circular dependencies
pub trait ApiConfig {
    type Error;

    /// Get the base URL for the API (optional, defaults to the local MES gateway)
    fn get_base_url(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(None)
    }

    /// Get the per-request timeout (optional, defaults to 30s)
    fn get_timeout(&self) -> std::result::Result<Option<Duration>, Self::Error> {
        Ok(None)
    }
}

/// HTTP client for the SECOM MES Quality API
///
/// The struct holds configuration only. Every call builds its own
/// transport client scoped to that call and drops it on all exit paths,
/// so no connection survives between requests.
#[derive(Debug, Clone)]
pub struct SecomApiClient {
    base_url: String,
    timeout: Duration,
}

impl SecomApiClient {
    /// Create a new API client
    pub fn new(base_url: Option<String>, timeout: Option<Duration>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);

        debug!("Creating SecomApiClient");
        debug!("  Base URL: {}", base_url);
        debug!("  Timeout: {:?}", timeout);

        Self { base_url, timeout }
    }

    /// Create API client with custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        debug!("Creating SecomApiClient with custom base URL: {}", base_url);
        Self::new(Some(base_url), None)
    }

    /// Create API client from the `SECOM_API_URL` environment variable,
    /// falling back to the default base URL when unset
    pub fn from_env() -> Result<Self> {
        debug!("Creating SecomApiClient from environment");
        match std::env::var(BASE_URL_ENV) {
            Ok(raw) => {
                Url::parse(&raw).map_err(|e| {
                    error!("{} does not hold a valid URL: {}", BASE_URL_ENV, e);
                    ApiError::Http(HttpError::Config(format!(
                        "{} is not a valid base URL: {}",
                        BASE_URL_ENV, e
                    )))
                })?;
                debug!("Using base URL from environment: {}", raw);
                Ok(Self::new(Some(raw), None))
            }
            Err(_) => {
                debug!("{} not set, using default base URL", BASE_URL_ENV);
                Ok(Self::new(None, None))
            }
        }
    }

    /// Create API client from any configuration implementing ApiConfig trait
    pub fn from_config<C>(config: &C) -> std::result::Result<Self, C::Error>
    where
        C: ApiConfig,
    {
        debug!("Creating SecomApiClient from config");
        let base_url = config.get_base_url()?;
        let timeout = config.get_timeout()?;

        if let Some(ref url) = base_url {
            debug!("Got custom base URL from config: {}", url);
        } else {
            debug!("Using default base URL");
        }

        Ok(Self::new(base_url, timeout))
    }

    /// Base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout applied by this client
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the full request URL from the configured base and an endpoint path
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Issue one HTTP request with a transport client scoped to this call
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        query: Option<&[(String, String)]>,
    ) -> Result<Response> {
        let url = self.endpoint_url(endpoint);

        debug!("HTTP {} request to: {}", method, url);
        trace!("Request headers:");
        trace!("  Content-Type: application/json");
        trace!("  Accept: application/json");

        // Scoped transport: built here, dropped when this call returns
        let client = Client::builder().timeout(self.timeout).build().map_err(|e| {
            error!("Failed to build transport client: {:?}", e);
            HttpError::Request(e)
        })?;

        let mut request = client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(query) = query {
            if !query.is_empty() {
                trace!("Query parameters: {:?}", query);
                request = request.query(query);
            }
        }

        if let Some(body) = body {
            trace!(
                "Request body: {}",
                serde_json::to_string_pretty(&body).unwrap_or_else(|_| "Invalid JSON".to_string())
            );
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            error!("Request failed: {:?}", e);
            HttpError::Request(e)
        })?;

        debug!("Response status: {}", response.status());

        self.handle_response(response).await
    }

    /// Handle HTTP response and convert errors
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            debug!("Request successful with status: {}", status);
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        error!("Request failed with status: {}", status);
        debug!("Error response body: {}", error_text);

        let api_error = match status {
            StatusCode::NOT_FOUND => HttpError::NotFound {
                message: error_text,
            },
            _ => HttpError::Status {
                status: status.as_u16(),
                message: error_text,
            },
        };

        Err(ApiError::Http(api_error))
    }

    /// Get a single quality result by its result ID
    pub async fn get_result_by_id(&self, result_id: i32) -> Result<QualityResult> {
        debug!("Fetching quality result {}", result_id);
        let endpoint = format!("quality/results/{}", result_id);
        let response = self.request(Method::GET, &endpoint, None, None).await?;
        let result: QualityResult = response.json().await.map_err(HttpError::Decode)?;

        info!("Successfully fetched quality result {}", result_id);

        Ok(result)
    }

    /// Get all quality results, optionally pinned to a page and size
    pub async fn get_all_results(
        &self,
        page: Option<i32>,
        size: Option<i32>,
    ) -> Result<Page<QualityResult>> {
        debug!("Fetching quality results (page: {:?}, size: {:?})", page, size);
        let params = page_params(page, size);
        let response = self
            .request(Method::GET, "quality/results", None, Some(&params))
            .await?;
        let results: Page<QualityResult> = response.json().await.map_err(HttpError::Decode)?;

        info!(
            "Successfully fetched {} of {} quality results",
            results.number_of_elements.unwrap_or(0),
            results.total_elements.unwrap_or(0)
        );

        Ok(results)
    }

    /// Get results that passed inspection (classification = -1)
    pub async fn get_passed_results(
        &self,
        page: Option<i32>,
        size: Option<i32>,
    ) -> Result<Page<QualityResult>> {
        debug!(
            "Fetching passed quality results (page: {:?}, size: {:?})",
            page, size
        );
        let params = page_params(page, size);
        let response = self
            .request(Method::GET, "quality/results/passed", None, Some(&params))
            .await?;
        let results: Page<QualityResult> = response.json().await.map_err(HttpError::Decode)?;

        info!(
            "Successfully fetched {} passed results",
            results.number_of_elements.unwrap_or(0)
        );

        Ok(results)
    }

    /// Get results that failed inspection (classification = 1)
    pub async fn get_failed_results(
        &self,
        page: Option<i32>,
        size: Option<i32>,
    ) -> Result<Page<QualityResult>> {
        debug!(
            "Fetching failed quality results (page: {:?}, size: {:?})",
            page, size
        );
        let params = page_params(page, size);
        let response = self
            .request(Method::GET, "quality/results/failed", None, Some(&params))
            .await?;
        let results: Page<QualityResult> = response.json().await.map_err(HttpError::Decode)?;

        info!(
            "Successfully fetched {} failed results",
            results.number_of_elements.unwrap_or(0)
        );

        Ok(results)
    }

    /// Get the quality result recorded for a production lot
    pub async fn get_result_by_lot_id(&self, lot_id: i32) -> Result<QualityResult> {
        debug!("Fetching quality result for lot {}", lot_id);
        let endpoint = format!("quality/results/lot/{}", lot_id);
        let response = self.request(Method::GET, &endpoint, None, None).await?;
        let result: QualityResult = response.json().await.map_err(HttpError::Decode)?;

        info!("Successfully fetched quality result for lot {}", lot_id);

        Ok(result)
    }

    /// Get results whose predicted risk exceeds the threshold
    ///
    /// `None` resolves to the default cutoff of 0.7; the parameter is
    /// always sent.
    pub async fn get_high_risk_results(
        &self,
        threshold: Option<f64>,
    ) -> Result<Vec<QualityResult>> {
        let threshold = threshold.unwrap_or(DEFAULT_RISK_THRESHOLD);
        debug!("Fetching high risk results (threshold: {})", threshold);
        let params = vec![("threshold".to_string(), threshold.to_string())];
        let response = self
            .request(Method::GET, "quality/results/high-risk", None, Some(&params))
            .await?;
        let results: Vec<QualityResult> = response.json().await.map_err(HttpError::Decode)?;

        info!("Successfully fetched {} high risk results", results.len());

        Ok(results)
    }

    /// Get all results recorded with the given defect type
    ///
    /// The server answers 404 when no result carries the defect type.
    pub async fn get_results_by_defect_type(
        &self,
        defect_type: DefectType,
    ) -> Result<Vec<QualityResult>> {
        debug!("Fetching quality results with defect type {}", defect_type);
        let endpoint = format!("quality/results/defect/{}", defect_type);
        let response = self.request(Method::GET, &endpoint, None, None).await?;
        let results: Vec<QualityResult> = response.json().await.map_err(HttpError::Decode)?;

        info!(
            "Successfully fetched {} {} results",
            results.len(),
            defect_type
        );

        Ok(results)
    }
}

impl Default for SecomApiClient {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Assemble pagination query parameters, omitting what the caller left
/// unset so the server applies its own defaults (page 0, size 20)
fn page_params(page: Option<i32>, size: Option<i32>) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(page) = page {
        params.push(("page".to_string(), page.to_string()));
    }
    if let Some(size) = size {
        params.push(("size".to_string(), size.to_string()));
    }
    params
}


// TODO: Add a page-walking helper for full-dataset exports
