use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Classification value the MES records for a passing inspection.
pub const CLASSIFICATION_PASS: i32 = -1;

/// Classification value the MES records for a failing inspection.
pub const CLASSIFICATION_FAIL: i32 = 1;

/// Predicted-risk cutoff above which a result counts as high risk.
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.7;

/// Defect categories tracked by the MES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectType {
    Contamination,
    DimensionalOor,
    ElectricalFail,
    SurfaceDefect,
}

impl DefectType {
    /// Wire name, also used as the path segment in defect lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectType::Contamination => "contamination",
            DefectType::DimensionalOor => "dimensional_oor",
            DefectType::ElectricalFail => "electrical_fail",
            DefectType::SurfaceDefect => "surface_defect",
        }
    }
}

impl fmt::Display for DefectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefectType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contamination" => Ok(DefectType::Contamination),
            "dimensional_oor" => Ok(DefectType::DimensionalOor),
            "electrical_fail" => Ok(DefectType::ElectricalFail),
            "surface_defect" => Ok(DefectType::SurfaceDefect),
            other => Err(CoreError::ParseError(format!(
                "Unknown defect type: '{}'",
                other
            ))),
        }
    }
}

/// Lifecycle states of a production lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    InProgress,
    Completed,
    QualityHold,
    Released,
    Scrapped,
}

impl LotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotStatus::InProgress => "in_progress",
            LotStatus::Completed => "completed",
            LotStatus::QualityHold => "quality_hold",
            LotStatus::Released => "released",
            LotStatus::Scrapped => "scrapped",
        }
    }
}

impl fmt::Display for LotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product type master data, nested inside [`Lot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub product_type_id: Option<i32>,
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub product_family: Option<String>, // e.g. "Logic", "Memory", "Analog"
    pub target_yield: Option<f64>,
    pub specification_version: Option<String>,
    pub created_at: Option<String>,
}

/// Equipment master data, nested inside [`Lot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub equipment_id: Option<i32>,
    pub equipment_code: Option<String>,
    pub equipment_name: Option<String>,
    pub equipment_type: Option<String>, // e.g. "CVD", "Etcher"
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub install_date: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Operator master data; also nested as inspector/reviewer on results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub operator_id: Option<i32>,
    pub operator_code: Option<String>,
    pub operator_name: Option<String>,
    pub employee_number: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Structured time-of-day as the MES serializes `LocalTime`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub nano: Option<u32>,
}

/// Work shift master data, nested inside [`Lot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub shift_id: Option<i32>,
    pub shift_code: Option<String>, // e.g. "DAY", "SWING", "NIGHT"
    pub shift_name: Option<String>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

/// A tracked batch of production units subject to quality inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    pub lot_id: Option<i32>,
    pub lot_number: Option<String>,
    pub product_type: Option<ProductType>,
    pub equipment: Option<Equipment>,
    pub operator: Option<Operator>,
    pub shift: Option<Shift>,
    pub production_start: Option<String>,
    pub production_end: Option<String>,
    pub wafer_count: Option<i32>,
    pub status: Option<LotStatus>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One quality inspection result as returned by the MES.
///
/// Every field is optional: records are immutable snapshots of whatever the
/// server sent, and sparse payloads decode without defaults being invented.
/// Timestamps stay as the ISO 8601 strings found on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityResult {
    pub result_id: Option<i32>,
    pub lot: Option<Lot>,
    pub classification: Option<i32>, // -1 = Pass, 1 = Fail
    pub test_timestamp_raw: Option<String>,
    pub test_datetime: Option<String>,
    pub predicted_risk: Option<f64>, // 0.0 to 1.0
    pub risk_score: Option<f64>,
    pub risk_factors: Option<String>,
    pub model_version: Option<String>,
    pub quality_score: Option<f64>,
    pub defect_type: Option<DefectType>,
    pub defect_code: Option<String>,
    pub defect_location: Option<String>,
    pub inspector: Option<Operator>,
    pub notes: Option<String>,
    pub reviewer: Option<Operator>,
    pub reviewed_at: Option<String>,
    pub disposition: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl QualityResult {
    /// Whether the inspection passed (classification = -1).
    pub fn is_passed(&self) -> bool {
        self.classification == Some(CLASSIFICATION_PASS)
    }

    /// Whether the prediction crosses the default risk cutoff.
    /// A missing prediction counts as zero risk.
    pub fn is_high_risk(&self) -> bool {
        self.predicted_risk.unwrap_or(0.0) > DEFAULT_RISK_THRESHOLD
    }

    /// Whether the MES recorded a defect for this result.
    pub fn has_defects(&self) -> bool {
        self.defect_type.is_some()
    }
}

/// Server-driven pagination envelope, exactly as the MES returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_pages: Option<i32>,
    pub total_elements: Option<i64>,
    pub size: Option<i32>,
    pub content: Option<Vec<T>>,
    pub number: Option<i32>,
    pub number_of_elements: Option<i32>,
    pub first: Option<bool>,
    pub last: Option<bool>,
    pub empty: Option<bool>,
}
