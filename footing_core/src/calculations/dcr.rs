//! # Demand-Capacity Ratio Classification
//!
//! Maps a DCR to a pass / warning / fail status:
//!
//! | DCR range            | Status  | Label    |
//! |----------------------|---------|----------|
//! | `dcr >= 1.00`        | Fail    | "Failed" |
//! | `0.95 <= dcr < 1.00` | Warning | "Ok"     |
//! | `dcr < 0.95`         | Pass    | "Pass"   |
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::dcr::{classify, DesignStatus};
//!
//! assert_eq!(classify(0.95).unwrap().status, DesignStatus::Warning);
//! assert_eq!(classify(1.0).unwrap().label, "Failed");
//! assert!(classify(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// DCR at or above which a check fails
pub const FAIL_THRESHOLD: f64 = 1.00;

/// DCR at or above which a passing check is flagged as close to capacity
pub const WARNING_THRESHOLD: f64 = 0.95;

/// Outcome of a single design check, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DesignStatus {
    Pass,
    Warning,
    Fail,
}

impl DesignStatus {
    /// Human label shown next to the value
    pub fn label(&self) -> &'static str {
        match self {
            DesignStatus::Pass => "Pass",
            DesignStatus::Warning => "Ok",
            DesignStatus::Fail => "Failed",
        }
    }

    /// Status code understood by the host data view
    pub fn data_status(&self) -> &'static str {
        match self {
            DesignStatus::Pass => "success",
            DesignStatus::Warning => "warning",
            DesignStatus::Fail => "error",
        }
    }

    /// Short marker for text output
    pub fn marker(&self) -> &'static str {
        match self {
            DesignStatus::Pass => "[PASS]",
            DesignStatus::Warning => "[WARN]",
            DesignStatus::Fail => "[FAIL]",
        }
    }
}

impl std::fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DesignStatus::Pass => "PASS",
            DesignStatus::Warning => "WARNING",
            DesignStatus::Fail => "FAIL",
        };
        write!(f, "{}", name)
    }
}

/// Status plus its display label.
///
/// ## JSON Example
///
/// ```json
/// { "status": "Warning", "label": "Ok" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: DesignStatus,
    pub label: String,
}

impl From<DesignStatus> for StatusResult {
    fn from(status: DesignStatus) -> Self {
        StatusResult {
            status,
            label: status.label().to_string(),
        }
    }
}

/// Classify a demand-capacity ratio.
///
/// # Errors
///
/// `InvalidInput` if `dcr` is negative, NaN or infinite.
pub fn classify(dcr: f64) -> CalcResult<StatusResult> {
    if !dcr.is_finite() || dcr < 0.0 {
        return Err(CalcError::invalid_input(
            "dcr",
            dcr.to_string(),
            "DCR must be a finite, non-negative number",
        ));
    }

    let status = match dcr {
        d if d >= FAIL_THRESHOLD => DesignStatus::Fail,
        d if d >= WARNING_THRESHOLD => DesignStatus::Warning,
        _ => DesignStatus::Pass,
    };
    Ok(status.into())
}
