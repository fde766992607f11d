//! # Design Check Report
//!
//! Builds the hierarchical pass/fail report from the workbook outputs:
//!
//! ```text
//! Bearing                DCR = d
//! Flexure                Max DCR = max(x, y)
//! ├── X-Direction        DCR = x
//! └── Y-Direction        DCR = y
//! Shear                  Max DCR = max(one-way, two-way)
//! ├── One Way Shear      DCR = v1
//! └── Two Way Shear      DCR = v2
//! ```
//!
//! Every line carries its own classification, seven in total.
//!
//! Value text always shows two decimals (`DCR = 0.90`, never `DCR = 0.9`),
//! so the column lines up in tables. The unrounded DCR is kept in
//! [`CheckItem::dcr`].

use serde::{Deserialize, Serialize};

use crate::calculations::dcr::{classify, DesignStatus, StatusResult};
use crate::errors::{CalcError, CalcResult};
use crate::evaluation::EvaluationOutputs;

/// One line of the report, optionally with sub-checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    /// Stable identifier (e.g. "flexure_x")
    pub key: String,

    /// Display title (e.g. "X-Direction")
    pub title: String,

    pub dcr: f64,

    /// Display value (e.g. "DCR = 0.87")
    pub value_text: String,

    pub status: StatusResult,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CheckItem>,
}

impl CheckItem {
    fn build(key: &str, title: &str, prefix: &str, dcr: f64) -> CalcResult<Self> {
        // A bad DCR here means the workbook produced garbage, not bad user input
        let status = classify(dcr).map_err(|e| CalcError::Internal {
            message: format!("{} check: {}", title, e),
        })?;
        Ok(CheckItem {
            key: key.to_string(),
            title: title.to_string(),
            dcr,
            value_text: format!("{} = {:.2}", prefix, dcr),
            status,
            children: Vec::new(),
        })
    }

    fn single(key: &str, title: &str, dcr: f64) -> CalcResult<Self> {
        CheckItem::build(key, title, "DCR", dcr)
    }

    fn governing(key: &str, title: &str, dcr: f64, children: Vec<CheckItem>) -> CalcResult<Self> {
        let mut item = CheckItem::build(key, title, "Max DCR", dcr)?;
        item.children = children;
        Ok(item)
    }

    /// This item followed by all descendants, depth first
    pub fn flatten(&self) -> Vec<&CheckItem> {
        let mut items = vec![self];
        for child in &self.children {
            items.extend(child.flatten());
        }
        items
    }
}

/// Full design check report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub bearing: CheckItem,
    pub flexure: CheckItem,
    pub shear: CheckItem,

    /// Overall code check text from the workbook
    pub code_check: String,
}

impl DesignReport {
    /// Classify every workbook DCR and assemble the report.
    ///
    /// # Errors
    ///
    /// `Internal` if any DCR is negative or non-finite.
    pub fn from_outputs(outputs: &EvaluationOutputs) -> CalcResult<Self> {
        let bearing = CheckItem::single("bearing", "Bearing", outputs.bearing_dcr)?;

        let flexure = CheckItem::governing(
            "flexure",
            "Flexure",
            outputs.max_flexure_dcr(),
            vec![
                CheckItem::single("flexure_x", "X-Direction", outputs.flexure_x_dcr)?,
                CheckItem::single("flexure_y", "Y-Direction", outputs.flexure_y_dcr)?,
            ],
        )?;

        let shear = CheckItem::governing(
            "shear",
            "Shear",
            outputs.max_shear_dcr(),
            vec![
                CheckItem::single("one_way_shear", "One Way Shear", outputs.one_way_shear_dcr)?,
                CheckItem::single("two_way_shear", "Two Way Shear", outputs.two_way_shear_dcr)?,
            ],
        )?;

        Ok(DesignReport {
            bearing,
            flexure,
            shear,
            code_check: outputs.code_check.clone(),
        })
    }

    /// Top-level checks in display order
    pub fn top_level(&self) -> [&CheckItem; 3] {
        [&self.bearing, &self.flexure, &self.shear]
    }

    /// Every check, parents before their children
    pub fn all_items(&self) -> Vec<&CheckItem> {
        self.top_level().into_iter().flat_map(|item| item.flatten()).collect()
    }

    /// Worst status in the report
    pub fn overall_status(&self) -> DesignStatus {
        self.all_items()
            .iter()
            .map(|item| item.status.status)
            .max()
            .unwrap_or(DesignStatus::Pass)
    }

    /// Whether no check fails (warnings still pass)
    pub fn passes(&self) -> bool {
        self.overall_status() != DesignStatus::Fail
    }

    /// Title of the top-level check with the highest DCR
    pub fn governing_check(&self) -> &str {
        self.top_level()
            .into_iter()
            .max_by(|a, b| a.dcr.total_cmp(&b.dcr))
            .map(|item| item.title.as_str())
            .unwrap_or("None")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(bearing: f64, flex_x: f64, flex_y: f64, one_way: f64, two_way: f64) -> EvaluationOutputs {
        EvaluationOutputs {
            bearing_dcr: bearing,
            flexure_x_dcr: flex_x,
            flexure_y_dcr: flex_y,
            one_way_shear_dcr: one_way,
            two_way_shear_dcr: two_way,
            code_check: "OK".to_string(),
        }
    }

    #[test]
    fn test_report_structure() {
        let report = DesignReport::from_outputs(&outputs(0.87, 0.62, 0.71, 0.45, 0.58)).unwrap();

        assert_eq!(report.all_items().len(), 7);
        assert_eq!(report.bearing.value_text, "DCR = 0.87");
        assert_eq!(report.flexure.value_text, "Max DCR = 0.71");
        assert_eq!(report.flexure.children.len(), 2);
        assert_eq!(report.flexure.children[0].title, "X-Direction");
        assert_eq!(report.shear.children[1].title, "Two Way Shear");
        assert_eq!(report.shear.dcr, 0.58);
        assert_eq!(report.code_check, "OK");
    }

    #[test]
    fn test_value_text_keeps_two_decimals() {
        let report = DesignReport::from_outputs(&outputs(0.9, 0.5, 0.5, 0.5, 0.5)).unwrap();
        assert_eq!(report.bearing.value_text, "DCR = 0.90");
        assert_eq!(report.bearing.dcr, 0.9);
    }

    #[test]
    fn test_governing_items_classified_on_max() {
        let report = DesignReport::from_outputs(&outputs(0.5, 0.96, 0.3, 1.05, 0.2)).unwrap();

        assert_eq!(report.flexure.status.status, DesignStatus::Warning);
        assert_eq!(report.flexure.children[0].status.label, "Ok");
        assert_eq!(report.flexure.children[1].status.status, DesignStatus::Pass);
        assert_eq!(report.shear.status.status, DesignStatus::Fail);
        assert_eq!(report.shear.children[0].status.label, "Failed");
    }

    #[test]
    fn test_overall_status() {
        let passing = DesignReport::from_outputs(&outputs(0.5, 0.5, 0.5, 0.5, 0.5)).unwrap();
        assert_eq!(passing.overall_status(), DesignStatus::Pass);
        assert!(passing.passes());

        let warning = DesignReport::from_outputs(&outputs(0.95, 0.5, 0.5, 0.5, 0.5)).unwrap();
        assert_eq!(warning.overall_status(), DesignStatus::Warning);
        assert!(warning.passes());

        let failing = DesignReport::from_outputs(&outputs(0.5, 0.5, 0.5, 0.5, 1.0)).unwrap();
        assert_eq!(failing.overall_status(), DesignStatus::Fail);
        assert!(!failing.passes());
        assert_eq!(failing.governing_check(), "Shear");
    }

    #[test]
    fn test_bad_dcr_is_internal_error() {
        let err = DesignReport::from_outputs(&outputs(0.5, f64::NAN, 0.5, 0.5, 0.5)).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(!err.is_user_correctable());

        let err = DesignReport::from_outputs(&outputs(-0.1, 0.5, 0.5, 0.5, 0.5)).unwrap_err();
        assert!(err.to_string().contains("Bearing"));
    }

    #[test]
    fn test_serialization_skips_empty_children() {
        let report = DesignReport::from_outputs(&outputs(0.5, 0.5, 0.5, 0.5, 0.5)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["bearing"].get("children").is_none());
        assert_eq!(json["flexure"]["children"].as_array().unwrap().len(), 2);
    }
}
