//! # Workbook Evaluation
//!
//! The governing design checks (bearing, flexure, one-way and two-way
//! shear) are computed by an external spreadsheet workbook. This module is
//! the boundary to it:
//!
//! - [`workbook_inputs`] turns a [`FootingInput`] into the 23 named cells
//!   the workbook expects. Booleans become `"YES"`/`"NO"` here and nowhere
//!   else.
//! - [`SpreadsheetEvaluator`] is the seam for whatever actually evaluates
//!   the workbook ([`ProcessEvaluator`] runs an external command).
//! - [`evaluate_with_timeout`] bounds the call and parses the six named
//!   outputs into [`EvaluationOutputs`].
//!
//! Evaluation is all-or-nothing: any failure, including a timeout, is an
//! `EvaluationFailure` and no partial outputs are returned.

pub mod process;

pub use process::ProcessEvaluator;

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::footing::FootingInput;

/// Workbook output cell names
pub mod outputs {
    pub const BEARING_DCR: &str = "Bearing_DCR";
    pub const FLEXURE_X_DCR: &str = "Flexure_X_DCR";
    pub const FLEXURE_Y_DCR: &str = "Flexure_Y_DCR";
    pub const ONE_WAY_SHEAR_DCR: &str = "OneWayShear_DCR";
    pub const TWO_WAY_SHEAR_DCR: &str = "TwoWayShear_DCR";
    pub const CODE_CHECK: &str = "CodeCheck";
}

/// A single workbook cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Workbook flag cells take "YES" / "NO"
    pub fn flag(value: bool) -> Self {
        CellValue::Text(if value { "YES" } else { "NO" }.to_string())
    }

    /// Numeric value, accepting numeric text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Bool(_) => None,
        }
    }

    /// Display text of the cell
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

/// One named workbook input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedInput {
    pub name: String,
    pub value: CellValue,
}

impl NamedInput {
    pub fn number(name: &str, value: f64) -> Self {
        NamedInput {
            name: name.to_string(),
            value: CellValue::Number(value),
        }
    }

    pub fn flag(name: &str, value: bool) -> Self {
        NamedInput {
            name: name.to_string(),
            value: CellValue::flag(value),
        }
    }
}

/// Map a footing input to the workbook's named input cells, in sheet order.
pub fn workbook_inputs(input: &FootingInput) -> Vec<NamedInput> {
    vec![
        NamedInput::number("PDL", input.loads.dead_load.value()),
        NamedInput::number("PLL", input.loads.live_load.value()),
        NamedInput::number("woverburden", input.loads.overburden.value()),
        NamedInput::number("qallow", input.allowable_bearing.value()),
        NamedInput::flag("Include Ftg SW", input.include_footing_self_weight),
        NamedInput::number("Xftg", input.footing.width_x.value()),
        NamedInput::number("Yftg", input.footing.length_y.value()),
        NamedInput::number("Xcol", input.column.width_x.value()),
        NamedInput::number("Ycol", input.column.length_y.value()),
        NamedInput::number("fc", input.fc.value()),
        NamedInput::number("Cover", input.cover.value()),
        NamedInput::number("h", input.footing.thickness.value()),
        NamedInput::number("Bar Size x", f64::from(input.flexure_x.bar_size.designation())),
        NamedInput::number("# Bars x", f64::from(input.flexure_x.bar_count)),
        NamedInput::number("fy x", input.flexure_x.fy.value()),
        NamedInput::number("Bar Size y", f64::from(input.flexure_y.bar_size.designation())),
        NamedInput::number("# Bars y", f64::from(input.flexure_y.bar_count)),
        NamedInput::number("fy y", input.flexure_y.fy.value()),
        NamedInput::number("fyt", input.shear.fyt.value()),
        NamedInput::number("Bar Size shear", f64::from(input.shear.bar_size.designation())),
        NamedInput::number("Spacing - x", input.shear.spacing_x.value()),
        NamedInput::number("Spacing - y", input.shear.spacing_y.value()),
        NamedInput::flag("Include", input.include_size_effect),
    ]
}

/// Something that can evaluate the footing workbook.
///
/// Implementations must be deterministic in their inputs and return either
/// every output cell or an error.
pub trait SpreadsheetEvaluator: Send + Sync {
    fn evaluate(&self, inputs: &[NamedInput]) -> CalcResult<BTreeMap<String, CellValue>>;

    /// Evaluate, giving up after `timeout`.
    ///
    /// Evaluators that start external work must stop it before returning a
    /// timeout error. The default runs [`evaluate`](Self::evaluate) and relies
    /// on the caller abandoning the result.
    fn evaluate_within(&self, inputs: &[NamedInput], timeout: Duration) -> CalcResult<BTreeMap<String, CellValue>> {
        let _ = timeout;
        self.evaluate(inputs)
    }
}

/// The six workbook outputs the design report needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutputs {
    pub bearing_dcr: f64,
    pub flexure_x_dcr: f64,
    pub flexure_y_dcr: f64,
    pub one_way_shear_dcr: f64,
    pub two_way_shear_dcr: f64,

    /// Overall code check text as reported by the workbook
    pub code_check: String,
}

fn dcr_cell(cells: &BTreeMap<String, CellValue>, name: &str) -> CalcResult<f64> {
    let cell = cells
        .get(name)
        .ok_or_else(|| CalcError::evaluation_failure(format!("workbook did not return '{}'", name)))?;
    cell.as_number().ok_or_else(|| {
        CalcError::evaluation_failure(format!("'{}' is not numeric: {}", name, cell.as_text()))
    })
}

impl EvaluationOutputs {
    /// Pull the named outputs out of a workbook result.
    pub fn from_cells(cells: &BTreeMap<String, CellValue>) -> CalcResult<Self> {
        let code_check = cells
            .get(outputs::CODE_CHECK)
            .map(CellValue::as_text)
            .ok_or_else(|| {
                CalcError::evaluation_failure(format!("workbook did not return '{}'", outputs::CODE_CHECK))
            })?;

        Ok(EvaluationOutputs {
            bearing_dcr: dcr_cell(cells, outputs::BEARING_DCR)?,
            flexure_x_dcr: dcr_cell(cells, outputs::FLEXURE_X_DCR)?,
            flexure_y_dcr: dcr_cell(cells, outputs::FLEXURE_Y_DCR)?,
            one_way_shear_dcr: dcr_cell(cells, outputs::ONE_WAY_SHEAR_DCR)?,
            two_way_shear_dcr: dcr_cell(cells, outputs::TWO_WAY_SHEAR_DCR)?,
            code_check,
        })
    }

    /// Governing flexure DCR of the two directions
    pub fn max_flexure_dcr(&self) -> f64 {
        self.flexure_x_dcr.max(self.flexure_y_dcr)
    }

    /// Governing shear DCR of one-way and two-way shear
    pub fn max_shear_dcr(&self) -> f64 {
        self.one_way_shear_dcr.max(self.two_way_shear_dcr)
    }
}

/// Evaluate the workbook on a worker thread, waiting at most `timeout`.
///
/// The evaluator gets the same deadline through
/// [`SpreadsheetEvaluator::evaluate_within`], so a process-backed evaluator
/// kills its helper. In-process evaluators are abandoned on timeout and
/// their result is discarded. Errors other than `EvaluationFailure` coming
/// out of the evaluator are reported as `EvaluationFailure`.
pub fn evaluate_with_timeout(
    evaluator: Arc<dyn SpreadsheetEvaluator>,
    inputs: Vec<NamedInput>,
    timeout: Duration,
) -> CalcResult<EvaluationOutputs> {
    let (tx, rx) = mpsc::channel();
    let started = Instant::now();

    tracing::info!(inputs = inputs.len(), ?timeout, "evaluating workbook");

    thread::Builder::new()
        .name("workbook-eval".to_string())
        .spawn(move || {
            let result = evaluator.evaluate_within(&inputs, timeout);
            // Receiver is gone after a timeout
            let _ = tx.send(result);
        })
        .map_err(|e| CalcError::evaluation_failure(format!("could not start evaluator thread: {}", e)))?;

    let cells = match rx.recv_timeout(timeout) {
        Ok(Ok(cells)) => cells,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "workbook evaluation failed");
            return Err(match err {
                CalcError::EvaluationFailure { .. } => err,
                other => CalcError::evaluation_failure(other.to_string()),
            });
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(?timeout, "workbook evaluation timed out");
            return Err(CalcError::evaluation_failure(format!(
                "workbook evaluation timed out after {:.1} s",
                timeout.as_secs_f64()
            )));
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            tracing::warn!("workbook evaluator thread exited without a result");
            return Err(CalcError::evaluation_failure("evaluator thread exited without a result"));
        }
    };

    let outputs = EvaluationOutputs::from_cells(&cells)?;
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "workbook evaluated");
    Ok(outputs)
}
