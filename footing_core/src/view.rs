//! # Model and Results View
//!
//! The top-level computation run on every parameter change: validate the
//! input, lay out the reinforcement, evaluate the workbook once, classify
//! its DCRs, and return the 3D scene together with the design report.
//!
//! Any failure aborts the whole view; no partial scene or report is
//! returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use footing_core::evaluation::ProcessEvaluator;
//! use footing_core::footing::FootingInput;
//! use footing_core::settings::Settings;
//! use footing_core::view::compute_view;
//!
//! let evaluator = Arc::new(ProcessEvaluator::new("eval-sft"));
//! let view = compute_view(&FootingInput::default(), evaluator, &Settings::default())?;
//! println!("{}", view.report.overall_status());
//! # Ok::<(), footing_core::errors::CalcError>(())
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calculations::rebar_layout::{generate_layout, LayoutOptions, RebarLayout};
use crate::errors::CalcResult;
use crate::evaluation::{evaluate_with_timeout, workbook_inputs, EvaluationOutputs, SpreadsheetEvaluator};
use crate::footing::FootingInput;
use crate::geometry::Extrusion;
use crate::materials::RenderMaterial;
use crate::report::DesignReport;
use crate::settings::Settings;

/// Everything a renderer needs to draw the footing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub footing: Extrusion,
    pub column: Extrusion,
    pub x_bars: RebarLayout,
    pub y_bars: RebarLayout,
}

impl Scene {
    /// Total number of bar segments in both layers
    pub fn segment_count(&self) -> usize {
        self.x_bars.segments.len() + self.y_bars.segments.len()
    }
}

/// Build the footing, column and reinforcement geometry.
pub fn build_scene(input: &FootingInput, options: &LayoutOptions) -> CalcResult<Scene> {
    let ftg = &input.footing;
    let footing = Extrusion::rectangle(
        0.0,
        0.0,
        ftg.width_x.0,
        ftg.length_y.0,
        0.0,
        ftg.thickness.0,
        RenderMaterial::concrete(),
    );

    let (col_x0, col_y0) = input.column_origin();
    let column = Extrusion::rectangle(
        col_x0,
        col_y0,
        input.column.width_x.0,
        input.column.length_y.0,
        ftg.thickness.0,
        ftg.thickness.0 + input.column_stub_height(),
        RenderMaterial::concrete(),
    );

    let (x_layer, y_layer) = input.layout_inputs();
    let x_bars = generate_layout(&x_layer, options)?;
    let y_bars = generate_layout(&y_layer, options)?;

    Ok(Scene {
        footing,
        column,
        x_bars,
        y_bars,
    })
}

/// Result of one view computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingView {
    pub label: String,
    pub scene: Scene,
    pub outputs: EvaluationOutputs,
    pub report: DesignReport,
}

/// Run the full model-and-results computation for one input.
///
/// The scene is built before the workbook is evaluated so that layout
/// errors surface without waiting on the evaluator.
pub fn compute_view(
    input: &FootingInput,
    evaluator: Arc<dyn SpreadsheetEvaluator>,
    settings: &Settings,
) -> CalcResult<FootingView> {
    input.validate()?;
    settings.validate()?;

    let scene = build_scene(input, &settings.layout)?;
    let outputs = evaluate_with_timeout(evaluator, workbook_inputs(input), settings.evaluation_timeout()?)?;
    let report = DesignReport::from_outputs(&outputs)?;

    tracing::info!(
        label = %input.label,
        status = %report.overall_status(),
        segments = scene.segment_count(),
        "footing view computed"
    );

    Ok(FootingView {
        label: input.label.clone(),
        scene,
        outputs,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::dcr::DesignStatus;
    use crate::evaluation::tests::{FailingEvaluator, FixedEvaluator, SlowEvaluator};
    use crate::geometry::Point2;
    use crate::materials::MaterialKind;
    use crate::units::Inches;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[test]
    fn test_build_scene_default() {
        let scene = build_scene(&FootingInput::default(), &LayoutOptions::default()).unwrap();

        assert_eq!(scene.footing.height(), 60.0);
        assert_eq!(scene.footing.plan_bounds().1, Point2::new(216.0, 216.0));
        assert_eq!(scene.footing.material.kind, MaterialKind::Concrete);

        assert_eq!(scene.column.base_z, 60.0);
        assert_eq!(scene.column.top_z, 168.0);
        assert_eq!(scene.column.profile[0], Point2::new(98.0, 101.0));

        assert_eq!(scene.x_bars.segments.len(), 159);
        assert_eq!(scene.y_bars.segments.len(), 159);
        assert_eq!(scene.segment_count(), 318);
        assert!(scene.y_bars.depth_in > scene.x_bars.depth_in);
    }

    #[test]
    fn test_compute_view() {
        let evaluator = Arc::new(FixedEvaluator::with_dcrs(0.87, 0.62, 0.96, 0.45, 0.58));
        let view = compute_view(&FootingInput::default(), evaluator.clone(), &Settings::default()).unwrap();

        assert_eq!(view.label, "F-1");
        assert_eq!(view.report.bearing.status.status, DesignStatus::Pass);
        assert_eq!(view.report.flexure.status.status, DesignStatus::Warning);
        assert_eq!(view.report.overall_status(), DesignStatus::Warning);
        assert_eq!(view.outputs.max_shear_dcr(), 0.58);
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_input_skips_evaluation() {
        let evaluator = Arc::new(FixedEvaluator::with_dcrs(0.5, 0.5, 0.5, 0.5, 0.5));
        let mut input = FootingInput::default();
        input.flexure_x.bar_count = 0;

        let err = compute_view(&input, evaluator.clone(), &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SPACING");
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_oversized_plan_cover_is_degenerate() {
        let evaluator = Arc::new(FixedEvaluator::with_dcrs(0.5, 0.5, 0.5, 0.5, 0.5));
        let mut input = FootingInput::default();
        input.footing.width_x = Inches(40.0);
        input.footing.length_y = Inches(40.0);
        input.column.width_x = Inches(12.0);
        input.column.length_y = Inches(12.0);
        input.cover = Inches(20.0);
        input.footing.thickness = Inches(60.0);

        let err = compute_view(&input, evaluator.clone(), &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SPACING");
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_evaluation_failure_fails_view() {
        let err = compute_view(&FootingInput::default(), Arc::new(FailingEvaluator), &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "EVALUATION_FAILURE");
    }

    #[test]
    fn test_evaluation_timeout_fails_view() {
        let settings = Settings {
            evaluation_timeout_secs: 0.02,
            ..Settings::default()
        };
        let evaluator = Arc::new(SlowEvaluator(Duration::from_millis(500)));
        let err = compute_view(&FootingInput::default(), evaluator, &settings).unwrap_err();
        assert_eq!(err.error_code(), "EVALUATION_FAILURE");
    }

    #[test]
    fn test_bad_workbook_dcr_fails_view() {
        let evaluator = Arc::new(FixedEvaluator::with_dcrs(0.5, -2.0, 0.5, 0.5, 0.5));
        let err = compute_view(&FootingInput::default(), evaluator, &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_view_is_deterministic() {
        let settings = Settings::default();
        let a = compute_view(
            &FootingInput::default(),
            Arc::new(FixedEvaluator::with_dcrs(0.5, 0.6, 0.7, 0.8, 0.9)),
            &settings,
        )
        .unwrap();
        let b = compute_view(
            &FootingInput::default(),
            Arc::new(FixedEvaluator::with_dcrs(0.5, 0.6, 0.7, 0.8, 0.9)),
            &settings,
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
