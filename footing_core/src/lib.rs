//! # footing_core - Spread Footing Design Engine
//!
//! `footing_core` produces the 3D reinforcement model of a rectangular spread
//! footing and the pass/fail design report for it. Bar placement is computed
//! here; the design checks themselves come from an external spreadsheet
//! evaluator behind the [`evaluation::SpreadsheetEvaluator`] trait.
//!
//! All inputs and outputs are JSON-serializable.
//!
//! ## Quick Start
//!
//! ```rust
//! use footing_core::calculations::rebar_layout::{generate_layout, LayoutInput, LayoutOptions};
//! use footing_core::calculations::dcr::{classify, DesignStatus};
//!
//! // 18 ft square footing, 3" cover, 53 #9 bars running in X
//! let layer = LayoutInput::x_direction(216.0, 216.0, 3.0, 9, 53);
//! let layout = generate_layout(&layer, &LayoutOptions::default()).unwrap();
//! assert_eq!(layout.segments.len(), 53 * 3);
//!
//! assert_eq!(classify(0.96).unwrap().status, DesignStatus::Warning);
//! ```
//!
//! ## Modules
//!
//! - [`footing`] - Footing design input
//! - [`calculations`] - Bar layout generation and DCR classification
//! - [`evaluation`] - Spreadsheet evaluator boundary
//! - [`report`] - Hierarchical design check report
//! - [`view`] - Scene plus report for one input
//! - [`geometry`] - Points, bar segments and extrusions
//! - [`materials`] - Rebar table and render materials
//! - [`settings`] - Evaluator and layout configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Footing files with atomic saves

pub mod calculations;
pub mod errors;
pub mod evaluation;
pub mod file_io;
pub mod footing;
pub mod geometry;
pub mod materials;
pub mod report;
pub mod settings;
pub mod units;
pub mod view;

// Re-export commonly used types at crate root for convenience
pub use calculations::{classify, generate_layout, DesignStatus, LayoutInput, LayoutOptions, RebarLayout, StatusResult};
pub use errors::{CalcError, CalcResult};
pub use evaluation::{EvaluationOutputs, ProcessEvaluator, SpreadsheetEvaluator};
pub use file_io::{load_input, save_input};
pub use footing::FootingInput;
pub use report::DesignReport;
pub use settings::Settings;
pub use view::{compute_view, FootingView, Scene};
