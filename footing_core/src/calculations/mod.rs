//! # Footing Calculations
//!
//! The two self-contained procedures that run on every view refresh:
//!
//! - [`rebar_layout`] - Bar layout geometry for the X and Y layers
//! - [`dcr`] - Demand-capacity ratio pass/warning/fail classification
//!
//! Both are pure functions returning `CalcResult`; the governing design
//! equations themselves live in the external workbook (see
//! [`crate::evaluation`]).

pub mod dcr;
pub mod rebar_layout;

// Re-export commonly used types
pub use dcr::{classify, DesignStatus, StatusResult};
pub use rebar_layout::{generate_layout, BarDirection, LayoutInput, LayoutOptions, RebarLayout};
