//! # Spread Footing Input
//!
//! The single structured record describing one footing design: service
//! loads, soil, concrete geometry, and flexural/shear reinforcement. It
//! replaces the 23 positional workbook parameters with named, typed fields.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::footing::FootingInput;
//! use footing_core::units::Inches;
//!
//! let mut input = FootingInput::default();
//! input.footing.thickness = Inches(48.0);
//! input.validate().unwrap();
//!
//! let (x_layer, y_layer) = input.layout_inputs();
//! assert_eq!(x_layer.bar_designation, 9);
//! assert_eq!(y_layer.lower_layer_designation, Some(9));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::rebar_layout::LayoutInput;
use crate::errors::{CalcError, CalcResult};
use crate::materials::BarSize;
use crate::units::{Inches, Kips, Ksf, Ksi};

/// Unfactored column loads and soil surcharge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceLoads {
    /// Dead load P_DL (k)
    pub dead_load: Kips,

    /// Live load P_LL (k)
    pub live_load: Kips,

    /// Overburden pressure on top of the footing (ksf)
    pub overburden: Ksf,
}

/// Footing plan and thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootingDimensions {
    /// Plan dimension along X (in)
    pub width_x: Inches,

    /// Plan dimension along Y (in)
    pub length_y: Inches,

    /// Overall thickness h (in)
    pub thickness: Inches,
}

/// Column footprint, centered on the footing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnDimensions {
    pub width_x: Inches,
    pub length_y: Inches,
}

/// One direction of bottom flexural reinforcement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexureReinforcement {
    pub bar_size: BarSize,
    pub bar_count: u32,

    /// Yield strength f_y (ksi)
    pub fy: Ksi,
}

/// Optional shear reinforcement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearReinforcement {
    /// Yield strength f_yt (ksi)
    pub fyt: Ksi,

    pub bar_size: BarSize,

    /// Spacing along X (in), 0 when not provided
    pub spacing_x: Inches,

    /// Spacing along Y (in), 0 when not provided
    pub spacing_y: Inches,
}

/// Input parameters for a spread footing design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "F-1",
///   "loads": { "dead_load": 438.0, "live_load": 260.0, "overburden": 0.0 },
///   "allowable_bearing": 19.0,
///   "include_footing_self_weight": true,
///   "footing": { "width_x": 216.0, "length_y": 216.0, "thickness": 60.0 },
///   "column": { "width_x": 20.0, "length_y": 14.0 },
///   "fc": 6.0,
///   "cover": 3.0,
///   "flexure_x": { "bar_size": 9, "bar_count": 53, "fy": 60.0 },
///   "flexure_y": { "bar_size": 11, "bar_count": 53, "fy": 60.0 },
///   "shear": { "fyt": 60.0, "bar_size": 6, "spacing_x": 6.0, "spacing_y": 6.0 },
///   "include_size_effect": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingInput {
    /// User label (e.g., "F-1", "Footing at Grid B-3")
    #[serde(default)]
    pub label: String,

    pub loads: ServiceLoads,

    /// Allowable soil bearing pressure q_allow (ksf)
    pub allowable_bearing: Ksf,

    /// Count the footing's own weight against bearing
    pub include_footing_self_weight: bool,

    pub footing: FootingDimensions,

    pub column: ColumnDimensions,

    /// Concrete compressive strength f'c (ksi)
    pub fc: Ksi,

    /// Clear cover to the bottom mat (in)
    pub cover: Inches,

    /// Bars running in X
    pub flexure_x: FlexureReinforcement,

    /// Bars running in Y
    pub flexure_y: FlexureReinforcement,

    pub shear: ShearReinforcement,

    /// Apply the one-way shear size effect factor λ_s
    pub include_size_effect: bool,
}

impl Default for FootingInput {
    fn default() -> Self {
        FootingInput {
            label: "F-1".to_string(),
            loads: ServiceLoads {
                dead_load: Kips(438.0),
                live_load: Kips(260.0),
                overburden: Ksf(0.0),
            },
            allowable_bearing: Ksf(19.0),
            include_footing_self_weight: true,
            footing: FootingDimensions {
                width_x: Inches(216.0),
                length_y: Inches(216.0),
                thickness: Inches(60.0),
            },
            column: ColumnDimensions {
                width_x: Inches(20.0),
                length_y: Inches(14.0),
            },
            fc: Ksi(6.0),
            cover: Inches(3.0),
            flexure_x: FlexureReinforcement {
                bar_size: BarSize::N9,
                bar_count: 53,
                fy: Ksi(60.0),
            },
            flexure_y: FlexureReinforcement {
                bar_size: BarSize::N11,
                bar_count: 53,
                fy: Ksi(60.0),
            },
            shear: ShearReinforcement {
                fyt: Ksi(60.0),
                bar_size: BarSize::N6,
                spacing_x: Inches(6.0),
                spacing_y: Inches(6.0),
            },
            include_size_effect: true,
        }
    }
}

fn check_field(field: &str, value: f64, valid: bool, reason: &str) -> CalcResult<()> {
    if valid {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

impl FootingInput {
    /// Validate input parameters.
    ///
    /// Bar counts and plan cover are not checked here; a zero count or a
    /// cover the bars cannot fit in surfaces as `DegenerateSpacing` from the
    /// layout generator.
    pub fn validate(&self) -> CalcResult<()> {
        let loads = &self.loads;
        check_field("loads.dead_load", loads.dead_load.0, loads.dead_load.is_non_negative(), "Load cannot be negative")?;
        check_field("loads.live_load", loads.live_load.0, loads.live_load.is_non_negative(), "Load cannot be negative")?;
        check_field(
            "loads.overburden",
            loads.overburden.0,
            loads.overburden.is_non_negative(),
            "Overburden cannot be negative",
        )?;
        check_field(
            "allowable_bearing",
            self.allowable_bearing.0,
            self.allowable_bearing.is_positive(),
            "Allowable bearing pressure must be positive",
        )?;

        let ftg = &self.footing;
        check_field("footing.width_x", ftg.width_x.0, ftg.width_x.is_positive(), "Footing width must be positive")?;
        check_field("footing.length_y", ftg.length_y.0, ftg.length_y.is_positive(), "Footing length must be positive")?;
        check_field(
            "footing.thickness",
            ftg.thickness.0,
            ftg.thickness.is_positive(),
            "Footing thickness must be positive",
        )?;

        let col = &self.column;
        check_field("column.width_x", col.width_x.0, col.width_x.is_positive(), "Column width must be positive")?;
        check_field("column.length_y", col.length_y.0, col.length_y.is_positive(), "Column length must be positive")?;
        if col.width_x > ftg.width_x {
            return Err(CalcError::invalid_input(
                "column.width_x",
                col.width_x.0.to_string(),
                format!("Column is wider than the footing ({} in)", ftg.width_x.0),
            ));
        }
        if col.length_y > ftg.length_y {
            return Err(CalcError::invalid_input(
                "column.length_y",
                col.length_y.0.to_string(),
                format!("Column is longer than the footing ({} in)", ftg.length_y.0),
            ));
        }

        check_field("fc", self.fc.0, self.fc.is_positive(), "Concrete strength must be positive")?;

        check_field("cover", self.cover.0, self.cover.is_non_negative(), "Cover cannot be negative")?;
        // Plan-direction cover is checked by the layout generator
        if self.cover.0 * 2.0 >= ftg.thickness.0 {
            return Err(CalcError::invalid_input(
                "cover",
                self.cover.0.to_string(),
                format!("Cover must be less than half the footing thickness ({} in)", ftg.thickness.0),
            ));
        }

        check_field("flexure_x.fy", self.flexure_x.fy.0, self.flexure_x.fy.is_positive(), "Yield strength must be positive")?;
        check_field("flexure_y.fy", self.flexure_y.fy.0, self.flexure_y.fy.is_positive(), "Yield strength must be positive")?;

        let shear = &self.shear;
        check_field("shear.fyt", shear.fyt.0, shear.fyt.is_positive(), "Yield strength must be positive")?;
        check_field(
            "shear.spacing_x",
            shear.spacing_x.0,
            shear.spacing_x.is_non_negative(),
            "Spacing cannot be negative",
        )?;
        check_field(
            "shear.spacing_y",
            shear.spacing_y.0,
            shear.spacing_y.is_non_negative(),
            "Spacing cannot be negative",
        )?;

        Ok(())
    }

    /// Layout inputs for the X layer and the Y layer stacked on it
    pub fn layout_inputs(&self) -> (LayoutInput, LayoutInput) {
        let x_ftg = self.footing.width_x.0;
        let y_ftg = self.footing.length_y.0;
        let cover = self.cover.0;
        let x_bar = self.flexure_x.bar_size.designation();

        let x_layer = LayoutInput::x_direction(x_ftg, y_ftg, cover, x_bar, self.flexure_x.bar_count);
        let y_layer = LayoutInput::y_direction(
            x_ftg,
            y_ftg,
            cover,
            self.flexure_y.bar_size.designation(),
            self.flexure_y.bar_count,
            x_bar,
        );
        (x_layer, y_layer)
    }

    /// Plan corner of the centered column (in)
    pub fn column_origin(&self) -> (f64, f64) {
        (
            self.footing.width_x.0 / 2.0 - self.column.width_x.0 / 2.0,
            self.footing.length_y.0 / 2.0 - self.column.length_y.0 / 2.0,
        )
    }

    /// Height of the column stub drawn above the footing (in)
    pub fn column_stub_height(&self) -> f64 {
        self.footing.width_x.0.min(self.footing.length_y.0) / 2.0
    }

    /// Total service load P_DL + P_LL (k)
    pub fn service_load(&self) -> Kips {
        self.loads.dead_load + self.loads.live_load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let input = FootingInput::default();
        assert!(input.validate().is_ok());
        assert_eq!(input.service_load(), Kips(698.0));
    }

    #[test]
    fn test_column_is_centered() {
        let input = FootingInput::default();
        assert_eq!(input.column_origin(), (98.0, 101.0));
        assert_eq!(input.column_stub_height(), 108.0);
    }

    #[test]
    fn test_layout_inputs() {
        let input = FootingInput::default();
        let (x, y) = input.layout_inputs();
        assert_eq!(x.bar_designation, 9);
        assert_eq!(x.bar_count, 53);
        assert_eq!(x.lower_layer_designation, None);
        assert_eq!(y.bar_designation, 11);
        assert_eq!(y.lower_layer_designation, Some(9));
        assert_eq!(y.cover_in, 3.0);
    }

    #[test]
    fn test_invalid_footing() {
        let mut input = FootingInput::default();
        input.footing.width_x = Inches(0.0);
        let err = input.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "footing.width_x"));

        let mut input = FootingInput::default();
        input.footing.thickness = Inches(f64::NAN);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_negative_load() {
        let mut input = FootingInput::default();
        input.loads.live_load = Kips(-1.0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_column_larger_than_footing() {
        let mut input = FootingInput::default();
        input.column.width_x = Inches(240.0);
        let err = input.validate().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "column.width_x"));
    }

    #[test]
    fn test_cover_limits() {
        let mut input = FootingInput::default();
        input.cover = Inches(-0.5);
        assert!(input.validate().is_err());

        let mut input = FootingInput::default();
        input.cover = Inches(30.0);
        assert!(input.validate().is_err());

        // Plan cover is left to the layout generator
        let mut input = FootingInput::default();
        input.footing.width_x = Inches(40.0);
        input.footing.length_y = Inches(40.0);
        input.column.width_x = Inches(12.0);
        input.column.length_y = Inches(12.0);
        input.cover = Inches(25.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_zero_shear_spacing_allowed() {
        let mut input = FootingInput::default();
        input.shear.spacing_x = Inches(0.0);
        input.shear.spacing_y = Inches(0.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let input = FootingInput::default();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"bar_size\": 9"));
        let roundtrip: FootingInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }

    #[test]
    fn test_nonstandard_bar_rejected_on_load() {
        let json = serde_json::to_string(&FootingInput::default())
            .unwrap()
            .replace("\"bar_size\":11", "\"bar_size\":12");
        assert!(serde_json::from_str::<FootingInput>(&json).is_err());
    }
}
