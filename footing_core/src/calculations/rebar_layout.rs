//! # Flexural Rebar Layout
//!
//! Derives the 3D geometry of the bottom mat of a spread footing: one layer
//! of bars running in X, and one layer running in Y stacked on top of it.
//! Each bar is a straight run between the cover lines plus a 90° hook turned
//! up at either end.
//!
//! ## Conventions
//!
//! - Origin at the bottom corner of the footing, Z up, inches
//! - "X-direction" bars run parallel to X and are spaced across Y
//! - Spacing = (transverse span − 2·cover − d_b) / bar count
//! - Hook length = `hook_factor` · d_b (default 15, i.e. 3d_b bend + 12d_b tail)
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::rebar_layout::{generate_layout, LayoutInput, LayoutOptions};
//!
//! let input = LayoutInput::x_direction(216.0, 216.0, 3.0, 9, 53);
//! let layout = generate_layout(&input, &LayoutOptions::default()).unwrap();
//!
//! assert_eq!(layout.diameter_in, 1.128);
//! assert_eq!(layout.segments.len(), 53 * 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{BarSegment, Point3, SegmentKind};
use crate::materials::{lookup_diameter, MaterialKind};

/// Standard hook allowance in bar diameters (3d_b bend + 12d_b extension)
pub const DEFAULT_HOOK_FACTOR: f64 = 15.0;

/// Vertical gap between the X layer and the Y layer (in)
pub const DEFAULT_LAYER_CLEARANCE_IN: f64 = 1.0;

/// Direction the bars run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarDirection {
    /// Bars parallel to X, bottom layer
    X,
    /// Bars parallel to Y, stacked on the X layer
    Y,
}

impl BarDirection {
    pub fn display_name(&self) -> &'static str {
        match self {
            BarDirection::X => "X",
            BarDirection::Y => "Y",
        }
    }
}

impl std::fmt::Display for BarDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tunables that are not part of the footing design itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Hook length as a multiple of bar diameter
    pub hook_factor: f64,

    /// Clear gap added between the X and Y layers (in)
    pub layer_clearance_in: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            hook_factor: DEFAULT_HOOK_FACTOR,
            layer_clearance_in: DEFAULT_LAYER_CLEARANCE_IN,
        }
    }
}

impl LayoutOptions {
    /// Validate option values.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.hook_factor.is_finite() || self.hook_factor < 0.0 {
            return Err(CalcError::invalid_input(
                "hook_factor",
                self.hook_factor.to_string(),
                "Hook factor must be a non-negative number",
            ));
        }
        if !self.layer_clearance_in.is_finite() || self.layer_clearance_in < 0.0 {
            return Err(CalcError::invalid_input(
                "layer_clearance_in",
                self.layer_clearance_in.to_string(),
                "Layer clearance must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Input parameters for one layer of bars.
///
/// ## JSON Example
///
/// ```json
/// {
///   "direction": "Y",
///   "footing_x_in": 216.0,
///   "footing_y_in": 216.0,
///   "cover_in": 3.0,
///   "bar_designation": 11,
///   "bar_count": 53,
///   "lower_layer_designation": 9
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutInput {
    pub direction: BarDirection,

    /// Footing plan dimension along X (in)
    pub footing_x_in: f64,

    /// Footing plan dimension along Y (in)
    pub footing_y_in: f64,

    /// Clear cover to the bars (in)
    pub cover_in: f64,

    /// Bar size code (e.g. 9 for #9)
    pub bar_designation: u32,

    /// Number of bars in this layer
    pub bar_count: u32,

    /// Bar size of the X layer the Y bars rest on. Required for `Y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_layer_designation: Option<u32>,
}

impl LayoutInput {
    /// Bottom layer, bars parallel to X
    pub fn x_direction(footing_x_in: f64, footing_y_in: f64, cover_in: f64, bar_designation: u32, bar_count: u32) -> Self {
        LayoutInput {
            direction: BarDirection::X,
            footing_x_in,
            footing_y_in,
            cover_in,
            bar_designation,
            bar_count,
            lower_layer_designation: None,
        }
    }

    /// Upper layer, bars parallel to Y, resting on X bars of `x_bar_designation`
    pub fn y_direction(
        footing_x_in: f64,
        footing_y_in: f64,
        cover_in: f64,
        bar_designation: u32,
        bar_count: u32,
        x_bar_designation: u32,
    ) -> Self {
        LayoutInput {
            direction: BarDirection::Y,
            footing_x_in,
            footing_y_in,
            cover_in,
            bar_designation,
            bar_count,
            lower_layer_designation: Some(x_bar_designation),
        }
    }

    /// Footing dimension the bars are spaced across
    pub fn transverse_span_in(&self) -> f64 {
        match self.direction {
            BarDirection::X => self.footing_y_in,
            BarDirection::Y => self.footing_x_in,
        }
    }

    /// Footing dimension the bars run along
    pub fn run_span_in(&self) -> f64 {
        match self.direction {
            BarDirection::X => self.footing_x_in,
            BarDirection::Y => self.footing_y_in,
        }
    }

    /// Validate geometry. Bar sizes and whether the bars fit are checked in
    /// `generate_layout`.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.footing_x_in.is_finite() || self.footing_x_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "footing_x_in",
                self.footing_x_in.to_string(),
                "Footing X dimension must be positive",
            ));
        }
        if !self.footing_y_in.is_finite() || self.footing_y_in <= 0.0 {
            return Err(CalcError::invalid_input(
                "footing_y_in",
                self.footing_y_in.to_string(),
                "Footing Y dimension must be positive",
            ));
        }
        if !self.cover_in.is_finite() || self.cover_in < 0.0 {
            return Err(CalcError::invalid_input(
                "cover_in",
                self.cover_in.to_string(),
                "Cover cannot be negative",
            ));
        }
        Ok(())
    }
}

/// One generated layer of bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarLayout {
    pub direction: BarDirection,

    /// Nominal bar diameter d_b (in)
    pub diameter_in: f64,

    /// Center-to-center bar spacing (in)
    pub spacing_in: f64,

    /// Elevation of the bar centerline above the footing bottom (in)
    pub depth_in: f64,

    /// Length of each end hook (in)
    pub hook_length_in: f64,

    pub bar_count: u32,

    /// Per bar, in ascending offset: main run, far hook, near hook
    pub segments: Vec<BarSegment>,
}

impl RebarLayout {
    /// Transverse centerline offset of every bar, ascending
    pub fn bar_offsets(&self) -> Vec<f64> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Main)
            .map(|s| match self.direction {
                BarDirection::X => s.start.y,
                BarDirection::Y => s.start.x,
            })
            .collect()
    }

    /// Main runs only
    pub fn main_segments(&self) -> impl Iterator<Item = &BarSegment> {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Main)
    }

    /// Hook segments only
    pub fn hook_segments(&self) -> impl Iterator<Item = &BarSegment> {
        self.segments.iter().filter(|s| s.kind != SegmentKind::Main)
    }
}

/// Generate the bar segments for one layer.
///
/// # Errors
///
/// * `InvalidBarDesignation` - bar (or lower layer) size is not standard
/// * `InvalidInput` - non-positive footing, negative cover, Y layer without a
///   lower layer size, or bad options
/// * `DegenerateSpacing` - zero bars, bars that do not fit across the span,
///   or cover that leaves no run length
pub fn generate_layout(input: &LayoutInput, options: &LayoutOptions) -> CalcResult<RebarLayout> {
    let diameter = lookup_diameter(input.bar_designation)?;
    let lower_diameter = match input.direction {
        BarDirection::X => None,
        BarDirection::Y => {
            let designation = input.lower_layer_designation.ok_or_else(|| {
                CalcError::invalid_input(
                    "lower_layer_designation",
                    "none",
                    "Y-direction bars need the X-direction bar size to sit on",
                )
            })?;
            Some(lookup_diameter(designation)?)
        }
    };

    input.validate()?;
    options.validate()?;

    if input.bar_count == 0 {
        return Err(CalcError::degenerate_spacing(
            input.direction.display_name(),
            "bar count must be at least 1",
        ));
    }

    let cover = input.cover_in;
    let clear_span = input.transverse_span_in() - 2.0 * cover - diameter;
    let spacing = clear_span / f64::from(input.bar_count);
    if !(spacing > 0.0) {
        return Err(CalcError::degenerate_spacing(
            input.direction.display_name(),
            format!(
                "spacing {:.3} in for {} bars of {} in diameter across {} in with {} in cover",
                spacing,
                input.bar_count,
                diameter,
                input.transverse_span_in(),
                cover
            ),
        ));
    }

    let run_length = input.run_span_in() - 2.0 * cover;
    if !(run_length > 0.0) {
        return Err(CalcError::degenerate_spacing(
            input.direction.display_name(),
            format!(
                "{} in cover leaves no bar run along {} in",
                cover,
                input.run_span_in()
            ),
        ));
    }

    let depth = match lower_diameter {
        None => cover + diameter / 2.0,
        Some(x_diameter) => cover + diameter + x_diameter / 2.0 + options.layer_clearance_in,
    };
    let hook_length = options.hook_factor * diameter;
    let run_start = cover;
    let run_end = input.run_span_in() - cover;

    let segment = |start: Point3, end: Point3, kind: SegmentKind| BarSegment {
        start,
        end,
        diameter_in: diameter,
        kind,
        material: MaterialKind::Steel,
    };

    let mut segments = Vec::with_capacity(input.bar_count as usize * 3);
    for i in 0..input.bar_count {
        let offset = cover + diameter / 2.0 + f64::from(i) * spacing;
        let (near, far) = match input.direction {
            BarDirection::X => (Point3::new(run_start, offset, depth), Point3::new(run_end, offset, depth)),
            BarDirection::Y => (Point3::new(offset, run_start, depth), Point3::new(offset, run_end, depth)),
        };

        segments.push(segment(near, far, SegmentKind::Main));
        segments.push(segment(far, far.raised(hook_length), SegmentKind::FarHook));
        segments.push(segment(near, near.raised(hook_length), SegmentKind::NearHook));
    }

    tracing::debug!(
        direction = %input.direction,
        bars = input.bar_count,
        diameter,
        spacing,
        depth,
        "generated rebar layout"
    );

    Ok(RebarLayout {
        direction: input.direction,
        diameter_in: diameter,
        spacing_in: spacing,
        depth_in: depth,
        hook_length_in: hook_length,
        bar_count: input.bar_count,
        segments,
    })
}
