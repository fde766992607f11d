//! Standard Reinforcing Bar Sizes (ASTM A615)
//!
//! Bar designations follow the US inch-pound numbering: the designation is
//! the nominal diameter in eighths of an inch for #3 through #8. Larger bars
//! (#9 and up) use round-area equivalents, hence the non-eighth diameters.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::materials::rebar::{lookup_diameter, BarSize};
//!
//! assert_eq!(lookup_diameter(9).unwrap(), 1.128);
//! assert!(lookup_diameter(12).is_err());
//!
//! let bar = BarSize::from_designation(11).unwrap();
//! assert_eq!(bar.diameter_in(), 1.41);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Designation -> nominal diameter (in), in ascending bar size.
pub static STANDARD_BAR_TABLE: [(u32, f64); 11] = [
    (3, 0.375),
    (4, 0.5),
    (5, 0.625),
    (6, 0.75),
    (7, 0.875),
    (8, 1.0),
    (9, 1.128),
    (10, 1.27),
    (11, 1.41),
    (14, 1.693),
    (18, 2.257),
];

/// Look up the nominal diameter (in) for a bar designation.
///
/// Returns `CalcError::InvalidBarDesignation` for any code outside the
/// standard table.
pub fn lookup_diameter(designation: u32) -> CalcResult<f64> {
    STANDARD_BAR_TABLE
        .iter()
        .find(|(code, _)| *code == designation)
        .map(|(_, dia)| *dia)
        .ok_or_else(|| CalcError::invalid_bar_designation(designation))
}

/// A standard bar size.
///
/// Serializes as the bare designation number (`9`, not `"N9"`), and
/// deserialization rejects non-standard codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BarSize {
    N3,
    N4,
    N5,
    N6,
    N7,
    N8,
    N9,
    N10,
    N11,
    N14,
    N18,
}

impl BarSize {
    /// All standard sizes, smallest first
    pub const ALL: [BarSize; 11] = [
        BarSize::N3,
        BarSize::N4,
        BarSize::N5,
        BarSize::N6,
        BarSize::N7,
        BarSize::N8,
        BarSize::N9,
        BarSize::N10,
        BarSize::N11,
        BarSize::N14,
        BarSize::N18,
    ];

    /// Parse a numeric designation (e.g. `9` for a #9 bar)
    pub fn from_designation(designation: u32) -> CalcResult<Self> {
        BarSize::ALL
            .iter()
            .copied()
            .find(|bar| bar.designation() == designation)
            .ok_or_else(|| CalcError::invalid_bar_designation(designation))
    }

    /// Numeric designation
    pub fn designation(&self) -> u32 {
        match self {
            BarSize::N3 => 3,
            BarSize::N4 => 4,
            BarSize::N5 => 5,
            BarSize::N6 => 6,
            BarSize::N7 => 7,
            BarSize::N8 => 8,
            BarSize::N9 => 9,
            BarSize::N10 => 10,
            BarSize::N11 => 11,
            BarSize::N14 => 14,
            BarSize::N18 => 18,
        }
    }

    /// Nominal diameter in inches
    pub fn diameter_in(&self) -> f64 {
        match self {
            BarSize::N3 => 0.375,
            BarSize::N4 => 0.5,
            BarSize::N5 => 0.625,
            BarSize::N6 => 0.75,
            BarSize::N7 => 0.875,
            BarSize::N8 => 1.0,
            BarSize::N9 => 1.128,
            BarSize::N10 => 1.27,
            BarSize::N11 => 1.41,
            BarSize::N14 => 1.693,
            BarSize::N18 => 2.257,
        }
    }

    /// Get display name (e.g. "#9")
    pub fn display_name(&self) -> String {
        format!("#{}", self.designation())
    }
}

impl std::fmt::Display for BarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.designation())
    }
}

impl TryFrom<u32> for BarSize {
    type Error = CalcError;

    fn try_from(designation: u32) -> Result<Self, Self::Error> {
        BarSize::from_designation(designation)
    }
}

impl From<BarSize> for u32 {
    fn from(bar: BarSize) -> Self {
        bar.designation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_all_standard_sizes() {
        let expected = [
            (3, 0.375),
            (4, 0.5),
            (5, 0.625),
            (6, 0.75),
            (7, 0.875),
            (8, 1.0),
            (9, 1.128),
            (10, 1.27),
            (11, 1.41),
            (14, 1.693),
            (18, 2.257),
        ];
        for (code, dia) in expected {
            assert_eq!(lookup_diameter(code).unwrap(), dia, "#{}", code);
        }
    }

    #[test]
    fn test_lookup_rejects_nonstandard() {
        for code in [0, 1, 2, 12, 13, 15, 16, 17, 19, 100] {
            assert_eq!(
                lookup_diameter(code),
                Err(CalcError::InvalidBarDesignation { designation: code })
            );
        }
    }

    #[test]
    fn test_bar_size_matches_table() {
        for bar in BarSize::ALL {
            assert_eq!(bar.diameter_in(), lookup_diameter(bar.designation()).unwrap());
        }
        assert_eq!(BarSize::N18.diameter_in(), 2.257);
        assert_ne!(BarSize::N14.diameter_in(), BarSize::N3.diameter_in());
    }

    #[test]
    fn test_display() {
        assert_eq!(BarSize::N11.to_string(), "#11");
        assert_eq!(BarSize::N3.display_name(), "#3");
    }

    #[test]
    fn test_serde_uses_designation() {
        let json = serde_json::to_string(&BarSize::N9).unwrap();
        assert_eq!(json, "9");

        let bar: BarSize = serde_json::from_str("14").unwrap();
        assert_eq!(bar, BarSize::N14);

        assert!(serde_json::from_str::<BarSize>("12").is_err());
    }
}
