//! # Unit Types
//!
//! Type-safe wrappers for the engineering units used by footing inputs.
//! These are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## US Customary Units
//!
//! - Length: inches (in)
//! - Force: kips (k)
//! - Stress: kips per square inch (ksi)
//! - Soil pressure: kips per square foot (ksf)
//!
//! ## Example
//!
//! ```rust
//! use footing_core::units::Kips;
//!
//! let service = Kips(438.0) + Kips(260.0);
//! assert_eq!(service.value(), 698.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

// ============================================================================
// Force / Stress Units
// ============================================================================

/// Force in kips (1 kip = 1000 pounds)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kips(pub f64);

/// Material strength in kips per square inch (ksi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ksi(pub f64);

/// Soil pressure in kips per square foot (ksf)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ksf(pub f64);

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// True for finite values strictly greater than zero
            pub fn is_positive(self) -> bool {
                self.0.is_finite() && self.0 > 0.0
            }

            /// True for finite values greater than or equal to zero
            pub fn is_non_negative(self) -> bool {
                self.0.is_finite() && self.0 >= 0.0
            }
        }
    };
}

impl_arithmetic!(Inches);
impl_arithmetic!(Kips);
impl_arithmetic!(Ksi);
impl_arithmetic!(Ksf);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Inches(10.0);
        let b = Inches(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Inches(1.0).is_positive());
        assert!(!Inches(0.0).is_positive());
        assert!(Inches(0.0).is_non_negative());
        assert!(!Kips(f64::NAN).is_non_negative());
        assert!(!Ksi(f64::INFINITY).is_positive());
    }

    #[test]
    fn test_serialization() {
        let k = Kips(438.0);
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "438.0");

        let roundtrip: Kips = serde_json::from_str(&json).unwrap();
        assert_eq!(k, roundtrip);
    }
}
