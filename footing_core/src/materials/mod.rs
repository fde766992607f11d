//! # Materials
//!
//! Reinforcing bar sizes and the display materials attached to scene
//! geometry.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::materials::{BarSize, RenderMaterial};
//!
//! let steel = RenderMaterial::steel();
//! assert_eq!(steel.metalness, 1.0);
//! assert_eq!(BarSize::N9.diameter_in(), 1.128);
//! ```

pub mod rebar;

pub use rebar::{lookup_diameter, BarSize, STANDARD_BAR_TABLE};

use serde::{Deserialize, Serialize};

/// Material family of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Concrete,
    Steel,
}

impl MaterialKind {
    /// Lowercase tag used by renderers
    pub fn tag(&self) -> &'static str {
        match self {
            MaterialKind::Concrete => "concrete",
            MaterialKind::Steel => "steel",
        }
    }
}

/// Physically-based display properties for a scene material.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "concrete", "roughness": 0.8, "metalness": 0.2, "opacity": 0.8 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderMaterial {
    pub kind: MaterialKind,
    /// 0.0 (mirror) to 1.0 (matte)
    pub roughness: f64,
    pub metalness: f64,
    /// 1.0 is fully opaque
    pub opacity: f64,
}

impl RenderMaterial {
    /// Semi-transparent concrete so the reinforcement stays visible
    pub fn concrete() -> Self {
        RenderMaterial {
            kind: MaterialKind::Concrete,
            roughness: 0.8,
            metalness: 0.2,
            opacity: 0.8,
        }
    }

    /// Polished, opaque reinforcing steel
    pub fn steel() -> Self {
        RenderMaterial {
            kind: MaterialKind::Steel,
            roughness: 0.0,
            metalness: 1.0,
            opacity: 1.0,
        }
    }
}

impl From<MaterialKind> for RenderMaterial {
    fn from(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Concrete => RenderMaterial::concrete(),
            MaterialKind::Steel => RenderMaterial::steel(),
        }
    }
}
