//! Engine configuration.

/// Unit used for geographic (lon/lat) coordinates at the public API.
///
/// The backend always works in radians; the engine converts at the edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngularUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngularUnit {
    /// Parse from a string name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "degrees" | "degree" | "deg" => Some(Self::Degrees),
            "radians" | "radian" | "rad" => Some(Self::Radians),
            _ => None,
        }
    }

    /// Convert a value in this unit to radians.
    pub(crate) fn to_radians(self, v: f64) -> f64 {
        match self {
            Self::Degrees => v.to_radians(),
            Self::Radians => v,
        }
    }

    /// Convert a value in radians to this unit.
    pub(crate) fn radians_to_unit(self, v: f64) -> f64 {
        match self {
            Self::Degrees => v.to_degrees(),
            Self::Radians => v,
        }
    }
}

/// Tunables for [`crate::engine::Engine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Unit of geographic coordinates passed in and returned.
    pub angular_unit: AngularUnit,
}

impl EngineConfig {
    pub fn new(angular_unit: AngularUnit) -> Self {
        Self { angular_unit }
    }
}
