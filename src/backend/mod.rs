//! Geodesy backend: the collaborator that owns the projection math.
//!
//! Handles and the transform engine only marshal values in and out of a
//! [`GeodesyBackend`]. The backend speaks PROJ.4 conventions: geographic
//! angles are radians and failures are reported as raw integer statuses,
//! which the engine translates into [`crate::error::ProjError`] exactly once.

pub mod proj4;

#[cfg(test)]
pub(crate) mod testing;

pub use proj4::{status_message, Proj4Definition, Proj4rs};

/// Failure with no more specific status.
pub const ERR_GENERIC: i32 = -1;
/// Legacy PROJ.4 status: latitude or longitude exceeded limits.
pub const ERR_LAT_OR_LON_EXCEED_LIMIT: i32 = -14;
/// Legacy PROJ.4 status: non-convergent inverse computation.
pub const ERR_NON_CONVERGENT: i32 = -17;
/// Legacy PROJ.4 status: tolerance condition error.
pub const ERR_TOLERANCE_CONDITION: i32 = -20;
/// Legacy PROJ.4 status: failed to load datum shift grid.
pub const ERR_GRID_UNAVAILABLE: i32 = -38;
/// Legacy PROJ.4 status: geocentric transformation missing z or ellipsoid.
pub const ERR_GEOCENTRIC: i32 = -44;

/// Contract of the external geodesy library.
///
/// Implementations must be safe for concurrent read-only use of a
/// definition (`transform`, `forward`, `inverse`, the predicates).
/// Creation and release of one definition never race with its use, since
/// [`crate::handle::Projection`] owns it exclusively.
pub trait GeodesyBackend: Clone + Send + Sync {
    /// Parsed coordinate reference system.
    type Definition: Send + Sync;

    /// Build a definition from `key=value` / `flag` tokens.
    fn init(&self, params: &[String]) -> Result<Self::Definition, String>;

    /// Release backend resources held for a definition.
    ///
    /// Called exactly once per successful `init`, right before the
    /// definition itself is dropped. The default relies on `Drop` alone.
    fn release(&self, _definition: &mut Self::Definition) {}

    fn is_latlong(&self, definition: &Self::Definition) -> bool;

    fn is_geocent(&self, definition: &Self::Definition) -> bool;

    /// Canonical `+key=value` rendering of the definition.
    fn definition_string(&self, definition: &Self::Definition) -> String;

    /// Geographic definition on the same datum as `definition`.
    fn derive_latlong(&self, definition: &Self::Definition) -> Result<Self::Definition, String>;

    /// Transform parallel arrays in place from `src` to `dst`.
    ///
    /// All arrays have equal length. On failure the arrays are left
    /// untouched and the raw status is returned.
    fn transform(
        &self,
        src: &Self::Definition,
        dst: &Self::Definition,
        x: &mut [f64],
        y: &mut [f64],
        z: Option<&mut [f64]>,
    ) -> Result<(), i32>;

    /// Forward projection: (lon_rad, lat_rad) -> (x, y).
    fn forward(&self, definition: &Self::Definition, lon: f64, lat: f64)
        -> Result<(f64, f64), i32>;

    /// Inverse projection: (x, y) -> (lon_rad, lat_rad).
    fn inverse(&self, definition: &Self::Definition, x: f64, y: f64) -> Result<(f64, f64), i32>;
}
