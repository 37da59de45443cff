//! Projection handles and batch coordinate transforms over a PROJ.4-style
//! geodesy backend.
//!
//! ```no_run
//! use proj4_bind::{transform, CoordinatePair, Projection};
//!
//! let wgs84 = Projection::from_proj_string("+proj=longlat +datum=WGS84")?;
//! let utm10 = Projection::from_proj_string("+proj=utm +zone=10 +datum=WGS84")?;
//! let out = transform(&wgs84, &utm10, &[-122.42], &[37.77], None)?;
//! let p: CoordinatePair = out.pair(0).unwrap_or_default();
//! println!("{} {}", p.u, p.v);
//! # Ok::<(), proj4_bind::ProjError>(())
//! ```

pub mod backend;
pub mod config;
pub mod coord;
pub mod engine;
pub mod error;
pub mod handle;
#[cfg(feature = "python")]
mod py;

pub use backend::{GeodesyBackend, Proj4rs};
pub use config::{AngularUnit, EngineConfig};
pub use coord::{CoordinateBatch, CoordinatePair};
pub use engine::{forward, inverse, transform, transform_one, Engine};
pub use error::{ProjError, Result};
pub use handle::Projection;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
