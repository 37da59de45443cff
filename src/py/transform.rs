//! PyO3 bindings for batch and single-point coordinate transformation.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use super::PyProjection;
use crate::config::{AngularUnit, EngineConfig};
use crate::coord::CoordinatePair;
use crate::engine::Engine;

fn engine_for(units: &str) -> PyResult<Engine> {
    let unit = AngularUnit::from_name(units)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown angular unit: {units}")))?;
    Ok(Engine::new(EngineConfig::new(unit)))
}

fn to_array(py: Python<'_>, values: Vec<f64>) -> Bound<'_, PyAny> {
    PyArray1::from_owned_array(py, ndarray::Array1::from(values)).into_any()
}

/// Transform arrays of coordinates from one projection to another.
///
/// Args:
///     src: Source projection.
///     dst: Destination projection.
///     x: 1D array of x coordinates (longitude or easting).
///     y: 1D array of y coordinates (latitude or northing).
///     z: Optional 1D array of heights. When omitted heights are taken as
///         zero and no z array is returned.
///     units: Unit of geographic coordinates, "degrees" or "radians".
///
/// Returns:
///     Tuple (x_out, y_out) or (x_out, y_out, z_out).
#[pyfunction]
#[pyo3(signature = (src, dst, x, y, z=None, units="degrees"))]
pub fn transform<'py>(
    py: Python<'py>,
    src: PyRef<'py, PyProjection>,
    dst: PyRef<'py, PyProjection>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    z: Option<PyReadonlyArray1<'py, f64>>,
    units: &str,
) -> PyResult<Bound<'py, PyTuple>> {
    let engine = engine_for(units)?;

    // Copy to owned buffers before releasing the GIL.
    let xs = x.as_array().to_vec();
    let ys = y.as_array().to_vec();
    let zs = z.map(|z| z.as_array().to_vec());

    let src = &src.inner;
    let dst = &dst.inner;
    let batch = py.allow_threads(|| engine.transform(src, dst, &xs, &ys, zs.as_deref()))?;

    let (xs, ys, zs) = batch.into_parts();
    let mut out = vec![to_array(py, xs), to_array(py, ys)];
    if let Some(zs) = zs {
        out.push(to_array(py, zs));
    }
    PyTuple::new(py, out)
}

/// Transform a single coordinate pair from one projection to another.
#[pyfunction]
#[pyo3(signature = (src, dst, x, y, units="degrees"))]
pub fn transform_one(
    src: PyRef<'_, PyProjection>,
    dst: PyRef<'_, PyProjection>,
    x: f64,
    y: f64,
    units: &str,
) -> PyResult<(f64, f64)> {
    let out = engine_for(units)?.transform_one(&src.inner, &dst.inner, CoordinatePair::new(x, y))?;
    Ok(out.into())
}

/// Project a geographic (lon, lat) point.
#[pyfunction]
#[pyo3(signature = (proj, lon, lat, units="degrees"))]
pub fn forward(proj: PyRef<'_, PyProjection>, lon: f64, lat: f64, units: &str) -> PyResult<(f64, f64)> {
    let out = engine_for(units)?.forward(&proj.inner, CoordinatePair::new(lon, lat))?;
    Ok(out.into())
}

/// Unproject an (x, y) point back to geographic (lon, lat).
#[pyfunction]
#[pyo3(signature = (proj, x, y, units="degrees"))]
pub fn inverse(proj: PyRef<'_, PyProjection>, x: f64, y: f64, units: &str) -> PyResult<(f64, f64)> {
    let out = engine_for(units)?.inverse(&proj.inner, CoordinatePair::new(x, y))?;
    Ok(out.into())
}
