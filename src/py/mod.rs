use pyo3::create_exception;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::ProjError;
use crate::handle::Projection;

mod transform;

create_exception!(_rust, ProjInitError, PyValueError, "Projection initialization failed.");
create_exception!(_rust, ShapeMismatchError, PyValueError, "Coordinate arrays differ in length.");
create_exception!(
    _rust,
    ProjTransformError,
    PyRuntimeError,
    "Backend transform failure; the argument is the raw status code."
);

impl From<ProjError> for PyErr {
    fn from(err: ProjError) -> PyErr {
        match &err {
            ProjError::InitFailed(_) => ProjInitError::new_err(err.to_string()),
            ProjError::ShapeMismatch { .. } => ShapeMismatchError::new_err(err.to_string()),
            ProjError::TransformFailed(code) => ProjTransformError::new_err(*code),
        }
    }
}

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("ProjInitError", py.get_type::<ProjInitError>())?;
    m.add("ShapeMismatchError", py.get_type::<ShapeMismatchError>())?;
    m.add("ProjTransformError", py.get_type::<ProjTransformError>())?;
    m.add_class::<PyProjection>()?;
    m.add_function(wrap_pyfunction!(transform::transform, m)?)?;
    m.add_function(wrap_pyfunction!(transform::transform_one, m)?)?;
    m.add_function(wrap_pyfunction!(transform::forward, m)?)?;
    m.add_function(wrap_pyfunction!(transform::inverse, m)?)?;
    Ok(())
}

/// A coordinate reference system built from a PROJ string.
///
/// Released as soon as the Python object is collected; no native state
/// outlives it.
#[pyclass(name = "Projection", module = "_rust", frozen)]
pub struct PyProjection {
    inner: Projection,
}

#[pymethods]
impl PyProjection {
    /// Create from a single string, e.g. "+proj=utm +zone=10 +datum=WGS84".
    #[new]
    fn new(spec: &str) -> PyResult<Self> {
        Ok(Self {
            inner: Projection::from_proj_string(spec)?,
        })
    }

    /// Create from a list of parameter tokens, e.g. ["+proj=utm", "+zone=10"].
    #[staticmethod]
    fn from_params(params: Vec<String>) -> PyResult<Self> {
        Ok(Self {
            inner: Projection::new(params)?,
        })
    }

    fn is_latlong(&self) -> bool {
        self.inner.is_latlong()
    }

    fn is_geocent(&self) -> bool {
        self.inner.is_geocent()
    }

    /// Canonical parameter string.
    fn get_def(&self) -> String {
        self.inner.definition_string()
    }

    /// Geographic projection on the same datum.
    fn latlong_from_proj(&self) -> PyResult<Self> {
        Ok(Self {
            inner: self.inner.latlong_variant()?,
        })
    }

    fn __repr__(&self) -> String {
        format!("Projection('{}')", self.inner)
    }

    fn __str__(&self) -> String {
        self.inner.definition_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ERR_TOLERANCE_CONDITION;

    fn with_gil<F: FnOnce(Python<'_>)>(f: F) {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(f);
    }

    #[test]
    fn test_init_error_maps_to_value_error() {
        with_gil(|py| {
            let err = PyErr::from(ProjError::InitFailed("projection not named".into()));
            assert!(err.is_instance_of::<ProjInitError>(py));
            assert!(err.is_instance_of::<PyValueError>(py));
            assert!(err.value(py).to_string().contains("projection not named"));
        });
    }

    #[test]
    fn test_shape_error_is_distinct() {
        with_gil(|py| {
            let err = PyErr::from(ProjError::ShapeMismatch {
                x: 2,
                y: 1,
                z: None,
            });
            assert!(err.is_instance_of::<ShapeMismatchError>(py));
            assert!(err.is_instance_of::<PyValueError>(py));
            assert!(!err.is_instance_of::<ProjInitError>(py));
        });
    }

    #[test]
    fn test_transform_error_carries_code() {
        with_gil(|py| {
            let err = PyErr::from(ProjError::TransformFailed(ERR_TOLERANCE_CONDITION));
            assert!(err.is_instance_of::<ProjTransformError>(py));
            assert!(err.is_instance_of::<PyRuntimeError>(py));
            let code: i32 = err
                .value(py)
                .getattr("args")
                .and_then(|args| args.get_item(0))
                .and_then(|c| c.extract())
                .unwrap();
            assert_eq!(code, ERR_TOLERANCE_CONDITION);
        });
    }

    #[test]
    fn test_projection_class() {
        with_gil(|_py| {
            let utm = PyProjection::new("+proj=utm +zone=10 +datum=WGS84").unwrap();
            assert!(!utm.is_latlong());
            assert_eq!(utm.__repr__(), "Projection('+proj=utm +zone=10 +datum=WGS84')");
            let ll = utm.latlong_from_proj().unwrap();
            assert_eq!(ll.get_def(), "+proj=longlat +datum=WGS84");
            assert!(PyProjection::from_params(vec![]).is_err());
        });
    }
}
