//! Projection handle: exclusive owner of one backend definition.

use std::fmt;

use tracing::debug;

use crate::backend::{GeodesyBackend, Proj4rs};
use crate::error::{ProjError, Result};

/// An initialized coordinate reference system.
///
/// The handle is move-only. Its definition is released through the backend
/// exactly once, when the handle is dropped. Read-only operations
/// (predicates, transforms) may run concurrently from several threads.
pub struct Projection<B: GeodesyBackend = Proj4rs> {
    backend: B,
    definition: B::Definition,
}

impl Projection<Proj4rs> {
    /// Create a projection from parameter tokens such as `"+proj=utm"`, `"+zone=10"`.
    ///
    /// The leading `+` is optional.
    pub fn new<I, S>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new_in(Proj4rs, params)
    }

    /// Create a projection from a single whitespace-delimited string,
    /// e.g. `"+proj=utm +zone=10 +datum=WGS84"`.
    pub fn from_proj_string(spec: &str) -> Result<Self> {
        Self::from_proj_string_in(Proj4rs, spec)
    }
}

impl<B: GeodesyBackend> Projection<B> {
    /// Like [`Projection::new`], on an explicit backend.
    pub fn new_in<I, S>(backend: B, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let params: Vec<String> = params
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .collect();

        match backend.init(&params) {
            Ok(definition) => {
                let proj = Self {
                    backend,
                    definition,
                };
                debug!(definition = %proj.definition_string(), "projection created");
                Ok(proj)
            }
            Err(reason) => {
                debug!(?params, %reason, "projection initialization failed");
                Err(ProjError::InitFailed(reason))
            }
        }
    }

    /// Like [`Projection::from_proj_string`], on an explicit backend.
    pub fn from_proj_string_in(backend: B, spec: &str) -> Result<Self> {
        Self::new_in(backend, spec.split_whitespace())
    }

    pub fn is_latlong(&self) -> bool {
        self.backend.is_latlong(&self.definition)
    }

    pub fn is_geocent(&self) -> bool {
        self.backend.is_geocent(&self.definition)
    }

    /// Canonical parameter string of this definition.
    pub fn definition_string(&self) -> String {
        self.backend.definition_string(&self.definition)
    }

    /// Geographic (lon/lat) projection on the same datum.
    pub fn latlong_variant(&self) -> Result<Self> {
        let definition = self
            .backend
            .derive_latlong(&self.definition)
            .map_err(ProjError::InitFailed)?;
        Ok(Self {
            backend: self.backend.clone(),
            definition,
        })
    }

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn definition(&self) -> &B::Definition {
        &self.definition
    }
}

impl<B: GeodesyBackend> Drop for Projection<B> {
    fn drop(&mut self) {
        self.backend.release(&mut self.definition);
        debug!("projection released");
    }
}

impl<B: GeodesyBackend> fmt::Display for Projection<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition_string())
    }
}

impl<B: GeodesyBackend> fmt::Debug for Projection<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("definition", &self.definition_string())
            .field("latlong", &self.is_latlong())
            .field("geocent", &self.is_geocent())
            .finish()
    }
}
