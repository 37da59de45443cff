//! Batch transform engine: shape checks, unit conversion and the single
//! translation point from backend statuses to [`ProjError`].

use tracing::{debug, trace};

use crate::backend::GeodesyBackend;
use crate::config::EngineConfig;
use crate::coord::{check_shape, CoordinateBatch, CoordinatePair};
use crate::error::{ProjError, Result};
use crate::handle::Projection;

fn failed(op: &'static str, code: i32) -> ProjError {
    debug!(op, code, "backend reported failure");
    ProjError::TransformFailed(code)
}

/// Runs transforms between projection handles.
///
/// Geographic coordinates are exchanged in the configured
/// [`crate::config::AngularUnit`]; projected and geocentric ones are passed
/// through unscaled.
///
/// When no z array is given, heights are taken as zero by the backend and no
/// z is returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Transform parallel coordinate arrays from `src` to `dst`.
    ///
    /// Fails with [`ProjError::ShapeMismatch`] before any backend work if the
    /// lengths differ. The i-th output corresponds to the i-th input.
    pub fn transform<B: GeodesyBackend>(
        &self,
        src: &Projection<B>,
        dst: &Projection<B>,
        x: &[f64],
        y: &[f64],
        z: Option<&[f64]>,
    ) -> Result<CoordinateBatch> {
        let batch = CoordinateBatch::from_slices(x, y, z)?;
        self.transform_batch(src, dst, batch)
    }

    /// Transform an owned batch, reusing its storage for the result.
    pub fn transform_batch<B: GeodesyBackend>(
        &self,
        src: &Projection<B>,
        dst: &Projection<B>,
        mut batch: CoordinateBatch,
    ) -> Result<CoordinateBatch> {
        if batch.is_empty() {
            return Ok(batch);
        }
        trace!(points = batch.len(), has_z = batch.has_z(), "batch transform");
        let (x, y, z) = batch.arrays_mut();
        self.run(src, dst, x, y, z)?;
        Ok(batch)
    }

    /// Transform an interleaved buffer in place.
    ///
    /// Each point occupies `stride` consecutive values: x, y, then z when
    /// `has_z` is set. Values past those (e.g. a measure) are left as they
    /// are. The buffer is only written when the whole transform succeeds.
    pub fn transform_interleaved<B: GeodesyBackend>(
        &self,
        src: &Projection<B>,
        dst: &Projection<B>,
        coords: &mut [f64],
        stride: usize,
        has_z: bool,
    ) -> Result<()> {
        let dim = if has_z { 3 } else { 2 };
        if stride < dim {
            return Err(ProjError::ShapeMismatch {
                x: coords.len(),
                y: 0,
                z: has_z.then_some(0),
            });
        }

        let column = |offset: usize| -> Vec<f64> {
            coords
                .get(offset..)
                .unwrap_or(&[])
                .iter()
                .step_by(stride)
                .copied()
                .collect()
        };
        let mut x = column(0);
        let mut y = column(1);
        let mut z = has_z.then(|| column(2));

        trace!(points = x.len(), stride, has_z, "interleaved transform");
        self.run(src, dst, &mut x, &mut y, z.as_deref_mut())?;

        for (i, point) in coords.chunks_mut(stride).enumerate().take(x.len()) {
            point[0] = x[i];
            point[1] = y[i];
            if let Some(z) = &z {
                point[2] = z[i];
            }
        }
        Ok(())
    }

    /// Transform a single point from `src` to `dst`.
    pub fn transform_one<B: GeodesyBackend>(
        &self,
        src: &Projection<B>,
        dst: &Projection<B>,
        point: CoordinatePair,
    ) -> Result<CoordinatePair> {
        let mut x = [point.u];
        let mut y = [point.v];
        self.run(src, dst, &mut x, &mut y, None)?;
        Ok(CoordinatePair::new(x[0], y[0]))
    }

    /// Geographic (lon, lat) -> projected (x, y).
    pub fn forward<B: GeodesyBackend>(
        &self,
        proj: &Projection<B>,
        point: CoordinatePair,
    ) -> Result<CoordinatePair> {
        let unit = self.config.angular_unit;
        let (x, y) = proj
            .backend()
            .forward(
                proj.definition(),
                unit.to_radians(point.u),
                unit.to_radians(point.v),
            )
            .map_err(|code| failed("forward", code))?;

        if proj.is_latlong() {
            Ok(CoordinatePair::new(
                unit.radians_to_unit(x),
                unit.radians_to_unit(y),
            ))
        } else {
            Ok(CoordinatePair::new(x, y))
        }
    }

    /// Projected (x, y) -> geographic (lon, lat).
    pub fn inverse<B: GeodesyBackend>(
        &self,
        proj: &Projection<B>,
        point: CoordinatePair,
    ) -> Result<CoordinatePair> {
        let unit = self.config.angular_unit;
        let (x, y) = if proj.is_latlong() {
            (unit.to_radians(point.u), unit.to_radians(point.v))
        } else {
            (point.u, point.v)
        };
        let (lon, lat) = proj
            .backend()
            .inverse(proj.definition(), x, y)
            .map_err(|code| failed("inverse", code))?;
        Ok(CoordinatePair::new(
            unit.radians_to_unit(lon),
            unit.radians_to_unit(lat),
        ))
    }

    /// Shared path of the batch and single-point transforms.
    fn run<B: GeodesyBackend>(
        &self,
        src: &Projection<B>,
        dst: &Projection<B>,
        x: &mut [f64],
        y: &mut [f64],
        mut z: Option<&mut [f64]>,
    ) -> Result<()> {
        check_shape(x.len(), y.len(), z.as_deref().map(<[f64]>::len))?;
        if x.is_empty() {
            return Ok(());
        }

        let unit = self.config.angular_unit;
        if src.is_latlong() {
            for v in x.iter_mut().chain(y.iter_mut()) {
                *v = unit.to_radians(*v);
            }
        }

        src.backend()
            .transform(
                src.definition(),
                dst.definition(),
                x,
                y,
                z.as_deref_mut(),
            )
            .map_err(|code| failed("transform", code))?;

        if dst.is_latlong() {
            for v in x.iter_mut().chain(y.iter_mut()) {
                *v = unit.radians_to_unit(*v);
            }
        }
        Ok(())
    }
}

/// [`Engine::transform`] with the default configuration.
pub fn transform<B: GeodesyBackend>(
    src: &Projection<B>,
    dst: &Projection<B>,
    x: &[f64],
    y: &[f64],
    z: Option<&[f64]>,
) -> Result<CoordinateBatch> {
    Engine::default().transform(src, dst, x, y, z)
}

/// [`Engine::transform_one`] with the default configuration.
pub fn transform_one<B: GeodesyBackend>(
    src: &Projection<B>,
    dst: &Projection<B>,
    point: CoordinatePair,
) -> Result<CoordinatePair> {
    Engine::default().transform_one(src, dst, point)
}

/// [`Engine::forward`] with the default configuration.
pub fn forward<B: GeodesyBackend>(
    proj: &Projection<B>,
    point: CoordinatePair,
) -> Result<CoordinatePair> {
    Engine::default().forward(proj, point)
}

/// [`Engine::inverse`] with the default configuration.
pub fn inverse<B: GeodesyBackend>(
    proj: &Projection<B>,
    point: CoordinatePair,
) -> Result<CoordinatePair> {
    Engine::default().inverse(proj, point)
}
