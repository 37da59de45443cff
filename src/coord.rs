//! Coordinate value types: a single pair and a batch of parallel arrays.

use crate::error::{ProjError, Result};

/// Two floating-point coordinates.
///
/// Meaning depends on the definition it is used with: (lon, lat) for
/// geographic definitions, (x, y) for projected ones.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordinatePair {
    pub u: f64,
    pub v: f64,
}

impl CoordinatePair {
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl From<(f64, f64)> for CoordinatePair {
    fn from((u, v): (f64, f64)) -> Self {
        Self { u, v }
    }
}

impl From<CoordinatePair> for (f64, f64) {
    fn from(p: CoordinatePair) -> Self {
        (p.u, p.v)
    }
}

/// Parallel x/y (and optional z) arrays of equal length.
///
/// The length invariant is checked on construction and cannot be broken
/// afterwards since the arrays are only exposed as slices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateBatch {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Option<Vec<f64>>,
}

impl CoordinateBatch {
    /// Build a batch, failing with [`ProjError::ShapeMismatch`] on unequal lengths.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Option<Vec<f64>>) -> Result<Self> {
        check_shape(x.len(), y.len(), z.as_ref().map(Vec::len))?;
        Ok(Self { x, y, z })
    }

    /// Copy borrowed arrays into a new batch.
    pub fn from_slices(x: &[f64], y: &[f64], z: Option<&[f64]>) -> Result<Self> {
        check_shape(x.len(), y.len(), z.map(<[f64]>::len))?;
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.map(<[f64]>::to_vec),
        })
    }

    /// Build a 2D batch from a list of pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = CoordinatePair>,
    {
        let (x, y) = pairs.into_iter().map(|p| (p.u, p.v)).unzip();
        Self { x, y, z: None }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> Option<&[f64]> {
        self.z.as_deref()
    }

    /// The i-th (x, y) pair, ignoring z.
    pub fn pair(&self, i: usize) -> Option<CoordinatePair> {
        Some(CoordinatePair::new(*self.x.get(i)?, *self.y.get(i)?))
    }

    /// Iterate over (x, y) pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = CoordinatePair> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&u, &v)| CoordinatePair::new(u, v))
    }

    /// Mutable access to all arrays at once, as handed to the backend.
    pub(crate) fn arrays_mut(&mut self) -> (&mut [f64], &mut [f64], Option<&mut [f64]>) {
        (
            self.x.as_mut_slice(),
            self.y.as_mut_slice(),
            self.z.as_deref_mut(),
        )
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Option<Vec<f64>>) {
        (self.x, self.y, self.z)
    }
}

/// Length check shared by every batch entry point; runs before any backend work.
pub(crate) fn check_shape(x: usize, y: usize, z: Option<usize>) -> Result<()> {
    if x != y || z.is_some_and(|n| n != x) {
        return Err(ProjError::ShapeMismatch { x, y, z });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let err = CoordinateBatch::new(vec![1.0, 2.0], vec![1.0], None).unwrap_err();
        assert_eq!(
            err,
            ProjError::ShapeMismatch {
                x: 2,
                y: 1,
                z: None
            }
        );

        let err = CoordinateBatch::new(vec![1.0], vec![1.0], Some(vec![])).unwrap_err();
        assert!(matches!(err, ProjError::ShapeMismatch { z: Some(0), .. }));
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let batch = CoordinateBatch::new(vec![], vec![], Some(vec![])).unwrap();
        assert!(batch.is_empty());
        assert!(batch.has_z());
    }

    #[test]
    fn test_pairs_preserve_order() {
        let batch = CoordinateBatch::from_pairs([(1.0, 2.0).into(), (3.0, 4.0).into()]);
        let pairs: Vec<(f64, f64)> = batch.pairs().map(Into::into).collect();
        assert_eq!(pairs, vec![(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(batch.pair(1), Some(CoordinatePair::new(3.0, 4.0)));
        assert_eq!(batch.pair(2), None);
    }
}
