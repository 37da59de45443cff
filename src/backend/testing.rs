//! Call-counting backend wrapper used by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{GeodesyBackend, Proj4rs};

#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub transforms: AtomicUsize,
    pub forwards: AtomicUsize,
    pub inverses: AtomicUsize,
    pub releases: AtomicUsize,
}

impl Calls {
    pub fn transforms(&self) -> usize {
        self.transforms.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn point_calls(&self) -> usize {
        self.forwards.load(Ordering::SeqCst) + self.inverses.load(Ordering::SeqCst)
    }
}

/// Wraps another backend, counting calls and optionally failing every
/// transform with a fixed status or every latlong derivation.
#[derive(Clone, Debug)]
pub(crate) struct Counting<B = Proj4rs> {
    inner: B,
    calls: Arc<Calls>,
    fail_with: Option<i32>,
    fail_derive: bool,
}

impl Counting<Proj4rs> {
    pub fn new() -> Self {
        Self {
            inner: Proj4rs,
            calls: Arc::default(),
            fail_with: None,
            fail_derive: false,
        }
    }

    pub fn failing(code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::new()
        }
    }

    pub fn failing_derive() -> Self {
        Self {
            fail_derive: true,
            ..Self::new()
        }
    }
}

impl<B> Counting<B> {
    pub fn calls(&self) -> Arc<Calls> {
        Arc::clone(&self.calls)
    }
}

impl<B: GeodesyBackend> GeodesyBackend for Counting<B> {
    type Definition = B::Definition;

    fn init(&self, params: &[String]) -> Result<Self::Definition, String> {
        self.inner.init(params)
    }

    fn release(&self, definition: &mut Self::Definition) {
        self.calls.releases.fetch_add(1, Ordering::SeqCst);
        self.inner.release(definition);
    }

    fn is_latlong(&self, definition: &Self::Definition) -> bool {
        self.inner.is_latlong(definition)
    }

    fn is_geocent(&self, definition: &Self::Definition) -> bool {
        self.inner.is_geocent(definition)
    }

    fn definition_string(&self, definition: &Self::Definition) -> String {
        self.inner.definition_string(definition)
    }

    fn derive_latlong(&self, definition: &Self::Definition) -> Result<Self::Definition, String> {
        if self.fail_derive {
            return Err("no geographic counterpart".to_string());
        }
        self.inner.derive_latlong(definition)
    }

    fn transform(
        &self,
        src: &Self::Definition,
        dst: &Self::Definition,
        x: &mut [f64],
        y: &mut [f64],
        z: Option<&mut [f64]>,
    ) -> Result<(), i32> {
        self.calls.transforms.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.fail_with {
            return Err(code);
        }
        self.inner.transform(src, dst, x, y, z)
    }

    fn forward(
        &self,
        definition: &Self::Definition,
        lon: f64,
        lat: f64,
    ) -> Result<(f64, f64), i32> {
        self.calls.forwards.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.fail_with {
            return Err(code);
        }
        self.inner.forward(definition, lon, lat)
    }

    fn inverse(&self, definition: &Self::Definition, x: f64, y: f64) -> Result<(f64, f64), i32> {
        self.calls.inverses.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.fail_with {
            return Err(code);
        }
        self.inner.inverse(definition, x, y)
    }
}
