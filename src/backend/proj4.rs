//! Backend on the pure-Rust `proj4rs` crate.
//!
//! Parameters are normalized to `+key=value` tokens and handed to
//! `Proj::from_proj_string`. Every definition keeps a geographic companion on
//! the same datum so single-point forward/inverse run as plain transforms
//! without a datum shift.

use std::fmt;

use proj4rs::Proj;
use tracing::debug;

use super::{
    GeodesyBackend, ERR_GENERIC, ERR_GEOCENTRIC, ERR_GRID_UNAVAILABLE,
    ERR_LAT_OR_LON_EXCEED_LIMIT, ERR_NON_CONVERGENT, ERR_TOLERANCE_CONDITION,
};

const NO_ARGS: &str = "no arguments in initialization list";
const PROJ_NOT_NAMED: &str = "projection not named";

/// Parameters that describe the datum and ellipsoid, carried over to the
/// derived geographic definition.
const DATUM_KEYS: &[&str] = &[
    "datum", "ellps", "a", "b", "rf", "f", "es", "e", "R", "towgs84", "nadgrids", "pm", "no_defs",
];

/// One `+key=value` or `+flag` parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Param {
    key: String,
    value: Option<String>,
}

impl Param {
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let token = token.strip_prefix('+').unwrap_or(token);
        if token.is_empty() {
            return None;
        }
        let param = match token.split_once('=') {
            Some((key, value)) => Self {
                key: key.to_string(),
                value: Some(value.to_string()),
            },
            None => Self {
                key: token.to_string(),
                value: None,
            },
        };
        Some(param)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "+{}={}", self.key, value),
            None => write!(f, "+{}", self.key),
        }
    }
}

fn render(params: &[Param]) -> String {
    params
        .iter()
        .map(Param::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Definition produced by [`Proj4rs`].
pub struct Proj4Definition {
    params: Vec<Param>,
    proj: Proj,
    /// Geographic companion; `None` when `proj` is itself geographic or the
    /// companion could not be built.
    geographic: Option<Proj>,
}

impl fmt::Debug for Proj4Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proj4Definition")
            .field("definition", &render(&self.params))
            .finish_non_exhaustive()
    }
}

/// Default geodesy backend, backed by `proj4rs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Proj4rs;

impl Proj4rs {
    fn build(params: Vec<Param>) -> Result<Proj4Definition, String> {
        if params.is_empty() {
            return Err(NO_ARGS.to_string());
        }
        if !params.iter().any(|p| p.key == "proj") {
            return Err(PROJ_NOT_NAMED.to_string());
        }

        let definition = render(&params);
        let proj = Proj::from_proj_string(&definition).map_err(|e| format!("{definition}: {e}"))?;

        let geographic = if proj.is_latlong() {
            None
        } else {
            let companion = render(&latlong_params(&params));
            match Proj::from_proj_string(&companion) {
                Ok(p) => Some(p),
                Err(e) => {
                    debug!(%definition, error = %e, "no geographic companion");
                    None
                }
            }
        };

        Ok(Proj4Definition {
            params,
            proj,
            geographic,
        })
    }
}

/// Keep the datum parameters and swap the projection for `longlat`.
fn latlong_params(params: &[Param]) -> Vec<Param> {
    let mut out = vec![Param {
        key: "proj".to_string(),
        value: Some("longlat".to_string()),
    }];
    out.extend(
        params
            .iter()
            .filter(|p| DATUM_KEYS.contains(&p.key.as_str()))
            .cloned(),
    );
    out
}

/// Map a `proj4rs` failure onto the legacy PROJ.4 status table.
///
/// `proj4rs` errors carry no numeric code, so classification goes by message.
fn status_of(err: impl fmt::Display) -> i32 {
    let msg = err.to_string().to_lowercase();
    if msg.contains("latitude") || msg.contains("longitude") || msg.contains("out of range") {
        ERR_LAT_OR_LON_EXCEED_LIMIT
    } else if msg.contains("converge") {
        ERR_NON_CONVERGENT
    } else if msg.contains("tolerance") {
        ERR_TOLERANCE_CONDITION
    } else if msg.contains("grid") {
        ERR_GRID_UNAVAILABLE
    } else if msg.contains("geocent") {
        ERR_GEOCENTRIC
    } else {
        ERR_GENERIC
    }
}

/// Human-readable text for a status returned by this backend.
pub fn status_message(code: i32) -> &'static str {
    match code {
        0 => "no error",
        ERR_GENERIC => "backend failure",
        ERR_LAT_OR_LON_EXCEED_LIMIT => "latitude or longitude exceeded limits",
        ERR_NON_CONVERGENT => "non-convergent inverse computation",
        ERR_TOLERANCE_CONDITION => "tolerance condition error",
        ERR_GRID_UNAVAILABLE => "failed to load datum shift grid",
        ERR_GEOCENTRIC => "geocentric transformation missing z or ellipsoid",
        _ => "unknown error",
    }
}

/// A finite input must not come back as a non-finite output.
fn finite_or_fail(input: &[f64], output: impl Iterator<Item = f64>) -> Result<(), i32> {
    for (i, o) in input.iter().zip(output) {
        if i.is_finite() && !o.is_finite() {
            return Err(ERR_LAT_OR_LON_EXCEED_LIMIT);
        }
    }
    Ok(())
}

/// Copy transformed points into the caller's arrays, or leave them
/// untouched if any finite coordinate became non-finite.
fn write_back_2d(points: &[(f64, f64)], x: &mut [f64], y: &mut [f64]) -> Result<(), i32> {
    finite_or_fail(x, points.iter().map(|p| p.0))?;
    finite_or_fail(y, points.iter().map(|p| p.1))?;
    for ((p, x), y) in points.iter().zip(x.iter_mut()).zip(y.iter_mut()) {
        *x = p.0;
        *y = p.1;
    }
    Ok(())
}

fn write_back_3d(
    points: &[(f64, f64, f64)],
    x: &mut [f64],
    y: &mut [f64],
    z: &mut [f64],
) -> Result<(), i32> {
    finite_or_fail(x, points.iter().map(|p| p.0))?;
    finite_or_fail(y, points.iter().map(|p| p.1))?;
    finite_or_fail(z, points.iter().map(|p| p.2))?;
    for (((p, x), y), z) in points
        .iter()
        .zip(x.iter_mut())
        .zip(y.iter_mut())
        .zip(z.iter_mut())
    {
        *x = p.0;
        *y = p.1;
        *z = p.2;
    }
    Ok(())
}

fn transform_point(src: &Proj, dst: &Proj, u: f64, v: f64) -> Result<(f64, f64), i32> {
    let mut point = (u, v);
    proj4rs::transform::transform(src, dst, &mut point).map_err(status_of)?;
    if u.is_finite() && v.is_finite() && !(point.0.is_finite() && point.1.is_finite()) {
        return Err(ERR_LAT_OR_LON_EXCEED_LIMIT);
    }
    Ok(point)
}

impl GeodesyBackend for Proj4rs {
    type Definition = Proj4Definition;

    fn init(&self, params: &[String]) -> Result<Proj4Definition, String> {
        // A token holding several `+key=value` pairs is split, so every
        // parameter is seen on its own.
        Self::build(
            params
                .iter()
                .flat_map(|t| t.split_whitespace())
                .filter_map(Param::parse)
                .collect(),
        )
    }

    fn is_latlong(&self, definition: &Proj4Definition) -> bool {
        definition.proj.is_latlong()
    }

    fn is_geocent(&self, definition: &Proj4Definition) -> bool {
        definition.proj.is_geocent()
    }

    fn definition_string(&self, definition: &Proj4Definition) -> String {
        render(&definition.params)
    }

    fn derive_latlong(&self, definition: &Proj4Definition) -> Result<Proj4Definition, String> {
        Self::build(latlong_params(&definition.params))
    }

    fn transform(
        &self,
        src: &Proj4Definition,
        dst: &Proj4Definition,
        x: &mut [f64],
        y: &mut [f64],
        z: Option<&mut [f64]>,
    ) -> Result<(), i32> {
        // Work on a packed copy so a failure leaves the caller's arrays intact.
        match z {
            Some(z) => {
                let mut points: Vec<(f64, f64, f64)> = x
                    .iter()
                    .zip(y.iter())
                    .zip(z.iter())
                    .map(|((&x, &y), &z)| (x, y, z))
                    .collect();
                proj4rs::transform::transform(&src.proj, &dst.proj, points.as_mut_slice())
                    .map_err(status_of)?;
                write_back_3d(&points, x, y, z)
            }
            None => {
                let mut points: Vec<(f64, f64)> =
                    x.iter().zip(y.iter()).map(|(&x, &y)| (x, y)).collect();
                proj4rs::transform::transform(&src.proj, &dst.proj, points.as_mut_slice())
                    .map_err(status_of)?;
                write_back_2d(&points, x, y)
            }
        }
    }

    fn forward(&self, definition: &Proj4Definition, lon: f64, lat: f64) -> Result<(f64, f64), i32> {
        match &definition.geographic {
            Some(geographic) => transform_point(geographic, &definition.proj, lon, lat),
            None if definition.proj.is_latlong() => Ok((lon, lat)),
            None => Err(ERR_GENERIC),
        }
    }

    fn inverse(&self, definition: &Proj4Definition, x: f64, y: f64) -> Result<(f64, f64), i32> {
        match &definition.geographic {
            Some(geographic) => transform_point(&definition.proj, geographic, x, y),
            None if definition.proj.is_latlong() => Ok((x, y)),
            None => Err(ERR_GENERIC),
        }
    }
}
