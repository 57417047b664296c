//! Spatial interpolation kernels.
//!
//! Each kernel samples one already-located cell on a single data plane:
//! the caller has produced the left-edge indices and the cell-local
//! coordinates, so these are pure weighted sums. Weights are accumulated
//! in `f64` and the result rounds once to `f32` on the way out.

use crate::view::{View2, View3};

/// Bilinear sample of a `(y, x)` plane at `(ξ, η)` within cell `(xi, yi)`.
#[inline]
pub(crate) fn bilinear(xsi: f64, eta: f64, xi: usize, yi: usize, data: View2) -> f32 {
    ((1. - xsi) * (1. - eta) * data.at(yi, xi) as f64
        + xsi * (1. - eta) * data.at(yi, xi + 1) as f64
        + xsi * eta * data.at(yi + 1, xi + 1) as f64
        + (1. - xsi) * eta * data.at(yi + 1, xi) as f64) as f32
}

/// Trilinear sample of a `(z, y, x)` volume: bilinear on the two bracketing
/// levels, then linear in `ζ`.
#[inline]
pub(crate) fn trilinear(
    xsi: f64,
    eta: f64,
    zeta: f64,
    xi: usize,
    yi: usize,
    zi: usize,
    data: View3,
) -> f32 {
    let f0 = bilinear(xsi, eta, xi, yi, data.layer(zi));
    let f1 = bilinear(xsi, eta, xi, yi, data.layer(zi + 1));
    ((1. - zeta) * f0 as f64 + zeta * f1 as f64) as f32
}

/// Nearest-neighbor sample of a `(y, x)` plane.
#[inline]
pub(crate) fn nearest_2d(xsi: f64, eta: f64, xi: usize, yi: usize, data: View2) -> f32 {
    let ii = if xsi < 0.5 { xi } else { xi + 1 };
    let jj = if eta < 0.5 { yi } else { yi + 1 };
    data.at(jj, ii)
}

/// Nearest-neighbor sample of a `(z, y, x)` volume.
#[inline]
pub(crate) fn nearest_3d(
    xsi: f64,
    eta: f64,
    zeta: f64,
    xi: usize,
    yi: usize,
    zi: usize,
    data: View3,
) -> f32 {
    let kk = if zeta < 0.5 { zi } else { zi + 1 };
    nearest_2d(xsi, eta, xi, yi, data.layer(kk))
}
