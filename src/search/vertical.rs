//! Vertical bracket search.
//!
//! Z-grids bracket `z` in a fixed 1-D depth vector. S-grids first restrict
//! the 3-D (or time-varying 4-D) depth table to the current horizontal
//! cell, producing a synthetic column; the column values are evaluated on
//! demand rather than materialized, so the search allocates nothing for
//! any number of levels. Column values round through `f32`, matching the
//! single-precision tables they come from.

use crate::error::{ErrorKind, Result};
use crate::grid::Grid;
use crate::search::TimeContext;

/// Bracket `z` in a strictly increasing depth vector, starting at `zi`.
///
/// Returns the left-edge index and `ζ ∈ [0, 1]`.
///
/// # Errors
/// * `OutOfBounds` if `z` lies strictly outside `[zvals[0], zvals[zdim-1]]`
pub(crate) fn search_vertical_z(z: f32, zvals: &[f32], zi: usize) -> Result<(usize, f64)> {
    let zdim = zvals.len();
    debug_assert!(zdim >= 2);
    if z < zvals[0] || z > zvals[zdim - 1] {
        return Err(ErrorKind::OutOfBounds);
    }

    let mut zi = zi.min(zdim - 1);
    while zi < zdim - 1 && z > zvals[zi + 1] {
        zi += 1;
    }
    while zi > 0 && z < zvals[zi] {
        zi -= 1;
    }
    if zi == zdim - 1 {
        zi -= 1;
    }

    let zeta = ((z - zvals[zi]) / (zvals[zi + 1] - zvals[zi])) as f64;
    Ok((zi, zeta))
}

/// Bracket `z` in the terrain-following column at cell `(xi, yi)`, local
/// position `(ξ, η)`.
///
/// The column value at level `k` is the bilinear restriction of the depth
/// table to `(ξ, η)`; for 4-D tables the two frames around `tc` are blended
/// linearly in time first.
///
/// # Errors
/// * `OutOfBounds` if `z` lies strictly outside the column
#[allow(clippy::too_many_arguments)]
pub(crate) fn search_vertical_s(
    grid: &Grid,
    z: f32,
    xi: usize,
    yi: usize,
    xsi: f64,
    eta: f64,
    zi: usize,
    tc: &TimeContext,
) -> Result<(usize, f64)> {
    let zdim = grid.zdim;
    debug_assert!(zdim >= 2);

    let w00 = (1. - xsi) * (1. - eta);
    let w10 = xsi * (1. - eta);
    let w11 = xsi * eta;
    let w01 = (1. - xsi) * eta;

    let col = |k: usize| -> f32 {
        if grid.z4d {
            let table = grid.depth_s4();
            let ti = tc.ti;
            let ti1 = if ti < grid.tdim - 1 { ti + 1 } else { ti };
            let zt0 = w00 * table.at(ti, k, yi, xi) as f64
                + w10 * table.at(ti, k, yi, xi + 1) as f64
                + w11 * table.at(ti, k, yi + 1, xi + 1) as f64
                + w01 * table.at(ti, k, yi + 1, xi) as f64;
            let zt1 = w00 * table.at(ti1, k, yi, xi) as f64
                + w10 * table.at(ti1, k, yi, xi + 1) as f64
                + w11 * table.at(ti1, k, yi + 1, xi + 1) as f64
                + w01 * table.at(ti1, k, yi + 1, xi) as f64;
            (zt0 + (zt1 - zt0) * ((tc.time - tc.t0) / (tc.t1 - tc.t0))) as f32
        } else {
            let table = grid.depth_s3();
            (w00 * table.at(k, yi, xi) as f64
                + w10 * table.at(k, yi, xi + 1) as f64
                + w11 * table.at(k, yi + 1, xi + 1) as f64
                + w01 * table.at(k, yi + 1, xi) as f64) as f32
        }
    };

    if z < col(0) || z > col(zdim - 1) {
        return Err(ErrorKind::OutOfBounds);
    }

    let mut zi = zi.min(zdim - 1);
    while zi < zdim - 1 && z > col(zi + 1) {
        zi += 1;
    }
    while zi > 0 && z < col(zi) {
        zi -= 1;
    }
    if zi == zdim - 1 {
        zi -= 1;
    }

    let z0 = col(zi);
    let z1 = col(zi + 1);
    let zeta = ((z - z0) / (z1 - z0)) as f64;
    Ok((zi, zeta))
}
