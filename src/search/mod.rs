//! Cell and time location over structured meshes.
//!
//! Every search starts from the caller's hint indices and walks locally,
//! so a particle that barely moved between queries finds its cell in a
//! handful of steps. The walks are bounded: the spherical zonal walk gives
//! up after [`MAX_ZONAL_STEPS`] and the curvilinear cell search after
//! [`MAX_CELL_SEARCH_ITERS`], both reported as out-of-bounds. These limits
//! bound worst-case latency on pathological inputs and are part of the
//! external contract.

pub(crate) mod curvilinear;
pub(crate) mod rectilinear;
pub(crate) mod time;
pub(crate) mod vertical;

use num_traits::Float;

use crate::error::Result;
use crate::grid::{Grid, GridKind};
use crate::hints::GridHints;

/// Step limit for the zonal walk on spherical rectilinear meshes.
pub const MAX_ZONAL_STEPS: usize = 10_000;

/// Iteration limit for the curvilinear cell search.
pub const MAX_CELL_SEARCH_ITERS: usize = 1_000_000;

/// A located cell: left-edge indices plus cell-local coordinates.
///
/// At a successful search, `xsi`, `eta`, and `zeta` all lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CellCoords {
    pub xi: usize,
    pub yi: usize,
    pub zi: usize,
    pub xsi: f64,
    pub eta: f64,
    pub zeta: f64,
}

/// Time bracket context threaded through the search; only 4-D depth
/// tables read the blend fields.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TimeContext {
    pub ti: usize,
    pub time: f64,
    pub t0: f64,
    pub t1: f64,
}

/// Locate the cell containing `(x, y, z)`, dispatching on the grid kind.
#[inline]
pub(crate) fn search_indices(
    grid: &Grid,
    x: f32,
    y: f32,
    z: f32,
    hint: GridHints,
    tc: &TimeContext,
) -> Result<CellCoords> {
    match grid.kind {
        GridKind::RectilinearZ | GridKind::RectilinearS => {
            rectilinear::search(grid, x, y, z, hint, tc)
        }
        GridKind::CurvilinearZ | GridKind::CurvilinearS => {
            curvilinear::search(grid, x, y, z, hint, tc)
        }
    }
}

/// Clamp or wrap a 1-D cell index into `[0, xdim-2]`.
///
/// On a sphere the x axis is periodic, so running off one end re-enters at
/// the other; on a bounded mesh the index saturates.
#[inline]
pub(crate) fn fix_1d(mut xi: isize, xdim: usize, sphere: bool) -> usize {
    let hi = xdim as isize - 2;
    if xi < 0 {
        xi = if sphere { hi } else { 0 };
    }
    if xi > hi {
        xi = if sphere { 0 } else { hi };
    }
    xi as usize
}

/// Fix a 2-D cell index pair.
///
/// The y index saturates at both edges. When it saturates at the top of a
/// spherical mesh, the cell has walked over the pole and the x index is
/// reflected (`xi := xdim - xi`, tripolar fold); the reflected value is
/// passed through [`fix_1d`] again since the fold can land outside
/// `[0, xdim-2]`.
#[inline]
pub(crate) fn fix_2d(
    xi: isize,
    yi: isize,
    xdim: usize,
    ydim: usize,
    sphere: bool,
) -> (usize, usize) {
    let mut xi = fix_1d(xi, xdim, sphere);
    let mut yi = yi;
    if yi < 0 {
        yi = 0;
    }
    if yi > ydim as isize - 2 {
        yi = ydim as isize - 2;
        if sphere {
            xi = fix_1d(xdim as isize - xi as isize, xdim, sphere);
        }
    }
    (xi, yi as usize)
}

/// Normalize a longitude into the 225°-wide window around `x`.
#[inline]
pub(crate) fn wrap_near<T: Float>(mut v: T, x: T) -> T {
    let w = T::from(225.0).unwrap();
    let full = T::from(360.0).unwrap();
    if v < x - w {
        v = v + full;
    }
    if v > x + w {
        v = v - full;
    }
    v
}

/// Normalize a longitude into the 180°-wide window around `anchor`.
#[inline]
pub(crate) fn wrap_adjacent<T: Float>(mut v: T, anchor: T) -> T {
    let half = T::from(180.0).unwrap();
    let full = T::from(360.0).unwrap();
    if v < anchor - half {
        v = v + full;
    }
    if v > anchor + half {
        v = v - full;
    }
    v
}
