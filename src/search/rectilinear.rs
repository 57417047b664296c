//! Horizontal search on rectilinear meshes.
//!
//! Both axes use a monotone walk seeded from the hint index. On a sphere
//! the x axis is periodic in 360°, so each candidate bracket edge is first
//! normalized into a window around the query longitude; the walk then
//! steps toward the side that still excludes the point, wrapping through
//! the seam as needed.

use crate::error::{ErrorKind, Result};
use crate::grid::{Grid, GridKind};
use crate::hints::GridHints;
use crate::search::vertical::{search_vertical_s, search_vertical_z};
use crate::search::{
    fix_1d, wrap_adjacent, wrap_near, CellCoords, TimeContext, MAX_ZONAL_STEPS,
};

pub(crate) fn search(
    grid: &Grid,
    x: f32,
    y: f32,
    z: f32,
    hint: GridHints,
    tc: &TimeContext,
) -> Result<CellCoords> {
    let xvals = grid.lon;
    let yvals = grid.lat;
    let (xdim, ydim, zdim) = (grid.xdim, grid.ydim, grid.zdim);

    let mut xi = hint.xi.min(xdim - 2);
    let xsi: f64;

    if !grid.sphere_mesh {
        if x < xvals[0] || x > xvals[xdim - 1] {
            return Err(ErrorKind::OutOfBounds);
        }
        while xi < xdim - 1 && x > xvals[xi + 1] {
            xi += 1;
        }
        while xi > 0 && x < xvals[xi] {
            xi -= 1;
        }
        xsi = ((x - xvals[xi]) / (xvals[xi + 1] - xvals[xi])) as f64;
    } else {
        if !grid.zonal_periodic {
            // The extent may itself straddle the seam (descending end value)
            if xvals[0] < xvals[xdim - 1] {
                if x < xvals[0] || x > xvals[xdim - 1] {
                    return Err(ErrorKind::OutOfBounds);
                }
            } else if x < xvals[0] && x > xvals[xdim - 1] {
                return Err(ErrorKind::OutOfBounds);
            }
        }

        let mut xii = xi as isize;
        let mut x0 = wrap_near(xvals[xii as usize], x);
        let mut x1 = wrap_adjacent(xvals[xii as usize + 1], x0);
        let mut it = 0;
        while x0 > x || x1 < x {
            if x1 < x {
                xii += 1;
            } else if x0 > x {
                xii -= 1;
            }
            xii = fix_1d(xii, xdim, true) as isize;
            x0 = wrap_near(xvals[xii as usize], x);
            x1 = wrap_adjacent(xvals[xii as usize + 1], x0);
            it += 1;
            if it > MAX_ZONAL_STEPS {
                return Err(ErrorKind::OutOfBounds);
            }
        }
        xsi = ((x - x0) / (x1 - x0)) as f64;
        xi = xii as usize;
    }

    let mut yi = hint.yi.min(ydim - 2);
    if y < yvals[0] || y > yvals[ydim - 1] {
        return Err(ErrorKind::OutOfBounds);
    }
    while yi < ydim - 1 && y > yvals[yi + 1] {
        yi += 1;
    }
    while yi > 0 && y < yvals[yi] {
        yi -= 1;
    }
    let eta = ((y - yvals[yi]) / (yvals[yi + 1] - yvals[yi])) as f64;

    let (zi, zeta) = if zdim > 1 {
        match grid.kind {
            GridKind::RectilinearZ => search_vertical_z(z, grid.depth, hint.zi)?,
            GridKind::RectilinearS => {
                search_vertical_s(grid, z, xi, yi, xsi, eta, hint.zi, tc)?
            }
            _ => return Err(ErrorKind::Error),
        }
    } else {
        (hint.zi, 0.0)
    };

    if xsi < 0.0 || xsi > 1.0 {
        return Err(ErrorKind::OutOfBounds);
    }
    if eta < 0.0 || eta > 1.0 {
        return Err(ErrorKind::OutOfBounds);
    }
    if zeta < 0.0 || zeta > 1.0 {
        return Err(ErrorKind::OutOfBounds);
    }

    Ok(CellCoords {
        xi,
        yi,
        zi,
        xsi,
        eta,
        zeta,
    })
}
