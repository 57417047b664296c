//! Horizontal search on curvilinear meshes.
//!
//! Cells are general quadrilaterals, so recovering `(ξ, η)` from `(x, y)`
//! means inverting the bilinear map of the candidate cell: eliminating ξ
//! leaves a quadratic in η, solved on the `+√` branch (the linear limit
//! when the cell degenerates to a parallelogram). If the solved local
//! coordinates fall outside the unit square, the walk steps one cell in
//! the indicated direction and tries again, wrapping and folding indices
//! per the mesh topology.

use tracing::warn;

use crate::error::{ErrorKind, Result};
use crate::grid::{Grid, GridKind};
use crate::hints::GridHints;
use crate::search::vertical::{search_vertical_s, search_vertical_z};
use crate::search::{
    fix_2d, wrap_adjacent, wrap_near, CellCoords, TimeContext, MAX_CELL_SEARCH_ITERS,
};

/// Threshold below which the quadratic degenerates to a linear solve.
const PARALLELOGRAM_EPS: f64 = 1e-12;

pub(crate) fn search(
    grid: &Grid,
    x: f32,
    y: f32,
    z: f32,
    hint: GridHints,
    tc: &TimeContext,
) -> Result<CellCoords> {
    let xgrid = grid.lon_2d();
    let ygrid = grid.lat_2d();
    let (xdim, ydim, zdim) = (grid.xdim, grid.ydim, grid.zdim);

    if !grid.zonal_periodic || !grid.sphere_mesh {
        let first = xgrid.at(0, 0);
        let last = xgrid.at(0, xdim - 1);
        if first < last {
            if x < first || x > last {
                return Err(ErrorKind::OutOfBounds);
            }
        } else if x < first && x > last {
            return Err(ErrorKind::OutOfBounds);
        }
    }

    let xf = x as f64;
    let yf = y as f64;
    let mut xi = hint.xi.min(xdim - 2);
    let mut yi = hint.yi.min(ydim - 2);

    let mut xsi = -1.0_f64;
    let mut eta = -1.0_f64;
    let mut it = 0;
    while xsi < 0.0 || xsi > 1.0 || eta < 0.0 || eta > 1.0 {
        // Corners in walk order: (xi,yi), (xi+1,yi), (xi+1,yi+1), (xi,yi+1)
        let mut xc = [
            xgrid.at(yi, xi) as f64,
            xgrid.at(yi, xi + 1) as f64,
            xgrid.at(yi + 1, xi + 1) as f64,
            xgrid.at(yi + 1, xi) as f64,
        ];
        if grid.sphere_mesh {
            xc[0] = wrap_near(xc[0], xf);
            let anchor = xc[0];
            for v in xc.iter_mut().skip(1) {
                *v = wrap_adjacent(*v, anchor);
            }
        }
        let yc = [
            ygrid.at(yi, xi) as f64,
            ygrid.at(yi, xi + 1) as f64,
            ygrid.at(yi + 1, xi + 1) as f64,
            ygrid.at(yi + 1, xi) as f64,
        ];

        let a = [
            xc[0],
            -xc[0] + xc[1],
            -xc[0] + xc[3],
            xc[0] - xc[1] + xc[2] - xc[3],
        ];
        let b = [
            yc[0],
            -yc[0] + yc[1],
            -yc[0] + yc[3],
            yc[0] - yc[1] + yc[2] - yc[3],
        ];

        let aa = a[3] * b[2] - a[2] * b[3];
        let bb = a[3] * b[0] - a[0] * b[3] + a[1] * b[2] - a[2] * b[1] + xf * b[3] - yf * a[3];
        let cc = a[1] * b[0] - a[0] * b[1] + xf * b[1] - yf * a[1];

        if aa.abs() < PARALLELOGRAM_EPS {
            eta = -cc / bb;
        } else {
            let det = (bb * bb - 4.0 * aa * cc).sqrt();
            // A NaN discriminant keeps the previous iteration's (ξ, η)
            if !det.is_nan() {
                eta = (-bb + det) / (2.0 * aa);
            }
        }
        xsi = (xf - a[0] - a[2] * eta) / (a[1] + a[3] * eta);

        if xsi < 0.0 && eta < 0.0 && xi == 0 && yi == 0 {
            return Err(ErrorKind::OutOfBounds);
        }
        if xsi > 1.0 && eta > 1.0 && xi == xdim - 1 && yi == ydim - 1 {
            return Err(ErrorKind::OutOfBounds);
        }

        let mut xi_next = xi as isize;
        let mut yi_next = yi as isize;
        if xsi < 0.0 {
            xi_next -= 1;
        }
        if xsi > 1.0 {
            xi_next += 1;
        }
        if eta < 0.0 {
            yi_next -= 1;
        }
        if eta > 1.0 {
            yi_next += 1;
        }
        (xi, yi) = fix_2d(xi_next, yi_next, xdim, ydim, grid.sphere_mesh);

        it += 1;
        if it > MAX_CELL_SEARCH_ITERS {
            warn!(
                iterations = MAX_CELL_SEARCH_ITERS,
                "enclosing cell not found"
            );
            return Err(ErrorKind::OutOfBounds);
        }
    }

    if xsi.is_nan() || eta.is_nan() {
        warn!("local coordinates are nan");
        return Err(ErrorKind::OutOfBounds);
    }

    let (zi, zeta) = if zdim > 1 {
        match grid.kind {
            GridKind::CurvilinearZ => search_vertical_z(z, grid.depth, hint.zi)?,
            GridKind::CurvilinearS => {
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

#[cfg(test)]
mod test {
    use super::search;
    use crate::error::ErrorKind;
    use crate::grid::Grid;
    use crate::hints::GridHints;
    use crate::search::rectilinear;
    use crate::search::TimeContext;
    use crate::utils::{axis, product_mesh};

    fn tc() -> TimeContext {
        TimeContext {
            ti: 0,
            time: 0.0,
            t0: 0.0,
            t1: 1.0,
        }
    }

    fn hint(xi: usize, yi: usize) -> GridHints {
        GridHints {
            xi,
            yi,
            zi: 0,
            ti: 0,
        }
    }

    /// A mesh whose 2-D coordinates are the outer product of rectilinear
    /// axes must locate cells exactly like the rectilinear search.
    #[test]
    fn test_matches_rectilinear_on_product_mesh() {
        let xs = axis(0.0_f32, 8.0, 9);
        let ys = axis(0.0_f32, 4.0, 5);
        let (lon2, lat2) = product_mesh(&xs, &ys);
        let depth = [0.0_f32];
        let time = [0.0_f64];

        let curv =
            Grid::curvilinear_z(&lon2, &lat2, 9, 5, &depth, &time, false, false).unwrap();
        let rect = Grid::rectilinear_z(&xs, &ys, &depth, &time, false, false).unwrap();

        for &(x, y) in &[(3.25_f32, 1.5_f32), (0.1, 0.1), (7.9, 3.9), (4.0, 2.0)] {
            let c = search(&curv, x, y, 0.0, hint(0, 0), &tc()).unwrap();
            let r = rectilinear::search(&rect, x, y, 0.0, hint(0, 0), &tc()).unwrap();
            assert_eq!((c.xi, c.yi), (r.xi, r.yi));
            assert!((c.xsi - r.xsi).abs() < 1e-6);
            assert!((c.eta - r.eta).abs() < 1e-6);
        }
    }

    /// A uniformly sheared mesh keeps every cell a parallelogram, driving
    /// the degenerate linear branch of the solve.
    #[test]
    fn test_sheared_parallelogram_cells() {
        let (nx, ny) = (6, 5);
        let mut lon2 = vec![0.0_f32; nx * ny];
        let mut lat2 = vec![0.0_f32; nx * ny];
        for j in 0..ny {
            for i in 0..nx {
                lon2[j * nx + i] = i as f32 + 0.5 * j as f32;
                lat2[j * nx + i] = j as f32;
            }
        }
        let depth = [0.0_f32];
        let time = [0.0_f64];
        let grid =
            Grid::curvilinear_z(&lon2, &lat2, nx, ny, &depth, &time, false, false).unwrap();

        // (x, y) = (3.0, 1.5): row 1.5 shifts x by 0.75, so local x is 2.25
        let cc = search(&grid, 3.0, 1.5, 0.0, hint(0, 0), &tc()).unwrap();
        assert_eq!((cc.xi, cc.yi), (2, 1));
        assert!((cc.xsi - 0.25).abs() < 1e-6);
        assert!((cc.eta - 0.5).abs() < 1e-6);
    }

    /// A swept (trapezoidal) cell exercises the full quadratic branch.
    #[test]
    fn test_swept_quadrilateral_converges() {
        // Rows fan out: row spacing in x doubles from bottom to top
        let (nx, ny) = (5, 4);
        let mut lon2 = vec![0.0_f32; nx * ny];
        let mut lat2 = vec![0.0_f32; nx * ny];
        for j in 0..ny {
            for i in 0..nx {
                lon2[j * nx + i] = i as f32 * (1.0 + j as f32);
                lat2[j * nx + i] = j as f32;
            }
        }
        let depth = [0.0_f32];
        let time = [0.0_f64];
        let grid =
            Grid::curvilinear_z(&lon2, &lat2, nx, ny, &depth, &time, false, false).unwrap();

        // Forward-map the cell (1, 1) at (ξ, η) = (0.25, 0.5) and invert
        let corners_x = [2.0_f64, 4.0, 6.0, 3.0]; // (1,1),(2,1),(2,2),(1,2)
        let corners_y = [1.0_f64, 1.0, 2.0, 2.0];
        let (xsi, eta) = (0.25_f64, 0.5_f64);
        let w = [
            (1. - xsi) * (1. - eta),
            xsi * (1. - eta),
            xsi * eta,
            (1. - xsi) * eta,
        ];
        let x: f64 = (0..4).map(|c| w[c] * corners_x[c]).sum();
        let y: f64 = (0..4).map(|c| w[c] * corners_y[c]).sum();

        let cc = search(&grid, x as f32, y as f32, 0.0, hint(3, 2), &tc()).unwrap();
        assert_eq!((cc.xi, cc.yi), (1, 1));
        assert!((cc.xsi - xsi).abs() < 1e-6);
        assert!((cc.eta - eta).abs() < 1e-6);
    }

    #[test]
    fn test_corner_exits_out_of_bounds() {
        // Negative shear bends the mesh so a point just south of the origin
        // cell solves to ξ < 0 and η < 0 simultaneously
        let (nx, ny) = (5, 4);
        let mut lon2 = vec![0.0_f32; nx * ny];
        let mut lat2 = vec![0.0_f32; nx * ny];
        for j in 0..ny {
            for i in 0..nx {
                lon2[j * nx + i] = i as f32 - 0.5 * j as f32;
                lat2[j * nx + i] = j as f32;
            }
        }
        let depth = [0.0_f32];
        let time = [0.0_f64];
        let grid =
            Grid::curvilinear_z(&lon2, &lat2, nx, ny, &depth, &time, false, false).unwrap();

        // Exits on the origin-corner check
        assert_eq!(
            search(&grid, 0.2, -0.5, 0.0, hint(0, 0), &tc()),
            Err(ErrorKind::OutOfBounds)
        );
        // Beyond the x extent of the first row is rejected by the pre-check
        assert_eq!(
            search(&grid, 4.5, 2.0, 0.0, hint(3, 2), &tc()),
            Err(ErrorKind::OutOfBounds)
        );
    }
}
