//! Fields and the temporal sampling façade.
//!
//! A [`Field`] pairs a grid with a `(t, z, y, x)` data buffer and the
//! field-level time policy. [`Field::sample`] is the entry point that
//! composes everything: extrapolation policy, time bracket, hint-seeded
//! spatial search, per-frame kernel evaluation, and the two-frame linear
//! blend. [`sample_uv`] and [`sample_uv_rotated`] layer the vector
//! variants on top of it.

use crate::error::{BuildError, ErrorKind, Result};
use crate::grid::Grid;
use crate::hints::{GridHints, Hints};
use crate::kernels::{bilinear, nearest_2d, nearest_3d, trilinear};
use crate::search::time::search_time_index;
use crate::search::{search_indices, CellCoords, TimeContext};
use crate::view::{View3, View4};

/// Spatial interpolation kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum InterpMethod {
    Linear = 0,
    Nearest = 1,
}

/// A scalar quantity defined over a [`Grid`].
///
/// The data buffer is row-major `(tdim, zdim, ydim, xdim)`; when
/// `zdim == 1` the z axis is degenerate and sampling uses the 2-D kernels.
#[derive(Clone, Copy, Debug)]
pub struct Field<'a> {
    grid: Grid<'a>,
    grid_id: usize,
    data: &'a [f32],
    allow_time_extrapolation: bool,
    time_periodic: bool,
}

impl<'a> Field<'a> {
    /// Bind a data buffer to a grid.
    ///
    /// `grid_id` selects this field's hint slot; fields sharing a grid
    /// should share an id (see [`GridSet`](crate::GridSet)).
    ///
    /// # Errors
    /// * If the data length does not equal `tdim * zdim * ydim * xdim`
    pub fn new(
        grid: Grid<'a>,
        grid_id: usize,
        data: &'a [f32],
        allow_time_extrapolation: bool,
        time_periodic: bool,
    ) -> core::result::Result<Self, BuildError> {
        if data.len() != grid.tdim * grid.zdim * grid.ydim * grid.xdim {
            return Err(BuildError::Shape("field data does not match grid extents"));
        }
        Ok(Self {
            grid,
            grid_id,
            data,
            allow_time_extrapolation,
            time_periodic,
        })
    }

    pub fn grid(&self) -> &Grid<'a> {
        &self.grid
    }

    pub fn grid_id(&self) -> usize {
        self.grid_id
    }

    /// Interpolate the field at `(x, y, z, t)`.
    ///
    /// The hint slot for this field's grid seeds the spatial search and is
    /// updated on success, so a subsequent nearby query starts at the cell
    /// just found. Time is interpolated linearly between the two bracketing
    /// frames for both kernels; at the record boundary (or under an
    /// extrapolation policy) a single frame is sampled.
    ///
    /// # Errors
    /// * `TimeExtrapolation` if `t` is outside the record and both
    ///   `time_periodic` and `allow_time_extrapolation` are off
    /// * `OutOfBounds` if the point is outside the domain
    pub fn sample(
        &self,
        x: f32,
        y: f32,
        z: f32,
        t: f64,
        hints: &mut Hints,
        method: InterpMethod,
    ) -> Result<f32> {
        let grid = &self.grid;
        let tvals = grid.time;
        let tdim = grid.tdim;

        if !self.time_periodic
            && !self.allow_time_extrapolation
            && (t < tvals[0] || t > tvals[tdim - 1])
        {
            return Err(ErrorKind::TimeExtrapolation);
        }

        let (t, ti) = search_time_index(t, tvals, hints.get(self.grid_id).ti, self.time_periodic);
        hints.set_ti(self.grid_id, ti);

        let data = View4::new(self.data, grid.zdim, grid.ydim, grid.xdim);

        if ti < tdim - 1 && t > tvals[ti] {
            let t0 = tvals[ti];
            let t1 = tvals[ti + 1];
            let tc = TimeContext {
                ti,
                time: t,
                t0,
                t1,
            };
            let cc = search_indices(grid, x, y, z, hints.get(self.grid_id), &tc)?;
            self.store(hints, &cc, ti);

            let f0 = self.spatial(&cc, data.frame(ti), method);
            let f1 = self.spatial(&cc, data.frame(ti + 1), method);
            Ok(f0 + (f1 - f0) * (((t - t0) / (t1 - t0)) as f32))
        } else {
            // At the record boundary or extrapolating: hold the bracketed
            // frame, with degenerate blend weights for the S-column
            let t0 = tvals[ti];
            let tc = TimeContext {
                ti,
                time: t0,
                t0,
                t1: t0 + 1.0,
            };
            let cc = search_indices(grid, x, y, z, hints.get(self.grid_id), &tc)?;
            self.store(hints, &cc, ti);

            Ok(self.spatial(&cc, data.frame(ti), method))
        }
    }

    fn store(&self, hints: &mut Hints, cc: &CellCoords, ti: usize) {
        hints.set(
            self.grid_id,
            GridHints {
                xi: cc.xi,
                yi: cc.yi,
                zi: cc.zi,
                ti,
            },
        );
    }

    #[inline]
    fn spatial(&self, cc: &CellCoords, frame: View3, method: InterpMethod) -> f32 {
        let flat = self.grid.zdim == 1;
        match (method, flat) {
            (InterpMethod::Linear, true) => bilinear(cc.xsi, cc.eta, cc.xi, cc.yi, frame.layer(0)),
            (InterpMethod::Linear, false) => {
                trilinear(cc.xsi, cc.eta, cc.zeta, cc.xi, cc.yi, cc.zi, frame)
            }
            (InterpMethod::Nearest, true) => {
                nearest_2d(cc.xsi, cc.eta, cc.xi, cc.yi, frame.layer(0))
            }
            (InterpMethod::Nearest, false) => {
                nearest_3d(cc.xsi, cc.eta, cc.zeta, cc.xi, cc.yi, cc.zi, frame)
            }
        }
    }
}

/// Sample a velocity pair at one point, sharing one hint walk.
#[allow(clippy::too_many_arguments)]
pub fn sample_uv(
    x: f32,
    y: f32,
    z: f32,
    t: f64,
    u: &Field,
    v: &Field,
    hints: &mut Hints,
    method: InterpMethod,
) -> Result<(f32, f32)> {
    let u_val = u.sample(x, y, z, t, hints, method)?;
    let v_val = v.sample(x, y, z, t, hints, method)?;
    Ok((u_val, v_val))
}

/// Sample a velocity pair and rotate it from grid-relative to zonal and
/// meridional components using four precomputed angle fields.
#[allow(clippy::too_many_arguments)]
pub fn sample_uv_rotated(
    x: f32,
    y: f32,
    z: f32,
    t: f64,
    u: &Field,
    v: &Field,
    cos_u: &Field,
    sin_u: &Field,
    cos_v: &Field,
    sin_v: &Field,
    hints: &mut Hints,
    method: InterpMethod,
) -> Result<(f32, f32)> {
    let u_val = u.sample(x, y, z, t, hints, method)?;
    let v_val = v.sample(x, y, z, t, hints, method)?;
    let cos_u_val = cos_u.sample(x, y, z, t, hints, method)?;
    let sin_u_val = sin_u.sample(x, y, z, t, hints, method)?;
    let cos_v_val = cos_v.sample(x, y, z, t, hints, method)?;
    let sin_v_val = sin_v.sample(x, y, z, t, hints, method)?;

    Ok((
        u_val * cos_u_val - v_val * sin_v_val,
        u_val * sin_u_val + v_val * cos_v_val,
    ))
}
