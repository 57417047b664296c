//! Structured mesh descriptors.
//!
//! A [`Grid`] is a set of borrowed coordinate arrays plus the flags that
//! drive the search: horizontal coordinates are either 1-D axis vectors
//! (rectilinear) or 2-D `(ydim, xdim)` arrays (curvilinear), and the
//! vertical coordinate is either a fixed depth vector (Z) or a
//! terrain-following depth table (S), optionally time-varying. Grids are
//! immutable after construction; the sampling core only ever reads them.
//!
//! A [`GridSet`] assigns each distinct grid a dense `grid_id`, which is the
//! index of that grid's slot in per-particle [`Hints`](crate::Hints)
//! arrays. Fields defined on identical grids share a slot, so a particle
//! that samples temperature and salinity on the same mesh pays for one
//! search, not two.

use crate::error::BuildError;
use crate::hints::Hints;
use crate::view::{View2, View3, View4};

/// Mesh classification: horizontal layout crossed with vertical coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GridKind {
    RectilinearZ = 0,
    RectilinearS = 1,
    CurvilinearZ = 2,
    CurvilinearS = 3,
}

/// A structured mesh over which fields are defined.
///
/// Coordinate arrays are borrowed from the caller (the loader layer owns
/// them); a `Grid` is a cheap copyable view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid<'a> {
    pub(crate) kind: GridKind,
    pub(crate) xdim: usize,
    pub(crate) ydim: usize,
    pub(crate) zdim: usize,
    pub(crate) tdim: usize,
    /// 1-D of length `xdim` (rectilinear) or 2-D `(ydim, xdim)` (curvilinear).
    pub(crate) lon: &'a [f32],
    /// 1-D of length `ydim` (rectilinear) or 2-D `(ydim, xdim)` (curvilinear).
    pub(crate) lat: &'a [f32],
    /// Z: 1-D of length `zdim`. S: `(zdim, ydim, xdim)`, or
    /// `(tdim, zdim, ydim, xdim)` when `z4d`.
    pub(crate) depth: &'a [f32],
    pub(crate) time: &'a [f64],
    pub(crate) z4d: bool,
    pub(crate) sphere_mesh: bool,
    pub(crate) zonal_periodic: bool,
}

fn check_time(time: &[f64]) -> Result<(), BuildError> {
    if time.is_empty() {
        return Err(BuildError::TooSmall("time", 1));
    }
    if time.windows(2).any(|w| w[1] <= w[0]) {
        return Err(BuildError::NotMonotonic("time"));
    }
    Ok(())
}

fn check_horizontal_1d(lon: &[f32], lat: &[f32]) -> Result<(), BuildError> {
    if lon.len() < 2 {
        return Err(BuildError::TooSmall("lon", 2));
    }
    if lat.len() < 2 {
        return Err(BuildError::TooSmall("lat", 2));
    }
    Ok(())
}

impl<'a> Grid<'a> {
    /// Rectilinear mesh with a fixed 1-D depth vector.
    ///
    /// `depth` must be strictly increasing when it has more than one level;
    /// a single level makes the grid vertically degenerate and the z
    /// coordinate is ignored during sampling.
    ///
    /// # Errors
    /// * If `lon` or `lat` have fewer than 2 entries
    /// * If `depth` is empty or not strictly increasing
    /// * If `time` is empty or not strictly increasing
    pub fn rectilinear_z(
        lon: &'a [f32],
        lat: &'a [f32],
        depth: &'a [f32],
        time: &'a [f64],
        sphere_mesh: bool,
        zonal_periodic: bool,
    ) -> Result<Self, BuildError> {
        check_horizontal_1d(lon, lat)?;
        check_time(time)?;
        if depth.is_empty() {
            return Err(BuildError::TooSmall("depth", 1));
        }
        if depth.len() > 1 && depth.windows(2).any(|w| w[1] <= w[0]) {
            return Err(BuildError::NotMonotonic("depth"));
        }

        Ok(Self {
            kind: GridKind::RectilinearZ,
            xdim: lon.len(),
            ydim: lat.len(),
            zdim: depth.len(),
            tdim: time.len(),
            lon,
            lat,
            depth,
            time,
            z4d: false,
            sphere_mesh,
            zonal_periodic,
        })
    }

    /// Rectilinear mesh with a terrain-following depth table.
    ///
    /// The table is `(zdim, ydim, xdim)`, or `(tdim, zdim, ydim, xdim)` when
    /// `z4d` is set.
    ///
    /// # Errors
    /// * If `lon` or `lat` have fewer than 2 entries
    /// * If `time` is empty or not strictly increasing
    /// * If the depth table length does not match the extents
    #[allow(clippy::too_many_arguments)]
    pub fn rectilinear_s(
        lon: &'a [f32],
        lat: &'a [f32],
        depth: &'a [f32],
        zdim: usize,
        z4d: bool,
        time: &'a [f64],
        sphere_mesh: bool,
        zonal_periodic: bool,
    ) -> Result<Self, BuildError> {
        check_horizontal_1d(lon, lat)?;
        check_time(time)?;
        if zdim == 0 {
            return Err(BuildError::TooSmall("depth levels", 1));
        }
        let nlevels = zdim * lat.len() * lon.len();
        let expected = if z4d { time.len() * nlevels } else { nlevels };
        if depth.len() != expected {
            return Err(BuildError::Shape("depth table does not match extents"));
        }

        Ok(Self {
            kind: GridKind::RectilinearS,
            xdim: lon.len(),
            ydim: lat.len(),
            zdim,
            tdim: time.len(),
            lon,
            lat,
            depth,
            time,
            z4d,
            sphere_mesh,
            zonal_periodic,
        })
    }

    /// Curvilinear mesh with a fixed 1-D depth vector.
    ///
    /// `lon` and `lat` are 2-D arrays shaped `(ydim, xdim)`.
    ///
    /// # Errors
    /// * If extents are below 2, or the coordinate arrays do not match them
    /// * If `depth` is empty or not strictly increasing
    /// * If `time` is empty or not strictly increasing
    #[allow(clippy::too_many_arguments)]
    pub fn curvilinear_z(
        lon: &'a [f32],
        lat: &'a [f32],
        xdim: usize,
        ydim: usize,
        depth: &'a [f32],
        time: &'a [f64],
        sphere_mesh: bool,
        zonal_periodic: bool,
    ) -> Result<Self, BuildError> {
        Self::check_horizontal_2d(lon, lat, xdim, ydim)?;
        check_time(time)?;
        if depth.is_empty() {
            return Err(BuildError::TooSmall("depth", 1));
        }
        if depth.len() > 1 && depth.windows(2).any(|w| w[1] <= w[0]) {
            return Err(BuildError::NotMonotonic("depth"));
        }

        Ok(Self {
            kind: GridKind::CurvilinearZ,
            xdim,
            ydim,
            zdim: depth.len(),
            tdim: time.len(),
            lon,
            lat,
            depth,
            time,
            z4d: false,
            sphere_mesh,
            zonal_periodic,
        })
    }

    /// Curvilinear mesh with a terrain-following depth table.
    ///
    /// # Errors
    /// * If extents are below 2, or the coordinate arrays do not match them
    /// * If `time` is empty or not strictly increasing
    /// * If the depth table length does not match the extents
    #[allow(clippy::too_many_arguments)]
    pub fn curvilinear_s(
        lon: &'a [f32],
        lat: &'a [f32],
        xdim: usize,
        ydim: usize,
        depth: &'a [f32],
        zdim: usize,
        z4d: bool,
        time: &'a [f64],
        sphere_mesh: bool,
        zonal_periodic: bool,
    ) -> Result<Self, BuildError> {
        Self::check_horizontal_2d(lon, lat, xdim, ydim)?;
        check_time(time)?;
        if zdim == 0 {
            return Err(BuildError::TooSmall("depth levels", 1));
        }
        let nlevels = zdim * ydim * xdim;
        let expected = if z4d { time.len() * nlevels } else { nlevels };
        if depth.len() != expected {
            return Err(BuildError::Shape("depth table does not match extents"));
        }

        Ok(Self {
            kind: GridKind::CurvilinearS,
            xdim,
            ydim,
            zdim,
            tdim: time.len(),
            lon,
            lat,
            depth,
            time,
            z4d,
            sphere_mesh,
            zonal_periodic,
        })
    }

    fn check_horizontal_2d(
        lon: &[f32],
        lat: &[f32],
        xdim: usize,
        ydim: usize,
    ) -> Result<(), BuildError> {
        if xdim < 2 {
            return Err(BuildError::TooSmall("lon", 2));
        }
        if ydim < 2 {
            return Err(BuildError::TooSmall("lat", 2));
        }
        if lon.len() != ydim * xdim || lat.len() != ydim * xdim {
            return Err(BuildError::Shape("2-D lon/lat do not match (ydim, xdim)"));
        }
        Ok(())
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn xdim(&self) -> usize {
        self.xdim
    }

    pub fn ydim(&self) -> usize {
        self.ydim
    }

    pub fn zdim(&self) -> usize {
        self.zdim
    }

    pub fn tdim(&self) -> usize {
        self.tdim
    }

    pub fn time(&self) -> &'a [f64] {
        self.time
    }

    pub fn sphere_mesh(&self) -> bool {
        self.sphere_mesh
    }

    pub fn zonal_periodic(&self) -> bool {
        self.zonal_periodic
    }

    /// 2-D longitudes, curvilinear grids only.
    #[inline]
    pub(crate) fn lon_2d(&self) -> View2<'a> {
        View2::new(self.lon, self.xdim)
    }

    /// 2-D latitudes, curvilinear grids only.
    #[inline]
    pub(crate) fn lat_2d(&self) -> View2<'a> {
        View2::new(self.lat, self.xdim)
    }

    /// Static `(zdim, ydim, xdim)` depth table, S-grids with `z4d = false`.
    #[inline]
    pub(crate) fn depth_s3(&self) -> View3<'a> {
        View3::new(self.depth, self.ydim, self.xdim)
    }

    /// Time-varying `(tdim, zdim, ydim, xdim)` depth table, `z4d = true`.
    #[inline]
    pub(crate) fn depth_s4(&self) -> View4<'a> {
        View4::new(self.depth, self.zdim, self.ydim, self.xdim)
    }
}

/// Registry of distinct grids, assigning each a dense `grid_id`.
#[derive(Clone, Debug, Default)]
pub struct GridSet<'a> {
    grids: Vec<Grid<'a>>,
}

impl<'a> GridSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grid and return its id.
    ///
    /// A grid equal to one already registered (same kind, extents, flags,
    /// and coordinate values) shares that grid's id, so fields on the same
    /// mesh share one hint slot.
    pub fn add(&mut self, grid: &Grid<'a>) -> usize {
        match self.grids.iter().position(|g| g == grid) {
            Some(id) => id,
            None => {
                self.grids.push(*grid);
                self.grids.len() - 1
            }
        }
    }

    pub fn get(&self, grid_id: usize) -> Option<&Grid<'a>> {
        self.grids.get(grid_id)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// A fresh hint set sized for this registry, one slot per grid.
    pub fn hints(&self) -> Hints {
        Hints::new(self.grids.len())
    }
}
