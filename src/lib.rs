//! Field sampling over structured meshes for Lagrangian particle tracking,
//! prioritizing correctness, hint-driven locality, and an allocation-free
//! hot path.
//!
//! Given a continuous query point `(x, y, z, t)` and scalar fields over
//! rectilinear or curvilinear horizontal meshes with fixed (Z) or
//! terrain-following (S) vertical coordinates, [`Field::sample`] returns an
//! interpolated value. Each particle carries per-grid hint indices
//! ([`Hints`]) recording the last cell found; the next query walks locally
//! from there, so consecutive nearby queries cost a handful of comparisons
//! rather than a fresh global search.
//!
//! # Search Cost
//! Locating a cell is a local walk seeded by the hint, so the cost scales
//! with how far the query moved, not with the grid size:
//!
//! | Mesh            | Per-axis walk            | Worst case               |
//! |-----------------|--------------------------|--------------------------|
//! | rectilinear     | monotone bracket walk    | O(cells moved)           |
//! | rectilinear (sphere) | walk + 360° window  | bounded by [`MAX_ZONAL_STEPS`] |
//! | curvilinear     | quadrilateral inversion  | bounded by [`MAX_CELL_SEARCH_ITERS`] |
//!
//! Spatial kernels are bilinear/trilinear or nearest-neighbor; time is
//! always interpolated linearly between the two bracketing frames, with
//! optional periodicity and extrapolation policies per field.
//!
//! # Example
//! ```rust
//! use gridsample::{Field, Grid, GridSet, InterpMethod};
//!
//! // A 2-D field on a unit mesh, two time frames
//! let lon = [0.0_f32, 1.0];
//! let lat = [0.0_f32, 1.0];
//! let depth = [0.0_f32];
//! let time = [0.0_f64, 1.0];
//! let grid = Grid::rectilinear_z(&lon, &lat, &depth, &time, false, false)?;
//!
//! // The grid registry assigns the hint slot ids
//! let mut gridset = GridSet::new();
//! let grid_id = gridset.add(&grid);
//!
//! // Values at grid points, row-major (t, z, y, x)
//! let data = [0.0_f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
//! let field = Field::new(grid, grid_id, &data, false, false)?;
//!
//! // Each particle owns one hint set
//! let mut hints = gridset.hints();
//! let v = field.sample(0.5, 0.5, 0.0, 0.0, &mut hints, InterpMethod::Linear)?;
//! assert_eq!(v, 1.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
// These "needless" range loops index several parallel arrays at once
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod field;
pub mod grid;
pub mod hints;
mod kernels;
mod search;
pub mod utils;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{BuildError, ErrorKind, Result};
pub use field::{sample_uv, sample_uv_rotated, Field, InterpMethod};
pub use grid::{Grid, GridKind, GridSet};
pub use hints::{GridHints, Hints};
pub use search::{MAX_CELL_SEARCH_ITERS, MAX_ZONAL_STEPS};
