//! Builders for coordinate arrays.
//!
//! The sampling core consumes already-materialized arrays from a loader
//! layer, so these helpers exist for callers assembling synthetic grids by
//! hand: evenly spaced axis vectors for the rectilinear constructors, and
//! product meshes in the 2-D `(ydim, xdim)` layout the curvilinear
//! constructors expect. The test and bench fixtures in this crate are
//! built from them.

use itertools::Itertools;
use num_traits::Float;

/// An evenly spaced coordinate axis from `start` to `stop`, endpoint
/// included: `n` knots bounding `n - 1` equal cells. Suitable for the 1-D
/// `lon`/`lat`/`depth`/`time` vectors of a rectilinear grid.
pub fn axis<T: Float>(start: T, stop: T, n: usize) -> Vec<T> {
    let step = (stop - start) / T::from(n - 1).unwrap();
    (0..n).map(|i| start + step * T::from(i).unwrap()).collect()
}

/// The 2-D coordinate arrays of the product mesh of two axes.
///
/// Returns `(lon, lat)` shaped `(ys.len(), xs.len())` row-major, ready for
/// the curvilinear grid constructors. Every cell of the resulting mesh is
/// an axis-aligned rectangle, which makes it the reference case for
/// checking the quadrilateral search against the rectilinear one.
pub fn product_mesh<T: Float>(xs: &[T], ys: &[T]) -> (Vec<T>, Vec<T>) {
    ys.iter()
        .cartesian_product(xs.iter())
        .map(|(&y, &x)| (x, y))
        .unzip()
}

#[cfg(test)]
mod test {
    use super::{axis, product_mesh};

    #[test]
    fn test_axis_hits_both_endpoints() {
        let x = axis(0.0_f32, 10.0, 5);
        assert_eq!(x, vec![0.0, 2.5, 5.0, 7.5, 10.0]);

        let t = axis(-1.0_f64, 1.0, 2);
        assert_eq!(t, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_product_mesh_layout() {
        let xs = [0.0_f32, 1.0, 2.0];
        let ys = [10.0_f32, 20.0];
        let (lon, lat) = product_mesh(&xs, &ys);

        // Row-major (y, x): x varies fastest
        assert_eq!(lon, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(lat, vec![10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
    }
}
