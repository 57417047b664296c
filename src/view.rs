//! Typed views over flat arrays.
//!
//! Field buffers and depth tables arrive as contiguous row-major slices with
//! the axis order `(t, z, y, x)`. These views carry the trailing extents and
//! turn a multi-index into a single multiplied offset, so hot-path indexing
//! compiles to one fused multiply-add chain. Bounds are checked in debug
//! builds only; release builds still hit the slice's own bounds check, so a
//! bad index can never read out of the buffer.

/// View of a `(y, x)` plane.
#[derive(Clone, Copy, Debug)]
pub(crate) struct View2<'a> {
    data: &'a [f32],
    xdim: usize,
}

impl<'a> View2<'a> {
    pub fn new(data: &'a [f32], xdim: usize) -> Self {
        debug_assert!(data.len() % xdim == 0);
        Self { data, xdim }
    }

    #[inline]
    pub fn at(&self, j: usize, i: usize) -> f32 {
        debug_assert!(i < self.xdim);
        self.data[j * self.xdim + i]
    }
}

/// View of a `(z, y, x)` volume.
#[derive(Clone, Copy, Debug)]
pub(crate) struct View3<'a> {
    data: &'a [f32],
    ydim: usize,
    xdim: usize,
}

impl<'a> View3<'a> {
    pub fn new(data: &'a [f32], ydim: usize, xdim: usize) -> Self {
        debug_assert!(data.len() % (ydim * xdim) == 0);
        Self { data, ydim, xdim }
    }

    #[inline]
    pub fn at(&self, k: usize, j: usize, i: usize) -> f32 {
        debug_assert!(j < self.ydim && i < self.xdim);
        self.data[(k * self.ydim + j) * self.xdim + i]
    }

    /// The `(y, x)` plane at level `k`.
    #[inline]
    pub fn layer(&self, k: usize) -> View2<'a> {
        let n = self.ydim * self.xdim;
        View2::new(&self.data[k * n..(k + 1) * n], self.xdim)
    }
}

/// View of a `(t, z, y, x)` series.
#[derive(Clone, Copy, Debug)]
pub(crate) struct View4<'a> {
    data: &'a [f32],
    zdim: usize,
    ydim: usize,
    xdim: usize,
}

impl<'a> View4<'a> {
    pub fn new(data: &'a [f32], zdim: usize, ydim: usize, xdim: usize) -> Self {
        debug_assert!(data.len() % (zdim * ydim * xdim) == 0);
        Self {
            data,
            zdim,
            ydim,
            xdim,
        }
    }

    #[inline]
    pub fn at(&self, t: usize, k: usize, j: usize, i: usize) -> f32 {
        debug_assert!(k < self.zdim && j < self.ydim && i < self.xdim);
        self.data[((t * self.zdim + k) * self.ydim + j) * self.xdim + i]
    }

    /// The `(z, y, x)` volume at frame `t`.
    #[inline]
    pub fn frame(&self, t: usize) -> View3<'a> {
        let n = self.zdim * self.ydim * self.xdim;
        View3::new(&self.data[t * n..(t + 1) * n], self.ydim, self.xdim)
    }
}
