//! Per-particle search hints.
//!
//! Each particle carries the last-found cell indices for every grid it
//! samples, so that the next query starts its local search from the
//! previous cell instead of from scratch. Consecutive nearby queries then
//! run in near-constant time. Hints are advisory: a stale hint only makes
//! the walk longer, never wrong.

/// Last-found left-edge indices on one grid.
///
/// After a successful sample, each index is a valid bracket left edge:
/// `xi <= xdim-2`, `yi <= ydim-2`, `zi <= zdim-2` (or `0` when `zdim == 1`),
/// `ti <= tdim-1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridHints {
    pub xi: usize,
    pub yi: usize,
    pub zi: usize,
    pub ti: usize,
}

/// One hint slot per grid, indexed by `grid_id`.
///
/// Owned by exactly one particle; samplers take a mutable borrow for the
/// duration of a single query. Parallel advection of N particles uses N
/// disjoint `Hints` values over the same shared fields.
#[derive(Clone, Debug, Default)]
pub struct Hints {
    slots: Vec<GridHints>,
}

impl Hints {
    /// Hints for `ngrids` grids, all starting at the domain origin cell.
    pub fn new(ngrids: usize) -> Self {
        Self {
            slots: vec![GridHints::default(); ngrids],
        }
    }

    /// The current hint for `grid_id`.
    pub fn get(&self, grid_id: usize) -> GridHints {
        self.slots[grid_id]
    }

    pub(crate) fn set(&mut self, grid_id: usize, hint: GridHints) {
        self.slots[grid_id] = hint;
    }

    pub(crate) fn set_ti(&mut self, grid_id: usize, ti: usize) {
        self.slots[grid_id].ti = ti;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
