//! Symbolic analysis object consumed by the factorization, and its teardown.
//!
//! Only the ownership of the auxiliary arrays is managed here. Every array is independently
//! optional, so partially built objects can be released.

use super::*;

/// Auxiliary arrays produced by the symbolic analysis of a matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolicAnalysis<I: Index> {
    /// Initial column permutation.
    pub col_perm_init: Option<Vec<I>>,
    /// Initial row permutation.
    pub row_perm_init: Option<Vec<I>>,
    /// Number of pivot columns of each front.
    pub front_npivcol: Option<Vec<I>>,
    /// Parent of each front in the assembly tree.
    pub front_parent: Option<Vec<I>>,
    /// First row of each front.
    pub front_first_row: Option<Vec<I>>,
    /// Leftmost descendant of each front.
    pub front_leftmost_desc: Option<Vec<I>>,
    /// First front of each frontal matrix chain.
    pub chain_start: Option<Vec<I>>,
    /// Maximum row count of each chain.
    pub chain_max_rows: Option<Vec<I>>,
    /// Maximum column count of each chain.
    pub chain_max_cols: Option<Vec<I>>,
    /// Column degrees.
    pub col_degrees: Option<Vec<I>>,
    /// Row degrees.
    pub row_degrees: Option<Vec<I>>,
    /// Element sizes, present only when the matrix has dense rows.
    pub dense_row_esize: Option<Vec<I>>,
    /// Diagonal map, present only when diagonal pivoting is preferred.
    pub diagonal_map: Option<Vec<I>>,
}

impl<I: Index> Default for SymbolicAnalysis<I> {
    fn default() -> Self {
        Self {
            col_perm_init: None,
            row_perm_init: None,
            front_npivcol: None,
            front_parent: None,
            front_first_row: None,
            front_leftmost_desc: None,
            chain_start: None,
            chain_max_rows: None,
            chain_max_cols: None,
            col_degrees: None,
            row_degrees: None,
            dense_row_esize: None,
            diagonal_map: None,
        }
    }
}

impl<I: Index> SymbolicAnalysis<I> {
    fn arrays(&self) -> [&Option<Vec<I>>; 13] {
        [
            &self.col_perm_init,
            &self.row_perm_init,
            &self.front_npivcol,
            &self.front_parent,
            &self.front_first_row,
            &self.front_leftmost_desc,
            &self.chain_start,
            &self.chain_max_rows,
            &self.chain_max_cols,
            &self.col_degrees,
            &self.row_degrees,
            &self.dense_row_esize,
            &self.diagonal_map,
        ]
    }

    fn arrays_mut(&mut self) -> [&mut Option<Vec<I>>; 13] {
        [
            &mut self.col_perm_init,
            &mut self.row_perm_init,
            &mut self.front_npivcol,
            &mut self.front_parent,
            &mut self.front_first_row,
            &mut self.front_leftmost_desc,
            &mut self.chain_start,
            &mut self.chain_max_rows,
            &mut self.chain_max_cols,
            &mut self.col_degrees,
            &mut self.row_degrees,
            &mut self.dense_row_esize,
            &mut self.diagonal_map,
        ]
    }

    /// Returns the number of arrays currently held.
    pub fn allocated_arrays(&self) -> usize {
        self.arrays().iter().filter(|array| array.is_some()).count()
    }

    /// Releases every array held by `self`. Releasing an already released object does nothing.
    pub fn release(&mut self) {
        let mut released = 0usize;
        for array in self.arrays_mut() {
            if array.take().is_some() {
                released += 1;
            }
        }
        if released > 0 {
            log::debug!("released {released} symbolic analysis arrays");
        }
    }
}

/// Releases the symbolic analysis held by `handle`, and clears it.
///
/// Does nothing if `handle` is `None`.
pub fn free_symbolic<I: Index>(handle: &mut Option<SymbolicAnalysis<I>>) {
    if let Some(mut analysis) = handle.take() {
        analysis.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;
    use alloc::vec;

    fn test_release<I: Index>() {
        let z = I::truncate;
        let mut analysis = SymbolicAnalysis::<I> {
            col_perm_init: Some(vec![z(1), z(0)]),
            row_perm_init: Some(vec![z(0), z(1)]),
            front_parent: Some(vec![z(0)]),
            diagonal_map: Some(vec![]),
            ..Default::default()
        };
        let shared = &analysis;
        assert!(shared.allocated_arrays() == 4);

        analysis.release();
        assert!(analysis.allocated_arrays() == 0);
        assert!(analysis == SymbolicAnalysis::default());

        analysis.release();
        assert!(analysis == SymbolicAnalysis::default());
    }

    fn test_free_symbolic<I: Index>() {
        let mut handle = Some(SymbolicAnalysis::<I> {
            chain_start: Some(vec![I::truncate(0); 3]),
            ..Default::default()
        });
        free_symbolic(&mut handle);
        assert!(handle.is_none());

        free_symbolic(&mut handle);
        assert!(handle.is_none());

        let mut empty = Some(SymbolicAnalysis::<I>::default());
        free_symbolic(&mut empty);
        assert!(empty.is_none());
    }

    monomorphize_test!(test_release);
    monomorphize_test!(test_free_symbolic);
}
