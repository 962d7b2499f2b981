use super::*;
use crate::assert;

/// Symbolic view structure of a compressed sparse matrix in column format.
///
/// Requires:
/// * `nrows <= I::Signed::MAX` (always checked)
/// * `ncols <= I::Signed::MAX` (always checked)
/// * `col_ptrs` has length `ncols + 1` (always checked)
/// * `col_ptrs` is non-decreasing
/// * `col_ptrs[0]..col_ptrs[ncols]` is a valid range in `row_indices` (always checked, assuming
///   non-decreasing)
/// * elements of `row_indices[col_ptrs[j]..col_ptrs[j + 1]]` are less than `nrows`, and contain
///   no duplicates
///
/// # Note
/// The row indices of a column are not required to be sorted. The conversion routines of this
/// crate always produce sorted columns.
pub struct SymbolicSparseColMatRef<'a, I: Index> {
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
    pub(crate) col_ptr: &'a [I],
    pub(crate) row_ind: &'a [I],
}

impl<I: Index> Copy for SymbolicSparseColMatRef<'_, I> {}
impl<I: Index> Clone for SymbolicSparseColMatRef<'_, I> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'short, I: Index> Reborrow<'short> for SymbolicSparseColMatRef<'_, I> {
    type Target = SymbolicSparseColMatRef<'short, I>;

    #[inline]
    fn rb(&self) -> Self::Target {
        *self
    }
}

impl<'short, I: Index> ReborrowMut<'short> for SymbolicSparseColMatRef<'_, I> {
    type Target = SymbolicSparseColMatRef<'short, I>;

    #[inline]
    fn rb_mut(&mut self) -> Self::Target {
        *self
    }
}

impl<'a, I: Index> IntoConst for SymbolicSparseColMatRef<'a, I> {
    type Target = SymbolicSparseColMatRef<'a, I>;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, I: Index> SymbolicSparseColMatRef<'a, I> {
    /// Creates a new symbolic matrix view after asserting its invariants.
    ///
    /// Allocates a temporary buffer of size `nrows` to detect duplicate row indices.
    ///
    /// # Panics
    ///
    /// See type level documentation.
    #[track_caller]
    pub fn new_checked(
        nrows: usize,
        ncols: usize,
        col_ptrs: &'a [I],
        row_indices: &'a [I],
    ) -> Self {
        assert!(all(
            ncols <= I::Signed::MAX.zx(),
            nrows <= I::Signed::MAX.zx(),
        ));
        assert!(col_ptrs.len() == ncols + 1);
        for &[c, c_next] in windows2(col_ptrs) {
            assert!(c <= c_next);
        }
        assert!(col_ptrs[ncols].zx() <= row_indices.len());

        // last_seen[i] == j + 1 if row i has already been seen in column j
        let mut last_seen = alloc::vec![0usize; nrows];
        for (j, &[c, c_next]) in windows2(col_ptrs).enumerate() {
            for &i in &row_indices[c.zx()..c_next.zx()] {
                let i = i.zx();
                assert!(i < nrows);
                assert!(last_seen[i] != j + 1);
                last_seen[i] = j + 1;
            }
        }

        Self {
            nrows,
            ncols,
            col_ptr: col_ptrs,
            row_ind: row_indices,
        }
    }

    /// Creates a new symbolic matrix view without asserting its invariants.
    ///
    /// # Safety
    ///
    /// See type level documentation.
    #[inline(always)]
    #[track_caller]
    pub unsafe fn new_unchecked(
        nrows: usize,
        ncols: usize,
        col_ptrs: &'a [I],
        row_indices: &'a [I],
    ) -> Self {
        assert!(all(
            ncols <= <I::Signed as SignedIndex>::MAX.zx(),
            nrows <= <I::Signed as SignedIndex>::MAX.zx(),
        ));
        assert!(col_ptrs.len() == ncols + 1);
        assert!(col_ptrs[ncols].zx() <= row_indices.len());

        Self {
            nrows,
            ncols,
            col_ptr: col_ptrs,
            row_ind: row_indices,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }
    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Copies the current matrix into a newly allocated matrix.
    #[inline]
    pub fn to_owned(&self) -> Result<SymbolicSparseColMat<I>, SparseError> {
        Ok(SymbolicSparseColMat {
            nrows: self.nrows,
            ncols: self.ncols,
            col_ptr: try_collect(self.col_ptr.iter().copied())?,
            row_ind: try_collect(self.row_ind.iter().copied())?,
        })
    }

    /// Computes the sparsity pattern of $A(P, Q)^\top$ in a newly allocated matrix.
    ///
    /// See [`permuted_transpose`](crate::sparse::transpose::permuted_transpose).
    pub fn permuted_transpose(
        &self,
        row_perm: Option<PermRef<'_, I>>,
        col_perm: Option<PermRef<'_, I>>,
    ) -> Result<SymbolicSparseColMat<I>, SparseError> {
        let nnz = self.compute_nnz();
        let mut new_col_ptrs = try_zeroed::<I>(self.nrows + 1)?;
        let mut new_row_indices = try_zeroed::<I>(nnz)?;

        transpose::try_permuted_transpose(
            &mut new_col_ptrs,
            &mut new_row_indices,
            Symbolic::materialize(nnz),
            *self,
            &*Symbolic::materialize(self.row_ind.len()),
            row_perm,
            col_perm,
            Conj::No,
        )?;

        // SAFETY: the output of the transpose satisfies the invariants of the type
        Ok(unsafe {
            SymbolicSparseColMat::new_unchecked(
                self.ncols,
                self.nrows,
                new_col_ptrs,
                new_row_indices,
            )
        })
    }

    /// Computes the sparsity pattern of $A^\top$ in a newly allocated matrix.
    #[inline]
    pub fn transpose(&self) -> Result<SymbolicSparseColMat<I>, SparseError> {
        self.permuted_transpose(None, None)
    }

    /// Returns the number of symbolic non-zeros in the matrix.
    ///
    /// The value is guaranteed to be less than `I::Signed::MAX`.
    #[inline]
    pub fn compute_nnz(&self) -> usize {
        self.col_ptr[self.ncols].zx() - self.col_ptr[0].zx()
    }

    /// Returns the column pointers.
    #[inline]
    pub fn col_ptrs(&self) -> &'a [I] {
        self.col_ptr
    }

    /// Returns the row indices.
    #[inline]
    pub fn row_indices(&self) -> &'a [I] {
        self.row_ind
    }

    /// Returns the row indices of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn row_indices_of_col_raw(&self, j: usize) -> &'a [I] {
        &self.row_ind[self.col_range(j)]
    }

    /// Returns the row indices of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn row_indices_of_col(
        &self,
        j: usize,
    ) -> impl 'a + ExactSizeIterator + DoubleEndedIterator<Item = usize> {
        self.row_indices_of_col_raw(j).iter().map(
            #[inline(always)]
            |&i| i.zx(),
        )
    }

    /// Returns the range that the column `j` occupies in `self.row_indices()`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn col_range(&self, j: usize) -> Range<usize> {
        self.col_ptr[j].zx()..self.col_ptr[j + 1].zx()
    }
}

impl<I: Index> core::fmt::Debug for SymbolicSparseColMatRef<'_, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mat = *self;
        let mut iter = (0..mat.ncols()).flat_map(move |j| {
            struct Wrapper(usize, usize);
            impl core::fmt::Debug for Wrapper {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    let row = self.0;
                    let col = self.1;
                    write!(f, "({row}, {col})")
                }
            }

            mat.row_indices_of_col(j).map(move |i| Wrapper(i, j))
        });

        f.debug_list().entries(&mut iter).finish()
    }
}
