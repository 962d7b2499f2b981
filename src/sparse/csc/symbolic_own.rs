use super::*;

/// Symbolic structure of a compressed sparse matrix in column format.
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
#[derive(Clone, PartialEq, Eq)]
pub struct SymbolicSparseColMat<I: Index> {
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
    pub(crate) col_ptr: Vec<I>,
    pub(crate) row_ind: Vec<I>,
}

impl<I: Index> SymbolicSparseColMat<I> {
    /// Creates a new symbolic matrix after asserting its invariants.
    ///
    /// # Panics
    ///
    /// See type level documentation.
    #[inline]
    #[track_caller]
    pub fn new_checked(
        nrows: usize,
        ncols: usize,
        col_ptrs: Vec<I>,
        row_indices: Vec<I>,
    ) -> Self {
        SymbolicSparseColMatRef::new_checked(nrows, ncols, &col_ptrs, &row_indices);

        Self {
            nrows,
            ncols,
            col_ptr: col_ptrs,
            row_ind: row_indices,
        }
    }

    /// Creates a new symbolic matrix without asserting its invariants.
    ///
    /// # Safety
    ///
    /// See type level documentation.
    #[inline]
    #[track_caller]
    pub unsafe fn new_unchecked(
        nrows: usize,
        ncols: usize,
        col_ptrs: Vec<I>,
        row_indices: Vec<I>,
    ) -> Self {
        SymbolicSparseColMatRef::new_unchecked(nrows, ncols, &col_ptrs, &row_indices);

        Self {
            nrows,
            ncols,
            col_ptr: col_ptrs,
            row_ind: row_indices,
        }
    }

    /// Returns the components of the matrix in the order:
    /// - row count,
    /// - column count,
    /// - column pointers,
    /// - row indices.
    #[inline]
    pub fn into_parts(self) -> (usize, usize, Vec<I>, Vec<I>) {
        (self.nrows, self.ncols, self.col_ptr, self.row_ind)
    }

    /// Returns a view over the symbolic structure of `self`.
    #[inline]
    pub fn as_ref(&self) -> SymbolicSparseColMatRef<'_, I> {
        SymbolicSparseColMatRef {
            nrows: self.nrows,
            ncols: self.ncols,
            col_ptr: &self.col_ptr,
            row_ind: &self.row_ind,
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

    /// Computes the sparsity pattern of $A(P, Q)^\top$ in a newly allocated matrix.
    #[inline]
    pub fn permuted_transpose(
        &self,
        row_perm: Option<PermRef<'_, I>>,
        col_perm: Option<PermRef<'_, I>>,
    ) -> Result<SymbolicSparseColMat<I>, SparseError> {
        self.as_ref().permuted_transpose(row_perm, col_perm)
    }

    /// Computes the sparsity pattern of $A^\top$ in a newly allocated matrix.
    #[inline]
    pub fn transpose(&self) -> Result<SymbolicSparseColMat<I>, SparseError> {
        self.as_ref().transpose()
    }

    /// Returns the number of symbolic non-zeros in the matrix.
    #[inline]
    pub fn compute_nnz(&self) -> usize {
        self.as_ref().compute_nnz()
    }

    /// Returns the column pointers.
    #[inline]
    pub fn col_ptrs(&self) -> &[I] {
        &self.col_ptr
    }

    /// Returns the row indices.
    #[inline]
    pub fn row_indices(&self) -> &[I] {
        &self.row_ind
    }

    /// Returns the row indices of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn row_indices_of_col_raw(&self, j: usize) -> &[I] {
        self.as_ref().row_indices_of_col_raw(j)
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
    ) -> impl '_ + ExactSizeIterator + DoubleEndedIterator<Item = usize> {
        self.as_ref().row_indices_of_col(j)
    }

    /// Returns the range that the column `j` occupies in `self.row_indices()`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn col_range(&self, j: usize) -> Range<usize> {
        self.as_ref().col_range(j)
    }

    /// Create a new symbolic structure, and the map from each index pair to its storage slot,
    /// from pairs of indices `(row, col)`.
    ///
    /// Duplicate pairs are stored once, and map to the same slot.
    ///
    /// # Errors
    /// See [`triplets_to_col`](crate::sparse::triplet::triplets_to_col).
    #[inline]
    pub fn try_new_from_indices(
        nrows: usize,
        ncols: usize,
        indices: &[(I, I)],
    ) -> Result<(Self, TripletMap<I>), SparseError> {
        let (mat, map) = SparseColMat::<I, Symbolic>::try_new_from_triplets_impl(
            nrows,
            ncols,
            indices.len(),
            |k| {
                let (row, col) = indices[k];
                (row, col, Symbolic)
            },
            true,
        )?;
        let nnz = mat.compute_nnz();
        Ok((mat.symbolic, TripletMap { map, nnz }))
    }
}

impl<I: Index> core::fmt::Debug for SymbolicSparseColMat<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.as_ref().fmt(f)
    }
}
