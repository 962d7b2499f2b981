use super::*;
use crate::assert;

/// Sparse matrix view in compressed column format.
pub struct SparseColMatRef<'a, I: Index, E: Entity> {
    pub(crate) symbolic: SymbolicSparseColMatRef<'a, I>,
    pub(crate) values: &'a [E],
}

impl<I: Index, E: Entity> Copy for SparseColMatRef<'_, I, E> {}
impl<I: Index, E: Entity> Clone for SparseColMatRef<'_, I, E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'short, I: Index, E: Entity> Reborrow<'short> for SparseColMatRef<'_, I, E> {
    type Target = SparseColMatRef<'short, I, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'short, I: Index, E: Entity> ReborrowMut<'short> for SparseColMatRef<'_, I, E> {
    type Target = SparseColMatRef<'short, I, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        *self
    }
}

impl<'a, I: Index, E: Entity> IntoConst for SparseColMatRef<'a, I, E> {
    type Target = SparseColMatRef<'a, I, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}

impl<'a, I: Index, E: Entity> SparseColMatRef<'a, I, E> {
    /// Creates a new sparse matrix view.
    ///
    /// # Panics
    ///
    /// Panics if the length of `values` is not equal to the length of
    /// `symbolic.row_indices()`.
    #[inline]
    #[track_caller]
    pub fn new(symbolic: SymbolicSparseColMatRef<'a, I>, values: &'a [E]) -> Self {
        assert!(symbolic.row_indices().len() == values.len());
        Self { symbolic, values }
    }

    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.symbolic.nrows
    }
    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.symbolic.ncols
    }

    /// Returns the number of rows and columns of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Returns a view over `self`.
    #[inline]
    pub fn as_ref(&self) -> SparseColMatRef<'_, I, E> {
        *self
    }

    /// Copies the current matrix into a newly allocated matrix.
    #[inline]
    pub fn to_owned(&self) -> Result<SparseColMat<I, E>, SparseError> {
        Ok(SparseColMat {
            symbolic: self.symbolic.to_owned()?,
            values: try_collect(self.values.iter().copied())?,
        })
    }

    /// Computes $A(P, Q)^\top$, or $A(P, Q)^H$ if `conj` is [`Conj::Yes`], in a newly allocated
    /// matrix.
    ///
    /// See [`permuted_transpose`](crate::sparse::transpose::permuted_transpose).
    pub fn permuted_transpose(
        &self,
        row_perm: Option<PermRef<'_, I>>,
        col_perm: Option<PermRef<'_, I>>,
        conj: Conj,
    ) -> Result<SparseColMat<I, E>, SparseError> {
        let nnz = self.compute_nnz();
        let mut new_col_ptrs = try_zeroed::<I>(self.nrows() + 1)?;
        let mut new_row_indices = try_zeroed::<I>(nnz)?;
        let mut new_values = try_zeroed::<E>(nnz)?;

        transpose::try_permuted_transpose(
            &mut new_col_ptrs,
            &mut new_row_indices,
            &mut *new_values,
            self.symbolic,
            self.values,
            row_perm,
            col_perm,
            conj,
        )?;

        // SAFETY: the output of the transpose satisfies the invariants of the type
        let symbolic = unsafe {
            SymbolicSparseColMat::new_unchecked(
                self.ncols(),
                self.nrows(),
                new_col_ptrs,
                new_row_indices,
            )
        };
        Ok(SparseColMat {
            symbolic,
            values: new_values,
        })
    }

    /// Computes the transpose of `self` in a newly allocated matrix.
    ///
    /// For complex matrices, the values are not conjugated.
    #[inline]
    pub fn transpose(&self) -> Result<SparseColMat<I, E>, SparseError> {
        self.permuted_transpose(None, None, Conj::No)
    }

    /// Computes the conjugate transpose of `self` in a newly allocated matrix.
    #[inline]
    pub fn adjoint(&self) -> Result<SparseColMat<I, E>, SparseError> {
        self.permuted_transpose(None, None, Conj::Yes)
    }

    /// Returns the numerical values of the matrix.
    #[inline]
    pub fn values(self) -> &'a [E] {
        self.values
    }

    /// Returns the numerical values of column `j` of the matrix.
    ///
    /// # Panics:
    ///
    /// Panics if `j >= ncols`.
    #[inline]
    #[track_caller]
    pub fn values_of_col(self, j: usize) -> &'a [E] {
        &self.values[self.col_range(j)]
    }

    /// Returns the symbolic structure of the matrix.
    #[inline]
    pub fn symbolic(&self) -> SymbolicSparseColMatRef<'a, I> {
        self.symbolic
    }

    /// Decomposes the matrix into the symbolic part and the numerical values.
    #[inline]
    pub fn into_parts(self) -> (SymbolicSparseColMatRef<'a, I>, &'a [E]) {
        (self.symbolic, self.values)
    }

    /// Returns the number of symbolic non-zeros in the matrix.
    #[inline]
    pub fn compute_nnz(&self) -> usize {
        self.symbolic.compute_nnz()
    }

    /// Returns the column pointers.
    #[inline]
    pub fn col_ptrs(&self) -> &'a [I] {
        self.symbolic.col_ptrs()
    }

    /// Returns the row indices.
    #[inline]
    pub fn row_indices(&self) -> &'a [I] {
        self.symbolic.row_ind
    }

    /// Returns the row indices of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn row_indices_of_col_raw(&self, j: usize) -> &'a [I] {
        self.symbolic.row_indices_of_col_raw(j)
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
        self.symbolic.row_indices_of_col(j)
    }

    /// Returns the range that the column `j` occupies in `self.row_indices()`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn col_range(&self, j: usize) -> Range<usize> {
        self.symbolic.col_range(j)
    }

    /// Returns an iterator over the `(row, col, value)` triplets of the stored entries, in
    /// storage order.
    #[inline]
    pub fn triplet_iter(self) -> impl 'a + Iterator<Item = (usize, usize, E)> {
        (0..self.ncols()).flat_map(move |j| {
            zip(self.row_indices_of_col(j), self.values_of_col(j))
                .map(move |(i, &value)| (i, j, value))
        })
    }

    /// Returns a reference to the value at the given index, or None if the symbolic structure
    /// doesn't contain it.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    /// Panics if `col >= self.ncols()`.
    #[track_caller]
    pub fn get(self, row: usize, col: usize) -> Option<&'a E> {
        assert!(row < self.nrows());
        assert!(col < self.ncols());

        let row = I::truncate(row);
        let pos = self
            .row_indices_of_col_raw(col)
            .iter()
            .position(|&i| i == row)?;

        Some(&self.values_of_col(col)[pos])
    }
}

impl<I: Index, E: Entity> core::fmt::Debug for SparseColMatRef<'_, I, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mat = *self;
        let mut iter = mat.triplet_iter().map(|(row, col, value)| {
            struct Wrapper<E>(usize, usize, E);
            impl<E: core::fmt::Debug> core::fmt::Debug for Wrapper<E> {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    let row = self.0;
                    let col = self.1;
                    let val = &self.2;
                    write!(f, "({row}, {col}, {val:?})")
                }
            }

            Wrapper(row, col, value)
        });

        f.debug_list().entries(&mut iter).finish()
    }
}
