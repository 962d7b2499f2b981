use super::*;
use crate::assert;

/// Sparse matrix in compressed column format.
#[derive(Clone, PartialEq)]
pub struct SparseColMat<I: Index, E: Entity> {
    pub(crate) symbolic: SymbolicSparseColMat<I>,
    pub(crate) values: Vec<E>,
}

impl<I: Index, E: Entity> SparseColMat<I, E> {
    /// Creates a new sparse matrix.
    ///
    /// # Panics
    ///
    /// Panics if the length of `values` is not equal to the length of
    /// `symbolic.row_indices()`.
    #[inline]
    #[track_caller]
    pub fn new(symbolic: SymbolicSparseColMat<I>, values: Vec<E>) -> Self {
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
        SparseColMatRef {
            symbolic: self.symbolic.as_ref(),
            values: &self.values,
        }
    }

    /// Returns a mutable view over `self`.
    ///
    /// Note that the symbolic structure cannot be changed through this view.
    #[inline]
    pub fn as_mut(&mut self) -> SparseColMatMut<'_, I, E> {
        SparseColMatMut {
            symbolic: self.symbolic.as_ref(),
            values: &mut self.values,
        }
    }

    /// Decomposes the matrix into the symbolic part and the numerical values.
    #[inline]
    pub fn into_parts(self) -> (SymbolicSparseColMat<I>, Vec<E>) {
        (self.symbolic, self.values)
    }

    /// Returns the symbolic structure of the matrix.
    #[inline]
    pub fn symbolic(&self) -> SymbolicSparseColMatRef<'_, I> {
        self.symbolic.as_ref()
    }

    /// Returns the numerical values of the matrix.
    #[inline]
    pub fn values(&self) -> &[E] {
        &self.values
    }

    /// Returns the numerical values of the matrix.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [E] {
        &mut self.values
    }

    /// Returns the numerical values of column `j` of the matrix.
    ///
    /// # Panics:
    ///
    /// Panics if `j >= ncols`.
    #[inline]
    #[track_caller]
    pub fn values_of_col(&self, j: usize) -> &[E] {
        self.as_ref().values_of_col(j)
    }

    /// Returns the number of symbolic non-zeros in the matrix.
    #[inline]
    pub fn compute_nnz(&self) -> usize {
        self.symbolic.compute_nnz()
    }

    /// Returns the column pointers.
    #[inline]
    pub fn col_ptrs(&self) -> &[I] {
        self.symbolic.col_ptrs()
    }

    /// Returns the row indices.
    #[inline]
    pub fn row_indices(&self) -> &[I] {
        self.symbolic.row_indices()
    }

    /// Returns the row indices of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn row_indices_of_col_raw(&self, j: usize) -> &[I] {
        self.symbolic.row_indices_of_col_raw(j)
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

    /// Returns a reference to the value at the given index, or None if the symbolic structure
    /// doesn't contain it.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    /// Panics if `col >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn get(&self, row: usize, col: usize) -> Option<&E> {
        self.as_ref().get(row, col)
    }

    /// Returns a mutable reference to the value at the given index, or None if the symbolic
    /// structure doesn't contain it.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    /// Panics if `col >= self.ncols()`.
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut E> {
        self.as_mut().get_mut(row, col)
    }

    /// Computes $A(P, Q)^\top$, or $A(P, Q)^H$ if `conj` is [`Conj::Yes`], in a newly allocated
    /// matrix.
    #[inline]
    pub fn permuted_transpose(
        &self,
        row_perm: Option<PermRef<'_, I>>,
        col_perm: Option<PermRef<'_, I>>,
        conj: Conj,
    ) -> Result<SparseColMat<I, E>, SparseError> {
        self.as_ref().permuted_transpose(row_perm, col_perm, conj)
    }

    /// Computes the transpose of `self` in a newly allocated matrix.
    #[inline]
    pub fn transpose(&self) -> Result<SparseColMat<I, E>, SparseError> {
        self.as_ref().transpose()
    }

    /// Computes the conjugate transpose of `self` in a newly allocated matrix.
    #[inline]
    pub fn adjoint(&self) -> Result<SparseColMat<I, E>, SparseError> {
        self.as_ref().adjoint()
    }

    /// Fills the values of the matrix from a map created together with its symbolic structure.
    ///
    /// See [`SparseColMatMut::fill_from_map`].
    #[inline]
    #[track_caller]
    pub fn fill_from_map(&mut self, map: &TripletMap<I>, values: impl Values<E>, mode: FillMode) {
        self.as_mut().fill_from_map(map, values, mode)
    }

    /// Converts `nz` triplets to a newly allocated matrix. The map is only filled if
    /// `with_map` is `true`, and is empty otherwise.
    pub(crate) fn try_new_from_triplets_impl(
        nrows: usize,
        ncols: usize,
        nz: usize,
        triplet: impl Fn(usize) -> (I, I, E),
        with_map: bool,
    ) -> Result<(Self, Vec<I>), SparseError> {
        let max = I::Signed::MAX.zx();
        if nrows > max || ncols > max || nz > max {
            return Err(SparseError::ProblemTooLarge);
        }

        let mut rows = try_zeroed::<I>(nz)?;
        let mut cols = try_zeroed::<I>(nz)?;
        let mut triplet_values = try_zeroed::<E>(nz)?;
        for k in 0..nz {
            let (i, j, value) = triplet(k);
            rows[k] = i;
            cols[k] = j;
            triplet_values[k] = value;
        }

        let mut col_ptrs = try_zeroed::<I>(ncols + 1)?;
        let mut row_indices = try_zeroed::<I>(nz)?;
        let mut values = try_zeroed::<E>(nz)?;
        let mut map = try_zeroed::<I>(if with_map { nz } else { 0 })?;

        let mut mem = GlobalPodBuffer::try_new(
            triplet::triplets_to_col_req::<I, E>(nrows, ncols, nz, with_map).map_err(nomem)?,
        )
        .map_err(nomem)?;

        let nnz = triplet::triplets_to_col(
            &mut col_ptrs,
            &mut row_indices,
            &mut *values,
            if with_map { Some(&mut *map) } else { None },
            nrows,
            ncols,
            &rows,
            &cols,
            &*triplet_values,
            PodStack::new(&mut mem),
        )?
        .compute_nnz();

        row_indices.truncate(nnz);
        values.truncate(nnz);

        Ok((
            Self {
                symbolic: SymbolicSparseColMat {
                    nrows,
                    ncols,
                    col_ptr: col_ptrs,
                    row_ind: row_indices,
                },
                values,
            },
            map,
        ))
    }

    /// Create a new matrix from triplets `(row, col, value)`.
    ///
    /// Duplicate entries are summed.
    ///
    /// # Errors
    /// See [`triplets_to_col`](crate::sparse::triplet::triplets_to_col).
    #[track_caller]
    pub fn try_new_from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: &[(I, I, E)],
    ) -> Result<Self, SparseError> {
        let (mat, _) =
            Self::try_new_from_triplets_impl(nrows, ncols, triplets.len(), |k| triplets[k], false)?;
        Ok(mat)
    }

    /// Create a new matrix from triplets `(row, col, value)`, along with the map from each
    /// triplet to the slot it was accumulated into.
    ///
    /// Duplicate entries are summed.
    ///
    /// # Errors
    /// See [`triplets_to_col`](crate::sparse::triplet::triplets_to_col).
    #[track_caller]
    pub fn try_new_from_triplets_with_map(
        nrows: usize,
        ncols: usize,
        triplets: &[(I, I, E)],
    ) -> Result<(Self, TripletMap<I>), SparseError> {
        let (mat, map) =
            Self::try_new_from_triplets_impl(nrows, ncols, triplets.len(), |k| triplets[k], true)?;
        let nnz = mat.compute_nnz();
        Ok((mat, TripletMap { map, nnz }))
    }

    /// Create a new matrix from a previously created symbolic structure and triplet map.
    /// The provided values must correspond to the same indices that were provided in the
    /// function call from which the map was created.
    ///
    /// # Panics
    /// - Panics if `values` does not have one value per mapped triplet.
    /// - Panics if the map was created for a matrix with a different number of entries.
    #[track_caller]
    pub fn new_from_map_and_values(
        symbolic: SymbolicSparseColMat<I>,
        map: &TripletMap<I>,
        values: impl Values<E>,
    ) -> Result<Self, SparseError> {
        assert!(map.nnz() == symbolic.compute_nnz());
        let nnz = symbolic.row_indices().len();
        let mut mat = Self {
            symbolic,
            values: try_zeroed::<E>(nnz)?,
        };
        mat.fill_from_map(map, values, FillMode::Replace);
        Ok(mat)
    }
}

impl<I: Index, E: Entity> core::fmt::Debug for SparseColMat<I, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.as_ref().fmt(f)
    }
}
