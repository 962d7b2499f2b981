use super::*;
use crate::assert;

/// Sparse matrix view in compressed column format, with mutable access to the values.
pub struct SparseColMatMut<'a, I: Index, E: Entity> {
    pub(crate) symbolic: SymbolicSparseColMatRef<'a, I>,
    pub(crate) values: &'a mut [E],
}

impl<'short, I: Index, E: Entity> Reborrow<'short> for SparseColMatMut<'_, I, E> {
    type Target = SparseColMatRef<'short, I, E>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        SparseColMatRef {
            symbolic: self.symbolic,
            values: &*self.values,
        }
    }
}

impl<'short, I: Index, E: Entity> ReborrowMut<'short> for SparseColMatMut<'_, I, E> {
    type Target = SparseColMatMut<'short, I, E>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        SparseColMatMut {
            symbolic: self.symbolic,
            values: &mut *self.values,
        }
    }
}

impl<'a, I: Index, E: Entity> IntoConst for SparseColMatMut<'a, I, E> {
    type Target = SparseColMatRef<'a, I, E>;

    #[inline]
    fn into_const(self) -> Self::Target {
        SparseColMatRef {
            symbolic: self.symbolic,
            values: self.values,
        }
    }
}

impl<'a, I: Index, E: Entity> SparseColMatMut<'a, I, E> {
    /// Creates a new sparse matrix view.
    ///
    /// # Panics
    ///
    /// Panics if the length of `values` is not equal to the length of
    /// `symbolic.row_indices()`.
    #[inline]
    #[track_caller]
    pub fn new(symbolic: SymbolicSparseColMatRef<'a, I>, values: &'a mut [E]) -> Self {
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

    /// Returns a view over `self`.
    #[inline]
    pub fn as_ref(&self) -> SparseColMatRef<'_, I, E> {
        self.rb()
    }

    /// Returns a mutable view over `self`.
    #[inline]
    pub fn as_mut(&mut self) -> SparseColMatMut<'_, I, E> {
        self.rb_mut()
    }

    /// Returns the numerical values of the matrix.
    #[inline]
    pub fn values_mut(self) -> &'a mut [E] {
        self.values
    }

    /// Returns the numerical values of column `j` of the matrix.
    ///
    /// # Panics:
    ///
    /// Panics if `j >= ncols`.
    #[inline]
    #[track_caller]
    pub fn values_of_col_mut(self, j: usize) -> &'a mut [E] {
        let range = self.symbolic.col_range(j);
        &mut self.values[range]
    }

    /// Returns the symbolic structure of the matrix.
    #[inline]
    pub fn symbolic(&self) -> SymbolicSparseColMatRef<'a, I> {
        self.symbolic
    }

    /// Decomposes the matrix into the symbolic part and the numerical values.
    #[inline]
    pub fn parts_mut(self) -> (SymbolicSparseColMatRef<'a, I>, &'a mut [E]) {
        (self.symbolic, self.values)
    }

    /// Returns a mutable reference to the value at the given index, or None if the symbolic
    /// structure doesn't contain it.
    ///
    /// # Panics
    /// Panics if `row >= self.nrows()`.
    /// Panics if `col >= self.ncols()`.
    #[track_caller]
    pub fn get_mut(self, row: usize, col: usize) -> Option<&'a mut E> {
        assert!(row < self.nrows());
        assert!(col < self.ncols());

        let row = I::truncate(row);
        let pos = self
            .symbolic
            .row_indices_of_col_raw(col)
            .iter()
            .position(|&i| i == row)?;

        Some(&mut self.values_of_col_mut(col)[pos])
    }

    /// Fills the values of the matrix from a map created together with its symbolic structure.
    ///
    /// `values[k]` is accumulated into the slot `map[k]`. With [`FillMode::Replace`], the
    /// result is the same as converting the original triplets with these new values. With
    /// [`FillMode::Add`], the new values are added to the current ones.
    ///
    /// # Panics
    /// - Panics if `values` does not have one value per mapped triplet.
    /// - Panics if the map was created for a matrix with a different number of entries.
    #[track_caller]
    pub fn fill_from_map(&mut self, map: &TripletMap<I>, values: impl Values<E>, mode: FillMode) {
        assert!(all(
            values.len() == map.len(),
            map.nnz() == self.values.len(),
        ));

        if mode == FillMode::Replace {
            self.values.fill(E::zero());
        }

        for (k, &slot) in map.as_slice().iter().enumerate() {
            let dst = &mut self.values[slot.zx()];
            *dst = dst.sum(values.read(k));
        }
    }
}

impl<I: Index, E: Entity> core::fmt::Debug for SparseColMatMut<'_, I, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.rb().fmt(f)
    }
}
