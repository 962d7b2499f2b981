//! Permuted transposition of compressed column matrices.
//!
//! Given a matrix $A$ with `nrows` rows and `ncols` columns, and optional row and column
//! permutations $P$ and $Q$, computes $R = A(P, Q)^\top$ (or its conjugate) without forming
//! $A(P, Q)$. A permutation maps positions of the permuted matrix to original indices:
//! row `k` of $A(P, Q)$ is row `P[k]` of $A$, and column `k` of $A(P, Q)$ is column `Q[k]` of
//! $A$. A missing permutation is the identity.
//!
//! The result is computed with a single counting sort, so the row indices of each column of
//! $R$ come out sorted, whether or not the columns of $A$ are.
//!
//! Transposing twice recovers the input: with $R = A(P, Q)^\top$, $R(Q^{-1}, P^{-1})^\top = A$.

use super::*;
use crate::{assert, debug_assert};

/// Computes the size and alignment of the workspace required to transpose an `nrows×ncols`
/// matrix with [`permuted_transpose`].
#[inline]
pub fn permuted_transpose_req<I: Index>(
    nrows: usize,
    ncols: usize,
) -> Result<StackReq, SizeOverflow> {
    StackReq::try_new::<I>(Ord::max(Ord::max(nrows, ncols), 1))
}

/// Computes $A(P, Q)^\top$, or $A(P, Q)^H$ if `conj` is [`Conj::Yes`], and stores the result in
/// `new_col_ptrs`, `new_row_indices` and `new_values`.
///
/// `values` holds the values of `A`, at the same positions as `A.row_indices()`. The result is
/// an `ncols×nrows` matrix, whose column `k` holds row `row_perm[k]` of `A`.
///
/// # Panics
/// - Panics if `new_col_ptrs.len() != A.nrows() + 1`.
/// - Panics if `new_row_indices` or `new_values` is shorter than the number of entries of `A`.
/// - Panics if `values` is shorter than `A.row_indices()`.
/// - Panics if the dimension of `row_perm` (resp. `col_perm`) is not `A.nrows()` (resp.
///   `A.ncols()`).
/// - Panics if the provided memory in `stack` is insufficient (see
///   [`permuted_transpose_req`]).
#[track_caller]
pub fn permuted_transpose<'a, I: Index, E: Entity>(
    new_col_ptrs: &'a mut [I],
    new_row_indices: &'a mut [I],
    mut new_values: impl ValuesMut<E>,
    A: SymbolicSparseColMatRef<'_, I>,
    values: impl Values<E>,
    row_perm: Option<PermRef<'_, I>>,
    col_perm: Option<PermRef<'_, I>>,
    conj: Conj,
    stack: PodStack<'_>,
) -> SymbolicSparseColMatRef<'a, I> {
    let m = A.nrows();
    let n = A.ncols();
    let nnz = A.compute_nnz();

    assert!(all(
        new_col_ptrs.len() == m + 1,
        new_row_indices.len() >= nnz,
        new_values.len() >= nnz,
        values.len() >= A.row_indices().len(),
    ));
    let row_perm = row_perm.map(|perm| {
        assert!(perm.len() == m);
        perm.arrays().0
    });
    let col_perm = col_perm.map(|perm| {
        assert!(perm.len() == n);
        perm.arrays().0
    });

    let (work, _) = stack.make_raw::<I>(Ord::max(Ord::max(m, n), 1));

    let row_count = &mut work[..m];
    mem::fill_zero(row_count);

    // can't overflow because the total count is nnz <= I::Signed::MAX
    for j in 0..n {
        for i in A.row_indices_of_col(j) {
            row_count[i] += I::truncate(1);
        }
    }

    // new column k gathers the entries of row row_perm[k]
    new_col_ptrs[0] = I::truncate(0);
    for (k, [pk0, pk1]) in
        windows2(Cell::as_slice_of_cells(Cell::from_mut(&mut *new_col_ptrs))).enumerate()
    {
        let i = match row_perm {
            Some(perm) => perm[k].zx(),
            None => k,
        };
        let ci = &mut row_count[i];
        let pk = pk0.get();
        // new_col_ptrs is non-decreasing
        pk1.set(pk + *ci);
        *ci = pk;
    }

    let row_cursor = row_count;
    // row_cursor[row_perm[k]] == new_col_ptrs[k]
    for new_j in 0..n {
        let j = match col_perm {
            Some(perm) => perm[new_j].zx(),
            None => new_j,
        };
        let new_j = I::truncate(new_j);
        for p in A.col_range(j) {
            let cursor = &mut row_cursor[A.row_indices()[p].zx()];
            let q = cursor.zx();
            new_row_indices[q] = new_j;
            new_values.write(q, conj.apply(values.read(p)));
            *cursor += I::truncate(1);
        }
    }

    for k in 0..m {
        let i = match row_perm {
            Some(perm) => perm[k].zx(),
            None => k,
        };
        debug_assert!(row_cursor[i] == new_col_ptrs[k + 1]);
    }

    log::trace!("transposed a {m}×{n} matrix with {nnz} entries");

    let new_col_ptrs: &'a [I] = new_col_ptrs;
    let new_row_indices: &'a [I] = new_row_indices;

    // SAFETY:
    // 0. new_col_ptrs is non-decreasing, starts at 0 and ends at nnz
    // 1. all written row indices are less than n, and each column of A contributes at most one
    //    entry to each new column
    unsafe { SymbolicSparseColMatRef::new_unchecked(n, m, new_col_ptrs, &new_row_indices[..nnz]) }
}

/// Computes $A(P, Q)^\top$, or $A(P, Q)^H$ if `conj` is [`Conj::Yes`], and stores the result in
/// `new_col_ptrs`, `new_row_indices` and `new_values`.
///
/// Same as [`permuted_transpose`], except that the workspace is allocated for the duration of
/// the call.
///
/// # Errors
/// - [`SparseError::OutOfMemory`] if the workspace can't be allocated. No output is written in
///   that case.
///
/// # Panics
/// See [`permuted_transpose`].
#[track_caller]
pub fn try_permuted_transpose<'a, I: Index, E: Entity>(
    new_col_ptrs: &'a mut [I],
    new_row_indices: &'a mut [I],
    new_values: impl ValuesMut<E>,
    A: SymbolicSparseColMatRef<'_, I>,
    values: impl Values<E>,
    row_perm: Option<PermRef<'_, I>>,
    col_perm: Option<PermRef<'_, I>>,
    conj: Conj,
) -> Result<SymbolicSparseColMatRef<'a, I>, SparseError> {
    let mut mem = GlobalPodBuffer::try_new(
        permuted_transpose_req::<I>(A.nrows(), A.ncols()).map_err(nomem)?,
    )
    .map_err(nomem)?;

    Ok(permuted_transpose(
        new_col_ptrs,
        new_row_indices,
        new_values,
        A,
        values,
        row_perm,
        col_perm,
        conj,
        PodStack::new(&mut mem),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert, perm::Perm, utils::slice::SplitComplexMut, Symbolic};
    use alloc::{vec, vec::Vec};
    use num_complex::Complex;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    fn to_dense<I: Index, E: Entity>(A: SparseColMatRef<'_, I, E>) -> Vec<Vec<E>> {
        let mut dense = vec![vec![E::zero(); A.ncols()]; A.nrows()];
        for (i, j, value) in A.triplet_iter() {
            dense[i][j] = value;
        }
        dense
    }

    fn random_perm<I: Index>(rng: &mut StdRng, n: usize) -> Perm<I> {
        let mut forward: Vec<usize> = (0..n).collect();
        forward.shuffle(rng);
        Perm::new_from_forward(forward.into_iter().map(I::truncate).collect())
    }

    fn random_mat<I: Index>(
        rng: &mut StdRng,
        nrows: usize,
        ncols: usize,
    ) -> SparseColMat<I, Complex<f64>> {
        let nz = if nrows * ncols == 0 {
            0
        } else {
            rng.gen_range(0..2 * nrows * ncols)
        };
        let triplets: Vec<_> = (0..nz)
            .map(|_| {
                (
                    I::truncate(rng.gen_range(0..nrows)),
                    I::truncate(rng.gen_range(0..ncols)),
                    Complex::new(rng.gen::<f64>(), rng.gen::<f64>()),
                )
            })
            .collect();
        SparseColMat::try_new_from_triplets(nrows, ncols, &triplets).unwrap()
    }

    fn test_concrete<I: Index>() {
        let z = I::truncate;
        // [[1 0 2]
        //  [0 3 0]]
        let A = SparseColMat::<I, Complex<f64>>::new(
            SymbolicSparseColMat::new_checked(
                2,
                3,
                vec![z(0), z(1), z(2), z(3)],
                vec![z(0), z(1), z(0)],
            ),
            vec![
                Complex::new(1.0, 1.0),
                Complex::new(3.0, -1.0),
                Complex::new(2.0, 0.5),
            ],
        );

        let T = A.transpose().unwrap();
        assert!(T.shape() == (3, 2));
        assert!(T.col_ptrs() == [z(0), z(2), z(3)]);
        assert!(T.row_indices() == [z(0), z(2), z(1)]);
        assert!(
            T.values()
                == [
                    Complex::new(1.0, 1.0),
                    Complex::new(2.0, 0.5),
                    Complex::new(3.0, -1.0),
                ]
        );

        let H = A.adjoint().unwrap();
        assert!(H.as_ref().symbolic().col_ptrs() == T.col_ptrs());
        assert!(
            H.values()
                == [
                    Complex::new(1.0, -1.0),
                    Complex::new(2.0, -0.5),
                    Complex::new(3.0, 1.0),
                ]
        );

        // P = [1, 0], Q = [2, 0, 1]
        // A(P, Q) = [[0 0 3]
        //            [2 1 0]]
        let P = Perm::<I>::new_from_forward(vec![z(1), z(0)]);
        let Q = Perm::<I>::new_from_forward(vec![z(2), z(0), z(1)]);
        let R = A
            .permuted_transpose(Some(P.as_ref()), Some(Q.as_ref()), Conj::No)
            .unwrap();
        assert!(R.col_ptrs() == [z(0), z(1), z(3)]);
        assert!(R.row_indices() == [z(2), z(0), z(1)]);
        assert!(
            R.values()
                == [
                    Complex::new(3.0, -1.0),
                    Complex::new(2.0, 0.5),
                    Complex::new(1.0, 1.0),
                ]
        );
    }

    fn test_permutation_entries<I: Index>() {
        let rng = &mut StdRng::seed_from_u64(0);

        for _ in 0..30 {
            let nrows = rng.gen_range(0..12);
            let ncols = rng.gen_range(0..12);
            let A = random_mat::<I>(rng, nrows, ncols);
            let P = random_perm::<I>(rng, nrows);
            let Q = random_perm::<I>(rng, ncols);

            for conj in [Conj::No, Conj::Yes] {
                let R = A
                    .permuted_transpose(Some(P.as_ref()), Some(Q.as_ref()), conj)
                    .unwrap();
                assert!(R.shape() == (ncols, nrows));
                assert!(R.compute_nnz() == A.compute_nnz());

                for j in 0..R.ncols() {
                    let col = R.row_indices_of_col_raw(j);
                    for w in col.windows(2) {
                        assert!(w[0] < w[1]);
                    }
                }

                let a = to_dense(A.as_ref());
                let r = to_dense(R.as_ref());
                let (p, _) = P.as_ref().arrays();
                let (q, _) = Q.as_ref().arrays();
                for i in 0..nrows {
                    for j in 0..ncols {
                        assert!(r[j][i] == conj.apply(a[p[i].zx()][q[j].zx()]));
                    }
                }
            }
        }
    }

    fn test_involution<I: Index>() {
        let rng = &mut StdRng::seed_from_u64(0);

        for _ in 0..30 {
            let nrows = rng.gen_range(0..15);
            let ncols = rng.gen_range(0..15);
            let A = random_mat::<I>(rng, nrows, ncols);

            let P = random_perm::<I>(rng, nrows);
            let Q = random_perm::<I>(rng, ncols);

            let R = A
                .permuted_transpose(Some(P.as_ref()), Some(Q.as_ref()), Conj::Yes)
                .unwrap();
            let A2 = R
                .permuted_transpose(Some(Q.as_ref().inverse()), Some(P.as_ref().inverse()), Conj::Yes)
                .unwrap();
            assert!(A2 == A);

            let A3 = A.transpose().unwrap().transpose().unwrap();
            assert!(A3 == A);
        }
    }

    fn test_matches_swapped_triplets<I: Index>() {
        let rng = &mut StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let nrows = rng.gen_range(1..10);
            let ncols = rng.gen_range(1..10);
            let nz = rng.gen_range(0..60);
            let triplets: Vec<_> = (0..nz)
                .map(|_| {
                    (
                        I::truncate(rng.gen_range(0..nrows)),
                        I::truncate(rng.gen_range(0..ncols)),
                        rng.gen_range(-4..4) as f64,
                    )
                })
                .collect();
            let swapped: Vec<_> = triplets.iter().map(|&(i, j, v)| (j, i, v)).collect();

            let A = SparseColMat::try_new_from_triplets(nrows, ncols, &triplets).unwrap();
            let T = SparseColMat::try_new_from_triplets(ncols, nrows, &swapped).unwrap();
            assert!(A.transpose().unwrap() == T);
        }
    }

    fn test_empty<I: Index>() {
        let z = I::truncate;
        for (nrows, ncols) in [(0, 0), (0, 4), (3, 0), (3, 4)] {
            let col_ptrs = vec![z(0); ncols + 1];
            let A = SymbolicSparseColMatRef::new_checked(nrows, ncols, &col_ptrs, &[]);

            let mut new_col_ptrs = vec![z(7); nrows + 1];
            let R = permuted_transpose(
                &mut new_col_ptrs,
                &mut [],
                Symbolic::materialize(0),
                A,
                &*Symbolic::materialize(0),
                None,
                None,
                Conj::No,
                PodStack::new(&mut GlobalPodBuffer::new(
                    permuted_transpose_req::<I>(nrows, ncols).unwrap(),
                )),
            );
            assert!(R.shape() == (ncols, nrows));
            assert!(R.col_ptrs().iter().all(|&p| p == z(0)));
        }
    }

    fn test_stale_workspace<I: Index>() {
        let rng = &mut StdRng::seed_from_u64(2);
        let mut mem = GlobalPodBuffer::new(permuted_transpose_req::<I>(8, 8).unwrap());

        for _ in 0..10 {
            let A = random_mat::<I>(rng, 8, 8);
            let P = random_perm::<I>(rng, 8);
            let nnz = A.compute_nnz();

            let mut col_ptrs = vec![z_of::<I>(0); 9];
            let mut row_indices = vec![z_of::<I>(0); nnz];
            let mut values = vec![Complex::new(0.0, 0.0); nnz];
            permuted_transpose(
                &mut col_ptrs,
                &mut row_indices,
                &mut *values,
                A.symbolic(),
                A.values(),
                Some(P.as_ref()),
                None,
                Conj::No,
                PodStack::new(&mut mem),
            );

            let expected = A
                .permuted_transpose(Some(P.as_ref()), None, Conj::No)
                .unwrap();
            assert!(col_ptrs == expected.col_ptrs());
            assert!(row_indices == expected.row_indices());
            assert!(values == expected.values());
        }
    }

    fn z_of<I: Index>(value: usize) -> I {
        I::truncate(value)
    }

    monomorphize_test!(test_concrete);
    monomorphize_test!(test_permutation_entries);
    monomorphize_test!(test_involution);
    monomorphize_test!(test_matches_swapped_triplets);
    monomorphize_test!(test_empty);
    monomorphize_test!(test_stale_workspace);

    #[test]
    fn test_split_complex_output() {
        let A = SparseColMat::<usize, Complex<f32>>::try_new_from_triplets(
            2,
            2,
            &[
                (0, 1, Complex::new(1.0, 2.0)),
                (1, 0, Complex::new(-3.0, 4.0)),
                (1, 1, Complex::new(0.5, -0.5)),
            ],
        )
        .unwrap();

        let mut col_ptrs = [0usize; 3];
        let mut row_indices = [0usize; 3];
        let mut re = [0.0f32; 3];
        let mut im = [0.0f32; 3];
        try_permuted_transpose(
            &mut col_ptrs,
            &mut row_indices,
            SplitComplexMut::new(&mut re, &mut im),
            A.symbolic(),
            A.values(),
            None,
            None,
            Conj::Yes,
        )
        .unwrap();

        let H = A.adjoint().unwrap();
        assert!(&col_ptrs[..] == H.col_ptrs());
        assert!(&row_indices[..] == H.row_indices());
        for (k, value) in H.values().iter().enumerate() {
            assert!(*value == Complex::new(re[k], im[k]));
        }
        assert!(re == [1.0, -3.0, 0.5]);
        assert!(im == [-2.0, -4.0, 0.5]);
    }

    #[test]
    fn test_out_of_memory() {
        // the workspace for isize::MAX rows can't be represented
        let col_ptrs = [0usize];
        // SAFETY: the matrix has no columns
        let A = unsafe {
            SymbolicSparseColMatRef::new_unchecked(isize::MAX as usize, 0, &col_ptrs, &[])
        };

        let mut new_col_ptrs = [7usize];
        let mut new_row_indices = [7usize];
        let mut new_values = [7.0f64];
        let result = try_permuted_transpose::<usize, f64>(
            &mut new_col_ptrs,
            &mut new_row_indices,
            &mut new_values[..],
            A,
            &[][..],
            None,
            None,
            Conj::No,
        );
        assert!(result.map(|_| ()) == Err(SparseError::OutOfMemory));
        assert!(new_col_ptrs == [7]);
        assert!(new_row_indices == [7]);
        assert!(new_values == [7.0]);
    }
}
