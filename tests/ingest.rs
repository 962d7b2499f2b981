#![allow(non_snake_case)]

use assert_approx_eq::assert_approx_eq;
use num_complex::Complex;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use sparse_ingest::{
    perm::Perm,
    sparse::{
        analysis::{free_symbolic, SymbolicAnalysis},
        element::element_size,
        FillMode, SparseColMat, SparseError, SymbolicSparseColMat,
    },
    Conj,
};

#[test]
fn concrete_scenario() {
    let (A, map) = SparseColMat::<u32, f64>::try_new_from_triplets_with_map(
        3,
        3,
        &[(0, 0, 2.0), (1, 1, 3.0), (0, 0, 5.0)],
    )
    .unwrap();

    assert_eq!(A.col_ptrs(), &[0, 1, 2, 2]);
    assert_eq!(A.row_indices(), &[0, 1]);
    assert_eq!(A.values(), &[7.0, 3.0]);
    assert_eq!(map.as_slice(), &[0, 1, 0]);
}

#[test]
fn out_of_range_triplet() {
    let err = SparseColMat::<u64, f64>::try_new_from_triplets(
        3,
        3,
        &[(0, 0, 1.0), (5, 0, 1.0)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        SparseError::InvalidMatrix {
            index: 1,
            row: 5,
            col: 0,
        }
    );
    assert_eq!(err.to_string(), "InvalidMatrix { index: 1, row: 5, col: 0 }");
}

#[test]
fn empty_input() {
    let A = SparseColMat::<usize, f64>::try_new_from_triplets(4, 3, &[]).unwrap();
    assert_eq!(A.col_ptrs(), &[0, 0, 0, 0]);
    assert!(A.row_indices().is_empty());
    assert!(A.values().is_empty());
}

#[test]
fn sum_is_independent_of_input_order() {
    let rng = &mut StdRng::seed_from_u64(0);
    let n = 6;

    let mut triplets: Vec<(usize, usize, f64)> = (0..500)
        .map(|_| {
            (
                rng.gen_range(0..n),
                rng.gen_range(0..n),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();

    let A = SparseColMat::try_new_from_triplets(n, n, &triplets).unwrap();
    triplets.shuffle(rng);
    let B = SparseColMat::try_new_from_triplets(n, n, &triplets).unwrap();

    assert_eq!(A.col_ptrs(), B.col_ptrs());
    assert_eq!(A.row_indices(), B.row_indices());
    for (a, b) in A.values().iter().zip(B.values()) {
        assert_approx_eq!(*a, *b, 1e-12);
    }
}

#[test]
fn map_refresh_matches_reingestion() {
    let rng = &mut StdRng::seed_from_u64(1);
    let (nrows, ncols) = (7, 5);
    let indices: Vec<(u32, u32)> = (0..40)
        .map(|_| (rng.gen_range(0..nrows as u32), rng.gen_range(0..ncols as u32)))
        .collect();

    let (symbolic, map) =
        SymbolicSparseColMat::try_new_from_indices(nrows, ncols, &indices).unwrap();

    for _ in 0..3 {
        let values: Vec<Complex<f64>> = (0..indices.len())
            .map(|_| Complex::new(rng.gen(), rng.gen()))
            .collect();
        let triplets: Vec<_> = indices
            .iter()
            .zip(&values)
            .map(|(&(i, j), &v)| (i, j, v))
            .collect();

        let expected = SparseColMat::try_new_from_triplets(nrows, ncols, &triplets).unwrap();
        let mut refreshed =
            SparseColMat::new_from_map_and_values(symbolic.clone(), &map, &*values).unwrap();
        assert_eq!(refreshed, expected);

        refreshed.fill_from_map(&map, &*values, FillMode::Add);
        for (a, b) in refreshed.values().iter().zip(expected.values()) {
            assert_approx_eq!(a.re, 2.0 * b.re);
            assert_approx_eq!(a.im, 2.0 * b.im);
        }
    }
}

#[test]
fn permuted_transpose_roundtrip() {
    let A = SparseColMat::<u32, Complex<f32>>::try_new_from_triplets(
        3,
        4,
        &[
            (0, 0, Complex::new(1.0, 1.0)),
            (2, 0, Complex::new(2.0, -1.0)),
            (1, 2, Complex::new(0.0, 3.0)),
            (2, 3, Complex::new(4.0, 0.0)),
            (2, 3, Complex::new(1.0, 1.0)),
        ],
    )
    .unwrap();

    let P = Perm::new_from_forward(vec![2u32, 0, 1]);
    let Q = Perm::new_from_forward(vec![3u32, 1, 0, 2]);

    let R = A
        .permuted_transpose(Some(P.as_ref()), Some(Q.as_ref()), Conj::Yes)
        .unwrap();
    assert_eq!(R.shape(), (4, 3));
    // R(j, i) = conj(A(P[i], Q[j]))
    assert_eq!(R.get(0, 0), Some(&Complex::new(5.0, -1.0)));
    assert_eq!(R.get(2, 0), Some(&Complex::new(2.0, 1.0)));
    assert_eq!(R.get(3, 2), Some(&Complex::new(0.0, -3.0)));
    assert_eq!(R.get(2, 1), Some(&Complex::new(1.0, -1.0)));
    assert_eq!(R.get(1, 1), None);

    let back = R
        .permuted_transpose(Some(Q.as_ref().inverse()), Some(P.as_ref().inverse()), Conj::Yes)
        .unwrap();
    assert_eq!(back, A);
}

#[test]
fn element_size_overflow() {
    let n = (1usize << 31) - 1;
    assert_eq!(
        element_size::<u32, f64>(n, n),
        Err(SparseError::ProblemTooLarge)
    );
    assert!(element_size::<u64, f64>(1000, 1000).is_ok());
}

#[test]
fn symbolic_teardown() {
    let mut handle = Some(SymbolicAnalysis::<u32> {
        col_perm_init: Some(vec![0, 1, 2]),
        row_degrees: Some(vec![1, 1, 1]),
        ..Default::default()
    });
    free_symbolic(&mut handle);
    assert!(handle.is_none());
    free_symbolic(&mut handle);
    assert!(handle.is_none());

    let mut none: Option<SymbolicAnalysis<u64>> = None;
    free_symbolic(&mut none);
    assert!(none.is_none());
}
