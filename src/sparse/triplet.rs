//! Conversion of coordinate triplets to compressed column format.
//!
//! The triplets `(rows[k], cols[k], values[k])` may be given in any order and may contain
//! duplicate `(row, col)` pairs. The conversion is done with two counting sorts and never
//! compares indices:
//! 1. the triplets are validated and counted per row,
//! 2. they are placed into row buckets, preserving their input order within each row,
//! 3. duplicates are summed into their first occurrence within each row, and the surviving
//!    entries are compacted,
//! 4. the surviving entries are counted per column and placed into column buckets.
//!
//! Since the rows are walked in increasing order in the last pass, the row indices of each
//! output column come out sorted.
//!
//! When requested, a map from each triplet to the storage slot it was accumulated into is
//! produced, so that the values of the same pattern can later be refreshed without repeating
//! the conversion. See [`SparseColMatMut::fill_from_map`].

use super::*;
use crate::{assert, debug_assert};

/// Computes the size and alignment of the workspace required to convert `nz` triplets to a
/// compressed `nrows×ncols` matrix with [`triplets_to_col`].
pub fn triplets_to_col_req<I: Index, E: Entity>(
    nrows: usize,
    ncols: usize,
    nz: usize,
    with_map: bool,
) -> Result<StackReq, SizeOverflow> {
    let row_ptrs = StackReq::try_new::<I>(nrows.checked_add(1).ok_or(SizeOverflow)?)?;
    let row_col_ind = StackReq::try_new::<I>(nz)?;
    let row_values = StackReq::try_new::<E>(nz)?;
    let row_nnz = StackReq::try_new::<I>(nrows)?;
    let slot_map = StackReq::try_new::<I>(if with_map { nz } else { 0 })?;
    let work = StackReq::try_new::<I>(Ord::max(nrows, ncols))?;

    StackReq::try_all_of([row_ptrs, row_col_ind, row_values, row_nnz, slot_map, work])
}

/// Converts the triplets `(rows[k], cols[k], triplet_values[k])` to a compressed column
/// matrix of dimensions `nrows×ncols`, stored in `col_ptrs`, `row_indices` and `values`.
///
/// Duplicate entries are summed. The entry position is that of the first occurrence of the
/// duplicate `(row, col)` pair in the input. The row indices of each output column are sorted.
///
/// If `map` is provided, `map[k]` receives the position in `row_indices` and `values` of the
/// entry that triplet `k` contributed to.
///
/// Use [`Symbolic`](crate::Symbolic) as the value type to compute the sparsity pattern only.
///
/// # Errors
/// - [`SparseError::ProblemTooLarge`] if `nrows`, `ncols` or the number of triplets exceeds
///   `I::Signed::MAX`.
/// - [`SparseError::InvalidMatrix`] if a triplet lies outside the matrix. No output is written
///   in that case.
///
/// # Panics
/// - Panics if `cols`, `triplet_values` and `map` (when provided) do not have the same length
///   as `rows`.
/// - Panics if `col_ptrs.len() != ncols + 1`.
/// - Panics if `row_indices` or `values` is shorter than the number of triplets.
/// - Panics if the provided memory in `stack` is insufficient (see [`triplets_to_col_req`]).
#[track_caller]
pub fn triplets_to_col<'a, I: Index, E: Entity>(
    col_ptrs: &'a mut [I],
    row_indices: &'a mut [I],
    mut values: impl ValuesMut<E>,
    mut map: Option<&mut [I]>,
    nrows: usize,
    ncols: usize,
    rows: &[I],
    cols: &[I],
    triplet_values: impl Values<E>,
    stack: PodStack<'_>,
) -> Result<SymbolicSparseColMatRef<'a, I>, SparseError> {
    let nz = rows.len();
    let max = I::Signed::MAX.zx();
    if nrows > max || ncols > max || nz > max {
        return Err(SparseError::ProblemTooLarge);
    }

    assert!(all(
        cols.len() == nz,
        triplet_values.len() == nz,
        col_ptrs.len() == ncols + 1,
        row_indices.len() >= nz,
        values.len() >= nz,
    ));
    if let Some(map) = map.as_deref() {
        assert!(map.len() == nz);
    }
    let with_map = map.is_some();

    let (row_ptrs, stack) = stack.make_raw::<I>(nrows + 1);
    let (row_col_ind, stack) = stack.make_raw::<I>(nz);
    let (row_values, stack) = stack.make_raw::<E>(nz);
    let (row_nnz, stack) = stack.make_raw::<I>(nrows);
    let (slot_map, stack) = stack.make_raw::<I>(if with_map { nz } else { 0 });
    let (work, _) = stack.make_raw::<I>(Ord::max(nrows, ncols));

    // row histogram, and validation of the whole input before anything is written
    let row_count = &mut work[..nrows];
    mem::fill_zero(row_count);
    for (k, (&i, &j)) in zip(rows, cols).enumerate() {
        let (i, j) = (i.zx(), j.zx());
        if i >= nrows || j >= ncols {
            log::debug!("triplet {k} at ({i}, {j}) lies outside of the {nrows}×{ncols} matrix");
            return Err(SparseError::InvalidMatrix {
                index: k,
                row: i,
                col: j,
            });
        }
        // can't overflow since nz <= I::Signed::MAX
        row_count[i] += I::truncate(1);
    }

    // row pointers, then stable placement of the triplets into their row buckets
    row_ptrs[0] = I::truncate(0);
    for (ci, [p0, p1]) in zip(
        &mut *row_count,
        windows2(Cell::as_slice_of_cells(Cell::from_mut(&mut *row_ptrs))),
    ) {
        let p = p0.get();
        p1.set(p + *ci);
        *ci = p;
    }

    let row_cursor = row_count;
    for (k, (&i, &j)) in zip(rows, cols).enumerate() {
        let cursor = &mut row_cursor[i.zx()];
        let p = cursor.zx();
        row_col_ind[p] = j;
        row_values[p] = triplet_values.read(k);
        if let Some(map) = map.as_deref_mut() {
            map[k] = *cursor;
        }
        *cursor += I::truncate(1);
    }
    debug_assert!(&*row_cursor == &row_ptrs[1..]);

    // duplicate merge, row by row
    // col_pos[j] is the position of column j in the current row, if it is not less than the
    // start of the row. positions recorded for previous rows are always smaller.
    let col_pos: &mut [I::Signed] = bytemuck::cast_slice_mut(&mut work[..ncols]);
    mem::fill_none(col_pos);

    let mut n_dup = 0usize;
    for i in 0..nrows {
        let p1 = row_ptrs[i].zx();
        let p2 = row_ptrs[i + 1].zx();
        let row_start = I::Signed::truncate(p1);

        let mut pdest = p1;
        for p in p1..p2 {
            let j = row_col_ind[p].zx();
            let pj = col_pos[j];
            if pj >= row_start {
                let pj = pj.zx();
                row_values[pj] = row_values[pj].sum(row_values[p]);
                if with_map {
                    slot_map[p] = I::truncate(pj);
                }
                n_dup += 1;
            } else {
                col_pos[j] = I::Signed::truncate(pdest);
                if pdest != p {
                    row_col_ind[pdest] = row_col_ind[p];
                    row_values[pdest] = row_values[p];
                }
                if with_map {
                    slot_map[p] = I::truncate(pdest);
                }
                pdest += 1;
            }
        }
        row_nnz[i] = I::truncate(pdest - p1);
    }

    if n_dup > 0 {
        if let Some(map) = map.as_deref_mut() {
            for slot in map.iter_mut() {
                *slot = slot_map[slot.zx()];
            }
        }
    }

    // column histogram of the surviving entries
    let col_count = &mut work[..ncols];
    mem::fill_zero(col_count);
    for (&p1, &len) in zip(&*row_ptrs, &*row_nnz) {
        let p1 = p1.zx();
        for &j in &row_col_ind[p1..p1 + len.zx()] {
            col_count[j.zx()] += I::truncate(1);
        }
    }

    col_ptrs[0] = I::truncate(0);
    for (cj, [p0, p1]) in zip(
        &mut *col_count,
        windows2(Cell::as_slice_of_cells(Cell::from_mut(&mut *col_ptrs))),
    ) {
        let p = p0.get();
        p1.set(p + *cj);
        *cj = p;
    }
    let nnz = col_ptrs[ncols].zx();

    // placement into the column buckets. rows are walked in increasing order, so each column
    // receives its row indices sorted
    let col_cursor = col_count;
    for (i, (&p1, &len)) in zip(&*row_ptrs, &*row_nnz).enumerate() {
        let p1 = p1.zx();
        let i_ = I::truncate(i);
        for p in p1..p1 + len.zx() {
            let cursor = &mut col_cursor[row_col_ind[p].zx()];
            let cp = cursor.zx();
            row_indices[cp] = i_;
            values.write(cp, row_values[p]);
            if with_map {
                slot_map[p] = *cursor;
            }
            *cursor += I::truncate(1);
        }
    }
    debug_assert!(&*col_cursor == &col_ptrs[1..]);

    if let Some(map) = map {
        for slot in map.iter_mut() {
            *slot = slot_map[slot.zx()];
        }
    }

    log::trace!(
        "converted {nz} triplets to a {nrows}×{ncols} matrix with {nnz} entries ({n_dup} duplicates merged)"
    );

    #[cfg(feature = "perf-warn")]
    if n_dup > nnz && crate::__perf_warn!(TRIPLET_DUPLICATES_WARN) {
        log::warn!(target: "sparse_ingest_perf", "Triplet conversion found more duplicate entries than distinct ones. Consider accumulating values before the conversion.");
    }

    let col_ptrs: &'a [I] = col_ptrs;
    let row_indices: &'a [I] = row_indices;

    // SAFETY:
    // 0. col_ptrs is non-decreasing, starts at 0 and ends at nnz
    // 1. all written row indices are less than nrows, and each column has no duplicates
    Ok(unsafe {
        SymbolicSparseColMatRef::new_unchecked(nrows, ncols, col_ptrs, &row_indices[..nnz])
    })
}
