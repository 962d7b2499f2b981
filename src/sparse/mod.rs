//! Sparse matrix data structures and conversion routines.
//!
//! Matrices are stored in compressed sparse column format. Each column is represented by the
//! row indices of its non-zero entries, as well as their values.
//!
//! The indices and the values are each stored in a contiguous slice. In order to specify where
//! each column starts and ends, a slice of size `ncols + 1` stores the start of each column,
//! with the last element being equal to the total number of non-zeros.
//!
//! # Example
//!
//! Consider the 4-by-5 matrix:
//! ```notcode
//! [[10.0, 0.0, 12.0, -1.0, 13.0]
//!  [ 0.0, 0.0, 25.0, -2.0,  0.0]
//!  [ 1.0, 0.0,  0.0,  0.0,  0.0]
//!  [ 4.0, 0.0,  0.0,  0.0,  5.0]]
//! ```
//!
//! The matrix is stored as follows:
//! ```notcode
//! column pointers:  0 |  3 |  3 |  5 |  7 |  9
//!
//! row indices:    0 |    2 |    3 |    0 |    1 |    0 |    1 |    0 |    3
//! values     : 10.0 |  1.0 |  4.0 | 12.0 | 25.0 | -1.0 | -2.0 | 13.0 |  5.0
//! ```

use crate::{
    perm::PermRef,
    utils::slice::{Values, ValuesMut},
    Conj, Entity, Index, SignedIndex, Symbolic,
};
use alloc::vec::Vec;
use core::{cell::Cell, iter::zip, ops::Range};
use dyn_stack::{GlobalPodBuffer, PodStack, SizeOverflow, StackReq};
use reborrow::*;

pub(crate) mod mem {
    #[inline]
    pub fn fill_zero<I: bytemuck::Zeroable>(slice: &mut [I]) {
        let len = slice.len();
        // SAFETY: the all zeros bit pattern is valid for `I`
        unsafe { core::ptr::write_bytes(slice.as_mut_ptr(), 0u8, len) }
    }

    /// Fills `slice` with the all ones bit pattern, which is `-1` for signed integers.
    #[inline]
    pub fn fill_none<I: bytemuck::Pod>(slice: &mut [I]) {
        let len = slice.len();
        // SAFETY: every bit pattern is valid for `I`
        unsafe { core::ptr::write_bytes(slice.as_mut_ptr(), 0xFFu8, len) }
    }
}

#[inline(always)]
#[doc(hidden)]
pub fn windows2<I>(slice: &[I]) -> impl DoubleEndedIterator<Item = &[I; 2]> {
    slice
        .windows(2)
        // SAFETY: every window has exactly two elements
        .map(|window| unsafe { &*(window.as_ptr() as *const [I; 2]) })
}

/// Errors that can occur in sparse algorithms.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[non_exhaustive]
pub enum SparseError {
    /// A triplet refers to a row or column outside of the matrix.
    InvalidMatrix {
        /// Position of the first offending triplet in the input.
        index: usize,
        /// Row of the offending triplet.
        row: usize,
        /// Column of the offending triplet.
        col: usize,
    },
    /// Memory allocation failed.
    OutOfMemory,
    /// A dimension, a count, or a computed size does not fit in the index type.
    ProblemTooLarge,
}

impl core::fmt::Display for SparseError {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SparseError {}

impl From<SizeOverflow> for SparseError {
    #[inline]
    fn from(_: SizeOverflow) -> Self {
        Self::ProblemTooLarge
    }
}

#[inline]
pub(crate) fn nomem<T>(_: T) -> SparseError {
    SparseError::OutOfMemory
}

#[inline]
#[track_caller]
pub(crate) fn try_zeroed<I: bytemuck::Pod>(n: usize) -> Result<Vec<I>, SparseError> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(nomem)?;
    // SAFETY: the capacity is at least `n`, and the all zeros bit pattern is valid for `I`
    unsafe {
        core::ptr::write_bytes::<I>(v.as_mut_ptr(), 0u8, n);
        v.set_len(n);
    }
    Ok(v)
}

#[inline]
#[track_caller]
pub(crate) fn try_collect<I: IntoIterator>(iter: I) -> Result<Vec<I::Item>, SparseError> {
    let iter = iter.into_iter();
    let mut v = Vec::new();
    v.try_reserve_exact(iter.size_hint().0).map_err(nomem)?;
    v.extend(iter);
    Ok(v)
}

/// Map from the position of each input triplet to the storage slot it was accumulated into.
///
/// Produced when converting triplets to a compressed matrix. Allows filling the values of the
/// same sparsity pattern again without repeating the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripletMap<I> {
    pub(crate) map: Vec<I>,
    pub(crate) nnz: usize,
}

impl<I: Index> TripletMap<I> {
    /// Returns the storage slot of each input triplet.
    #[inline]
    pub fn as_slice(&self) -> &[I] {
        &self.map
    }

    /// Returns the number of input triplets.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map was built from an empty triplet list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of stored entries the triplets were accumulated into.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Returns the slots as a vector.
    #[inline]
    pub fn into_inner(self) -> Vec<I> {
        self.map
    }
}

/// Whether the filled values should replace the current matrix values or be added to them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FillMode {
    /// New filled values should replace the old values.
    Replace,
    /// New filled values should be added to the old values.
    Add,
}

#[cfg(test)]
macro_rules! monomorphize_test {
    ($name: ident) => {
        monomorphize_test!($name, u32);
        monomorphize_test!($name, u64);
    };

    ($name: ident, $ty: ident) => {
        paste::paste! {
            #[test]
            fn [<$name _ $ty>]() {
                $name::<$ty>();
            }
        }
    };
}

mod csc;

pub mod analysis;
pub mod element;
pub mod transpose;
pub mod triplet;

pub use csc::*;
