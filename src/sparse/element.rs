//! Sizing of dense frontal matrix elements.
//!
//! An element is a dense `nrows×ncols` block stored in a single arena allocation, measured in
//! allocation units. Its parts are laid out in order:
//! 1. a header of [`ELEMENT_HEADER_FIELDS`] index fields
//!    (`cdeg, rdeg, nrowsleft, ncolsleft, nrows, ncols, next`),
//! 2. the `ncols` column indices,
//! 3. the `nrows` row indices,
//! 4. the `nrows * ncols` values, in column-major order.
//!
//! The header, the indices and the values each start on a unit boundary. The row indices
//! directly follow the column indices.

use super::*;

/// Number of index fields in the header of an element.
pub const ELEMENT_HEADER_FIELDS: usize = 7;

/// Size in bytes of an allocation unit for the index type `I`.
///
/// A unit holds two indices, or one `f64`, whichever is larger.
#[inline]
pub const fn unit_size<I: Index>() -> usize {
    let two_indices = 2 * core::mem::size_of::<I>();
    let double = core::mem::size_of::<f64>();
    if two_indices > double {
        two_indices
    } else {
        double
    }
}

/// Offsets of the parts of an element.
///
/// All fields are in allocation units from the start of the element, except
/// `row_indices_after_cols`. The row indices follow the column indices directly, so they may
/// start inside a unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElementLayout {
    /// Offset of the column indices, in units.
    pub col_indices: usize,
    /// Offset of the row indices, counted in indices of type `I` from the start of the column
    /// indices. Always equal to `ncols`.
    pub row_indices_after_cols: usize,
    /// Offset of the values, in units.
    pub values: usize,
    /// Total size of the element in units, excluding the block header.
    pub size: usize,
}

// ceil(count * size_of(T) / unit), or None on overflow
#[inline]
fn units(count: u128, elem_size: usize, unit: usize) -> Option<u128> {
    let bytes = count.checked_mul(elem_size as u128)?;
    Some(bytes.div_ceil(unit as u128))
}

/// Computes the layout of an `nrows×ncols` element with index type `I` and value type `E`.
///
/// # Errors
/// - [`SparseError::ProblemTooLarge`] if the size of the element plus one unit for the block
///   header doesn't fit in `I::Signed`.
pub fn element_layout<I: Index, E: Entity>(
    nrows: usize,
    ncols: usize,
) -> Result<ElementLayout, SparseError> {
    let unit = unit_size::<I>();
    let index_size = core::mem::size_of::<I>();

    let compute = || -> Option<(u128, u128, u128)> {
        let header = units(ELEMENT_HEADER_FIELDS as u128, index_size, unit)?;
        let indices = units((nrows as u128).checked_add(ncols as u128)?, index_size, unit)?;
        let values = units(
            (nrows as u128).checked_mul(ncols as u128)?,
            core::mem::size_of::<E>(),
            unit,
        )?;
        Some((header, indices, values))
    };

    let (header, indices, values) = compute().ok_or(SparseError::ProblemTooLarge)?;
    let size = header
        .checked_add(indices)
        .and_then(|size| size.checked_add(values))
        .ok_or(SparseError::ProblemTooLarge)?;

    // the arena prepends one unit of block header to each element
    let max = I::Signed::MAX.zx() as u128;
    if size >= max {
        log::debug!("element {nrows}×{ncols} needs {size} units, which exceeds {max}");
        return Err(SparseError::ProblemTooLarge);
    }

    Ok(ElementLayout {
        col_indices: header as usize,
        row_indices_after_cols: ncols,
        values: (header + indices) as usize,
        size: size as usize,
    })
}

/// Computes the number of allocation units needed to store an `nrows×ncols` element with index
/// type `I` and value type `E`.
///
/// # Errors
/// See [`element_layout`].
#[inline]
pub fn element_size<I: Index, E: Entity>(
    nrows: usize,
    ncols: usize,
) -> Result<usize, SparseError> {
    element_layout::<I, E>(nrows, ncols).map(|layout| layout.size)
}
