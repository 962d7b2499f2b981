//! Permutations of rows and columns.
//!
//! A permutation of length `n` is stored as a pair of arrays, `forward` and `inverse`, that are
//! inverses of each other. `forward[k] == i` means that the original index `i` becomes index `k`
//! of the permuted object, so for a row permutation $P$, row `k` of $A(P, :)$ is row
//! `forward[k]` of $A$.

use crate::{assert, Index, SignedIndex};
use reborrow::*;

mod permown;
mod permref;

pub use permown::Perm;
pub use permref::PermRef;
