use super::*;
use crate::assert;
use alloc::{boxed::Box, vec::Vec};

/// Owned permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perm<I: Index> {
    pub(super) forward: Box<[I]>,
    pub(super) inverse: Box<[I]>,
}

impl<I: Index> Perm<I> {
    /// Convert `self` to a permutation view.
    #[inline]
    pub fn as_ref(&self) -> PermRef<'_, I> {
        PermRef {
            forward: &self.forward,
            inverse: &self.inverse,
        }
    }

    /// Creates a new permutation, by checking the validity of the inputs.
    ///
    /// # Panics
    ///
    /// See [`PermRef::new_checked`].
    #[inline]
    #[track_caller]
    pub fn new_checked(forward: Box<[I]>, inverse: Box<[I]>) -> Self {
        PermRef::<'_, I>::new_checked(&forward, &inverse);
        Self { forward, inverse }
    }

    /// Creates a new permutation from its forward array, computing the inverse.
    ///
    /// # Panics
    ///
    /// Panics if `forward` is not a permutation of `0..forward.len()`, or if its length
    /// exceeds `I::Signed::MAX`.
    #[track_caller]
    pub fn new_from_forward(forward: Vec<I>) -> Self {
        let n = forward.len();
        assert!(n <= I::Signed::MAX.zx());

        let none = I::truncate(usize::MAX);
        let mut inverse = alloc::vec![none; n];
        for (k, &i) in forward.iter().enumerate() {
            let i = i.zx();
            assert!(i < n);
            assert!(inverse[i] == none);
            inverse[i] = I::truncate(k);
        }

        Self {
            forward: forward.into_boxed_slice(),
            inverse: inverse.into_boxed_slice(),
        }
    }

    /// Returns the identity permutation of length `n`.
    #[track_caller]
    pub fn identity(n: usize) -> Self {
        assert!(n <= I::Signed::MAX.zx());
        let forward: Box<[I]> = (0..n).map(I::truncate).collect();
        Self {
            inverse: forward.clone(),
            forward,
        }
    }

    /// Returns the forward and inverse arrays.
    #[inline]
    pub fn into_arrays(self) -> (Box<[I]>, Box<[I]>) {
        (self.forward, self.inverse)
    }

    /// Returns the dimension of the permutation.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if the permutation has length zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Returns the inverse permutation.
    #[inline]
    pub fn into_inverse(self) -> Self {
        Self {
            forward: self.inverse,
            inverse: self.forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;

    #[test]
    fn test_new_from_forward() {
        let perm = Perm::<u32>::new_from_forward(vec![2, 0, 3, 1]);
        let (forward, inverse) = perm.as_ref().arrays();
        assert!(forward == &[2, 0, 3, 1][..]);
        assert!(inverse == &[1, 3, 0, 2][..]);

        let inv = perm.clone().into_inverse();
        assert!(inv.as_ref().arrays().0 == inverse);
        assert!(perm.as_ref().inverse().arrays().1 == forward);
    }

    #[test]
    fn test_identity() {
        let perm = Perm::<usize>::identity(3);
        assert!(perm.len() == 3);
        assert!(perm.as_ref().arrays().0 == perm.as_ref().arrays().1);
    }

    #[test]
    #[should_panic]
    fn test_not_a_permutation() {
        Perm::<usize>::new_from_forward(vec![0, 2, 2]);
    }

    #[test]
    #[should_panic]
    fn test_mismatched_inverse() {
        PermRef::<usize>::new_checked(&[0, 1, 2], &[1, 0, 2]);
    }
}
