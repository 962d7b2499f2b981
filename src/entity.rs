//! Scalar types that can be stored in a sparse matrix.

use num_complex::Complex;

/// Scalar value of a sparse matrix entry.
///
/// Only the operations needed by the conversion routines are required: a zero value,
/// summation of duplicate entries, and conjugation for the adjoint.
///
/// Values are [`bytemuck::Pod`] so that intermediate copies can be carved from a
/// [`dyn_stack::PodStack`].
pub trait Entity: bytemuck::Pod + PartialEq + core::fmt::Debug + Send + Sync + 'static {
    /// Whether the type has a nontrivial conjugate.
    const IS_COMPLEX: bool;

    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns `self + rhs`.
    fn sum(self, rhs: Self) -> Self;

    /// Returns the complex conjugate of `self`. Identity for real types.
    fn conjugate(self) -> Self;
}

/// Zero-sized value type for matrices that only store their sparsity pattern.
///
/// Converting triplets with this value type performs the structural part of the conversion
/// only, without touching any numerical data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbolic;

// SAFETY: `Symbolic` is a zero-sized type with no invalid bit patterns.
unsafe impl bytemuck::Zeroable for Symbolic {}
// SAFETY: see above.
unsafe impl bytemuck::Pod for Symbolic {}

impl Symbolic {
    /// Returns a slice of `len` symbolic values, without allocating.
    #[inline]
    pub fn materialize<'a>(len: usize) -> &'a mut [Self] {
        // SAFETY: `Symbolic` is a ZST, so any well aligned non-null pointer is valid for any
        // length
        unsafe {
            core::slice::from_raw_parts_mut(core::ptr::NonNull::<Symbolic>::dangling().as_ptr(), len)
        }
    }
}

impl Entity for Symbolic {
    const IS_COMPLEX: bool = false;

    #[inline(always)]
    fn zero() -> Self {
        Symbolic
    }

    #[inline(always)]
    fn sum(self, _: Self) -> Self {
        Symbolic
    }

    #[inline(always)]
    fn conjugate(self) -> Self {
        Symbolic
    }
}

macro_rules! impl_real_entity {
    ($ty: ty) => {
        impl Entity for $ty {
            const IS_COMPLEX: bool = false;

            #[inline(always)]
            fn zero() -> Self {
                0.0
            }

            #[inline(always)]
            fn sum(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn conjugate(self) -> Self {
                self
            }
        }

        impl Entity for Complex<$ty> {
            const IS_COMPLEX: bool = true;

            #[inline(always)]
            fn zero() -> Self {
                Complex::new(0.0, 0.0)
            }

            #[inline(always)]
            fn sum(self, rhs: Self) -> Self {
                Complex::new(self.re + rhs.re, self.im + rhs.im)
            }

            #[inline(always)]
            fn conjugate(self) -> Self {
                Complex::new(self.re, -self.im)
            }
        }
    };
}

impl_real_entity!(f32);
impl_real_entity!(f64);
