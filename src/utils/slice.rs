//! Storage layouts for the numerical values of a sparse matrix.
//!
//! Values can be stored contiguously, one [`Entity`] after the other (which for complex
//! numbers means interleaved real and imaginary parts), or, for complex numbers, as two
//! separate arrays holding the real and imaginary parts. The conversion routines are generic
//! over the layout, which only changes where the data lives and never the results.

use crate::{assert, Entity};
use num_complex::Complex;
use reborrow::*;

/// Read access to a slice of values.
pub trait Values<E: Entity> {
    /// Returns the number of values.
    fn len(&self) -> usize;

    /// Returns `true` if there are no values.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the value at position `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.len()`.
    fn read(&self, idx: usize) -> E;
}

/// Write access to a slice of values.
pub trait ValuesMut<E: Entity>: Values<E> {
    /// Writes `value` at position `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.len()`.
    fn write(&mut self, idx: usize, value: E);
}

impl<E: Entity> Values<E> for &[E] {
    #[inline(always)]
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    #[inline(always)]
    fn read(&self, idx: usize) -> E {
        self[idx]
    }
}

impl<E: Entity> Values<E> for &mut [E] {
    #[inline(always)]
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    #[inline(always)]
    fn read(&self, idx: usize) -> E {
        self[idx]
    }
}

impl<E: Entity> ValuesMut<E> for &mut [E] {
    #[inline(always)]
    fn write(&mut self, idx: usize, value: E) {
        self[idx] = value;
    }
}

/// Complex values stored as separate real and imaginary arrays.
#[derive(Copy, Clone, Debug)]
pub struct SplitComplexRef<'a, T> {
    re: &'a [T],
    im: &'a [T],
}

/// Mutable complex values stored as separate real and imaginary arrays.
#[derive(Debug)]
pub struct SplitComplexMut<'a, T> {
    re: &'a mut [T],
    im: &'a mut [T],
}

impl<'a, T> SplitComplexRef<'a, T> {
    /// Creates a new view over the real parts `re` and the imaginary parts `im`.
    ///
    /// # Panics
    /// Panics if `re` and `im` have different lengths.
    #[inline]
    #[track_caller]
    pub fn new(re: &'a [T], im: &'a [T]) -> Self {
        assert!(re.len() == im.len());
        Self { re, im }
    }

    /// Returns the real and imaginary parts.
    #[inline]
    pub fn into_parts(self) -> (&'a [T], &'a [T]) {
        (self.re, self.im)
    }
}

impl<'a, T> SplitComplexMut<'a, T> {
    /// Creates a new mutable view over the real parts `re` and the imaginary parts `im`.
    ///
    /// # Panics
    /// Panics if `re` and `im` have different lengths.
    #[inline]
    #[track_caller]
    pub fn new(re: &'a mut [T], im: &'a mut [T]) -> Self {
        assert!(re.len() == im.len());
        Self { re, im }
    }

    /// Returns the real and imaginary parts.
    #[inline]
    pub fn into_parts(self) -> (&'a mut [T], &'a mut [T]) {
        (self.re, self.im)
    }
}

impl<'short, T> Reborrow<'short> for SplitComplexMut<'_, T> {
    type Target = SplitComplexRef<'short, T>;

    #[inline]
    fn rb(&'short self) -> Self::Target {
        SplitComplexRef {
            re: &*self.re,
            im: &*self.im,
        }
    }
}

impl<'short, T> ReborrowMut<'short> for SplitComplexMut<'_, T> {
    type Target = SplitComplexMut<'short, T>;

    #[inline]
    fn rb_mut(&'short mut self) -> Self::Target {
        SplitComplexMut {
            re: &mut *self.re,
            im: &mut *self.im,
        }
    }
}

impl<'a, T> IntoConst for SplitComplexMut<'a, T> {
    type Target = SplitComplexRef<'a, T>;

    #[inline]
    fn into_const(self) -> Self::Target {
        SplitComplexRef {
            re: self.re,
            im: self.im,
        }
    }
}

impl<T: Copy> Values<Complex<T>> for SplitComplexRef<'_, T>
where
    Complex<T>: Entity,
{
    #[inline(always)]
    fn len(&self) -> usize {
        self.re.len()
    }

    #[inline(always)]
    fn read(&self, idx: usize) -> Complex<T> {
        Complex::new(self.re[idx], self.im[idx])
    }
}

impl<T: Copy> Values<Complex<T>> for SplitComplexMut<'_, T>
where
    Complex<T>: Entity,
{
    #[inline(always)]
    fn len(&self) -> usize {
        self.re.len()
    }

    #[inline(always)]
    fn read(&self, idx: usize) -> Complex<T> {
        Complex::new(self.re[idx], self.im[idx])
    }
}

impl<T: Copy> ValuesMut<Complex<T>> for SplitComplexMut<'_, T>
where
    Complex<T>: Entity,
{
    #[inline(always)]
    fn write(&mut self, idx: usize, value: Complex<T>) {
        self.re[idx] = value.re;
        self.im[idx] = value.im;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert;

    #[test]
    fn test_split_roundtrip() {
        let mut re = [1.0f64, 2.0, 3.0];
        let mut im = [-1.0f64, -2.0, -3.0];
        let mut split = SplitComplexMut::new(&mut re, &mut im);

        assert!(split.len() == 3);
        assert!(split.read(1) == Complex::new(2.0, -2.0));
        split.write(2, Complex::new(5.0, 6.0));
        assert!(split.rb().read(2) == Complex::new(5.0, 6.0));

        let (re, im) = split.into_parts();
        assert!(&*re == &[1.0, 2.0, 5.0][..]);
        assert!(&*im == &[-1.0, -2.0, 6.0][..]);
    }

    #[test]
    fn test_contiguous() {
        let mut values = [Complex::new(1.0f32, 1.0); 2];
        let mut view: &mut [Complex<f32>] = &mut values;
        view.write(0, Complex::new(0.0, 4.0));
        assert!(Values::read(&view, 0) == Complex::new(0.0, 4.0));
        assert!(Values::len(&view) == 2);
    }
}
