//! Low level utilities shared by the sparse routines.

pub mod slice;
