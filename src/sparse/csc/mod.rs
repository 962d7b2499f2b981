use super::*;

mod symbolic_own;
mod symbolic_ref;

mod matmut;
mod matown;
mod matref;

pub use symbolic_own::SymbolicSparseColMat;
pub use symbolic_ref::SymbolicSparseColMatRef;

pub use matmut::SparseColMatMut;
pub use matown::SparseColMat;
pub use matref::SparseColMatRef;
