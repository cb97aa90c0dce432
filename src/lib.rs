//! __sparse-chol__ computes the sparse $LDL^T$ factorization of a symmetric
//! sparse matrix, together with the fill-reducing approximate minimum degree
//! (AMD) permutation that makes the factorization efficient.
//!
//! The crate is organized around four operations:
//!
//! * [`CscMatrix::from_dense`](crate::algebra::CscMatrix::from_dense) —
//!   build compressed sparse column storage from a dense square matrix.
//! * [`amd::order`](crate::amd::order) — compute a fill-reducing
//!   permutation of the symmetric nonzero pattern.
//! * [`LdlFactorization::new`](crate::ldl::LdlFactorization::new) — factor
//!   $PAP^T = LDL^T$ with unit lower triangular $L$ and diagonal $D$.
//! * [`cholesky_like`](crate::ldl::cholesky_like) — produce the single
//!   Cholesky-like triangular factor $LD^{1/2}$ of a dense symmetric matrix.
//!
//! Factorization uses a fixed pivot order determined entirely by the chosen
//! permutation.  There is no pivoting for stability and no regularization:
//! a zero pivot is reported as an error naming the failing column.
//!
//! __Example__
//!
//! ```
//! use sparse_chol::{CscMatrix, LdlFactorization};
//!
//! // upper triangle of a 3 x 3 symmetric matrix
//! let A = CscMatrix::from(&[
//!     [4.0, 1.0, 0.0], //
//!     [0.0, 4.0, 1.0],
//!     [0.0, 0.0, 4.0],
//! ]);
//!
//! let factors = LdlFactorization::new(&A, None).unwrap();
//! assert_eq!(factors.D.len(), 3);
//! ```

pub mod algebra;
pub mod amd;
pub mod ldl;

pub use crate::algebra::{CscMatrix, FloatT, IndexBase, SparseFormatError};
pub use crate::ldl::{
    cholesky_like, ldl_factorize, LdlError, LdlFactorization, LdlSettings, LdlSettingsBuilder,
    LdlSymbolic,
};
