//! Sparse LDLᵀ factorization of symmetric quasidefinite matrices.

#![allow(non_snake_case)]

mod ldl;
pub use self::ldl::*;
