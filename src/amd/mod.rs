//! Approximate minimum degree ordering for symmetric sparsity patterns.

#![allow(non_snake_case)]

mod amd;
pub use self::amd::*;
