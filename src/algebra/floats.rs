#![allow(non_snake_case)]
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Main trait for floating point types used in the factorization kernels.
///
/// All floating point calculations are represented internally on values
/// implementing the `FloatT` trait, with implementations provided for the
/// f32 and f64 native types.  Any other type satisfying the constituent
/// bounds will also work.
///
/// `FloatT` relies on [`num_traits`](num_traits) for most of its
/// constituent trait bounds.
pub trait FloatT:
    'static
    + Send
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Float
        + FloatConst
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}
