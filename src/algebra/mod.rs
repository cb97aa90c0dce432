//! Basic algebra types: floating point traits, compressed sparse column
//! storage and the structural error types shared across the crate.

mod error_types;
pub use error_types::*;
mod floats;
pub use floats::*;
mod csc;
pub use csc::*;
