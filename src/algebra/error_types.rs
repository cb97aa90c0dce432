use thiserror::Error;

/// Error type returned by sparse matrix assembly and checking operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseFormatError {
    /// Matrix is not square
    #[error("Matrix must be square")]
    NotSquare,
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Bad column pointer values")]
    /// Matrix column pointer values are defective
    BadColptr,
    #[error("Row value exceeds the matrix row dimension")]
    /// Row value exceeds the matrix row dimension
    BadRowval,
}
