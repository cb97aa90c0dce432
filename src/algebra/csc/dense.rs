#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, SparseFormatError};
use itertools::Itertools;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Build a sparse matrix from a dense square row-major table.
    ///
    /// Entries that are exactly zero are dropped, so the result has no
    /// explicit zeros and columns come out sorted by row index.
    pub fn from_dense(rows: &[Vec<T>]) -> Result<Self, SparseFormatError> {
        let m = rows.len();
        let n = rows.first().map_or(0, |r| r.len());

        if rows.iter().any(|r| r.len() != n) {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        if m != n {
            return Err(SparseFormatError::NotSquare);
        }

        //count nonzeros in each column, then cumsum into colptr
        let mut colptr = vec![0; n + 1];
        for row in rows {
            for (col, v) in row.iter().enumerate() {
                if !v.is_zero() {
                    colptr[col + 1] += 1;
                }
            }
        }
        for col in 0..n {
            colptr[col + 1] += colptr[col];
        }

        let nnz = colptr[n];
        let mut rowval = vec![0; nnz];
        let mut nzval = vec![T::zero(); nnz];

        //fill pass, using colptr[..n] as the write heads.  Row-major
        //traversal means each column fills in increasing row order.
        let mut next = colptr[0..n].to_vec();
        for (i, row) in rows.iter().enumerate() {
            for (col, v) in row.iter().enumerate() {
                if !v.is_zero() {
                    let dest = next[col];
                    rowval[dest] = i;
                    nzval[dest] = *v;
                    next[col] += 1;
                }
            }
        }

        Ok(CscMatrix::new(m, n, colptr, rowval, nzval))
    }

    /// Expand to a dense row-major table.
    ///
    /// With `use_upper_only` set, only stored entries on or above the
    /// diagonal are used and each off-diagonal entry is mirrored into
    /// both triangles.  This reconstitutes a symmetric matrix from
    /// upper triangular storage.
    pub fn to_dense(&self, use_upper_only: bool) -> Vec<Vec<T>> {
        let mut out = vec![vec![T::zero(); self.n]; self.m];

        for (col, (&first, &last)) in self.colptr.iter().tuple_windows().enumerate() {
            for p in first..last {
                let row = self.rowval[p];
                if use_upper_only {
                    if row <= col {
                        out[row][col] = self.nzval[p];
                        out[col][row] = self.nzval[p];
                    }
                } else {
                    out[row][col] = self.nzval[p];
                }
            }
        }
        out
    }
}

impl<T, const N: usize> From<&[[T; N]; N]> for CscMatrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; N]; N]) -> Self {
        let rows: Vec<Vec<T>> = rows.iter().map(|r| r.to_vec()).collect();
        //a fixed-size square array is well formed by construction
        CscMatrix::from_dense(&rows).unwrap()
    }
}

#[test]
fn test_from_dense() {
    // A = [1.  0.  5.]
    //     [2.  0.  6.]
    //     [0.  4.  0.]
    let A = CscMatrix::from(&[
        [1., 0., 5.], //
        [2., 0., 6.],
        [0., 4., 0.],
    ]);

    assert_eq!(A.colptr, vec![0, 2, 3, 5]);
    assert_eq!(A.rowval, vec![0, 1, 2, 0, 1]);
    assert_eq!(A.nzval, vec![1., 2., 4., 5., 6.]);
    assert!(A.check_format().is_ok());

    //ragged input is rejected
    let bad = CscMatrix::from_dense(&[vec![1., 2.], vec![3.]]);
    assert_eq!(bad, Err(SparseFormatError::IncompatibleDimension));

    //non-square input is rejected
    let bad = CscMatrix::from_dense(&[vec![1., 2., 3.], vec![4., 5., 6.]]);
    assert_eq!(bad, Err(SparseFormatError::NotSquare));
}

#[test]
fn test_to_dense_roundtrip() {
    let dense = vec![
        vec![1., 0., 5.], //
        vec![2., 0., 6.],
        vec![0., 4., 0.],
    ];
    let A = CscMatrix::from_dense(&dense).unwrap();
    assert_eq!(A.to_dense(false), dense);
}

#[test]
fn test_to_dense_upper_only() {
    // upper triangular storage of a symmetric matrix
    let T = CscMatrix::new(
        3,
        3,
        vec![0, 1, 3, 5],
        vec![0, 0, 1, 1, 2],
        vec![8., -3., 8., -1., 8.],
    );

    let expected = vec![
        vec![8., -3., 0.], //
        vec![-3., 8., -1.],
        vec![0., -1., 8.],
    ];
    assert_eq!(T.to_dense(true), expected);
}
