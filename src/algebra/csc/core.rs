#![allow(non_snake_case)]

use crate::algebra::{FloatT, SparseFormatError};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use sparse_chol::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// This field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

/// Index base of caller supplied CSC arrays.
///
/// Raw arrays arriving from one-based host environments are normalized
/// exactly once at ingestion; see [`CscMatrix::from_shifted_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    /// arrays are zero-based (native convention, no shift applied)
    Zero,
    /// arrays are one-based and will be decremented at ingestion
    One,
}

impl IndexBase {
    /// Infer the index base from the leading column pointer.
    ///
    /// A CSC column pointer always starts at exactly 0 (zero-based) or
    /// exactly 1 (one-based), so `colptr[0]` discriminates the two
    /// conventions unambiguously.  Any other leading value is rejected.
    pub fn infer(colptr: &[usize]) -> Result<Self, SparseFormatError> {
        match colptr.first() {
            Some(&0) => Ok(IndexBase::Zero),
            Some(&1) => Ok(IndexBase::One),
            _ => Err(SparseFormatError::BadColptr),
        }
    }
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that row indices are all in bounds or that entries within
    /// each column are distinct.  Responsibility for ensuring these
    /// conditions hold is left to the caller.
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// Construct from raw CSC arrays that may be one-based.
    ///
    /// If `base` is `None` the index base is inferred from `colptr[0]`
    /// (see [`IndexBase::infer`]).  One-based arrays are decremented in
    /// place exactly once; arrays that are already zero-based pass
    /// through unchanged, so ingestion is idempotent.
    pub fn from_shifted_parts(
        m: usize,
        n: usize,
        mut colptr: Vec<usize>,
        mut rowval: Vec<usize>,
        nzval: Vec<T>,
        base: Option<IndexBase>,
    ) -> Result<Self, SparseFormatError> {
        let base = match base {
            Some(base) => base,
            None => IndexBase::infer(&colptr)?,
        };

        if base == IndexBase::One {
            if colptr.iter().any(|&p| p == 0) {
                return Err(SparseFormatError::BadColptr);
            }
            if rowval.iter().any(|&r| r == 0) {
                return Err(SparseFormatError::BadRowval);
            }
            colptr.iter_mut().for_each(|p| *p -= 1);
            rowval.iter_mut().for_each(|r| *r -= 1);
        }

        if colptr.len() != n + 1 || rowval.len() != nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        let out = CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        };
        out.check_format()?;
        Ok(out)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// number of rows
    pub fn nrows(&self) -> usize {
        self.m
    }

    /// number of columns
    pub fn ncols(&self) -> usize {
        self.n
    }

    /// true if the matrix is square
    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// Check that matrix data is correctly formatted.
    ///
    /// Entries within a column are not required to appear in order of
    /// increasing row index; downstream algorithms sort locally when
    /// they need sorted columns.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// True if the matrix is upper triangular
    pub fn is_triu(&self) -> bool {
        // check lower triangle for any structural entries, regardless
        // of the values that may be assigned to them
        for col in 0..self.ncols() {
            //start / stop indices for the current column
            let first = self.colptr[col];
            let last = self.colptr[col + 1];
            let rows = &self.rowval[first..last];

            if rows.iter().any(|&row| row > col) {
                return false;
            }
        }
        true
    }

    /// True if the matrix has any structural entry strictly above
    /// the diagonal.
    pub(crate) fn has_strict_upper(&self) -> bool {
        for col in 0..self.ncols() {
            let first = self.colptr[col];
            let last = self.colptr[col + 1];
            let rows = &self.rowval[first..last];

            if rows.iter().any(|&row| row < col) {
                return true;
            }
        }
        false
    }

    /// Allocates a new matrix containing only entries from the upper triangular part
    ///
    /// NB! : assumes that entries in each column have
    /// monotonically increasing row numbers
    pub fn to_triu(&self) -> Self {
        assert_eq!(self.m, self.n);
        let (m, n) = (self.m, self.n);
        let mut colptr = vec![0; n + 1];
        let mut nnz = 0;

        //count the number of entries in the upper triangle
        //and place the totals into colptr

        for col in 0..n {
            //start / stop indices for the current column
            let first = self.colptr[col];
            let last = self.colptr[col + 1];
            let rows = &self.rowval[first..last];

            // number of entries on or above diagonal in this column,
            // shifted by 1 (i.e. colptr keeps a 0 in the first column)
            colptr[col + 1] = rows.iter().filter(|&row| *row <= col).count();
            nnz += colptr[col + 1];
        }

        //allocate and copy the upper triangle entries of
        //each column into the new value vector.
        let mut rowval = vec![0; nnz];
        let mut nzval = vec![T::zero(); nnz];

        for col in 0..n {
            let ntriu = colptr[col + 1];

            //start / stop indices for the destination
            let fdest = colptr[col];
            let ldest = fdest + ntriu;

            //start / stop indices for the source
            let fsrc = self.colptr[col];
            let lsrc = fsrc + ntriu;

            //copy upper triangle values
            rowval[fdest..ldest].copy_from_slice(&self.rowval[fsrc..lsrc]);
            nzval[fdest..ldest].copy_from_slice(&self.nzval[fsrc..lsrc]);

            //this should now be cumsum of the counts
            colptr[col + 1] = ldest;
        }
        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        // linear scan since columns are not required to be sorted
        self.rowval[first..last]
            .iter()
            .position(|&r| r == row)
            .map(|idx| self.nzval[first + idx])
    }
}

#[test]
fn test_from_shifted_parts() {
    // one-based arrays for the matrix
    // A = [1.0  0.0]
    //     [2.0  3.0]
    let Ap = vec![1, 3, 4];
    let Ai = vec![1, 2, 2];
    let Ax = vec![1., 2., 3.];

    let A = CscMatrix::from_shifted_parts(2, 2, Ap, Ai, Ax.clone(), None).unwrap();
    assert_eq!(A.colptr, vec![0, 2, 3]);
    assert_eq!(A.rowval, vec![0, 1, 1]);

    //already zero-based input is left unchanged
    let B = CscMatrix::from_shifted_parts(
        2,
        2,
        A.colptr.clone(),
        A.rowval.clone(),
        Ax.clone(),
        None,
    )
    .unwrap();
    assert_eq!(A, B);

    //explicit base agrees with the inferred one
    let C = CscMatrix::from_shifted_parts(
        2,
        2,
        A.colptr.clone(),
        A.rowval.clone(),
        Ax,
        Some(IndexBase::Zero),
    )
    .unwrap();
    assert_eq!(A, C);

    //a leading colptr value other than 0 or 1 is rejected
    let bad = CscMatrix::from_shifted_parts(2, 2, vec![2, 3, 4], vec![0, 0, 0], vec![1., 1., 1.], None);
    assert_eq!(bad, Err(SparseFormatError::BadColptr));
}

#[test]
fn test_csc_get_entry() {
    // A =
    //[ ⋅   4.0   ⋅ ]
    //[1.0  5.0   ⋅ ]
    //[2.0   ⋅   6.0]

    let A = CscMatrix::new(
        3,                      // m
        3,                      // n
        vec![0, 2, 4, 5],       // colptr
        vec![1, 2, 0, 1, 2],    // rowval
        vec![1., 2., 4., 5., 6.], // nzval
    );

    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((2, 0)).unwrap(), 2.);
    assert_eq!(A.get_entry((0, 1)).unwrap(), 4.);
    assert_eq!(A.get_entry((1, 1)).unwrap(), 5.);
    assert_eq!(A.get_entry((2, 2)).unwrap(), 6.);

    assert!(A.get_entry((0, 0)).is_none());
    assert!(A.get_entry((2, 1)).is_none());
    assert!(A.get_entry((0, 2)).is_none());
}

#[test]
fn test_to_triu() {
    let A = CscMatrix::from(&[
        [8.0, -3.0, 2.0], //
        [-3.0, 8.0, -1.0],
        [2.0, -1.0, 8.0],
    ]);
    let T = A.to_triu();
    assert!(T.is_triu());
    assert_eq!(T.colptr, vec![0, 1, 3, 6]);
    assert_eq!(T.rowval, vec![0, 0, 1, 0, 1, 2]);
    assert_eq!(T.nzval, vec![8., -3., 8., 2., -1., 8.]);
}
