#![allow(non_snake_case)]
use crate::algebra::*;
use crate::amd;
use derive_builder::Builder;
use std::iter::zip;
use thiserror::Error;

/// Sentinel parent index for roots of the elimination tree.
pub const NO_PARENT: usize = usize::MAX;

/// Error codes returnable from [`LdlFactorization`](LdlFactorization) operations

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LdlError {
    #[error("Invalid matrix: {0}")]
    Format(#[from] SparseFormatError),
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    #[error("Permuted factorization requires both triangles of the matrix to be stored")]
    SymmetricStorageRequired,
    #[error("Factorization produced a zero pivot in column {column}")]
    ZeroPivot { column: usize },
    #[error("Diagonal entry {column} is negative, no real square root factor exists")]
    NegativeDiagonal { column: usize },
}

/// Options for [`LdlFactorization`](LdlFactorization)

#[derive(Builder, Debug, Clone)]
pub struct LdlSettings {
    /// user supplied fill-reducing permutation.  When given it takes
    /// precedence over `use_amd`.
    #[builder(default = "None", setter(strip_option))]
    perm: Option<Vec<usize>>,
    /// compute a minimum degree ordering instead of factoring in the
    /// natural order
    #[builder(default = "false")]
    use_amd: bool,
    /// tuning parameters for the minimum degree ordering
    #[builder(default)]
    amd_control: amd::Control,
}

impl Default for LdlSettings {
    fn default() -> LdlSettings {
        LdlSettingsBuilder::default().build().unwrap()
    }
}

/// Symbolic analysis for an LDLᵀ factorization.
///
/// Holds the elimination tree and the column counts of the factor for
/// a given sparsity pattern and ordering.  The analysis can be reused
/// to factor any matrix with the same pattern via
/// [`factor`](LdlSymbolic::factor).

#[derive(Debug, Clone)]
pub struct LdlSymbolic {
    n: usize,
    perm: Vec<usize>,
    iperm: Vec<usize>,
    parent: Vec<usize>,
    Lnz: Vec<usize>,
    Lp: Vec<usize>,
}

impl LdlSymbolic {
    /// Analyze the pattern of a symmetric matrix under an optional
    /// fill-reducing permutation.
    ///
    /// The permutation is applied on the fly: row and column indices
    /// are mapped through it as the pattern is traversed, and the
    /// permuted matrix is never formed.  With the natural ordering
    /// (`perm = None`) only the upper triangle of `A` is read, so
    /// upper triangular storage suffices.  Under any other ordering
    /// an upper triangular entry may land in the lower triangle of
    /// the permuted matrix, so both triangles must be stored; upper
    /// triangular input is rejected in that case.
    pub fn new<T: FloatT>(A: &CscMatrix<T>, perm: Option<Vec<usize>>) -> Result<Self, LdlError> {
        if !A.is_square() {
            return Err(SparseFormatError::NotSquare.into());
        }
        A.check_format()?;
        let n = A.ncols();

        let (perm, iperm) = match perm {
            Some(p) => {
                let ip = invperm(&p)?;
                (p, ip)
            }
            None => ((0..n).collect::<Vec<usize>>(), (0..n).collect()),
        };

        let identity = perm.iter().enumerate().all(|(i, &p)| i == p);
        if !identity && A.is_triu() && A.has_strict_upper() {
            return Err(LdlError::SymmetricStorageRequired);
        }

        // elimination tree and column counts, walking the tree path
        // from each entry of the (permuted) upper triangle until an
        // already flagged node is reached
        let mut parent = vec![NO_PARENT; n];
        let mut Lnz = vec![0; n];
        let mut flag = vec![NO_PARENT; n];

        for k in 0..n {
            flag[k] = k;
            let j = perm[k];
            for row in A.rowval[A.colptr[j]..A.colptr[j + 1]].iter() {
                let mut i = iperm[*row];
                if i < k {
                    while flag[i] != k {
                        if parent[i] == NO_PARENT {
                            parent[i] = k;
                        }
                        Lnz[i] += 1;
                        flag[i] = k;
                        i = parent[i];
                    }
                }
            }
        }

        // set Lp to cumsum(Lnz), starting from zero
        let mut Lp = vec![0; n + 1];
        let mut acc = 0;
        for (Lp, Lnz) in zip(&mut Lp[1..], &Lnz) {
            *Lp = acc + Lnz;
            acc = *Lp;
        }

        Ok(LdlSymbolic {
            n,
            perm,
            iperm,
            parent,
            Lnz,
            Lp,
        })
    }

    /// parent of each node in the elimination tree, [`NO_PARENT`] for
    /// roots
    pub fn parents(&self) -> &[usize] {
        &self.parent
    }

    /// number of below-diagonal nonzeros in each column of L
    pub fn col_counts(&self) -> &[usize] {
        &self.Lnz
    }

    /// total number of below-diagonal nonzeros in L
    pub fn nnz(&self) -> usize {
        self.Lp[self.n]
    }

    /// the ordering used for the analysis
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Compute the numeric factorization of a matrix with the pattern
    /// used for this analysis.
    pub fn factor<T: FloatT>(&self, A: &CscMatrix<T>) -> Result<LdlFactorization<T>, LdlError> {
        if A.nrows() != self.n || A.ncols() != self.n {
            return Err(SparseFormatError::IncompatibleDimension.into());
        }

        let n = self.n;
        let mut L = CscMatrix::<T>::spalloc(n, n, self.nnz());
        L.colptr.copy_from_slice(&self.Lp);
        let mut D = vec![T::zero(); n];
        let mut positive_d = 0;

        // workspace: scattered kth row values, its pattern (built at
        // the front, consumed from the back in topological order),
        // visit marks, and the next free slot of each column of L
        let mut y = vec![T::zero(); n];
        let mut pattern = vec![0usize; n];
        let mut flag = vec![NO_PARENT; n];
        let mut next_space = self.Lp[0..n].to_vec();

        for k in 0..n {
            // For each k we solve y = L(0:k-1, 0:k-1) \ b, where b is
            // the kth column of the permuted matrix above the
            // diagonal.  y is then the kth row of L, with an implied
            // 1 at the diagonal.
            flag[k] = k;
            let j = self.perm[k];
            let mut top = n;

            for p in A.colptr[j]..A.colptr[j + 1] {
                let mut i = self.iperm[A.rowval[p]];
                if i > k {
                    continue;
                }
                y[i] += A.nzval[p];

                // the new portion of the tree path from i is buffered
                // at the front of pattern, then reversed onto the back
                // so the row is consumed in increasing column order
                let mut len = 0;
                while flag[i] != k {
                    pattern[len] = i;
                    len += 1;
                    flag[i] = k;
                    i = self.parent[i];
                }
                while len > 0 {
                    len -= 1;
                    top -= 1;
                    pattern[top] = pattern[len];
                }
            }

            D[k] = y[k];
            y[k] = T::zero();

            while top < n {
                let cidx = pattern[top];
                top += 1;

                let yi = y[cidx];
                y[cidx] = T::zero();

                let tmp_idx = next_space[cidx];
                let (f, l) = (L.colptr[cidx], tmp_idx);
                for p in f..l {
                    y[L.rowval[p]] -= L.nzval[p] * yi;
                }

                // the cidx-th element of y is now solved, so the
                // corresponding entry of the kth row of L follows
                let l_ki = yi / D[cidx];
                D[k] -= l_ki * yi;
                L.rowval[tmp_idx] = k;
                L.nzval[tmp_idx] = l_ki;
                next_space[cidx] += 1;
            }

            if D[k] == T::zero() {
                return Err(LdlError::ZeroPivot { column: k });
            }
            if D[k] > T::zero() {
                positive_d += 1;
            }
        }

        Ok(LdlFactorization {
            perm: self.perm.clone(),
            iperm: self.iperm.clone(),
            L,
            D,
            positive_d,
        })
    }
}

/// $LDL^T$ factorization of a symmetric quasidefinite matrix
///
/// Satisfies $P A P^T = (L + I) D (L + I)^T$ where `P` is the row
/// permutation given by `perm`, `L` holds the strictly lower
/// triangular factor and `D` the diagonal.

#[derive(Debug, Clone, PartialEq)]
pub struct LdlFactorization<T = f64> {
    /// permutation vector: `perm[k]` is the original index of the kth
    /// pivot
    pub perm: Vec<usize>,
    /// inverse permutation
    pub iperm: Vec<usize>,
    /// strictly lower triangular factor
    pub L: CscMatrix<T>,
    /// diagonal of D
    pub D: Vec<T>,
    // number of positive entries of D
    positive_d: usize,
}

impl<T> LdlFactorization<T>
where
    T: FloatT,
{
    /// Factor a symmetric matrix.
    ///
    /// With default settings the matrix is factored in the natural
    /// order and only its upper triangle is read.  A fill-reducing
    /// ordering can be supplied, or computed, through `opts`; both
    /// triangles of `A` must then be stored.
    pub fn new(A: &CscMatrix<T>, opts: Option<LdlSettings>) -> Result<Self, LdlError> {
        // get default values if no options passed at all
        let opts = opts.unwrap_or_default();

        let perm = match opts.perm {
            Some(p) => Some(p),
            None if opts.use_amd => {
                let (perm, _iperm, _info) =
                    amd::order(A.ncols(), &A.colptr, &A.rowval, &opts.amd_control)?;
                Some(perm)
            }
            None => None,
        };

        LdlSymbolic::new(A, perm)?.factor(A)
    }

    /// number of positive entries in D
    pub fn positive_inertia(&self) -> usize {
        self.positive_d
    }

    /// Assemble the Cholesky-like factor $(L + I) D^{1/2}$ of the
    /// permuted matrix.
    ///
    /// Only exists when the matrix is positive definite; a negative
    /// entry of D is reported as an error with its column index.
    pub fn ld(&self) -> Result<CscMatrix<T>, LdlError> {
        let n = self.D.len();
        let mut B = CscMatrix::<T>::spalloc(n, n, self.L.nnz() + n);

        // each column gains one diagonal entry ahead of its strictly
        // lower triangular part, so column j starts j slots after its
        // position in L
        for j in 0..n {
            if self.D[j] < T::zero() {
                return Err(LdlError::NegativeDiagonal { column: j });
            }
            let d = self.D[j].sqrt();

            let first = self.L.colptr[j];
            let last = self.L.colptr[j + 1];
            let dest = first + j;

            B.colptr[j] = dest;
            B.rowval[dest] = j;
            B.nzval[dest] = d;

            for (src, dst) in zip(first..last, dest + 1..) {
                B.rowval[dst] = self.L.rowval[src];
                B.nzval[dst] = self.L.nzval[src] * d;
            }
        }
        Ok(B)
    }
}

/// Factor a matrix supplied as raw CSC arrays.
///
/// The arrays may be zero- or one-based; the base is inferred from
/// `Ap[0]` and one-based input is normalized on ingestion.  The matrix
/// is factored in the natural order.
pub fn ldl_factorize<T: FloatT>(
    n: usize,
    Ap: Vec<usize>,
    Ai: Vec<usize>,
    Ax: Vec<T>,
) -> Result<LdlFactorization<T>, LdlError> {
    let A = CscMatrix::from_shifted_parts(n, n, Ap, Ai, Ax, None)?;
    LdlFactorization::new(&A, None)
}

/// Compute the dense Cholesky-like factor $(L + I) D^{1/2}$ of a
/// symmetric positive definite matrix given as a dense row-major
/// table.
pub fn cholesky_like<T: FloatT>(mat: &[Vec<T>]) -> Result<Vec<Vec<T>>, LdlError> {
    let A = CscMatrix::from_dense(mat)?;
    let f = LdlFactorization::new(&A, None)?;
    Ok(f.ld()?.to_dense(false))
}

/// Construct an inverse permutation from a permutation
pub fn invperm(p: &[usize]) -> Result<Vec<usize>, LdlError> {
    let mut b = vec![NO_PARENT; p.len()];

    for (i, j) in p.iter().enumerate() {
        if *j < p.len() && b[*j] == NO_PARENT {
            b[*j] = i;
        } else {
            return Err(LdlError::InvalidPermutation);
        }
    }
    Ok(b)
}

/// Permute: `x = b[p]`
pub fn permute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(p, x)| *x = b[*p]);
}

/// Inverse permute: `x[p] = b`
pub fn ipermute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(p, b)| x[*p] = *b);
}

//configure tests of internals
#[path = "test.rs"]
#[cfg(test)]
mod test;
