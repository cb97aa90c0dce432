use super::*;
use crate::algebra::CscMatrix;

fn test_matrix_4x4() -> CscMatrix<f64> {
    // A =
    //[ 8.0  -3.0   2.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[  ⋅     ⋅    8.0  -1.0]
    //[  ⋅     ⋅     ⋅    1.0]
    let Ap = vec![0, 1, 3, 6, 8];
    let Ai = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let Ax = vec![8., -3., 8., 2., -1., 8., -1., 1.];
    CscMatrix {
        m: 4,
        n: 4,
        colptr: Ap,
        rowval: Ai,
        nzval: Ax,
    }
}

fn inf_norm_diff(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    zip(a, b).fold(0., |acc, (x, y)| {
        zip(x, y).fold(acc, |acc, (x, y)| f64::max(acc, f64::abs(x - y)))
    })
}

// reassemble Pᵀ (L+I) D (L+I)ᵀ P from the factors, undoing the
// permutation so the result compares directly against the input
fn reconstruct(f: &LdlFactorization<f64>) -> Vec<Vec<f64>> {
    let n = f.D.len();
    let mut Lfull = f.L.to_dense(false);
    for (i, row) in Lfull.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    let mut out = vec![vec![0.; n]; n];
    for k in 0..n {
        for l in 0..n {
            let mut s = 0.;
            for t in 0..n {
                s += Lfull[k][t] * f.D[t] * Lfull[l][t];
            }
            out[f.perm[k]][f.perm[l]] = s;
        }
    }
    out
}

#[test]
fn test_invperm() {
    let perm = vec![3, 0, 2, 1];
    assert_eq!(invperm(&perm).unwrap(), vec![1, 3, 2, 0]);
}

//test fail on bad permutation
#[test]
fn test_invperm_bad_perm1() {
    let perm = vec![3, 0, 2, 0]; //repeated index
    assert_eq!(invperm(&perm), Err(LdlError::InvalidPermutation));
}

#[test]
fn test_invperm_bad_perm2() {
    let perm = vec![4, 0, 2, 1]; //index too big
    assert_eq!(invperm(&perm), Err(LdlError::InvalidPermutation));
}

#[test]
fn test_permute() {
    let perm = vec![3, 0, 2, 1];
    let b = vec![1., 2., 3., 4.];
    let mut x = vec![0.; 4];
    let mut y = vec![0.; 4];

    permute(&mut x, &b, &perm);
    assert_eq!(x, vec![4., 1., 3., 2.]);

    ipermute(&mut y, &x, &perm);
    assert_eq!(y, b);
}

#[test]
fn test_symbolic() {
    let A = test_matrix_4x4();
    let symb = LdlSymbolic::new(&A, None).unwrap();

    assert_eq!(symb.parents(), &[1, 2, 3, NO_PARENT]);
    assert_eq!(symb.col_counts(), &[2, 1, 1, 0]);
    assert_eq!(symb.nnz(), 4);
    assert_eq!(symb.perm(), &[0, 1, 2, 3]);
}

#[test]
fn test_factor_diagonal() {
    let A = CscMatrix::from(&[
        [4.0, 0.0, 0.0], //
        [0.0, 9.0, 0.0],
        [0.0, 0.0, 16.0],
    ]);
    let f = LdlFactorization::new(&A, None).unwrap();

    assert_eq!(f.L.nnz(), 0);
    assert_eq!(f.D, vec![4., 9., 16.]);
    assert_eq!(f.positive_inertia(), 3);

    // the Cholesky-like factor of a diagonal matrix is its square root
    let B = f.ld().unwrap();
    assert_eq!(B.nzval, vec![2., 3., 4.]);
    assert_eq!(B.rowval, vec![0, 1, 2]);
}

#[test]
fn test_factor_roundtrip() {
    let A = test_matrix_4x4();
    let f = LdlFactorization::new(&A, None).unwrap();

    assert_eq!(f.positive_inertia(), 4);
    assert!(inf_norm_diff(&reconstruct(&f), &A.to_dense(true)) <= 1e-12);

    // the factor pattern agrees with the symbolic analysis
    let symb = LdlSymbolic::new(&A, None).unwrap();
    for j in 0..4 {
        assert_eq!(
            f.L.colptr[j + 1] - f.L.colptr[j], //
            symb.col_counts()[j]
        );
    }
}

#[test]
fn test_factor_quasidefinite() {
    // indefinite but strongly factorizable
    let A = CscMatrix::from(&[
        [1.0, 2.0], //
        [0.0, 1.0],
    ]);
    let f = LdlFactorization::new(&A, None).unwrap();

    assert_eq!(f.D, vec![1., -3.]);
    assert_eq!(f.positive_inertia(), 1);

    // no real Cholesky-like factor exists
    assert_eq!(f.ld(), Err(LdlError::NegativeDiagonal { column: 1 }));
}

#[test]
fn test_zero_pivot() {
    let A = CscMatrix::from(&[
        [0.0, 1.0], //
        [1.0, 0.0],
    ]);
    assert_eq!(
        LdlFactorization::new(&A, None),
        Err(LdlError::ZeroPivot { column: 0 })
    );

    // zero pivot arising from cancellation, not a structural zero
    let A = CscMatrix::from(&[
        [1.0, 2.0], //
        [2.0, 4.0],
    ]);
    assert_eq!(
        LdlFactorization::new(&A, None),
        Err(LdlError::ZeroPivot { column: 1 })
    );
}

#[test]
fn test_not_square() {
    let A = CscMatrix::<f64>::spalloc(3, 2, 0);
    assert_eq!(
        LdlFactorization::new(&A, None),
        Err(LdlError::Format(SparseFormatError::NotSquare))
    );
}

#[test]
fn test_permuted_factor_requires_both_triangles() {
    let A = test_matrix_4x4();
    let opts = LdlSettingsBuilder::default()
        .perm(vec![3, 0, 1, 2])
        .build()
        .unwrap();
    assert_eq!(
        LdlFactorization::new(&A, Some(opts)),
        Err(LdlError::SymmetricStorageRequired)
    );
}

#[test]
fn test_factor_permuted() {
    // both triangles stored, factored under a user ordering
    let dense = test_matrix_4x4().to_dense(true);
    let A = CscMatrix::from_dense(&dense).unwrap();

    let opts = LdlSettingsBuilder::default()
        .perm(vec![3, 0, 2, 1])
        .build()
        .unwrap();
    let f = LdlFactorization::new(&A, Some(opts)).unwrap();

    assert_eq!(f.perm, vec![3, 0, 2, 1]);
    assert_eq!(f.positive_inertia(), 4);
    assert!(inf_norm_diff(&reconstruct(&f), &dense) <= 1e-12);
}

#[test]
fn test_factor_amd() {
    let dense = test_matrix_4x4().to_dense(true);
    let A = CscMatrix::from_dense(&dense).unwrap();

    let opts = LdlSettingsBuilder::default().use_amd(true).build().unwrap();
    let f = LdlFactorization::new(&A, Some(opts)).unwrap();

    assert!(invperm(&f.perm).is_ok());
    assert!(inf_norm_diff(&reconstruct(&f), &dense) <= 1e-12);
}

#[test]
fn test_settings_builder() {
    //check that defaults appear when not using builder
    let opts = LdlSettings::default();
    assert!(opts.perm.is_none());
    assert!(!opts.use_amd);
    assert_eq!(opts.amd_control, amd::Control::default());

    //and now a custom builder
    let opts = LdlSettingsBuilder::default()
        .perm(vec![0, 1, 2, 3])
        .use_amd(true)
        .amd_control(amd::Control {
            dense: 1.5,
            aggressive: false,
        })
        .build()
        .unwrap();

    assert_eq!(opts.perm, Some(vec![0, 1, 2, 3]));
    assert!(opts.use_amd);
    assert_eq!(opts.amd_control.dense, 1.5);
}

#[test]
fn test_cholesky_like() {
    let dense = test_matrix_4x4().to_dense(true);
    let R = cholesky_like(&dense).unwrap();

    // R Rᵀ == A
    let n = 4;
    let mut out = vec![vec![0.; n]; n];
    for i in 0..n {
        for j in 0..n {
            for t in 0..n {
                out[i][j] += R[i][t] * R[j][t];
            }
        }
    }
    assert!(inf_norm_diff(&out, &dense) <= 1e-12);

    // R is lower triangular with positive diagonal
    for (i, row) in R.iter().enumerate() {
        assert!(row[i] > 0.);
        for &v in &row[i + 1..] {
            assert_eq!(v, 0.);
        }
    }

    // not positive definite
    let bad = vec![vec![-1.0]];
    assert_eq!(
        cholesky_like(&bad),
        Err(LdlError::NegativeDiagonal { column: 0 })
    );
}

#[test]
fn test_one_based_ingestion() {
    // the same matrix in one-based form factors identically
    let A = test_matrix_4x4();
    let fa = ldl_factorize(4, A.colptr.clone(), A.rowval.clone(), A.nzval.clone()).unwrap();

    let Ap1: Vec<usize> = A.colptr.iter().map(|p| p + 1).collect();
    let Ai1: Vec<usize> = A.rowval.iter().map(|i| i + 1).collect();
    let fb = ldl_factorize(4, Ap1, Ai1, A.nzval.clone()).unwrap();

    assert_eq!(fa.L, fb.L);
    assert_eq!(fa.D, fb.D);
}
