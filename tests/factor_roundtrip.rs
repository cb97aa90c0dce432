#![allow(non_snake_case)]
use sparse_chol::algebra::CscMatrix;
use sparse_chol::ldl::{ldl_factorize, LdlFactorization, LdlSettingsBuilder, LdlSymbolic};
use sparse_chol::{amd, cholesky_like};

// upper triangle of a 10 x 10 positive definite matrix
fn test_matrix_10x10() -> CscMatrix<f64> {
    let Ap = vec![0, 1, 2, 3, 4, 6, 7, 9, 11, 15, 19];
    let Ai = vec![0, 1, 2, 3, 1, 4, 5, 4, 6, 4, 7, 0, 4, 7, 8, 1, 4, 6, 9];
    let Ax = vec![
        1.7, 1., 1.5, 1.1, 0.02, 2.6, 1.2, 0.16, 1.3, 0.09, 1.6, 0.13, 0.52, 0.11, 1.4, 0.01,
        0.53, 0.56, 3.1,
    ];
    CscMatrix::new(10, 10, Ap, Ai, Ax)
}

fn inf_norm_diff(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    let mut out: f64 = 0.;
    for (x, y) in a.iter().zip(b) {
        for (x, y) in x.iter().zip(y) {
            out = out.max((x - y).abs());
        }
    }
    out
}

// Pᵀ (L+I) D (L+I)ᵀ P
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
fn factor_roundtrip_natural_order() {
    let A = test_matrix_10x10();
    let f = ldl_factorize(10, A.colptr.clone(), A.rowval.clone(), A.nzval.clone()).unwrap();

    assert_eq!(f.positive_inertia(), 10);
    assert!(inf_norm_diff(&reconstruct(&f), &A.to_dense(true)) <= 1e-9);

    // column counts of the factor match the symbolic analysis
    let symb = LdlSymbolic::new(&A, None).unwrap();
    assert_eq!(f.L.nnz(), symb.nnz());
    for j in 0..10 {
        assert_eq!(f.L.colptr[j + 1] - f.L.colptr[j], symb.col_counts()[j]);
    }
}

#[test]
fn factor_one_based_arrays() {
    let A = test_matrix_10x10();
    let fa = ldl_factorize(10, A.colptr.clone(), A.rowval.clone(), A.nzval.clone()).unwrap();

    // shift to one-based form, as produced by Fortran style callers
    let Ap1: Vec<usize> = A.colptr.iter().map(|p| p + 1).collect();
    let Ai1: Vec<usize> = A.rowval.iter().map(|i| i + 1).collect();
    let fb = ldl_factorize(10, Ap1, Ai1, A.nzval.clone()).unwrap();

    assert_eq!(fa.L, fb.L);
    assert_eq!(fa.D, fb.D);
}

#[test]
fn factor_with_amd_ordering() {
    // store both triangles so a permuted factorization is possible
    let dense = test_matrix_10x10().to_dense(true);
    let A = CscMatrix::from_dense(&dense).unwrap();

    let opts = LdlSettingsBuilder::default().use_amd(true).build().unwrap();
    let f = LdlFactorization::new(&A, Some(opts)).unwrap();

    assert_eq!(f.positive_inertia(), 10);
    assert!(inf_norm_diff(&reconstruct(&f), &dense) <= 1e-9);

    // a fill-reducing ordering does no worse than the natural one here
    let natural = LdlSymbolic::new(&test_matrix_10x10(), None).unwrap();
    let permuted = LdlSymbolic::new(&A, Some(f.perm.clone())).unwrap();
    assert!(permuted.nnz() <= natural.nnz());
}

#[test]
fn amd_ordering_is_a_permutation() {
    let A = test_matrix_10x10();
    let (perm, iperm, info) =
        amd::order(10, &A.colptr, &A.rowval, &amd::Control::default()).unwrap();

    assert_eq!(info.status, amd::Status::Ok);
    for k in 0..10 {
        assert_eq!(iperm[perm[k]], k);
    }
    let mut sorted = perm.clone();
    sorted.sort();
    assert_eq!(sorted, (0..10).collect::<Vec<usize>>());
}

#[test]
fn dense_cholesky_like_factor() {
    let dense = test_matrix_10x10().to_dense(true);
    let R = cholesky_like(&dense).unwrap();

    // R is lower triangular and R Rᵀ reproduces the matrix
    let n = 10;
    let mut out = vec![vec![0.; n]; n];
    for i in 0..n {
        for j in 0..n {
            assert!(i >= j || R[i][j] == 0.);
            for t in 0..n {
                out[i][j] += R[i][t] * R[j][t];
            }
        }
    }
    assert!(inf_norm_diff(&out, &dense) <= 1e-9);
}
