use super::*;

fn assert_valid_ordering(n: usize, perm: &[usize], iperm: &[usize]) {
    assert_eq!(perm.len(), n);
    assert_eq!(iperm.len(), n);
    for k in 0..n {
        assert_eq!(iperm[perm[k]], k);
    }
    let mut sorted = perm.to_vec();
    sorted.sort();
    assert_eq!(sorted, (0..n).collect::<Vec<usize>>());
}

#[test]
fn test_amd_empty() {
    let (perm, iperm, info) = order(0, &[0], &[], &Control::default()).unwrap();
    assert!(perm.is_empty());
    assert!(iperm.is_empty());
    assert_eq!(info.status, Status::Degenerate);
}

#[test]
fn test_amd_diagonal() {
    // no off-diagonal structure, so the ordering is the identity
    let colptr = vec![0, 1, 2, 3, 4];
    let rowval = vec![0, 1, 2, 3];
    let (perm, iperm, info) = order(4, &colptr, &rowval, &Control::default()).unwrap();
    assert_eq!(perm, vec![0, 1, 2, 3]);
    assert_eq!(iperm, vec![0, 1, 2, 3]);
    assert_eq!(info.status, Status::Ok);
    assert_eq!(info.nnz_aat, 0);
    assert_eq!(info.n_dense, 0);
}

#[test]
fn test_amd_quasidef_pattern() {
    // upper triangle of a 4 x 4 quasidefinite matrix
    let colptr = vec![0, 1, 3, 6, 8];
    let rowval = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let (perm, iperm, info) = order(4, &colptr, &rowval, &Control::default()).unwrap();
    assert_valid_ordering(4, &perm, &iperm);
    // off-diagonal entries of A + Aᵀ, both triangles
    assert_eq!(info.nnz_aat, 8);
}

#[test]
fn test_amd_path_graph() {
    // tridiagonal pattern: minimum degree eliminates the path from a
    // degree-1 endpoint, producing zero fill
    let n = 11;
    let mut colptr = vec![0usize; n + 1];
    let mut rowval = vec![];
    for j in 0..n {
        if j > 0 {
            rowval.push(j - 1);
        }
        rowval.push(j);
        colptr[j + 1] = rowval.len();
    }
    let (perm, iperm, _) = order(n, &colptr, &rowval, &Control::default()).unwrap();
    assert_valid_ordering(n, &perm, &iperm);
    // the first pivot is one of the endpoints
    assert!(perm[0] == 0 || perm[0] == n - 1);
}

#[test]
fn test_amd_dense_matrix() {
    // fully dense pattern, lower triangle supplied
    let n = 6;
    let mut colptr = vec![0usize; n + 1];
    let mut rowval = vec![];
    for j in 0..n {
        for i in j..n {
            rowval.push(i);
        }
        colptr[j + 1] = rowval.len();
    }
    let (perm, iperm, info) = order(n, &colptr, &rowval, &Control::default()).unwrap();
    assert_valid_ordering(n, &perm, &iperm);
    assert_eq!(info.nnz_aat, n * (n - 1));
}

#[test]
fn test_amd_unsorted_input() {
    // jumbled rows and duplicate entries give the same ordering as
    // the clean pattern
    let colptr = vec![0, 1, 3, 6, 8];
    let rowval = vec![0, 1, 0, 2, 1, 0, 3, 2];
    let (perm_a, iperm_a, _) = order(4, &colptr, &rowval, &Control::default()).unwrap();

    let colptr = vec![0, 2, 4, 7, 9];
    let rowval = vec![0, 0, 0, 1, 0, 1, 2, 2, 3];
    let (perm_b, iperm_b, _) = order(4, &colptr, &rowval, &Control::default()).unwrap();

    assert_eq!(perm_a, perm_b);
    assert_eq!(iperm_a, iperm_b);
    assert_valid_ordering(4, &perm_a, &iperm_a);
}

#[test]
fn test_amd_arrowhead() {
    // first row/column fully coupled: a minimum degree ordering must
    // defer index 0 to the end
    let n = 8;
    let mut colptr = vec![0usize];
    let mut rowval = vec![];
    rowval.push(0);
    colptr.push(1);
    for j in 1..n {
        rowval.push(0);
        rowval.push(j);
        colptr.push(rowval.len());
    }
    let (perm, iperm, _) = order(n, &colptr, &rowval, &Control::default()).unwrap();
    assert_valid_ordering(n, &perm, &iperm);
    assert!(iperm[0] >= n - 2);
}

#[test]
fn test_amd_bad_inputs() {
    assert_eq!(
        order(2, &[0, 1], &[0], &Control::default()),
        Err(SparseFormatError::BadColptr)
    );
    assert_eq!(
        order(2, &[0, 2, 1], &[0, 1], &Control::default()),
        Err(SparseFormatError::BadColptr)
    );
    assert_eq!(
        order(2, &[0, 1, 2], &[0], &Control::default()),
        Err(SparseFormatError::IncompatibleDimension)
    );
    assert_eq!(
        order(2, &[0, 1, 2], &[0, 5], &Control::default()),
        Err(SparseFormatError::BadRowval)
    );
}
