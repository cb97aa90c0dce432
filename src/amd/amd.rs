#![allow(non_snake_case)]

// Implements the approximate minimum degree algorithm of Amestoy, Davis
// and Duff ("An approximate minimum degree ordering algorithm", SIAM J.
// Matrix Anal. Appl., 1996), following the quotient graph formulation of
// the SuiteSparse AMD code (BSD licensed).

use crate::algebra::SparseFormatError;

const EMPTY: isize = -1;

#[inline(always)]
fn flip(i: isize) -> isize {
    -2 - i
}

// reset the w array to 1 for all live entries when the flag value is
// about to wrap
#[inline]
fn clear_flag(wflg: isize, wbig: isize, w: &mut [isize]) -> isize {
    if wflg < 2 || wflg >= wbig {
        for x in w.iter_mut() {
            if *x != 0 {
                *x = 1;
            }
        }
        return 2;
    }
    wflg
}

/// Tuning parameters for the minimum degree ordering.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Control {
    /// a row is treated as dense and ordered last if its degree
    /// exceeds `dense * sqrt(n)`.  Negative disables the test.
    pub dense: f64,
    /// perform aggressive absorption of eliminated elements
    pub aggressive: bool,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            dense: 10.0,
            aggressive: true,
        }
    }
}

/// Outcome classification reported alongside an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// ordering computed normally
    Ok,
    /// the input was degenerate (empty matrix); the trivial ordering
    /// is returned
    Degenerate,
}

/// Statistics gathered while computing an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    pub status: Status,
    /// number of off-diagonal entries in the pattern of A + Aᵀ
    pub nnz_aat: usize,
    /// number of rows deferred to the end of the ordering as dense
    pub n_dense: usize,
}

/// Compute a fill-reducing ordering for the pattern of A + Aᵀ.
///
/// `colptr` and `rowval` describe the sparsity pattern of a square
/// matrix in zero-based CSC form.  Entries may appear in any order
/// within a column and duplicates are tolerated; values play no part.
/// Only the pattern of A + Aᵀ matters, so either triangle (or both)
/// may be supplied.
///
/// Returns `(perm, iperm, info)` where `perm[k]` is the index of the
/// row placed at position `k` of the ordering and `iperm` is its
/// inverse.
pub fn order(
    n: usize,
    colptr: &[usize],
    rowval: &[usize],
    control: &Control,
) -> Result<(Vec<usize>, Vec<usize>, Info), SparseFormatError> {
    if colptr.len() != n + 1 || colptr[0] != 0 {
        return Err(SparseFormatError::BadColptr);
    }
    if colptr.windows(2).any(|c| c[0] > c[1]) {
        return Err(SparseFormatError::BadColptr);
    }
    if rowval.len() != colptr[n] {
        return Err(SparseFormatError::IncompatibleDimension);
    }
    if !rowval.iter().all(|r| r < &n) {
        return Err(SparseFormatError::BadRowval);
    }

    if n == 0 {
        let info = Info {
            status: Status::Degenerate,
            nnz_aat: 0,
            n_dense: 0,
        };
        return Ok((vec![], vec![], info));
    }

    // sort and remove duplicates by transposing the pattern
    let (tcolptr, trowval) = transpose_dedup(n, colptr, rowval);

    let mut len = vec![0isize; n];
    let nzaat = aat(n, &tcolptr, &trowval, &mut len);

    // elbow room for the quotient graph lists
    let iwlen = nzaat + nzaat / 5 + n;

    let mut perm = vec![EMPTY; n];
    let mut iperm = vec![EMPTY; n];
    let n_dense = amd_1(
        n, &tcolptr, &trowval, &mut len, iwlen, control, &mut perm, &mut iperm,
    );

    let perm = perm.iter().map(|&i| i as usize).collect();
    let iperm = iperm.iter().map(|&i| i as usize).collect();
    let info = Info {
        status: Status::Ok,
        nnz_aat: nzaat,
        n_dense,
    };
    Ok((perm, iperm, info))
}

// Transpose the pattern, dropping duplicate entries.  The columns of
// the result are sorted by construction, which the counting and
// scatter phases below rely on.
fn transpose_dedup(n: usize, colptr: &[usize], rowval: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let mut w = vec![0usize; n];
    let mut flag = vec![usize::MAX; n];

    for j in 0..n {
        for &i in &rowval[colptr[j]..colptr[j + 1]] {
            if flag[i] != j {
                w[i] += 1;
                flag[i] = j;
            }
        }
    }

    let mut tcolptr = vec![0usize; n + 1];
    for i in 0..n {
        tcolptr[i + 1] = tcolptr[i] + w[i];
    }
    w.copy_from_slice(&tcolptr[..n]);
    flag.fill(usize::MAX);

    let mut trowval = vec![0usize; tcolptr[n]];
    for j in 0..n {
        for &i in &rowval[colptr[j]..colptr[j + 1]] {
            if flag[i] != j {
                trowval[w[i]] = j;
                w[i] += 1;
                flag[i] = j;
            }
        }
    }
    (tcolptr, trowval)
}

// Count the off-diagonal entries of each column of A + Aᵀ, given a
// sorted duplicate-free pattern.  Matching (j,k)/(k,j) pairs are found
// with a second read head per column (tp) so each pattern entry is
// visited once; entries whose mirror image is absent are swept up
// afterwards.  Returns the total count.
fn aat(n: usize, colptr: &[usize], rowval: &[usize], len: &mut [isize]) -> usize {
    let mut tp = vec![0usize; n];

    for k in 0..n {
        let mut seen = 0;
        for &j in &rowval[colptr[k]..colptr[k + 1]] {
            if j < k {
                // entry in the strictly upper triangle
                len[j] += 1;
                len[k] += 1;
                seen += 1;

                // advance in column j over lower entries whose mirror
                // has not appeared among the upper entries
                let col_j = &rowval[colptr[j]..colptr[j + 1]];
                let mut seen_j = 0;
                for &i in &col_j[tp[j]..] {
                    if i < k {
                        len[i] += 1;
                        len[j] += 1;
                        seen_j += 1;
                    } else {
                        if i == k {
                            seen_j += 1;
                        }
                        break;
                    }
                }
                tp[j] += seen_j;
            } else {
                if j == k {
                    seen += 1;
                }
                break;
            }
        }
        tp[k] = seen;
    }

    // unmatched strictly lower entries
    for j in 0..n {
        let col_j = &rowval[colptr[j]..colptr[j + 1]];
        for &i in &col_j[tp[j]..] {
            len[i] += 1;
            len[j] += 1;
        }
    }

    len.iter().map(|&l| l as usize).sum()
}

// Assemble the adjacency structure of A + Aᵀ (no diagonal) into the
// workspace expected by amd_2, then run the elimination.
#[allow(clippy::too_many_arguments)]
fn amd_1(
    n: usize,
    colptr: &[usize],
    rowval: &[usize],
    len: &mut [isize],
    iwlen: usize,
    control: &Control,
    perm: &mut [isize],
    iperm: &mut [isize],
) -> usize {
    let mut pe = vec![0isize; n];
    let mut sp = vec![0isize; n];
    let mut iw = vec![0isize; iwlen];

    let mut pfree = 0isize;
    for j in 0..n {
        pe[j] = pfree;
        sp[j] = pfree;
        pfree += len[j];
    }
    let pfree = pfree as usize;

    // scatter with the same paired-head scheme used in aat, so each
    // symmetric pair is written exactly once to both adjacency lists
    let mut tp = vec![0usize; n];
    for k in 0..n {
        let mut seen = 0;
        for &j in &rowval[colptr[k]..colptr[k + 1]] {
            if j < k {
                iw[sp[j] as usize] = k as isize;
                sp[j] += 1;
                iw[sp[k] as usize] = j as isize;
                sp[k] += 1;
                seen += 1;

                let col_j = &rowval[colptr[j]..colptr[j + 1]];
                let mut seen_j = 0;
                for &i in &col_j[tp[j]..] {
                    if i < k {
                        iw[sp[i] as usize] = j as isize;
                        sp[i] += 1;
                        iw[sp[j] as usize] = i as isize;
                        sp[j] += 1;
                        seen_j += 1;
                    } else {
                        if i == k {
                            seen_j += 1;
                        }
                        break;
                    }
                }
                tp[j] += seen_j;
            } else {
                if j == k {
                    seen += 1;
                }
                break;
            }
        }
        tp[k] = seen;
    }

    for j in 0..n {
        let col_j = &rowval[colptr[j]..colptr[j + 1]];
        for &i in &col_j[tp[j]..] {
            iw[sp[i] as usize] = j as isize;
            sp[i] += 1;
            iw[sp[j] as usize] = i as isize;
            sp[j] += 1;
        }
    }

    amd_2(&mut pe, &mut iw, len, pfree, iperm, perm, control)
}

// Core quotient-graph elimination.
//
// On entry pe/len describe the adjacency lists of A + Aᵀ packed into
// iw[..pfree], with iw.len() leaving elbow room for element lists.
// On exit perm/iperm hold the ordering.  Returns the number of rows
// deferred as dense.
#[allow(clippy::comparison_chain)]
fn amd_2(
    pe: &mut [isize],
    iw: &mut [isize],
    len: &mut [isize],
    mut pfree: usize,
    iperm: &mut [isize],
    perm: &mut [isize],
    control: &Control,
) -> usize {
    let n = pe.len();
    let iwlen = iw.len();

    let alpha = control.dense;
    let aggressive = control.aggressive;

    let dense = if alpha < 0.0 {
        n.saturating_sub(2)
    } else {
        (alpha * (n as f64).sqrt()) as usize
    };
    let dense = dense.max(16).min(n);

    let mut mindeg = 0usize;
    let mut lemax = 0usize;
    let mut nel = 0usize;
    let mut ndense = 0usize;

    let mut w = vec![1isize; n];
    let mut nv = vec![1isize; n];
    let mut elen = vec![0isize; n];
    let mut head = vec![EMPTY; n];
    let mut degree = vec![EMPTY; n];

    let wbig = isize::MAX - n as isize;
    let mut wflg = 0isize;

    let next = iperm;
    let last = perm;
    last.fill(EMPTY);
    next.fill(EMPTY);
    degree.copy_from_slice(len);

    // initialize the degree lists; empty rows are eliminated at once
    // and rows past the dense threshold are set aside
    for i in 0..n {
        let deg = degree[i] as usize;
        if deg == 0 {
            elen[i] = flip(1);
            nel += 1;
            pe[i] = EMPTY;
            w[i] = 0;
        } else if deg > dense {
            ndense += 1;
            nv[i] = 0;
            elen[i] = EMPTY;
            pe[i] = EMPTY;
            nel += 1;
        } else {
            let inext = head[deg];
            if inext != EMPTY {
                last[inext as usize] = i as isize;
            }
            next[i] = inext;
            head[deg] = i as isize;
        }
    }

    while nel < n {
        // select a pivot of (approximately) minimum degree
        let mut me = EMPTY;
        let mut deg = mindeg;
        while deg < n {
            me = head[deg];
            if me != EMPTY {
                break;
            }
            deg += 1;
        }
        mindeg = deg;

        let me = me as usize;
        let inext = next[me];
        if inext != EMPTY {
            last[inext as usize] = EMPTY;
        }
        head[deg] = inext;

        let elenme = elen[me];
        let mut nvpiv = nv[me];
        nel += nvpiv as usize;

        // construct the pivot element Lme in iw[pme1..=pme2],
        // absorbing me's adjacent elements
        nv[me] = -nvpiv;
        let mut degme = 0usize;
        let mut pme1;
        let mut pme2;

        if elenme == 0 {
            // the pivot still holds its original row: convert in place
            pme1 = pe[me];
            pme2 = pme1 - 1;

            for p in pme1 as usize..(pme1 + len[me]) as usize {
                let i = iw[p] as usize;
                let nvi = nv[i];
                if nvi > 0 {
                    degme += nvi as usize;
                    nv[i] = -nvi;
                    pme2 += 1;
                    iw[pme2 as usize] = i as isize;

                    let ilast = last[i];
                    let inext = next[i];
                    if inext != EMPTY {
                        last[inext as usize] = ilast;
                    }
                    if ilast != EMPTY {
                        next[ilast as usize] = inext;
                    } else {
                        head[degree[i] as usize] = inext;
                    }
                }
            }
        } else {
            // gather the patterns of me's elements plus me's own
            // remaining variables into fresh space at pfree
            let mut p = pe[me] as usize;
            pme1 = pfree as isize;
            let slenme = (len[me] - elenme) as usize;

            for knt1 in 1..elenme as usize + 2 {
                let e;
                let mut pj;
                let ln;
                if knt1 as isize > elenme {
                    e = me;
                    pj = p as isize;
                    ln = slenme;
                } else {
                    e = iw[p] as usize;
                    p += 1;
                    pj = pe[e];
                    ln = len[e] as usize;
                }

                for knt2 in 1..ln + 1 {
                    let i = iw[pj as usize] as usize;
                    pj += 1;
                    let nvi = nv[i];

                    if nvi > 0 {
                        if pfree >= iwlen {
                            // out of elbow room: compact iw, keeping
                            // each live list and the partial element
                            pe[me] = p as isize;
                            len[me] -= knt1 as isize;
                            if len[me] == 0 {
                                pe[me] = EMPTY;
                            }
                            pe[e] = pj;
                            len[e] = (ln - knt2) as isize;
                            if len[e] == 0 {
                                pe[e] = EMPTY;
                            }

                            // stamp each live list head with its owner
                            for j in 0..n {
                                let pn = pe[j];
                                if pn >= 0 {
                                    pe[j] = iw[pn as usize];
                                    iw[pn as usize] = flip(j as isize);
                                }
                            }

                            let mut psrc = 0usize;
                            let mut pdst = 0usize;
                            let pend = pme1 as usize;
                            while psrc < pend {
                                let j = flip(iw[psrc]);
                                psrc += 1;
                                if j >= 0 {
                                    let j = j as usize;
                                    iw[pdst] = pe[j];
                                    pe[j] = pdst as isize;
                                    pdst += 1;
                                    let lenj = len[j] as usize;
                                    if lenj > 0 {
                                        iw.copy_within(psrc..psrc + lenj - 1, pdst);
                                        psrc += lenj - 1;
                                        pdst += lenj - 1;
                                    }
                                }
                            }

                            let p1 = pdst;
                            iw.copy_within(pme1 as usize..pfree, pdst);
                            pdst += pfree - pme1 as usize;

                            pme1 = p1 as isize;
                            pfree = pdst;
                            pj = pe[e];
                            p = pe[me] as usize;
                        }

                        degme += nvi as usize;
                        nv[i] = -nvi;
                        iw[pfree] = i as isize;
                        pfree += 1;

                        let ilast = last[i];
                        let inext = next[i];
                        if inext != EMPTY {
                            last[inext as usize] = ilast;
                        }
                        if ilast != EMPTY {
                            next[ilast as usize] = inext;
                        } else {
                            head[degree[i] as usize] = inext;
                        }
                    }
                }
                if e != me {
                    // e is absorbed into the new element
                    pe[e] = flip(me as isize);
                    w[e] = 0;
                }
            }
            pme2 = pfree as isize - 1;
        }

        degree[me] = degme as isize;
        pe[me] = pme1;
        len[me] = pme2 - pme1 + 1;
        elen[me] = flip(nvpiv + degme as isize);

        // compute the external degree |Le \ Lme| of each element
        // adjacent to a variable in Lme, encoded in w relative to wflg
        wflg = clear_flag(wflg, wbig, &mut w);
        for pme in pme1 as usize..(pme2 + 1) as usize {
            let i = iw[pme] as usize;
            let eln = elen[i];
            if eln > 0 {
                let nvi = -nv[i];
                let wnvi = wflg - nvi;
                for p in pe[i] as usize..pe[i] as usize + eln as usize {
                    let e = iw[p] as usize;
                    let we = w[e];
                    if we >= wflg {
                        w[e] -= nvi;
                    } else if we != 0 {
                        w[e] = degree[e] + wnvi;
                    }
                }
            }
        }

        // update the approximate degree of each variable in Lme,
        // pruning absorbed elements and building a hash for
        // supervariable detection
        for pme in pme1 as usize..(pme2 + 1) as usize {
            let i = iw[pme] as usize;
            let p1 = pe[i] as usize;
            let p2 = p1 + elen[i] as usize;
            let mut pn = p1;
            let mut hash = 0usize;
            let mut deg = 0usize;

            if aggressive {
                for p in p1..p2 {
                    let e = iw[p] as usize;
                    let we = w[e];
                    if we != 0 {
                        let dext = we - wflg;
                        if dext > 0 {
                            deg += dext as usize;
                            iw[pn] = e as isize;
                            pn += 1;
                            hash = hash.wrapping_add(e);
                        } else {
                            // external degree zero: absorb e into me
                            pe[e] = flip(me as isize);
                            w[e] = 0;
                        }
                    }
                }
            } else {
                for p in p1..p2 {
                    let e = iw[p] as usize;
                    let we = w[e];
                    if we != 0 {
                        deg += (we - wflg) as usize;
                        iw[pn] = e as isize;
                        pn += 1;
                        hash = hash.wrapping_add(e);
                    }
                }
            }

            elen[i] = (pn - p1 + 1) as isize;
            let p3 = pn;
            let p4 = p1 + len[i] as usize;
            for p in p2..p4 {
                let j = iw[p] as usize;
                let nvj = nv[j];
                if nvj > 0 {
                    deg += nvj as usize;
                    iw[pn] = j as isize;
                    pn += 1;
                    hash = hash.wrapping_add(j);
                }
            }

            if elen[i] == 1 && p3 == pn {
                // mass elimination: i's pattern is exactly Lme
                pe[i] = flip(me as isize);
                let nvi = -nv[i];
                degme -= nvi as usize;
                nvpiv += nvi;
                nel += nvi as usize;
                nv[i] = 0;
                elen[i] = EMPTY;
            } else {
                degree[i] = degree[i].min(deg as isize);

                // move the first supervariable to the end of the
                // element part and prepend me itself
                iw[pn] = iw[p3];
                iw[p3] = iw[p1];
                iw[p1] = me as isize;
                len[i] = (pn - p1 + 1) as isize;

                // insert into the hash bucket.  head slots still in
                // use by the degree lists are chained through last
                // instead of being overwritten.
                let hash = hash % n;
                let j = head[hash];
                if j <= EMPTY {
                    next[i] = flip(j);
                    head[hash] = flip(i as isize);
                } else {
                    next[i] = last[j as usize];
                    last[j as usize] = i as isize;
                }
                last[i] = hash as isize;
            }
        }
        degree[me] = degme as isize;

        lemax = lemax.max(degme);
        wflg += lemax as isize;
        wflg = clear_flag(wflg, wbig, &mut w);

        // detect supervariables: any two variables in the same hash
        // bucket with identical adjacency lists are merged
        for pme in pme1 as usize..(pme2 + 1) as usize {
            let mut i = iw[pme];
            if nv[i as usize] < 0 {
                let hash = last[i as usize] as usize;
                let j = head[hash];

                if j == EMPTY {
                    i = EMPTY;
                } else if j < EMPTY {
                    i = flip(j);
                    head[hash] = EMPTY;
                } else {
                    i = last[j as usize];
                    last[j as usize] = EMPTY;
                }

                while i != EMPTY && next[i as usize] != EMPTY {
                    let iu = i as usize;
                    let ln = len[iu];
                    let eln = elen[iu];

                    // stamp i's pattern (skipping the leading me)
                    for p in (pe[iu] + 1) as usize..(pe[iu] + ln) as usize {
                        w[iw[p] as usize] = wflg;
                    }

                    let mut jlast = iu;
                    let mut j = next[iu];
                    while j != EMPTY {
                        let ju = j as usize;
                        let mut ok = len[ju] == ln && elen[ju] == eln;
                        for p in (pe[ju] + 1) as usize..(pe[ju] + ln) as usize {
                            if w[iw[p] as usize] != wflg {
                                ok = false;
                            }
                        }

                        if ok {
                            pe[ju] = flip(i);
                            nv[iu] += nv[ju];
                            nv[ju] = 0;
                            elen[ju] = EMPTY;
                            j = next[ju];
                            next[jlast] = j;
                        } else {
                            jlast = ju;
                            j = next[ju];
                        }
                    }

                    wflg += 1;
                    i = next[iu];
                }
            }
        }

        // restore the surviving variables of Lme to the degree lists
        // and finalize the element
        let mut p = pme1 as usize;
        let nleft = n - nel;
        for pme in pme1 as usize..(pme2 + 1) as usize {
            let i = iw[pme] as usize;
            let nvi = -nv[i];
            if nvi > 0 {
                nv[i] = nvi;
                let mut deg = degree[i] as usize + degme - nvi as usize;
                deg = deg.min(nleft - nvi as usize);

                let inext = head[deg];
                if inext != EMPTY {
                    last[inext as usize] = i as isize;
                }
                next[i] = inext;
                last[i] = EMPTY;
                head[deg] = i as isize;

                mindeg = mindeg.min(deg);
                degree[i] = deg as isize;
                iw[p] = i as isize;
                p += 1;
            }
        }
        nv[me] = nvpiv;
        len[me] = p as isize - pme1;
        if len[me] == 0 {
            pe[me] = EMPTY;
            w[me] = 0;
        }
        if elenme != 0 {
            pfree = p;
        }
    }

    // pe now encodes the assembly tree through flipped indices and
    // elen the flipped elimination order of each element
    for x in pe.iter_mut() {
        *x = flip(*x);
    }
    for x in elen.iter_mut() {
        *x = flip(*x);
    }

    // compress paths of absorbed variables so each points directly at
    // its principal supervariable's element
    for i in 0..n {
        if nv[i] == 0 {
            let mut j = pe[i];
            if j == EMPTY {
                continue;
            }
            while nv[j as usize] == 0 {
                j = pe[j as usize];
            }
            let e = j;
            let mut j = i as isize;
            while nv[j as usize] == 0 {
                let jnext = pe[j as usize];
                pe[j as usize] = e;
                j = jnext;
            }
        }
    }

    let mut order = vec![EMPTY; n];
    postorder(&mut order, pe, &nv, &elen);

    // expand the postordered supervariables into the final permutation
    head.fill(EMPTY);
    next.fill(EMPTY);
    for (e, &k) in order.iter().enumerate() {
        if k != EMPTY {
            head[k as usize] = e as isize;
        }
    }
    let mut nel = 0usize;
    for &e in head.iter() {
        if e == EMPTY {
            break;
        }
        next[e as usize] = nel as isize;
        nel += nv[e as usize] as usize;
    }

    // absorbed variables follow their principal; dense rows go last
    for i in 0..n {
        if nv[i] == 0 {
            let e = pe[i];
            if e != EMPTY {
                next[i] = next[e as usize];
                next[e as usize] += 1;
            } else {
                next[i] = nel as isize;
                nel += 1;
            }
        }
    }

    for i in 0..n {
        last[next[i] as usize] = i as isize;
    }

    ndense
}

// Postorder the assembly tree.  Principal nodes only (nv > 0); within
// each node the largest child is ordered last so that subsequent
// factorization columns with the most work come together.
fn postorder(order: &mut [isize], etree: &[isize], nv: &[isize], f_size: &[isize]) {
    let n = order.len();
    let mut child = vec![EMPTY; n];
    let mut sibling = vec![EMPTY; n];
    let mut stack = vec![0isize; n];

    for j in (0..n).rev() {
        if nv[j] > 0 && etree[j] != EMPTY {
            let parent = etree[j] as usize;
            sibling[j] = child[parent];
            child[parent] = j as isize;
        }
    }

    // move the child with the largest frontal size to the end of each
    // child list
    for i in 0..n {
        if nv[i] > 0 && child[i] != EMPTY {
            let mut fprev = EMPTY;
            let mut bigfprev = EMPTY;
            let mut bigf = EMPTY;
            let mut maxfrsize = EMPTY;

            let mut f = child[i];
            while f != EMPTY {
                let frsize = f_size[f as usize];
                if frsize >= maxfrsize {
                    maxfrsize = frsize;
                    bigfprev = fprev;
                    bigf = f;
                }
                fprev = f;
                f = sibling[f as usize];
            }

            let fnext = sibling[bigf as usize];
            if fnext != EMPTY {
                if bigfprev != EMPTY {
                    sibling[bigfprev as usize] = fnext;
                } else {
                    child[i] = fnext;
                }
                sibling[bigf as usize] = EMPTY;
                sibling[fprev as usize] = bigf;
            }
        }
    }

    order.fill(EMPTY);
    let mut k = 0usize;
    for i in 0..n {
        if etree[i] == EMPTY && nv[i] > 0 {
            k = post_tree(i, k, &mut child, &sibling, order, &mut stack);
        }
    }
}

// Depth-first postorder of a single tree, iterative with an explicit
// stack.
fn post_tree(
    root: usize,
    mut k: usize,
    child: &mut [isize],
    sibling: &[isize],
    order: &mut [isize],
    stack: &mut [isize],
) -> usize {
    let mut top = 1usize;
    stack[0] = root as isize;

    while top > 0 {
        let i = stack[top - 1] as usize;
        if child[i] != EMPTY {
            let first = child[i] as usize;

            let mut f = first;
            loop {
                top += 1;
                if sibling[f] == EMPTY {
                    break;
                }
                f = sibling[f] as usize;
            }

            let mut t = top;
            let mut f = first;
            loop {
                t -= 1;
                stack[t] = f as isize;
                if sibling[f] == EMPTY {
                    break;
                }
                f = sibling[f] as usize;
            }
            child[i] = EMPTY;
        } else {
            top -= 1;
            order[i] = k as isize;
            k += 1;
        }
    }
    k
}

#[cfg(test)]
#[path = "test.rs"]
mod test;
