//! Pairwise indexing of unordered particle pairs.
//!
//! Pairs `(i, j)` with `i < j` are enumerated lexicographically: `i` runs from
//! `0` to `n - 2` and `j` from `i + 1` to `n - 1`. The position of a pair in
//! that sequence is its *pair index*; [`pair_index`] and [`pair_at`] convert
//! between the two representations.

/// Number of unordered pairs among `n` elements, excluding self-pairs.
///
/// Returns `n * (n - 1) / 2`, and `0` for `n < 2`.
pub fn size_triangular_matrix(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    // Halve the even factor first so the product does not overflow early.
    if n % 2 == 0 {
        (n / 2) * (n - 1)
    } else {
        n * ((n - 1) / 2)
    }
}

/// Position of pair `(i, j)` in the enumeration order for `n` elements.
///
/// The pair is canonicalised, so `(j, i)` maps to the same index. Returns
/// `None` for self-pairs and out-of-range indices.
pub fn pair_index(n: usize, i: usize, j: usize) -> Option<usize> {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    if i == j || j >= n {
        return None;
    }
    // Rows 0..i contribute (n-1) + (n-2) + ... + (n-i) pairs.
    let preceding = i * n - i * (i + 1) / 2;
    Some(preceding + (j - i - 1))
}

/// Pair stored at position `k` of the enumeration order for `n` elements.
pub fn pair_at(n: usize, k: usize) -> Option<(usize, usize)> {
    if k >= size_triangular_matrix(n) {
        return None;
    }
    let mut remaining = k;
    for i in 0..n - 1 {
        let row = n - 1 - i;
        if remaining < row {
            return Some((i, i + 1 + remaining));
        }
        remaining -= row;
    }
    None
}

/// Iterates all unordered pairs of `n` elements in enumeration order.
pub fn pairs(n: usize) -> PairIter {
    PairIter { n, i: 0, j: 1 }
}

/// Iterator over canonical `(i, j)` pairs, `i < j`.
#[derive(Debug, Clone)]
pub struct PairIter {
    n: usize,
    i: usize,
    j: usize,
}

impl Iterator for PairIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.n {
            return None;
        }
        let pair = (self.i, self.j);
        self.j += 1;
        if self.j == self.n {
            self.i += 1;
            self.j = self.i + 1;
        }
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.j >= self.n {
            0
        } else {
            let consumed = pair_index(self.n, self.i, self.j).unwrap_or(0);
            size_triangular_matrix(self.n) - consumed
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PairIter {}
