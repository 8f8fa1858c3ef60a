//! Live column sets
//!
//! Cofactor expansion never copies matrix data. Instead each recursive call
//! carries the ordered indices of the original columns still present in its
//! submatrix.

/// Ordered set of live column indices of the original matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet(Vec<usize>);

impl ColumnSet {
    /// All columns `0..order`
    pub fn full(order: usize) -> Self {
        Self((0..order).collect())
    }

    /// New set with `target` removed, relative order preserved
    ///
    /// # Panics
    /// If `target` is not a member of the set.
    pub fn remove(&self, target: usize) -> Self {
        assert!(
            self.0.contains(&target),
            "column {} is not live in {:?}",
            target,
            self.0
        );
        Self(self.0.iter().copied().filter(|&c| c != target).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ColumnSet {
    fn from(cols: Vec<usize>) -> Self {
        debug_assert!(
            cols.iter()
                .enumerate()
                .all(|(i, c)| !cols[i + 1..].contains(c)),
            "duplicate column in {:?}",
            cols
        );
        Self(cols)
    }
}
