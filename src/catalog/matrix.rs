use crate::error::{RecommendError, Result};

/// Square N×N score table stored row-major. Immutable once built.
#[derive(Clone, Debug)]
pub struct SimilarityMatrix {
    n: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds the matrix from nested rows, checking that it is `n`×`n` and finite.
    pub fn from_rows(rows: Vec<Vec<f32>>, n: usize) -> Result<Self> {
        if rows.len() != n {
            return Err(RecommendError::MatrixSize {
                rows: rows.len(),
                expected: n,
            });
        }
        let mut scores = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(RecommendError::MatrixSize {
                    rows: row.len(),
                    expected: n,
                });
            }
            scores.extend(row);
        }
        Self::from_flat(scores, n)
    }

    /// Builds the matrix from a row-major buffer of `n * n` scores.
    pub fn from_flat(scores: Vec<f32>, n: usize) -> Result<Self> {
        if scores.len() != n * n {
            return Err(RecommendError::MatrixSize {
                rows: if n == 0 { scores.len() } else { scores.len() / n },
                expected: n,
            });
        }
        if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
            return Err(RecommendError::NonFiniteScore {
                row: pos / n,
                column: pos % n,
            });
        }
        Ok(SimilarityMatrix { n, scores })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn row(&self, index: usize) -> &[f32] {
        &self.scores[index * self.n..(index + 1) * self.n]
    }

    /// Rows whose diagonal entry is below the row maximum.
    pub fn audit(&self) -> Vec<usize> {
        (0..self.n)
            .filter(|&i| {
                let row = self.row(i);
                row.iter().any(|&s| s > row[i])
            })
            .collect()
    }

    /// Count of (i, j) pairs with i < j where the matrix is not symmetric.
    pub fn asymmetric_pairs(&self) -> usize {
        let mut count = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.scores[i * self.n + j] != self.scores[j * self.n + i] {
                    count += 1;
                }
            }
        }
        count
    }
}
