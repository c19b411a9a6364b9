use super::matching::top_k;
use super::matrix::SimilarityMatrix;
use super::storage::{load_matrix, load_titles};
use super::Catalog;
use crate::error::{RecommendError, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

pub const RECOMMEND_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub index: usize,
    pub score: f32,
}

/// Catalog plus its aligned similarity matrix. Read-only after construction.
#[derive(Clone, Debug)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl Recommender {
    pub fn load(catalog_path: &Path, matrix_path: &Path) -> Result<Self> {
        let start = Instant::now();
        let titles = load_titles(catalog_path)?;
        info!(
            "load catalog {} with {} titles",
            catalog_path.display(),
            titles.len()
        );
        let matrix = load_matrix(matrix_path, titles.len())?;
        let elapsed = start.elapsed().as_secs_f64();
        info!(
            "load similarity {} ({}x{}) spends {}s",
            matrix_path.display(),
            matrix.len(),
            matrix.len(),
            elapsed
        );
        Self::new(Catalog::new(titles), matrix)
    }

    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self> {
        if catalog.is_empty() {
            return Err(RecommendError::EmptyCatalog);
        }
        if matrix.len() != catalog.len() {
            return Err(RecommendError::MatrixSize {
                rows: matrix.len(),
                expected: catalog.len(),
            });
        }

        let not_self_maximal = matrix.audit();
        if !not_self_maximal.is_empty() {
            warn!(
                "{} rows have a diagonal below the row maximum, first: {:?}",
                not_self_maximal.len(),
                &not_self_maximal[..not_self_maximal.len().min(10)]
            );
        }
        let asymmetric = matrix.asymmetric_pairs();
        if asymmetric > 0 {
            warn!("similarity matrix has {} asymmetric pairs", asymmetric);
        }

        Ok(Recommender { catalog, matrix })
    }

    pub fn titles(&self) -> &[String] {
        self.catalog.titles()
    }

    pub fn recommend(&self, title: &str) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(title)?
            .into_iter()
            .map(|r| r.title)
            .collect())
    }

    pub fn recommend_scored(&self, title: &str) -> Result<Vec<Recommendation>> {
        let index = self.catalog.resolve(title)?;
        let recommendations = top_k(self.matrix.row(index), index, RECOMMEND_COUNT)
            .into_iter()
            .filter_map(|m| {
                self.catalog.title(m.index).map(|title| Recommendation {
                    title: title.to_string(),
                    index: m.index,
                    score: m.similarity,
                })
            })
            .collect::<Vec<_>>();
        debug!("recommend {:?} (row {}): {:?}", title, index, recommendations);
        Ok(recommendations)
    }
}
