pub mod matching;
pub mod matrix;
pub mod recommender;
mod storage;

use crate::error::{RecommendError, Result};
use std::collections::HashMap;

/// Ordered list of recommendable titles. A title's position is its row in the
/// similarity matrix.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    titles: Vec<String>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(titles: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(titles.len());
        for (i, title) in titles.iter().enumerate() {
            // first occurrence wins
            if let Some(first) = index.get(title) {
                warn!("duplicate title {:?} at row {}, keeping row {}", title, i, first);
                continue;
            }
            index.insert(title.clone(), i);
        }
        Catalog { titles, index }
    }

    pub fn resolve(&self, title: &str) -> Result<usize> {
        self.index
            .get(title)
            .copied()
            .ok_or_else(|| RecommendError::NotFound(title.to_string()))
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(titles: &[&str]) -> Catalog {
        Catalog::new(titles.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn resolve_returns_row_position() {
        let catalog = catalog(&["Avatar", "Spectre", "Tangled"]);
        assert_eq!(catalog.resolve("Avatar").unwrap(), 0);
        assert_eq!(catalog.resolve("Tangled").unwrap(), 2);
        assert_eq!(catalog.title(1), Some("Spectre"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn resolve_is_deterministic() {
        let catalog = catalog(&["Avatar", "Spectre", "Tangled"]);
        let first = catalog.resolve("Spectre").unwrap();
        for _ in 0..10 {
            assert_eq!(catalog.resolve("Spectre").unwrap(), first);
        }
    }

    #[test]
    fn unknown_title_is_not_found() {
        let catalog = catalog(&["Avatar"]);
        match catalog.resolve("Unknown Title") {
            Err(RecommendError::NotFound(title)) => assert_eq!(title, "Unknown Title"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_titles_resolve_to_first_row() {
        let catalog = catalog(&["Heat", "Alien", "Heat"]);
        assert_eq!(catalog.resolve("Heat").unwrap(), 0);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.title(2), Some("Heat"));
    }

    #[test]
    fn resolve_requires_exact_match() {
        let catalog = catalog(&["Avatar"]);
        assert!(catalog.resolve("avatar").is_err());
        assert!(catalog.resolve("Avatar ").is_err());
    }
}
