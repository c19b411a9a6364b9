// artifact formats:
//
// catalog    -> JSON array, one entry per row, in row order. an entry is either a
//               bare title string or an object with a "title" field; other fields
//               (movie_id, tags, ...) are ignored
// similarity -> "*.json": JSON array of N arrays of N numbers
//               otherwise: N*N little-endian f32, row-major, no header
//
// both are read once at startup and never written

use super::matrix::SimilarityMatrix;
use crate::error::{RecommendError, Result};
use byteorder::{ByteOrder, LittleEndian};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Title(String),
    Record { title: String },
}

impl From<CatalogEntry> for String {
    fn from(entry: CatalogEntry) -> Self {
        match entry {
            CatalogEntry::Title(title) => title,
            CatalogEntry::Record { title } => title,
        }
    }
}

pub fn load_titles(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    parse_titles(&content)
}

fn parse_titles(content: &str) -> Result<Vec<String>> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(content)?;
    Ok(entries.into_iter().map(String::from).collect())
}

pub fn load_matrix(path: &Path, n: usize) -> Result<SimilarityMatrix> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        let rows: Vec<Vec<f32>> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        SimilarityMatrix::from_rows(rows, n)
    } else {
        let bytes = std::fs::read(path)?;
        if bytes.len() % 4 != 0 || bytes.len() / 4 != n * n {
            return Err(RecommendError::MatrixSize {
                rows: if n == 0 { bytes.len() / 4 } else { bytes.len() / 4 / n },
                expected: n,
            });
        }
        SimilarityMatrix::from_flat(bytes_to_float(&bytes), n)
    }
}

fn bytes_to_float(byte_vec: &[u8]) -> Vec<f32> {
    let mut float_vec = vec![0f32; byte_vec.len() / 4];
    LittleEndian::read_f32_into(byte_vec, &mut float_vec);
    float_vec
}

#[cfg(test)]
pub(crate) fn float_to_bytes(float_vec: &[f32]) -> Vec<u8> {
    let mut byte_vec = vec![0u8; float_vec.len() * 4];
    LittleEndian::write_f32_into(float_vec, &mut byte_vec);
    byte_vec
}
