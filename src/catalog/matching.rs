use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matched {
    pub index: usize,
    pub similarity: f32,
}

/// Ranks a similarity row, best first.
///
/// Equal scores keep the queried row's own column in front, then fall back to
/// ascending column index, so the order is fully deterministic.
pub fn rank(row: &[f32], self_index: usize) -> Vec<Matched> {
    let mut ranked = row
        .iter()
        .enumerate()
        .map(|(index, &similarity)| Matched { index, similarity })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| (b.index == self_index).cmp(&(a.index == self_index)))
            .then_with(|| a.index.cmp(&b.index))
    });
    ranked
}

/// Drops the top-ranked entry and returns the next `k`.
pub fn top_k(row: &[f32], self_index: usize, k: usize) -> Vec<Matched> {
    let ranked = rank(row, self_index);
    if let Some(first) = ranked.first() {
        if first.index != self_index {
            debug!(
                "row {} is not self-maximal, dropping column {} instead",
                self_index, first.index
            );
        }
    }
    let top = ranked.into_iter().skip(1).take(k).collect::<Vec<_>>();
    debug!("row {} top_k: {:?}", self_index, top);
    top
}
