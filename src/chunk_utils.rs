//! Helpers for carving a payload into feedable chunks; used by the tests
//! and the benchmark to exercise chunk-boundary behavior.

use alloc::vec::Vec;

/// Cut `payload` into consecutive chunks of at most `size` characters.
///
/// Cuts fall on character boundaries, so every chunk is valid UTF-8 and
/// their concatenation is `payload` again.
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn chunks_of(payload: &str, size: usize) -> Vec<&str> {
    assert!(size > 0);
    let mut chunks = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(size)
            .map_or(rest.len(), |(idx, _)| idx);
        let (head, tail) = rest.split_at(cut);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

/// Split `payload` at the given char offsets, clamped and deduplicated, so
/// arbitrary integers (e.g. from a property-test generator) describe a
/// valid partition.
#[must_use]
pub fn partition_at<'a>(payload: &'a str, splits: &[usize]) -> Vec<&'a str> {
    let mut boundaries: Vec<usize> = splits
        .iter()
        .map(|&s| {
            let mut idx = s % (payload.len() + 1);
            while !payload.is_char_boundary(idx) {
                idx += 1;
            }
            idx
        })
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for end in boundaries {
        if end > start {
            chunks.push(&payload[start..end]);
            start = end;
        }
    }
    if start < payload.len() {
        chunks.push(&payload[start..]);
    }
    chunks
}
