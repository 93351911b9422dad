use super::model::Track;

/// Indices of the tracks whose title starts with `query`, ignoring case.
///
/// Order follows `tracks`; an empty query matches everything.
pub fn matching_indices(tracks: &[Track], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..tracks.len()).collect();
    }

    let query = query.to_lowercase();
    tracks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.title().to_lowercase().starts_with(&query))
        .map(|(i, _)| i)
        .collect()
}
