use crate::{services::fuzzy::FuzzyFilter, store::Dataset};

/// Titles for the movie selector
///
/// A blank term bypasses fuzzy filtering and lists the whole catalog in
/// table order; otherwise the best fuzzy matches are returned.
pub fn search_titles(dataset: &Dataset, filter: &FuzzyFilter, term: &str) -> Vec<String> {
    if term.trim().is_empty() {
        return dataset.title_list();
    }

    filter
        .search(term, &dataset.title_list())
        .into_iter()
        .map(|m| m.title)
        .collect()
}
