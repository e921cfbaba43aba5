//! Local text search used by the pickers and the history view

/// An entity that can be found by typing part of one of its display fields
pub trait Searchable {
    /// Stable key used to select the entity once found
    fn search_key(&self) -> &str;

    /// Display fields the search term is matched against
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match of `term` against any of `fields`
///
/// An empty or whitespace-only term matches everything.
pub fn matches_term<'a>(fields: impl IntoIterator<Item = &'a str>, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
