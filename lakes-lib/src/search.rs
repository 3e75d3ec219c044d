//! Live filtering of the browse list.

/// Names containing `query` as a case-insensitive substring, in listing order.
/// A blank query matches everything.
pub fn filter_names<'a, S>(names: &'a [S], query: &str) -> Vec<&'a str>
where
    S: AsRef<str>,
{
    let query = query.trim().to_lowercase();

    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
        .collect()
}
