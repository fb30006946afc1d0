//! Natural-language rendering of entity lists.

/// Render identifiers as a readable list, keeping their iteration order.
///
/// - no entities: `""`
/// - one: `"host1"`
/// - two: `"host1 and host2"`
/// - more: `"host1, host2 and host3"`
///
/// An absent list is rendered the same as an empty one; pass
/// `maybe_list.into_iter().flatten()`.
pub fn format_entity_list<I, S>(entities: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entities: Vec<S> = entities.into_iter().collect();

    match entities.as_slice() {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}
