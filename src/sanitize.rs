/// Drop the metadata comment prefix from a query.
///
/// Hosts prepend bookkeeping as a `/* ... */` block (see [`annotate_query`]),
/// which the DOQL endpoint does not accept. Everything up to and including
/// the first `*/` is removed; a query without the delimiter passes through
/// unchanged, and any later `*/` stays where it is.
pub fn strip_comment_prefix(query: &str) -> &str {
    match query.split_once("*/") {
        Some((_, rest)) => rest,
        None => query,
    }
}

/// Prepend metadata to a query as a comment block: `/* k: v, k: v */ query`.
///
/// The counterpart of [`strip_comment_prefix`]: the block survives host-side
/// logging and is removed again before transmission.
pub fn annotate_query(query: &str, metadata: &[(&str, &str)]) -> String {
    let pairs = metadata
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("/* {} */ {}", pairs, query)
}
