use doql::sanitize::{annotate_query, strip_comment_prefix};

// --- strip_comment_prefix ---

#[test]
fn strips_through_first_delimiter() {
    let query = "/* Username: admin */ SELECT name FROM view_device_v1";
    assert_eq!(strip_comment_prefix(query), " SELECT name FROM view_device_v1");
}

#[test]
fn passes_through_without_delimiter() {
    let query = "SELECT name FROM view_device_v1";
    assert_eq!(strip_comment_prefix(query), query);
}

#[test]
fn keeps_delimiters_after_the_first() {
    assert_eq!(strip_comment_prefix("a*/b*/c"), "b*/c");
}

#[test]
fn delimiter_at_start_drops_nothing_else() {
    assert_eq!(strip_comment_prefix("*/SELECT 1"), "SELECT 1");
}

#[test]
fn all_comment_query_becomes_empty() {
    assert_eq!(strip_comment_prefix("/* only metadata */"), "");
}

#[test]
fn empty_query_passes_through() {
    assert_eq!(strip_comment_prefix(""), "");
}

// --- annotate_query ---

#[test]
fn annotate_formats_metadata_pairs() {
    let annotated = annotate_query("SELECT 1", &[("User", "admin"), ("Query ID", "42")]);
    assert_eq!(annotated, "/* User: admin, Query ID: 42 */ SELECT 1");
}

#[test]
fn annotate_with_single_pair() {
    let annotated = annotate_query("SELECT name FROM view_device_v1", &[("User", "ops")]);
    assert_eq!(annotated, "/* User: ops */ SELECT name FROM view_device_v1");
}

#[test]
fn annotate_then_strip_leaves_leading_space() {
    let query = "SELECT uuid FROM view_device_v1";
    let annotated = annotate_query(query, &[("User", "admin")]);
    // The space after the comment block survives stripping; the endpoint
    // tolerates it.
    assert_eq!(strip_comment_prefix(&annotated), format!(" {}", query));
}
