//! Reserved node names and delimiters recognised by the engine.
//!
//! These values are fixed; documents cannot rename them.

/// Name of the single top-level node of every normalised tree.
pub const ROOT_NODE: &str = "config";

/// Name of the shared fallback section directly under the root.
pub const DEFAULT_NODE: &str = "default";

/// Name of the wrapper holding named instances under an application node.
pub const INSTANCE_NODE: &str = "instance";

/// Separator between application and instance names (`app..instance`).
pub const INSTANCE_DELIMITER: &str = "..";

/// Separator between segments of a node path (`db.primary.host`).
pub const PATH_DELIMITER: char = '.';

/// Marker node produced by the XML reader to hold element attributes.
///
/// Its children are spliced into the owning element during normalisation.
pub const ATTRIBUTES_MARKER: &str = "<xmlattr>";

/// Returns `true` when `name` equals `keyword` ignoring ASCII case.
#[must_use]
pub fn is_keyword(name: &str, keyword: &str) -> bool {
    name.eq_ignore_ascii_case(keyword)
}

/// Composes the display name `app[..instance][.path]`.
#[must_use]
pub fn compose_name(app_name: &str, instance_name: &str, path: &str) -> String {
    let mut name = String::from(app_name);
    if !instance_name.is_empty() {
        name.push_str(INSTANCE_DELIMITER);
        name.push_str(instance_name);
    }
    if !path.is_empty() {
        name.push(PATH_DELIMITER);
        name.push_str(path);
    }
    name
}

/// Joins two dotted paths, skipping the delimiter when either side is empty.
#[must_use]
pub fn join_path(lhs: &str, rhs: &str) -> String {
    match (lhs.is_empty(), rhs.is_empty()) {
        (true, _) => rhs.to_owned(),
        (false, true) => lhs.to_owned(),
        (false, false) => format!("{lhs}{PATH_DELIMITER}{rhs}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("app", "", "", "app")]
    #[case("app", "1", "", "app..1")]
    #[case("app", "", "db.host", "app.db.host")]
    #[case("app", "i1", "db", "app..i1.db")]
    fn composes_display_names(
        #[case] app: &str,
        #[case] instance: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(compose_name(app, instance, path), expected);
    }

    #[rstest]
    #[case("", "", "")]
    #[case("a", "", "a")]
    #[case("", "b", "b")]
    #[case("a", "b", "a.b")]
    fn joins_paths(#[case] lhs: &str, #[case] rhs: &str, #[case] expected: &str) {
        assert_eq!(join_path(lhs, rhs), expected);
    }

    #[test]
    fn keywords_match_case_insensitively() {
        assert!(is_keyword("DeFaUlT", DEFAULT_NODE));
        assert!(!is_keyword("defaults", DEFAULT_NODE));
    }
}
