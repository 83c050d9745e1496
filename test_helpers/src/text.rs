//! Text helpers for comparing rendered trees.

/// Joins `parts`, terminating each one with a newline.
///
/// # Examples
///
/// ```
/// use test_helpers::text::lines;
///
/// assert_eq!(lines(&["<a>", "</a>"]), "<a>\n</a>\n");
/// ```
#[must_use]
pub fn lines(parts: &[&str]) -> String {
    parts.iter().fold(String::new(), |mut text, line| {
        text.push_str(line);
        text.push('\n');
        text
    })
}

/// Removes the line breaks and leading indentation of a pretty rendering,
/// producing the one-line form.
#[must_use]
pub fn squash(pretty: &str) -> String {
    pretty.lines().map(str::trim_start).collect()
}
