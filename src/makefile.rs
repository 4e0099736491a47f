//! Line-level lookup of variable assignments in a Makefile.
//!
//! Only the shape `NAME <op> value` is understood: the value is the third
//! whitespace-separated field of the first line that starts with `NAME`.
//! Indented lines are recipe lines and never match.

use tracing::debug;

/// Return the value assigned to `key`, or `None` when no line assigns it.
///
/// The first line beginning with `key` decides the result; if that line has
/// fewer than three fields it is treated as missing, not skipped.
pub fn variable_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let (number, line) = text
        .lines()
        .enumerate()
        .find(|(_, line)| starts_with_name(line, key))?;

    let value = line.split_whitespace().nth(2);
    if value.is_none() {
        debug!(
            "Line {} starts with {} but has no value field: {:?}",
            number + 1,
            key,
            line
        );
    }
    value
}

fn starts_with_name(line: &str, key: &str) -> bool {
    match line.strip_prefix(key) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}
