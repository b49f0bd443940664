//! Quote- and escape-aware splitting of `VALUES` lists.
//!
//! Both passes share one small state machine: a backslash escapes the next
//! character, and an unescaped single quote toggles string mode. Characters
//! inside strings or behind an escape are never structural, so commas and
//! parentheses inside literals like `'a,(b)'` or `'O\'Brien'` are kept as data.

use alloc::string::String;
use alloc::vec::Vec;

/// Tracks whether the scanner is inside a single-quoted string.
#[derive(Debug, Default)]
struct QuoteState {
    in_string: bool,
    escape: bool,
}

impl QuoteState {
    /// Feed one character, returning whether it may carry structure
    /// (a parenthesis or separator) at this point.
    fn is_structural(&mut self, c: char) -> bool {
        if self.escape {
            self.escape = false;
            return false;
        }
        match c {
            '\\' => {
                self.escape = true;
                false
            }
            '\'' => {
                self.in_string = !self.in_string;
                false
            }
            _ => !self.in_string,
        }
    }
}

/// Split the text after `VALUES` into its top-level `(...)` groups.
///
/// Each returned group is trimmed and includes its surrounding parentheses.
/// Commas between groups are dropped. A single trailing `;` is tolerated.
///
/// # Errors
///
/// Returns [`LexerError::MalformedGroup`] with the leftover text when input
/// remains after the last complete group, e.g. an unclosed parenthesis or an
/// unterminated string.
///
/// # Example
///
/// ```
/// use sqldump_rows::sql::split_value_groups;
///
/// let groups = split_value_groups("(1,'a,b'),(2,'c')").unwrap();
/// assert_eq!(groups, ["(1,'a,b')", "(2,'c')"]);
/// ```
pub fn split_value_groups(values: &str) -> Result<Vec<String>, LexerError> {
    let values = values.trim();
    let values = values.strip_suffix(';').unwrap_or(values);

    let mut groups = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::default();
    let mut depth = 0i32;

    for c in values.chars() {
        if state.is_structural(c) {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    current.push(c);
                    if depth == 0 {
                        groups.push(String::from(current.trim()));
                        current.clear();
                    }
                    continue;
                }
                ',' if depth == 0 => continue,
                _ => {}
            }
        }
        current.push(c);
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        return Err(LexerError::MalformedGroup {
            group: leftover.into(),
        });
    }

    Ok(groups)
}

/// Split one `(...)` group into its raw literal tokens.
///
/// Tokens are trimmed slices of `group`; quoted literals keep their quotes and
/// escapes. A trailing empty token (as in `(1,)`) is not emitted.
///
/// # Errors
///
/// Returns [`LexerError::MalformedGroup`] if the trimmed group does not start
/// with `(` and end with `)`.
///
/// # Example
///
/// ```
/// use sqldump_rows::sql::split_values_inside_group;
///
/// let tokens = split_values_inside_group("(1, 'O\\'Brien', NULL)").unwrap();
/// assert_eq!(tokens, ["1", "'O\\'Brien'", "NULL"]);
/// ```
pub fn split_values_inside_group(group: &str) -> Result<Vec<&str>, LexerError> {
    let trimmed = group.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| LexerError::MalformedGroup {
            group: trimmed.into(),
        })?;

    let mut tokens = Vec::new();
    let mut state = QuoteState::default();
    let mut start = 0;

    for (pos, c) in inner.char_indices() {
        if state.is_structural(c) && c == ',' {
            tokens.push(inner[start..pos].trim());
            start = pos + 1;
        }
    }
    if start < inner.len() {
        tokens.push(inner[start..].trim());
    }

    Ok(tokens)
}

/// Errors that can occur while splitting a `VALUES` list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    /// A value group is not a well-formed `(...)` tuple.
    #[error("Malformed value group: {group}")]
    MalformedGroup {
        /// The offending group text.
        group: String,
    },
}
