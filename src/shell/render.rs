//! Console text for notes and selections.

use crate::core::note::Note;

/// Renders notes numbered from 1, each followed by a blank line.
///
/// ```text
/// 1. Title: Groceries
///    Body: milk
///    Added on: 2024-03-01T09:30:00.000Z
/// ```
///
/// Continuation lines are padded to the width of the `N. ` prefix.
pub fn numbered_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> String {
    let mut out = String::new();
    for (index, note) in notes.into_iter().enumerate() {
        let prefix = format!("{}. ", index + 1);
        let padding = " ".repeat(prefix.len());
        out.push_str(&format!("{prefix}Title: {}\n", note.title));
        out.push_str(&format!("{padding}Body: {}\n", note.body));
        out.push_str(&format!("{padding}Added on: {}\n\n", note.time_added));
    }
    out
}

/// Parses a 1-based selection among `count` displayed items.
///
/// Returns the 0-based index, or `None` if the input is not a number in
/// `1..=count`.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}
