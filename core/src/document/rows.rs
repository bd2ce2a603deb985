//! Text-to-table splitting used by the spreadsheet encoder

/// Split `content` into rows on `\n` and each row into cells on `,`.
///
/// Cell values are trimmed. Short rows are not padded, and an empty line
/// still yields one (empty) cell, so row numbering follows line numbering.
pub fn split_rows(content: &str) -> Vec<Vec<String>> {
    content
        .split('\n')
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect()
}
