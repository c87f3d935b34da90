const BOM: char = '\u{feff}';
const NBSP: char = '\u{a0}';

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Surrounds the text with one blank line on each side.
pub fn pad(text: &str) -> String {
    format!("\n{text}\n")
}

/// Removes byte-order marks (included files may carry their own) and turns
/// non-breaking spaces into plain spaces.
pub fn clean_characters(text: &str) -> String {
    text.chars()
        .filter(|&c| c != BOM)
        .map(|c| if c == NBSP { ' ' } else { c })
        .collect()
}
