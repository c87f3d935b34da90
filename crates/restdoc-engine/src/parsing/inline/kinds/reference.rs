/// Hyperlink references: `` `text`_ ``, `name_`, `` `text <url>`_ `` and the
/// anonymous `__` forms.
pub struct Reference;

impl Reference {
    pub const SUFFIX: u8 = b'_';
    pub const ANONYMOUS_SUFFIX: &'static [u8; 2] = b"__";
    pub const URL_OPEN: char = '<';
    pub const URL_CLOSE: char = '>';

    /// Bytes allowed in a bare `name_` reference.
    pub fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.')
    }

    /// Splits `text <url>` into its text and embedded URL.
    pub fn split_embedded(inner: &str) -> (String, Option<String>) {
        let trimmed = inner.trim();
        if let Some(stripped) = trimmed.strip_suffix(Self::URL_CLOSE)
            && let Some(open) = stripped.rfind(Self::URL_OPEN)
        {
            let url = stripped[open + 1..].trim().to_string();
            let text = stripped[..open].trim();
            let text = if text.is_empty() { url.clone() } else { text.to_string() };
            return (text, Some(url));
        }
        (trimmed.to_string(), None)
    }
}
