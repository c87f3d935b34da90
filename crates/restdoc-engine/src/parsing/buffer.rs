/// Lines collected for the construct currently being parsed.
///
/// Cleared on every flush.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Removes and returns the most recently pushed line.
    pub fn pop(&mut self) -> Option<String> {
        self.lines.pop()
    }

    /// Overwrites the line at `index`. Returns `false` when there is no such
    /// line.
    pub fn set(&mut self, index: usize, line: &str) -> bool {
        match self.lines.get_mut(index) {
            Some(slot) => {
                *slot = line.to_string();
                true
            }
            None => false,
        }
    }

    /// Replaces the whole content.
    pub fn replace_all(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with single spaces, each trimmed.
    pub fn joined_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Empties the buffer and returns what it held.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}
