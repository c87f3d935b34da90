/// One input line as seen by the state machine, with lookahead.
#[derive(Debug, Clone, Copy)]
pub struct LineView<'a> {
    /// The line text without its newline.
    pub text: &'a str,
    /// The following line, if any.
    pub next: Option<&'a str>,
    /// Every line after this one.
    pub following: &'a [String],
    /// 0-based index in the prepared source. The leading pad line makes this
    /// the 1-based line number of the top-level document.
    pub number: usize,
}

impl<'a> LineView<'a> {
    /// The lines that follow up to, not including, the next blank line.
    pub fn rest_of_block(self) -> impl Iterator<Item = &'a str> {
        self.following
            .iter()
            .map(String::as_str)
            .take_while(|line| !line.trim().is_empty())
    }
}

/// The prepared source split into lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines {
    lines: Vec<String>,
}

impl Lines {
    /// Splits prepared text on `\n`. A trailing newline yields a trailing
    /// empty line, so padded text always ends with a blank line.
    pub fn split(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Builds a padded line sequence from already-prepared lines, e.g. a
    /// directive body that is parsed again.
    pub fn from_fragment(lines: &[String]) -> Self {
        let mut padded = Vec::with_capacity(lines.len() + 2);
        padded.push(String::new());
        padded.extend(lines.iter().cloned());
        padded.push(String::new());
        Self { lines: padded }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates the lines with their lookahead.
    pub fn views(&self) -> impl Iterator<Item = LineView<'_>> {
        self.lines.iter().enumerate().map(|(number, text)| LineView {
            text,
            next: self.get(number + 1),
            following: &self.lines[number + 1..],
            number,
        })
    }
}
