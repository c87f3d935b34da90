use crate::models::{Node, Table};
use crate::parsing::{
    buffer::Buffer,
    classify::{self, TableSeparator},
    env::Environment,
    inline::Inline,
    source::LineView,
};

use super::ParsingUnit;

/// Simple (`===  ===`) and grid (`+---+---+`) tables.
///
/// The opening separator is already in the buffer when the unit starts. A
/// blank line ends either kind. A simple table ends after its third
/// separator, or after its second when no third one follows before the next
/// blank line.
#[derive(Debug, Clone)]
pub struct TableUnit {
    separator: TableSeparator,
    separators_seen: usize,
    has_header: bool,
}

impl TableUnit {
    pub fn new(separator: TableSeparator) -> Self {
        Self {
            separator,
            separators_seen: 1,
            has_header: false,
        }
    }

    fn closed(&self) -> bool {
        matches!(self.separator, TableSeparator::Simple { .. })
            && (self.separators_seen >= 3 || (self.separators_seen == 2 && !self.has_header))
    }
}

impl ParsingUnit for TableUnit {
    fn accept(&mut self, line: &LineView<'_>, buffer: &mut Buffer) -> bool {
        if classify::is_blank(line.text) || self.closed() {
            return false;
        }
        let is_separator = classify::parse_table_separator(line.text).is_some();
        if let TableSeparator::Grid { .. } = self.separator
            && !is_separator
            && !line.text.trim_start().starts_with('|')
        {
            return false;
        }
        if is_separator {
            self.separators_seen += 1;
            if self.separators_seen == 2 {
                self.has_header = line
                    .rest_of_block()
                    .any(|next| classify::parse_table_separator(next).is_some());
            }
        }
        buffer.push(line.text);
        true
    }

    fn finish(&mut self, buffer: &Buffer, env: &mut Environment) -> Node {
        let (header_rows, rows) = match self.separator {
            TableSeparator::Simple { .. } => simple_rows(buffer.lines()),
            TableSeparator::Grid { .. } => grid_rows(buffer.lines()),
        };
        let rows = rows
            .into_iter()
            .map(|row| row.iter().map(|cell| env.inline(cell)).collect::<Vec<Inline>>())
            .collect();
        Node::Table(Table { header_rows, rows })
    }
}

/// Column start offsets (in chars) taken from a `===  ===` line.
fn column_starts(separator: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut previous = ' ';
    for (i, c) in separator.chars().enumerate() {
        if c == '=' && previous == ' ' {
            starts.push(i);
        }
        previous = c;
    }
    starts
}

fn split_columns(line: &str, starts: &[usize]) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = if i + 1 < starts.len() {
                starts[i + 1].min(chars.len())
            } else {
                chars.len()
            };
            let start = start.min(end);
            chars[start..end].iter().collect::<String>().trim().to_string()
        })
        .collect()
}

fn simple_rows(lines: &[String]) -> (usize, Vec<Vec<String>>) {
    let Some(first) = lines.first() else {
        return (0, Vec::new());
    };
    let starts = column_starts(first);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut header_rows = 0;
    let mut separators = 0;
    for line in lines {
        if classify::parse_table_separator(line).is_some() {
            separators += 1;
            if separators == 2 {
                header_rows = rows.len();
            }
            continue;
        }
        let cells = split_columns(line, &starts);
        let continues = cells.first().is_some_and(String::is_empty);
        match rows.last_mut() {
            Some(previous) if continues => append_cells(previous, cells),
            _ => rows.push(cells),
        }
    }

    // Two separators mean a table without a header.
    if separators < 3 {
        header_rows = 0;
    }
    (header_rows, rows)
}

fn grid_rows(lines: &[String]) -> (usize, Vec<Vec<String>>) {
    let mut rows = Vec::new();
    let mut header_rows = 0;
    let mut pending: Option<Vec<String>> = None;
    for line in lines {
        let line = line.trim();
        if line.starts_with('+') {
            if let Some(row) = pending.take() {
                rows.push(row);
            }
            if line.contains('=') {
                header_rows = rows.len();
            }
            continue;
        }
        let cells = line
            .trim_matches('|')
            .split('|')
            .map(|cell| cell.trim().to_string())
            .collect();
        match pending.as_mut() {
            Some(row) => append_cells(row, cells),
            None => pending = Some(cells),
        }
    }
    if let Some(row) = pending {
        rows.push(row);
    }
    (header_rows, rows)
}

fn append_cells(row: &mut Vec<String>, cells: Vec<String>) {
    for (i, cell) in cells.into_iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        match row.get_mut(i) {
            Some(existing) if existing.is_empty() => *existing = cell,
            Some(existing) => {
                existing.push(' ');
                existing.push_str(&cell);
            }
            None => row.push(cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::units::test_support::feed;
    use pretty_assertions::assert_eq;

    fn run(lines: &[&str]) -> (usize, Table) {
        let separator = classify::parse_table_separator(lines[0]).expect("separator line");
        let mut unit = TableUnit::new(separator);
        let mut buffer = Buffer::new();
        buffer.push(lines[0]);
        let accepted = feed(&mut unit, &lines[1..], &mut buffer);
        match unit.finish(&buffer, &mut Environment::default()) {
            Node::Table(table) => (accepted, table),
            other => panic!("expected a table, got {other:?}"),
        }
    }

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows
            .iter()
            .map(|row| row.iter().map(Inline::plain_text).collect())
            .collect()
    }

    #[test]
    fn simple_table_with_header() {
        let (accepted, table) = run(&[
            "=====  =======",
            "Name   Meaning",
            "=====  =======",
            "a      first",
            "b      *second*",
            "=====  =======",
            "After",
        ]);
        assert_eq!(accepted, 5);
        assert_eq!(table.header_rows, 1);
        assert_eq!(
            texts(&table),
            vec![
                vec!["Name", "Meaning"],
                vec!["a", "first"],
                vec!["b", "second"],
            ]
        );
    }

    #[test]
    fn simple_table_without_header_ends_at_blank() {
        let (accepted, table) = run(&["===  ===", "1    2", "===  ===", ""]);
        assert_eq!(accepted, 2);
        assert_eq!(table.header_rows, 0);
        assert_eq!(table.columns(), 2);
    }

    #[test]
    fn simple_table_without_header_ends_at_its_second_separator() {
        let (accepted, table) = run(&["===  ===", "a    b", "===  ===", "Text after", ""]);
        assert_eq!(accepted, 2);
        assert_eq!(table.header_rows, 0);
        assert_eq!(texts(&table), vec![vec!["a", "b"]]);
    }

    #[test]
    fn simple_table_continuation_row() {
        let (_, table) = run(&["===  ========", "a    starts", "     and ends", "===  ========"]);
        assert_eq!(texts(&table), vec![vec!["a", "starts and ends"]]);
    }

    #[test]
    fn grid_table_rows_and_header() {
        let (accepted, table) = run(&[
            "+------+--------+",
            "| Head | Other  |",
            "+======+========+",
            "| a    | multi  |",
            "|      | line   |",
            "+------+--------+",
            "",
        ]);
        assert_eq!(accepted, 5);
        assert_eq!(table.header_rows, 1);
        assert_eq!(
            texts(&table),
            vec![vec!["Head", "Other"], vec!["a", "multi line"]]
        );
    }

    #[test]
    fn grid_table_ends_at_plain_text() {
        let (accepted, _) = run(&["+---+", "| x |", "+---+", "text"]);
        assert_eq!(accepted, 2);
    }
}
