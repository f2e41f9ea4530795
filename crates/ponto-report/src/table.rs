//! Tabular report model and cleaning rules.

/// Identifier column dropped from the published table when present.
pub const IDENTIFIER_COLUMN: &str = "Matrícula";

/// Column scanned for the summary marker.
pub const NAME_COLUMN: &str = "Nome";

/// Sentinel value in the name column. The matching row and everything after
/// it are the export's summary section and never reach the worksheet.
pub const SUMMARY_MARKER: &str = "resumo";

/// An in-memory report: one header row plus data rows, all strings.
///
/// Missing cells render as empty strings when the table is turned into an
/// upload payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of columns in the published table.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Apply the cleaning rules, in order:
    ///
    /// 1. trim whitespace from header names
    /// 2. drop rows that are empty across all columns
    /// 3. drop the identifier column if present
    /// 4. truncate at the first summary marker row
    ///
    /// Cleaning is idempotent: cleaning a cleaned table is a no-op.
    pub fn clean(mut self) -> Self {
        for header in &mut self.headers {
            let trimmed = header.trim();
            if trimmed.len() != header.len() {
                *header = trimmed.to_string();
            }
        }

        self.rows
            .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));

        self.drop_column(IDENTIFIER_COLUMN);
        self.truncate_at_summary();
        self
    }

    /// Header row followed by data rows, each padded to the header width.
    pub fn to_values(&self) -> Vec<Vec<String>> {
        let width = self.width();
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.headers.clone());
        for row in &self.rows {
            let mut padded = row.clone();
            padded.resize(width, String::new());
            values.push(padded);
        }
        values
    }

    fn drop_column(&mut self, name: &str) {
        let Some(idx) = self.headers.iter().position(|h| h == name) else {
            return;
        };
        self.headers.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
    }

    fn truncate_at_summary(&mut self) {
        let Some(name_idx) = self.headers.iter().position(|h| h == NAME_COLUMN) else {
            return;
        };
        let marker = self.rows.iter().position(|row| {
            row.get(name_idx)
                .is_some_and(|cell| cell.trim().eq_ignore_ascii_case(SUMMARY_MARKER))
        });
        if let Some(pos) = marker {
            self.rows.truncate(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample() -> ReportTable {
        ReportTable::new(
            strings(&[" Matrícula ", "Nome", "Horas "]),
            vec![
                strings(&["001", "Ana", "8:00"]),
                strings(&["", "  ", ""]),
                strings(&["002", "Bruno", "7:30"]),
                strings(&["", " Resumo ", ""]),
                strings(&["", "Total", "15:30"]),
            ],
        )
    }

    #[test]
    fn clean_applies_all_rules() {
        let table = sample().clean();
        assert_eq!(table.headers, strings(&["Nome", "Horas"]));
        assert_eq!(
            table.rows,
            vec![strings(&["Ana", "8:00"]), strings(&["Bruno", "7:30"])]
        );
    }

    #[test]
    fn clean_is_idempotent() {
        let once = sample().clean();
        let twice = once.clone().clean();
        assert_eq!(once, twice);
    }

    #[test]
    fn summary_truncation_drops_marker_and_everything_after() {
        // Padded, mixed-case marker still matches; rows before it survive.
        let table = ReportTable::new(
            strings(&["Nome", "Horas"]),
            vec![
                strings(&["Ana", "8:00"]),
                strings(&["  rEsUmO  ", ""]),
                strings(&["Ghost", "1:00"]),
            ],
        )
        .clean();
        assert_eq!(table.rows, vec![strings(&["Ana", "8:00"])]);
    }

    #[test]
    fn table_without_marker_is_kept_whole() {
        let table = ReportTable::new(
            strings(&["Nome"]),
            vec![strings(&["Ana"]), strings(&["Bruno"])],
        )
        .clean();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn table_without_name_column_is_not_truncated() {
        let table = ReportTable::new(
            strings(&["Colaborador"]),
            vec![strings(&["Resumo"]), strings(&["Ana"])],
        )
        .clean();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn to_values_pads_short_rows_to_header_width() {
        let table = ReportTable::new(
            strings(&["Nome", "Horas"]),
            vec![strings(&["Ana"])],
        );
        assert_eq!(
            table.to_values(),
            vec![strings(&["Nome", "Horas"]), strings(&["Ana", ""])]
        );
    }
}
