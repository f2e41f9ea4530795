//! Loading the exported spreadsheet.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::{ReportError, ReportResult, ReportTable};

/// Leading rows of export preamble before the header row.
pub const PREAMBLE_ROWS: usize = 3;

/// Load the export at `path`, skipping the format preamble.
pub fn load_report(path: &Path) -> ReportResult<ReportTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::Shape("workbook has no sheets".into()))??;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    from_rows(rows, PREAMBLE_ROWS)
}

/// Shape raw rows into a table: skip `skip` preamble rows, then one header
/// row, then data.
pub fn from_rows(rows: Vec<Vec<String>>, skip: usize) -> ReportResult<ReportTable> {
    let mut rows = rows.into_iter().skip(skip);
    let headers = rows.next().ok_or_else(|| {
        ReportError::Shape(format!("no header row after {skip} preamble rows"))
    })?;
    Ok(ReportTable::new(headers, rows.collect()))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Excel stores integers as floats; keep "123" instead of "123.0".
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn from_rows_skips_the_preamble() {
        let rows = vec![
            strings(&["Relatório de Auditoria"]),
            strings(&["Empresa X"]),
            strings(&[""]),
            strings(&["Matrícula", "Nome"]),
            strings(&["001", "Ana"]),
        ];
        let table = from_rows(rows, PREAMBLE_ROWS).unwrap();
        assert_eq!(table.headers, strings(&["Matrícula", "Nome"]));
        assert_eq!(table.rows, vec![strings(&["001", "Ana"])]);
    }

    #[test]
    fn missing_header_row_is_a_shape_error() {
        let rows = vec![strings(&["only"]), strings(&["preamble"])];
        let err = from_rows(rows, PREAMBLE_ROWS).unwrap_err();
        assert!(matches!(err, ReportError::Shape(_)));
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(123.0)), "123");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }
}
