use std::io::Cursor;

use calamine::{open_workbook_auto, DataType, Range, Reader, Xlsx};

use crate::report::*;

/// Reads one worksheet of a workbook (xlsx, xlsm, xlsb, xls or ods).
///
/// The first worksheet is used when no name is given.
pub fn read_excel_file(path: &str, worksheet: Option<&str>) -> AppResult<Grid> {
    let mut workbook = open_workbook_auto(path).context(OpeningWorkbookSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?,
        None => workbook.worksheet_range_at(0).context(EmptyWorkbookSnafu {})?,
    }
    .context(OpeningWorkbookSnafu { path })?;
    Ok(range_to_grid(&wrange))
}

/// Reads one worksheet of an in-memory xlsx workbook.
pub fn read_xlsx_bytes(bytes: Vec<u8>, worksheet: Option<&str>) -> AppResult<Grid> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).context(OpeningXlsxSnafu {})?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?,
        None => workbook.worksheet_range_at(0).context(EmptyWorkbookSnafu {})?,
    }
    .context(OpeningXlsxSnafu {})?;
    Ok(range_to_grid(&wrange))
}

/// Converts a calamine range into a grid anchored at cell A1.
///
/// A range starts at its first non-empty cell, so leading empty rows and
/// columns are restored: the template is positional.
pub fn range_to_grid(wrange: &Range<DataType>) -> Grid {
    let (first_row, first_col) = wrange.start().unwrap_or((0, 0));
    debug!(
        "range_to_grid: start: {:?} size: {:?}",
        (first_row, first_col),
        wrange.get_size()
    );
    let mut grid: Grid = vec![Vec::new(); first_row as usize];
    for row in wrange.rows() {
        let mut cells: Vec<Cell> = vec![Cell::Empty; first_col as usize];
        cells.extend(row.iter().map(read_cell_calamine));
        grid.push(cells);
    }
    grid
}

fn read_cell_calamine(cell: &DataType) -> Cell {
    match cell {
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        // Serial date numbers are kept as numbers.
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::String(s) => Cell::from(s.trim()),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        // Errors (#DIV/0!, ...) and empty cells.
        _ => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell_calamine(&DataType::Int(7)), Cell::Number(7.0));
        assert_eq!(read_cell_calamine(&DataType::Float(0.5)), Cell::Number(0.5));
        assert_eq!(
            read_cell_calamine(&DataType::String(" Alice ".to_string())),
            Cell::from("Alice")
        );
        assert_eq!(
            read_cell_calamine(&DataType::String("  ".to_string())),
            Cell::Empty
        );
        assert_eq!(read_cell_calamine(&DataType::Empty), Cell::Empty);
        assert_eq!(
            read_cell_calamine(&DataType::Bool(true)),
            Cell::Text("true".to_string())
        );
    }

    #[test]
    fn offset_ranges_are_anchored() {
        let mut wrange: Range<DataType> = Range::new((1, 1), (2, 2));
        wrange.set_value((1, 1), DataType::String("Alice".to_string()));
        wrange.set_value((2, 2), DataType::Float(3.0));
        let grid = range_to_grid(&wrange);
        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1][0], Cell::Empty);
        assert_eq!(grid[1][1], Cell::from("Alice"));
        assert_eq!(grid[2][2], Cell::Number(3.0));
    }

    #[test]
    fn empty_range() {
        let wrange: Range<DataType> = Range::empty();
        assert!(range_to_grid(&wrange).is_empty());
    }

    #[test]
    fn not_a_workbook() {
        let e = read_xlsx_bytes(b"not a zip".to_vec(), None).unwrap_err();
        assert!(e.to_string().starts_with("error opening workbook"));
    }
}
