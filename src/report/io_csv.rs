// Primitives for reading CSV files.

use crate::report::{io_common::decode_text, *};

/// Reads a CSV export into a grid of text cells.
///
/// The exports use `;` as the separator and may quote their cells. Lines may
/// have different numbers of cells.
pub fn read_csv_text(text: &str) -> AppResult<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut grid: Grid = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_text: lineno: {:?} cells: {:?}", lineno, line.len());
        grid.push(line.iter().map(|s| Cell::from(unquote(s))).collect());
    }
    Ok(grid)
}

// The reader only honours a quote at the very start of a field, so
// ` "Alice" ` is still quoted after the trim.
fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

pub fn read_csv_bytes(bytes: &[u8]) -> AppResult<Grid> {
    read_csv_text(&decode_text(bytes))
}

pub fn read_csv_file(path: &str) -> AppResult<Grid> {
    let bytes = fs::read(path).context(ReadingFileSnafu { path })?;
    read_csv_bytes(&bytes)
}
