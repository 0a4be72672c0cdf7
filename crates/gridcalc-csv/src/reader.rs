//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use gridcalc_core::Grid;

/// Delimited file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a delimited file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let path = path.as_ref();
        let file = File::open(path)?;
        log::debug!("loading grid from {}", path.display());
        Self::read(file, options)
    }

    /// Read delimited text from a reader into a grid
    ///
    /// Each non-blank line becomes one row; the column count is the largest
    /// field count of any row. Quote characters are ordinary data.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            if Self::is_blank(&record) {
                continue;
            }
            rows.push(record.iter().map(String::from).collect::<Vec<_>>());
        }

        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.iter().any(|row| row.len() != widest) {
            log::warn!(
                "ragged rows in delimited input; padding to {} columns",
                widest
            );
        }

        let grid = Grid::from_rows(rows)?;
        log::debug!("loaded {}x{} grid", grid.rows(), grid.cols());
        Ok(grid)
    }

    fn is_blank(record: &csv::StringRecord) -> bool {
        record.iter().all(|field| field.trim().is_empty()) && record.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::Error;
    use pretty_assertions::assert_eq;

    fn read(text: &str) -> CsvResult<Grid> {
        CsvReader::read(text.as_bytes(), &CsvReadOptions::default())
    }

    #[test]
    fn test_read_rows() {
        let grid = read("1,2,3\nA1+B1,x,SUM(A1..C1)\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.get(1, 3), Some("3"));
        assert_eq!(grid.get(2, 1), Some("A1+B1"));
        assert_eq!(grid.get(2, 3), Some("SUM(A1..C1)"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let grid = read("1,2\n\n   \n3,4\r\n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(2, 1), Some("3"));
        assert_eq!(grid.get(2, 2), Some("4"));
    }

    #[test]
    fn test_ragged_rows() {
        let grid = read("1\n1,2,3\n1,2\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.get(1, 2), Some(""));
        assert_eq!(grid.get(3, 3), Some(""));
    }

    #[test]
    fn test_quotes_are_data() {
        let grid = read("\"a,b\",c\n").unwrap();
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(1, 1), Some("\"a"));
        assert_eq!(grid.get(1, 2), Some("b\""));
    }

    #[test]
    fn test_empty_input() {
        let grid = read("").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (0, 0));
    }

    #[test]
    fn test_too_many_rows() {
        let text = "1\n".repeat(gridcalc_core::MAX_ROWS + 1);
        assert!(matches!(
            read(&text),
            Err(crate::CsvError::Core(Error::SizeLimitExceeded { .. }))
        ));
    }

    #[test]
    fn test_custom_delimiter() {
        let grid = CsvReader::read("1;2\n".as_bytes(), &CsvReadOptions { delimiter: b';' }).unwrap();
        assert_eq!(grid.get(1, 2), Some("2"));
    }
}
