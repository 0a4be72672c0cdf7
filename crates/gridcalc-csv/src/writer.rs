//! CSV writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use gridcalc_core::Grid;

/// Delimited file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid to a delimited file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        log::debug!(
            "saving {}x{} grid to {}",
            grid.rows(),
            grid.cols(),
            path.display()
        );
        Self::write(grid, BufWriter::new(file), options)
    }

    /// Write a grid to a writer
    ///
    /// Fields are written without quoting or escaping, so a field containing
    /// the delimiter does not read back as one field.
    pub fn write<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(terminator);
        let mut csv_writer = builder.from_writer(writer);

        for row in 1..=grid.rows() {
            if grid.cols() <= 1 && grid.row_cells(row).all(str::is_empty) {
                // csv writes an empty single-field record as `""`
                csv_writer.flush()?;
                let mut inner = csv_writer.into_inner().map_err(|e| e.into_error())?;
                inner.write_all(options.line_terminator.as_bytes())?;
                csv_writer = builder.from_writer(inner);
                continue;
            }
            csv_writer.write_record(grid.row_cells(row))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CsvReadOptions, CsvReader};
    use pretty_assertions::assert_eq;

    fn write(grid: &Grid, options: &CsvWriteOptions) -> String {
        let mut out = Vec::new();
        CsvWriter::write(grid, &mut out, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_rows() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(1, 1, "1").unwrap();
        grid.set(1, 2, "2").unwrap();
        grid.set(2, 3, "SUM(A1..B1)").unwrap();

        assert_eq!(
            write(&grid, &CsvWriteOptions::default()),
            "1,2,\n,,SUM(A1..B1)\n"
        );
    }

    #[test]
    fn test_crlf_terminator() {
        let grid = Grid::from_rows(vec![vec!["a".into(), "b".into()]]).unwrap();
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::CRLF,
            ..CsvWriteOptions::default()
        };
        assert_eq!(write(&grid, &options), "a,b\r\n");
    }

    #[test]
    fn test_empty_fields_are_not_quoted() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set(1, 1, "a").unwrap();
        grid.set(3, 1, "b").unwrap();
        assert_eq!(write(&grid, &CsvWriteOptions::default()), "a\n\nb\n");

        let grid = Grid::new(1, 3).unwrap();
        assert_eq!(write(&grid, &CsvWriteOptions::default()), ",,\n");
    }

    #[test]
    fn test_quote_characters_are_data() {
        let grid = Grid::from_rows(vec![vec!["say \"hi\"".into(), "x".into()]]).unwrap();
        let options = CsvWriteOptions {
            delimiter: b';',
            ..CsvWriteOptions::default()
        };
        assert_eq!(write(&grid, &options), "say \"hi\";x\n");
    }

    #[test]
    fn test_embedded_delimiter_is_not_escaped() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.set(1, 1, "a,b").unwrap();
        grid.set(1, 2, "c").unwrap();

        let text = write(&grid, &CsvWriteOptions::default());
        assert_eq!(text, "a,b,c\n");

        // Known limitation: the field splits on the way back in
        let reread = CsvReader::read(text.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(reread.cols(), 3);
        assert_eq!(reread.get(1, 1), Some("a"));
    }

    #[test]
    fn test_file_roundtrip() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(1, 1, "10").unwrap();
        grid.set(2, 1, "20").unwrap();
        grid.set(3, 1, "SUM(A1..A2)").unwrap();
        grid.set(3, 2, "total").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        CsvWriter::write_file(&grid, &path, &CsvWriteOptions::default()).unwrap();

        let loaded = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();
        assert_eq!(loaded, grid);
    }
}
