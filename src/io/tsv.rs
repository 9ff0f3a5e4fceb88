//! Tab-separated measurement files
//!
//! Reads and writes the four-column benchmark format:
//! `x <TAB> map <TAB> unordered_map <TAB> RedBlackTree`, one row per line,
//! with a header line that carries no information and is discarded.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim, WriterBuilder};
use log::{debug, info};

use crate::models::BenchmarkTable;
use crate::{BmkError, Result};

/// Number of fields every data row must have
pub const FIELD_COUNT: usize = 4;

const DELIMITER: u8 = b'\t';

/// Load a measurement file whose first line is a header
///
/// Columns are relabeled `[x_column, "map", "unordered_map", "RedBlackTree"]`
/// regardless of what the header says.
pub fn load(path: impl AsRef<Path>, x_column: &str) -> Result<BenchmarkTable> {
    load_with(path, x_column, true)
}

/// Load a measurement file, optionally without a header line
pub fn load_with(path: impl AsRef<Path>, x_column: &str, has_header: bool) -> Result<BenchmarkTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BmkError::NotFound(path.to_path_buf()),
        _ => BmkError::IoError(e),
    })?;

    let table = read(file, x_column, has_header)?;
    info!(
        "Loaded {} rows from {} ({})",
        table.row_count(),
        path.display(),
        x_column
    );
    Ok(table)
}

/// Parse measurements from any reader
pub fn read<R: Read>(reader: R, x_column: &str, has_header: bool) -> Result<BenchmarkTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(has_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(parse_row(&record, line)?);
    }

    debug!("Parsed {} data rows", rows.len());
    Ok(BenchmarkTable::from_rows(x_column, &rows))
}

fn parse_row(record: &ByteRecord, line: u64) -> Result<[f64; FIELD_COUNT]> {
    if record.len() != FIELD_COUNT {
        return Err(BmkError::DataFormat {
            line,
            message: format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        });
    }

    let mut row = [0.0; FIELD_COUNT];
    for (slot, field) in row.iter_mut().zip(record.iter()) {
        *slot = std::str::from_utf8(field)
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| BmkError::DataFormat {
                line,
                message: format!("'{}' is not a number", String::from_utf8_lossy(field)),
            })?;
    }
    Ok(row)
}

/// Write a table in the same tab-separated format, header first
pub fn write<W: Write>(table: &BenchmarkTable, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);

    writer.write_record(table.labels())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a table to `path`, replacing any existing file
pub fn save(table: &BenchmarkTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write(table, file)?;
    info!("Wrote {} rows to {}", table.row_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const SAMPLE: &str = "#nodes\tmap\tunordered_map\tRBTree\n10\t5.0\t2.0\t4.0\n100\t50.0\t20.0\t40.0\n";

    #[test]
    fn test_read_sample() {
        let table = read(Cursor::new(SAMPLE), "#nodes", true).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.labels(), vec!["#nodes", "map", "unordered_map", "RedBlackTree"]);
        assert_eq!(table.column("map").unwrap().values, vec![5.0, 50.0]);
        assert_eq!(table.column("RedBlackTree").unwrap().values, vec![4.0, 40.0]);
    }

    #[test]
    fn test_header_is_positional_only() {
        let data = "a\tb\tc\td\n1\t2\t3\t4\n";
        let table = read(Cursor::new(data), "#elements", true).unwrap();
        assert_eq!(table.labels()[0], "#elements");
        assert_eq!(table.row(0), Some(vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_non_utf8_header_tolerated() {
        let mut data = b"x\ttime (\xb5s)\tb\tc\n".to_vec();
        data.extend_from_slice(b"1\t2\t3\t4\n");
        let table = read(Cursor::new(data), "#nodes", true).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_without_header_keeps_first_row() {
        let data = "50\t0.1\t0.05\t0.2\n100\t0.2\t0.06\t0.3\n";
        let table = read(Cursor::new(data), "#nodes", false).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.x().values, vec![50.0, 100.0]);
    }

    #[test]
    fn test_three_fields_is_format_error() {
        let data = "h\th\th\th\n10\t5.0\t2.0\t4.0\n100\t50.0\t20.0\n";
        match read(Cursor::new(data), "#nodes", true) {
            Err(BmkError::DataFormat { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("found 3"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field_is_format_error() {
        let data = "h\th\th\th\n10\tfast\t2.0\t4.0\n";
        let err = read(Cursor::new(data), "#nodes", true).unwrap_err();
        assert!(matches!(err, BmkError::DataFormat { line: 2, .. }));
        assert!(err.to_string().contains("fast"));
    }

    #[test]
    fn test_non_finite_field_is_format_error() {
        let data = "h\th\th\th\n10\tNaN\t2.0\t4.0\n";
        assert!(matches!(
            read(Cursor::new(data), "#nodes", true),
            Err(BmkError::DataFormat { .. })
        ));
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let data = "h\th\th\th\r\n10\t1\t2\t3\r\n\r\n20\t4\t5\t6\r\n";
        let table = read(Cursor::new(data), "#nodes", true).unwrap();
        assert_eq!(table.x().values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");
        match load(&path, "#nodes") {
            Err(BmkError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bmk_measures.txt");
        let table = BenchmarkTable::from_rows(
            "#nodes",
            &[[50.0, 0.12, 0.031, 0.173], [100.0, 0.1375, 0.0299, 1.0e-3 / 3.0]],
        );

        save(&table, &path).unwrap();
        let reloaded = load(&path, "#nodes").unwrap();
        assert_eq!(reloaded, table);
    }
}
