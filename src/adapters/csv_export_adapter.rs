//! CSV sink adapter: writes the (Date, index_level) series.

use crate::domain::error::IndexError;
use crate::domain::index_series::IndexSeries;
use crate::ports::export_port::ExportPort;
use std::fs;

pub struct CsvExportAdapter;

impl ExportPort for CsvExportAdapter {
    /// Writes exactly two columns in ascending date order. Dates use the
    /// format detected in the source; levels are fixed to 2 decimals.
    fn write(&self, series: &IndexSeries, output_path: &str) -> Result<(), IndexError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        wtr.write_record(["Date", "index_level"])
            .map_err(csv_io_error)?;
        for row in &series.rows {
            wtr.write_record([
                row.date.format(&series.date_format).to_string(),
                format!("{:.2}", row.index_level),
            ])
            .map_err(csv_io_error)?;
        }

        let buffer = wtr
            .into_inner()
            .map_err(|e| IndexError::Io(std::io::Error::other(e)))?;
        fs::write(output_path, buffer)?;
        Ok(())
    }
}

fn csv_io_error(e: csv::Error) -> IndexError {
    IndexError::Io(std::io::Error::other(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::index_series::IndexRow;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn row(y: i32, m: u32, d: u32, level: f64) -> IndexRow {
        IndexRow {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            daily_return: 0.0,
            cumulative_value: level,
            index_level: level,
        }
    }

    #[test]
    fn writes_two_columns_with_fixed_decimals() {
        let series = IndexSeries {
            rows: vec![row(2020, 2, 3, 100.0), row(2020, 2, 4, 105.13)],
            date_format: "%Y-%m-%d".into(),
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        CsvExportAdapter
            .write(&series, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Date,index_level\n2020-02-03,100.00\n2020-02-04,105.13\n"
        );
    }

    #[test]
    fn dates_use_the_source_format() {
        let series = IndexSeries {
            rows: vec![row(2020, 2, 3, 100.0)],
            date_format: "%d/%m/%Y".into(),
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        CsvExportAdapter
            .write(&series, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Date,index_level\n03/02/2020,100.00\n");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let series = IndexSeries {
            rows: vec![row(2020, 2, 3, 100.0)],
            date_format: "%Y-%m-%d".into(),
        };
        let err = CsvExportAdapter
            .write(&series, "/nonexistent/dir/export.csv")
            .unwrap_err();
        assert!(matches!(err, IndexError::Io(_)));
    }
}
