//! CSV export for forecasts and held-out predictions.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::forecast::ForecastRow;
use crate::pipeline::TestPrediction;

/// Column header for forecast export.
pub const FORECAST_HEADER: &[&str] = &["date", "predicted_demand"];

/// Column header for held-out prediction export.
pub const PREDICTIONS_HEADER: &[&str] = &["date", "actual_demand", "predicted_demand"];

/// Exports forecast rows to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_forecast_csv(rows: &[ForecastRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_forecast_csv(rows, io::BufWriter::new(file))
}

/// Writes forecast rows as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_forecast_csv(rows: &[ForecastRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(FORECAST_HEADER)?;
    for r in rows {
        wtr.write_record(&[r.date.to_string(), format!("{:.4}", r.predicted_demand)])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports held-out predictions to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_predictions_csv(rows: &[TestPrediction], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_predictions_csv(rows, io::BufWriter::new(file))
}

/// Writes held-out predictions as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_predictions_csv(rows: &[TestPrediction], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PREDICTIONS_HEADER)?;
    for r in rows {
        wtr.write_record(&[
            r.date.to_string(),
            format!("{:.4}", r.actual_demand),
            format!("{:.4}", r.predicted_demand),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn forecast_row(day: u32) -> ForecastRow {
        ForecastRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            day_of_year: 365 + day,
            predicted_demand: 250.0 + f64::from(day),
        }
    }

    #[test]
    fn forecast_header_and_rows() {
        let rows: Vec<ForecastRow> = (1..=7).map(forecast_row).collect();
        let mut buf = Vec::new();
        write_forecast_csv(&rows, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "date,predicted_demand");
        assert_eq!(lines[1], "2024-01-01,251.0000");
    }

    #[test]
    fn predictions_are_parseable() {
        let rows = vec![TestPrediction {
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            actual_demand: 300.0,
            predicted_demand: 287.5,
        }];
        let mut buf = Vec::new();
        write_predictions_csv(&rows, &mut buf).unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        assert_eq!(rdr.headers().map(csv::StringRecord::len).ok(), Some(3));
        let records: Vec<csv::StringRecord> = rdr.records().filter_map(|r| r.ok()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "2023-05-01");
        assert_eq!(records[0][2].parse::<f64>().ok(), Some(287.5));
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.csv");
        export_forecast_csv(&[forecast_row(1)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,predicted_demand"));
    }
}
