//! CSV loading.
//!
//! Expected layout is one row per station-hour with a `datetime` and a
//! `station` column. Pollutant columns are optional; any other columns are
//! carried through untouched so an export reproduces them.

use super::{Dataset, Observation};
use crate::error::{AirqError, Result};
use crate::models::Pollutant;
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Cell contents treated as a missing measurement.
pub const MISSING_MARKERS: [&str; 8] = ["", "NA", "NaN", "nan", "N/A", "null", "NULL", "None"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp cell. Bare dates resolve to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Where each CSV column goes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Datetime,
    Station,
    Pollutant(Pollutant),
    Extra,
}

struct Layout {
    columns: Vec<Column>,
    extra_names: Vec<String>,
}

impl Layout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut columns = Vec::with_capacity(headers.len());
        let mut extra_names = Vec::new();
        let mut seen_pollutants = [false; 6];
        let (mut has_datetime, mut has_station) = (false, false);

        for header in headers.iter() {
            let name = header.trim();
            let column = match name {
                "datetime" if !has_datetime => {
                    has_datetime = true;
                    Column::Datetime
                }
                "station" if !has_station => {
                    has_station = true;
                    Column::Station
                }
                _ => match Pollutant::from_column(name) {
                    Some(p) if !seen_pollutants[p.index()] => {
                        seen_pollutants[p.index()] = true;
                        Column::Pollutant(p)
                    }
                    _ => Column::Extra,
                },
            };
            if column == Column::Extra {
                extra_names.push(name.to_string());
            }
            columns.push(column);
        }

        if !has_datetime {
            return Err(AirqError::MissingColumn {
                column: "datetime".into(),
            });
        }
        if !has_station {
            return Err(AirqError::MissingColumn {
                column: "station".into(),
            });
        }

        Ok(Self {
            columns,
            extra_names,
        })
    }

    fn parse_row(&self, record: &csv::StringRecord, row: usize) -> Result<Observation> {
        let mut station = None;
        let mut datetime = None;
        let mut values = [None; 6];
        let mut extra = Vec::with_capacity(self.extra_names.len());

        for (column, cell) in self.columns.iter().zip(record.iter()) {
            match column {
                Column::Datetime => {
                    datetime = Some(parse_timestamp(cell).ok_or_else(|| {
                        AirqError::InvalidTimestamp {
                            row,
                            value: cell.to_string(),
                        }
                    })?);
                }
                Column::Station => station = Some(cell.trim().to_string()),
                Column::Pollutant(p) => values[p.index()] = parse_measurement(cell, *p, row)?,
                Column::Extra => extra.push(cell.to_string()),
            }
        }

        // The reader is not flexible, so every column is present.
        let (Some(station), Some(datetime)) = (station, datetime) else {
            return Err(AirqError::Csv {
                message: format!("row {} is missing datetime or station", row),
                row: Some(row),
            });
        };

        Ok(Observation {
            station,
            datetime,
            values,
            extra,
        })
    }
}

fn parse_measurement(cell: &str, pollutant: Pollutant, row: usize) -> Result<Option<f64>> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell) {
        return Ok(None);
    }
    let value: f64 = cell.parse().map_err(|_| AirqError::Csv {
        message: format!("row {}: {} value {:?} is not a number", row, pollutant, cell),
        row: Some(row),
    })?;
    Ok(value.is_finite().then_some(value))
}

impl Dataset {
    /// Read a dataset from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let layout = Layout::from_headers(reader.headers()?)?;
        let mut records = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let record = result?;
            records.push(layout.parse_row(&record, row)?);
        }

        debug!(
            "Parsed {} rows with {} extra columns",
            records.len(),
            layout.extra_names.len()
        );
        Ok(Dataset::new(layout.extra_names, records))
    }

    /// Read a dataset from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AirqError::FileNotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path).map_err(|e| AirqError::io_with_path(e, path))?;
        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        info!(
            "Loaded {} observations from {} ({} stations)",
            dataset.len(),
            path.display(),
            dataset.stations().len()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
No,datetime,station,PM2.5,PM10,SO2,NO2,CO,O3,TEMP
1,2013-03-01 00:00:00,Aotizhongxin,4,4,4,7,300,77,-0.7
2,2013-03-01 01:00:00,Aotizhongxin,8,8,NA,7,300,77,-1.1
3,2013-03-01 00:00:00,Changping,3,6,13,,300,85,-2.3
";

    #[test]
    fn test_parse_sample() {
        let data = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.extra_columns(), &["No".to_string(), "TEMP".to_string()]);

        let first = &data.records()[0];
        assert_eq!(first.station, "Aotizhongxin");
        assert_eq!(first.value(Pollutant::PM25), Some(4.0));
        assert_eq!(first.value(Pollutant::CO), Some(300.0));
        assert_eq!(first.extra, vec!["1".to_string(), "-0.7".to_string()]);

        assert_eq!(data.records()[1].value(Pollutant::SO2), None);
        assert_eq!(data.records()[2].value(Pollutant::NO2), None);
    }

    #[test]
    fn test_missing_pollutant_column_reads_as_none() {
        let csv = "datetime,station,PM25\n2013-03-01,A,1.5\n";
        let data = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data.records()[0].value(Pollutant::PM25), Some(1.5));
        assert_eq!(data.records()[0].value(Pollutant::O3), None);
    }

    #[test]
    fn test_missing_station_column() {
        let csv = "datetime,PM25\n2013-03-01,1.5\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AirqError::MissingColumn { ref column } if column == "station"));
    }

    #[test]
    fn test_bad_timestamp_reports_row() {
        let csv = "datetime,station\n2013-03-01,A\nyesterday,B\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AirqError::InvalidTimestamp { row: 2, ref value } if value == "yesterday"));
    }

    #[test]
    fn test_non_numeric_measurement() {
        let csv = "datetime,station,CO\n2013-03-01,A,lots\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AirqError::Csv { row: Some(1), .. }));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let csv = "datetime,station,CO\n2013-03-01,A\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AirqError::Csv { .. }));
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2013-03-01 05:00:00").is_some());
        assert!(parse_timestamp("2013-03-01T05:00:00").is_some());
        assert!(parse_timestamp("2013-03-01 05:00").is_some());
        let midnight = parse_timestamp("2013-03-01").unwrap();
        assert_eq!(midnight.format("%H:%M").to_string(), "00:00");
        assert!(parse_timestamp("03/01/2013").is_none());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Dataset::from_path(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, AirqError::FileNotFound(_)));
    }
}
