//! CSV export of a (filtered) dataset.

use super::Dataset;
use crate::error::{AirqError, Result};
use crate::models::Pollutant;
use std::io::Write;

const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Dataset {
    /// Write the dataset as CSV without an index column.
    ///
    /// Column order is `datetime,station`, the six pollutants, then any extra
    /// columns from the source file. Missing values become empty cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = vec!["datetime", "station"];
        header.extend(Pollutant::ALL.iter().map(|p| p.as_str()));
        header.extend(self.extra_columns().iter().map(String::as_str));
        writer.write_record(&header)?;

        for record in self.records() {
            let mut row = Vec::with_capacity(header.len());
            row.push(record.datetime.format(EXPORT_TIMESTAMP_FORMAT).to_string());
            row.push(record.station.clone());
            for pollutant in Pollutant::ALL {
                row.push(
                    record
                        .value(pollutant)
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                );
            }
            row.extend(record.extra.iter().cloned());
            writer.write_record(&row)?;
        }

        writer.flush().map_err(AirqError::from)?;
        Ok(())
    }

    /// Render the dataset as a CSV string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| AirqError::Other(e.to_string()))
    }
}
