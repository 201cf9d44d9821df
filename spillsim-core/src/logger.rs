use crate::error::SpillSimError;
use csv::Writer;
use serde::{Deserialize, Serialize};
use spillsim_schemas::dispersal::DispersalResult;
use std::fs;
use std::io;
use std::path::Path;

/// One row of a time sweep log. Nested values are stored as JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time_hours: f64,
    pub area_km2: f64,
    pub thickness_mm: f64,
    pub evaporated: f64,
    pub dissolved: f64,
    pub surface: f64,
    pub center_json: String,
    pub polygon_json: String,
}

pub struct TimeSeriesLogger {
    writer: Writer<fs::File>,
}

impl TimeSeriesLogger {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_result(&mut self, time_hours: f64, result: &DispersalResult) -> Result<(), anyhow::Error> {
        let entry = LogEntry {
            time_hours,
            area_km2: result.area_km2,
            thickness_mm: result.thickness_mm,
            evaporated: result.evaporated_fraction,
            dissolved: result.dissolved_fraction,
            surface: result.surface_fraction,
            center_json: serde_json::to_string(&result.center)?,
            polygon_json: serde_json::to_string(&result.polygon)?,
        };

        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads a log written by `TimeSeriesLogger` back into memory.
pub fn read_time_series<P: AsRef<Path>>(path: P) -> Result<Vec<LogEntry>, SpillSimError> {
    let display = path.as_ref().display().to_string();
    let mut reader =
        csv::Reader::from_path(path.as_ref()).map_err(|e| SpillSimError::CsvError(display.clone(), e))?;

    reader
        .deserialize()
        .map(|record| record.map_err(|e| SpillSimError::CsvError(display.clone(), e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn result(area_km2: f64) -> DispersalResult {
        DispersalResult {
            area_km2,
            polygon: vec![(1.0, 2.0), (1.1, 2.0), (1.0, 2.1)],
            center: (1.0, 2.0),
            thickness_mm: 0.5,
            evaporated_fraction: 0.5,
            dissolved_fraction: 0.01,
            surface_fraction: 0.49,
        }
    }

    #[test]
    fn logged_rows_read_back_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.csv");

        let mut logger = TimeSeriesLogger::new(&path).unwrap();
        logger.log_result(6.0, &result(0.5)).unwrap();
        logger.log_result(12.0, &result(0.8)).unwrap();
        drop(logger);

        let rows = read_time_series(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time_hours, 6.0);
        assert_eq!(rows[1].area_km2, 0.8);

        let polygon: Vec<(f64, f64)> = serde_json::from_str(&rows[1].polygon_json).unwrap();
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn missing_log_is_a_csv_error() {
        let dir = tempdir().unwrap();
        let err = read_time_series(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, SpillSimError::CsvError(..)));
    }
}
