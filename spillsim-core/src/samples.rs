//! Batch input: a CSV of sample spills, one scenario per row.

use crate::error::SpillSimError;
use spillsim_schemas::file_formats::SampleSpill;
use std::path::Path;

pub fn read_sample_spills<P: AsRef<Path>>(path: P) -> Result<Vec<SampleSpill>, SpillSimError> {
    let display = path.as_ref().display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .map_err(|e| SpillSimError::CsvError(display.clone(), e))?;

    reader
        .deserialize()
        .map(|record| record.map_err(|e| SpillSimError::CsvError(display.clone(), e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spillsim_schemas::environment::LocationType;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_rows_with_optional_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        fs::write(
            &path,
            "name,volume_barrels,latitude,longitude,oil_type,time_hours,wind_speed_kmh,water_temp_c,wave_height_m,location_type,environmental_sensitivity\n\
             Gulf platform,5000,28.7,-88.4,crude,48,15,26,1.2,open_ocean,\n\
             Harbour bunkering, 120, 51.9, 4.1, heavy_fuel,,,,,port,1.5\n",
        )
        .unwrap();

        let spills = read_sample_spills(&path).unwrap();
        assert_eq!(spills.len(), 2);

        assert_eq!(spills[0].name, "Gulf platform");
        assert_eq!(spills[0].time_hours, Some(48.0));
        assert_eq!(spills[0].water_temp_c, Some(26.0));
        assert_eq!(spills[0].environmental_sensitivity, None);

        assert_eq!(spills[1].volume_barrels, 120.0);
        assert_eq!(spills[1].oil_type, "heavy_fuel");
        assert_eq!(spills[1].time_hours, None);
        assert_eq!(spills[1].location_type, Some(LocationType::Port));
        assert_eq!(spills[1].environmental_sensitivity, Some(1.5));
    }

    #[test]
    fn minimal_columns_are_enough() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        fs::write(&path, "name,volume_barrels,latitude,longitude,oil_type\nA,10,0,0,diesel\n").unwrap();

        let spills = read_sample_spills(&path).unwrap();
        assert_eq!(spills[0].oil_type, "diesel");
        assert_eq!(spills[0].wind_speed_kmh, None);
        assert_eq!(spills[0].location_type, None);
    }

    #[test]
    fn malformed_rows_are_reported_with_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        fs::write(&path, "name,volume_barrels,latitude,longitude,oil_type\nA,lots,0,0,diesel\n").unwrap();

        match read_sample_spills(&path) {
            Err(SpillSimError::CsvError(file, _)) => assert!(file.ends_with("samples.csv")),
            other => panic!("expected a CSV error, got {:?}", other),
        }
    }
}
