//! Writing results to JSON, flattened CSV and GeoJSON.

use crate::error::SpillSimError;
use serde::Serialize;
use serde_json::{json, Map, Value};
use spillsim_schemas::dispersal::DispersalResult;
use std::{fs, path::Path};

pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), SpillSimError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| SpillSimError::FileIO(path.display().to_string(), e))
}

/// Flattens nested objects into `parent_child` keys. Arrays and empty objects
/// are kept whole as JSON text; strings are written without quotes.
pub fn flatten_json(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(value, "", &mut rows);
    rows
}

fn flatten_into(value: &Value, parent_key: &str, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let new_key = if parent_key.is_empty() {
                    key.clone()
                } else {
                    format!("{}_{}", parent_key, key)
                };
                flatten_into(child, &new_key, rows);
            }
        }
        Value::String(s) => rows.push((parent_key.to_string(), s.clone())),
        other => rows.push((parent_key.to_string(), other.to_string())),
    }
}

/// Writes any serializable value as a two-column `Parameter,Value` CSV.
pub fn write_parameter_csv<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), SpillSimError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let value = serde_json::to_value(value)?;

    let mut writer = csv::Writer::from_path(path).map_err(|e| SpillSimError::CsvError(display.clone(), e))?;
    writer
        .write_record(["Parameter", "Value"])
        .map_err(|e| SpillSimError::CsvError(display.clone(), e))?;
    for (key, val) in flatten_json(&value) {
        writer
            .write_record([key, val])
            .map_err(|e| SpillSimError::CsvError(display.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| SpillSimError::FileIO(display, e))
}

/// GeoJSON `Feature` for the footprint. Coordinates are `[lon, lat]` and the
/// ring is explicitly closed.
pub fn footprint_geojson(result: &DispersalResult, properties: Map<String, Value>) -> Value {
    let mut ring: Vec<[f64; 2]> = result.polygon.iter().map(|&(lat, lon)| [lon, lat]).collect();
    if let Some(&first) = ring.first() {
        ring.push(first);
    }

    let mut properties = properties;
    properties.insert("area_km2".to_string(), json!(result.area_km2));
    properties.insert("thickness_mm".to_string(), json!(result.thickness_mm));

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn result() -> DispersalResult {
        DispersalResult {
            area_km2: 2.0,
            polygon: vec![(10.0, 20.0), (10.1, 20.0), (10.0, 20.1)],
            center: (10.0, 20.0),
            thickness_mm: 0.3,
            evaporated_fraction: 0.6,
            dissolved_fraction: 0.01,
            surface_fraction: 0.39,
        }
    }

    #[test]
    fn flattens_nested_objects() {
        let value = json!({
            "oil_type": "diesel",
            "oil_fractions": { "evaporated": 0.5, "surface": 0.5 },
            "center": [1.0, 2.0],
            "empty": {},
        });
        let rows = flatten_json(&value);
        assert!(rows.contains(&("oil_type".to_string(), "diesel".to_string())));
        assert!(rows.contains(&("oil_fractions_evaporated".to_string(), "0.5".to_string())));
        assert!(rows.contains(&("center".to_string(), "[1.0,2.0]".to_string())));
        assert!(rows.contains(&("empty".to_string(), "{}".to_string())));
    }

    #[test]
    fn geojson_ring_is_closed_and_lon_first() {
        let feature = footprint_geojson(&result(), Map::new());
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring[0], json!([20.0, 10.0]));
        assert_eq!(feature["properties"]["area_km2"], json!(2.0));
    }

    #[test]
    fn writes_json_and_csv() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("dispersal.json");
        let csv_path = dir.path().join("summary.csv");

        write_json(&json_path, &result()).unwrap();
        write_parameter_csv(&csv_path, &result()).unwrap();

        let parsed: DispersalResult =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, result());

        let csv_text = fs::read_to_string(&csv_path).unwrap();
        assert!(csv_text.starts_with("Parameter,Value"));
        assert!(csv_text.contains("thickness,0.3"));
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = tempdir().unwrap();
        let err = write_json(dir.path().join("missing").join("x.json"), &result()).unwrap_err();
        assert!(matches!(err, SpillSimError::FileIO(..)));
    }
}
