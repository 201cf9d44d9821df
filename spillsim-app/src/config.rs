use anyhow::{Context, Result};
use spillsim_core::SpillSimError;
use spillsim_schemas::{file_formats::OilCatalogFile, oil::OilProperties};
use std::{collections::BTreeMap, fs, path::Path};

/// Oil types available to a run, keyed by `oil_type_id`.
#[derive(Debug, Clone, Default)]
pub struct OilCatalog {
    pub oil_types: BTreeMap<String, OilProperties>,
}

impl OilCatalog {
    /// Loads a single catalog file, or every catalog file in a directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        println!("Loading oil catalog from '{}'...", path.display());

        let mut oil_types = BTreeMap::new();
        if path.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(path)
                .with_context(|| format!("Failed to read directory: {:?}", path))?
            {
                let file = entry?.path();
                if file.is_file() && is_catalog_file(&file) {
                    files.push(file);
                }
            }
            // Later files override earlier ones, so keep the order stable.
            files.sort();
            for file in files {
                load_catalog_file_into_map(&file, &mut oil_types)?;
            }
        } else {
            load_catalog_file_into_map(path, &mut oil_types)?;
        }

        if oil_types.is_empty() {
            anyhow::bail!("No oil types found in {:?}", path);
        }

        println!("Oil catalog loaded successfully ({} oil types).", oil_types.len());
        Ok(Self { oil_types })
    }

    pub fn names(&self) -> Vec<String> {
        self.oil_types.keys().cloned().collect()
    }

    pub fn get(&self, oil_type_id: &str) -> Result<&OilProperties, SpillSimError> {
        self.oil_types
            .get(oil_type_id)
            .ok_or_else(|| SpillSimError::UnknownOilType {
                name: oil_type_id.to_string(),
                available: self.names(),
            })
    }
}

fn is_catalog_file(path: &Path) -> bool {
    path.extension()
        .map_or(false, |s| s == "yaml" || s == "yml" || s == "json")
}

fn load_catalog_file_into_map(
    path: &Path,
    map: &mut BTreeMap<String, OilProperties>,
) -> Result<()> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| SpillSimError::FileIO(display.clone(), e))?;

    let file: OilCatalogFile = if path.extension().map_or(false, |s| s == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| SpillSimError::YamlParsing(display, e))?
    };
    log::debug!(
        "Catalog {:?} (schema {}) holds {} oil types",
        path,
        file.schema_version,
        file.oil_types.len()
    );

    for entry in file.oil_types {
        let mut properties = entry.properties;
        if properties.name == OilProperties::default().name {
            properties.name = entry.oil_type_id.clone();
        }
        map.insert(entry.oil_type_id, properties);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const YAML: &str = r#"
schema_version: "1.0"
oil_types:
  - oil_type_id: crude
    name: Crude Oil
    density: 0.87
    evaporation_rate: 0.3
  - oil_type_id: diesel
    density: 0.84
    evaporation_rate: 0.6
"#;

    #[test]
    fn loads_a_single_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oils.yaml");
        fs::write(&path, YAML).unwrap();

        let catalog = OilCatalog::load(&path).unwrap();
        assert_eq!(catalog.names(), vec!["crude", "diesel"]);
        assert_eq!(catalog.get("crude").unwrap().name, "Crude Oil");
        // Unnamed entries take their id as display name.
        assert_eq!(catalog.get("diesel").unwrap().name, "diesel");
        assert_eq!(catalog.get("diesel").unwrap().viscosity, 50.0);
    }

    #[test]
    fn merges_a_directory_of_yaml_and_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), YAML).unwrap();
        fs::write(
            dir.path().join("b.json"),
            r#"{"schema_version": "1.0", "oil_types": [{"oil_type_id": "gasoline", "evaporation_rate": 0.9}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = OilCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.names(), vec!["crude", "diesel", "gasoline"]);
        assert_eq!(catalog.get("gasoline").unwrap().evaporation_rate, 0.9);
    }

    #[test]
    fn unknown_oil_lists_available_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oils.yml");
        fs::write(&path, YAML).unwrap();

        let catalog = OilCatalog::load(&path).unwrap();
        match catalog.get("bitumen") {
            Err(SpillSimError::UnknownOilType { name, available }) => {
                assert_eq!(name, "bitumen");
                assert_eq!(available, vec!["crude", "diesel"]);
            }
            other => panic!("expected UnknownOilType, got {:?}", other),
        }
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(OilCatalog::load(dir.path().join("nope.yaml")).is_err());
        assert!(OilCatalog::load(dir.path()).is_err());
    }
}
