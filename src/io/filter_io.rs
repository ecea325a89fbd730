use std::fs;
use std::path::Path;

use crate::io::config_io::StoreError;
use crate::model::filter::FilterSet;

/// Read filters.json from the config directory. Missing or corrupt
/// state degrades to an empty filter set rather than failing the run.
pub fn read_filters(config_dir: &Path) -> FilterSet {
    let path = config_dir.join("filters.json");
    let Ok(content) = fs::read_to_string(&path) else {
        return FilterSet::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Write filters.json to the config directory.
pub fn write_filters(config_dir: &Path, filters: &FilterSet) -> Result<(), StoreError> {
    fs::create_dir_all(config_dir)?;
    let path = config_dir.join("filters.json");
    let content = serde_json::to_string_pretty(filters)?;
    fs::write(&path, content)?;
    Ok(())
}
