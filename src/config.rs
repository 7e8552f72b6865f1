use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    pub map: MapConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub boundary_shapefile: PathBuf,
    /// Exact match against the NAME_1 attribute of the boundary shapefile.
    pub region_name: String,
    pub risk_csv: PathBuf,
    #[serde(default)]
    pub on_invalid_row: InvalidRowPolicy,
}

/// What to do with a CSV row whose coordinates or risk label fail to parse.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Fail the whole run on the first bad row.
    #[default]
    Abort,
    /// Warn and drop the row, keeping the rest.
    Skip,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub map_html: PathBuf,
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml_src = r#"
            [input]
            boundary_shapefile = "data/gadm41_VEN_2.shp"
            region_name = "Nueva Esparta"
            risk_csv = "data/riesgo_oropouche.csv"
            on_invalid_row = "skip"

            [map]
            center_lat = 11.0
            center_lon = -64.0
            zoom = 10

            [output]
            map_html = "mapa_riesgo_oropouche.html"
        "#;
        let config: AppConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.input.region_name, "Nueva Esparta");
        assert_eq!(config.input.on_invalid_row, InvalidRowPolicy::Skip);
        assert_eq!(config.map.zoom, 10);
        assert_eq!(
            config.output.map_html,
            PathBuf::from("mapa_riesgo_oropouche.html")
        );
    }

    #[test]
    fn invalid_row_policy_defaults_to_abort() {
        let toml_src = r#"
            [input]
            boundary_shapefile = "data/gadm41_VEN_2.shp"
            region_name = "Nueva Esparta"
            risk_csv = "data/riesgo_oropouche.csv"

            [map]
            center_lat = 11.0
            center_lon = -64.0
            zoom = 10

            [output]
            map_html = "out.html"
        "#;
        let config: AppConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.input.on_invalid_row, InvalidRowPolicy::Abort);
    }
}
