use crate::config::InvalidRowPolicy;
use crate::types::{RiskLevel, RiskObservation};
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use geo::{MultiPolygon, Point};
use serde::Deserialize;
use shapefile::Reader;
use std::fs::File;
use std::path::Path;

const REGION_NAME_FIELD: &str = "NAME_1";

/// Loads the administrative boundary shapefile and keeps the polygons whose
/// NAME_1 attribute equals `region_name`. An empty result is not an error;
/// the renderer simply draws no boundary layer.
pub fn load_boundary(path: &Path, region_name: &str) -> Result<Vec<MultiPolygon<f64>>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open boundary shapefile: {:?}", path))?;

    let mut polygons = Vec::new();

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;

        let name_value = record
            .get(REGION_NAME_FIELD)
            .ok_or_else(|| anyhow!("Field '{}' not found in shapefile", REGION_NAME_FIELD))?;

        let name = match name_value {
            shapefile::dbase::FieldValue::Character(Some(s)) => s.clone(),
            shapefile::dbase::FieldValue::Character(None) => continue,
            _ => return Err(anyhow!("Field '{}' must be a string", REGION_NAME_FIELD)),
        };

        if name != region_name {
            continue;
        }

        let geometry = match shape {
            shapefile::Shape::Polygon(polygon) => {
                let geo_polygon: MultiPolygon<f64> = polygon
                    .try_into()
                    .map_err(|e| anyhow!("Failed to convert polygon: {:?}", e))?;
                geo_polygon
            }
            shapefile::Shape::PolygonM(polygon) => {
                let geo_polygon: MultiPolygon<f64> = polygon
                    .try_into()
                    .map_err(|e| anyhow!("Failed to convert polygonM: {:?}", e))?;
                geo_polygon
            }
            shapefile::Shape::PolygonZ(polygon) => {
                let geo_polygon: MultiPolygon<f64> = polygon
                    .try_into()
                    .map_err(|e| anyhow!("Failed to convert polygonZ: {:?}", e))?;
                geo_polygon
            }
            _ => continue, // Skip non-polygon shapes
        };

        polygons.push(geometry);
    }

    Ok(polygons)
}

// Raw CSV row, before coordinate and risk-label validation. Coordinates are
// read as strings so a bad value surfaces as an InvalidRecord for that row
// instead of a serde type error for the whole file.
#[derive(Debug, Deserialize)]
struct RiskRow {
    #[serde(rename = "Asic")]
    asic: String,
    #[serde(rename = "Municipio")]
    municipio: String,
    #[serde(rename = "Zona")]
    zona: String,
    #[serde(rename = "Latitud")]
    latitud: String,
    #[serde(rename = "Longitud")]
    longitud: String,
    #[serde(rename = "Riesgo")]
    riesgo: String,
    #[serde(rename = "Notas")]
    notas: String,
}

/// Loads the risk table and geocodes each row into a WGS84 point. Input row
/// order is preserved. Rows that fail validation either abort the run or are
/// dropped with a warning, per `policy`.
pub fn load_risk_table(path: &Path, policy: InvalidRowPolicy) -> Result<Vec<RiskObservation>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open risk CSV file: {:?}", path))?;
    let mut rdr = ReaderBuilder::new().from_reader(file);

    let mut observations = Vec::new();

    for (i, result) in rdr.deserialize::<RiskRow>().enumerate() {
        let line = i + 2; // line 1 is the header
        let row = result.with_context(|| format!("Failed to parse CSV row at line {}", line))?;

        match validate_row(row) {
            Ok(obs) => observations.push(obs),
            Err(e) => match policy {
                InvalidRowPolicy::Abort => {
                    return Err(e).with_context(|| format!("Invalid record at line {}", line));
                }
                InvalidRowPolicy::Skip => {
                    tracing::warn!("Skipping invalid record at line {}: {:#}", line, e);
                }
            },
        }
    }

    Ok(observations)
}

fn validate_row(row: RiskRow) -> Result<RiskObservation> {
    let lat: f64 = row
        .latitud
        .trim()
        .parse()
        .with_context(|| format!("Non-numeric Latitud: {:?}", row.latitud))?;
    let lon: f64 = row
        .longitud
        .trim()
        .parse()
        .with_context(|| format!("Non-numeric Longitud: {:?}", row.longitud))?;
    let riesgo: RiskLevel = row.riesgo.parse()?;

    Ok(RiskObservation {
        asic: row.asic,
        municipio: row.municipio,
        zona: row.zona,
        riesgo,
        notas: row.notas,
        point: Point::new(lon, lat),
    })
}
