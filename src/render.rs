use crate::config::MapConfig;
use crate::types::{RiskLevel, RiskObservation};
use anyhow::{Context, Result};
use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pure description of the finished map: everything `write_html` needs,
/// nothing bound to a live rendering context.
#[derive(Debug)]
pub struct MapDocument {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    /// GeoJSON FeatureCollection of the boundary, None when no region
    /// matched (the layer is simply absent from the output).
    pub boundary_geojson: Option<String>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub color: &'static str,
    pub popup: String,
}

/// Transforms boundary polygons and observations into a `MapDocument`.
/// One marker per observation, in input order.
pub fn build_map(
    config: &MapConfig,
    boundary: &[MultiPolygon<f64>],
    observations: &[RiskObservation],
) -> MapDocument {
    let boundary_geojson = if boundary.is_empty() {
        None
    } else {
        let features = boundary
            .iter()
            .map(|mp| Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(mp))),
                id: None,
                properties: None,
                foreign_members: None,
            })
            .collect();
        let collection = FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        };
        Some(GeoJson::from(collection).to_string())
    };

    let markers = observations
        .iter()
        .map(|obs| Marker {
            lat: obs.point.y(),
            lon: obs.point.x(),
            color: obs.riesgo.color(),
            popup: popup_html(obs),
        })
        .collect();

    MapDocument {
        center_lat: config.center_lat,
        center_lon: config.center_lon,
        zoom: config.zoom,
        boundary_geojson,
        markers,
    }
}

fn popup_html(obs: &RiskObservation) -> String {
    format!(
        "<div style='font-size: 16px;'>\
         <b>Asic:</b> {}<br>\
         <b>Municipio:</b> {}<br>\
         <b>Zona:</b> {}<br>\
         <b>Riesgo:</b> {}<br>\
         <b>Notas:</b> {}\
         </div>",
        escape_html(&obs.asic),
        escape_html(&obs.municipio),
        escape_html(&obs.zona),
        obs.riesgo,
        escape_html(&obs.notas),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn legend_html() -> String {
    let mut rows = String::new();
    for level in RiskLevel::ALL {
        rows.push_str(&format!(
            "    <i class=\"fa fa-circle\" style=\"color:{}\"></i> Riesgo {} ({})<br>\n",
            level.color(),
            level,
            level.prevalence_range()
        ));
    }
    format!(
        "<div style=\"position: fixed; bottom: 50px; left: 50px; width: 190px; height: 120px; \
         border: 2px solid grey; background: white; padding: 10px; z-index: 9999;\">\n\
             <b>Leyenda:</b><br>\n{}</div>",
        rows
    )
}

/// Serializes the document to a single self-contained Leaflet HTML page and
/// writes it to `path`, overwriting any existing file.
pub fn write_html(doc: &MapDocument, path: &Path) -> Result<()> {
    let html = render_html(doc)?;
    fs::write(path, html).with_context(|| format!("Failed to write map HTML: {:?}", path))?;
    Ok(())
}

fn render_html(doc: &MapDocument) -> Result<String> {
    let markers_json =
        serde_json::to_string(&doc.markers).context("Failed to serialize markers")?;

    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\"/>\n\
         <title>Mapa de riesgo Oropouche</title>\n\
         <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\"/>\n\
         <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css\"/>\n\
         <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css\"/>\n\
         <link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css\"/>\n\
         <script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n\
         <script src=\"https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js\"></script>\n\
         <style>html, body, #map { height: 100%; margin: 0; }</style>\n\
         </head>\n\
         <body>\n\
         <div id=\"map\"></div>\n",
    );

    html.push_str(&legend_html());
    html.push_str("\n<script>\n");
    html.push_str(&format!(
        "var map = L.map('map').setView([{}, {}], {});\n",
        doc.center_lat, doc.center_lon, doc.zoom
    ));
    html.push_str(
        "L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {\n\
             maxZoom: 19,\n\
             attribution: '&copy; OpenStreetMap contributors'\n\
         }).addTo(map);\n",
    );

    if let Some(boundary) = &doc.boundary_geojson {
        html.push_str(&format!(
            "L.geoJSON({}, {{\n\
                 style: function() {{ return {{fillColor: \"#cccccc\", color: \"#000000\", weight: 1}}; }}\n\
             }}).addTo(map);\n",
            boundary
        ));
    }

    html.push_str(&format!("var markers = {};\n", markers_json));
    html.push_str(
        "var cluster = L.markerClusterGroup();\n\
         markers.forEach(function(m) {\n\
             L.circleMarker([m.lat, m.lon], {\n\
                 radius: 20,\n\
                 color: m.color,\n\
                 fill: true,\n\
                 fillColor: m.color,\n\
                 fillOpacity: 0.7\n\
             }).bindPopup(m.popup, { maxWidth: 500 }).addTo(cluster);\n\
         });\n\
         map.addLayer(cluster);\n",
    );
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}
