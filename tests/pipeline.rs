use mapa_riesgo::config::{InvalidRowPolicy, MapConfig};
use mapa_riesgo::{data, render, report};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const HEADER: &str = "Asic,Municipio,Zona,Latitud,Longitud,Riesgo,Notas";

fn write_csv(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("riesgo_oropouche.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    path
}

fn map_config() -> MapConfig {
    MapConfig {
        center_lat: 11.0,
        center_lon: -64.0,
        zoom: 10,
    }
}

#[test]
fn single_row_produces_one_red_marker_with_full_popup() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &["A1,Porlamar,Centro,11.01,-63.85,Alto,test"]);

    let observations = data::load_risk_table(&csv, InvalidRowPolicy::Abort).unwrap();
    let doc = render::build_map(&map_config(), &[], &observations);

    assert_eq!(doc.markers.len(), 1);
    let marker = &doc.markers[0];
    assert_eq!(marker.color, "#FF0000");
    assert_eq!((marker.lat, marker.lon), (11.01, -63.85));
    for field in ["A1", "Porlamar", "Centro", "Alto", "test"] {
        assert!(marker.popup.contains(field), "popup missing {:?}", field);
    }

    let out = dir.path().join("mapa_riesgo_oropouche.html");
    render::write_html(&doc, &out).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("#FF0000"));
    assert!(html.contains("A1"));
}

#[test]
fn rerunning_with_unchanged_input_yields_same_marker_count() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        &[
            "A1,Porlamar,Centro,11.01,-63.85,Alto,focos",
            "A2,Pampatar,Costa,10.99,-63.79,Medio,vigilancia",
            "A3,Juangriego,Norte,11.08,-63.96,Bajo,sin casos",
        ],
    );

    let first = data::load_risk_table(&csv, InvalidRowPolicy::Abort).unwrap();
    let second = data::load_risk_table(&csv, InvalidRowPolicy::Abort).unwrap();

    let doc_a = render::build_map(&map_config(), &[], &first);
    let doc_b = render::build_map(&map_config(), &[], &second);
    assert_eq!(doc_a.markers.len(), 3);
    assert_eq!(doc_a.markers.len(), doc_b.markers.len());
}

#[test]
fn map_without_boundary_still_renders_markers_and_legend() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, &["A1,Porlamar,Centro,11.01,-63.85,Medio,nota"]);

    let observations = data::load_risk_table(&csv, InvalidRowPolicy::Abort).unwrap();
    // No polygon matched the region name; the boundary layer must simply
    // be absent.
    let doc = render::build_map(&map_config(), &[], &observations);
    assert!(doc.boundary_geojson.is_none());

    let out = dir.path().join("mapa.html");
    render::write_html(&doc, &out).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(!html.contains("L.geoJSON"));
    assert!(html.contains("markerClusterGroup"));
    assert!(html.contains("Leyenda"));
}

#[test]
fn reporter_prints_exactly_the_high_risk_rows() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        &[
            "A1,Porlamar,Centro,11.01,-63.85,Alto,focos",
            "A2,Pampatar,Costa,10.99,-63.79,Bajo,sin casos",
        ],
    );

    let observations = data::load_risk_table(&csv, InvalidRowPolicy::Abort).unwrap();
    let mut buf = Vec::new();
    report::print_high_risk(&observations, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let data_rows: Vec<&str> = text
        .lines()
        .skip(2) // banner and column header
        .collect();
    assert_eq!(data_rows.len(), 1);
    assert!(data_rows[0].contains("Porlamar"));
    assert!(!text.contains("Pampatar"));
}
