use crate::types::{RiskLevel, RiskObservation};
use std::io::{self, Write};

/// Prints the high-risk subset of the table as aligned columns. Takes the
/// writer as a parameter; `main` passes stdout.
pub fn print_high_risk<W: Write>(observations: &[RiskObservation], out: &mut W) -> io::Result<()> {
    writeln!(out, "-------- ZONAS DE ALTO RIESGO --------")?;
    writeln!(
        out,
        "{:<10} {:<15} {:<15} {:>10} {:>10}  {}",
        "Asic", "Municipio", "Zona", "Latitud", "Longitud", "Notas"
    )?;

    for obs in observations.iter().filter(|o| o.riesgo == RiskLevel::Alto) {
        writeln!(
            out,
            "{:<10} {:<15} {:<15} {:>10.4} {:>10.4}  {}",
            obs.asic,
            obs.municipio,
            obs.zona,
            obs.point.y(),
            obs.point.x(),
            obs.notas
        )?;
    }

    Ok(())
}
