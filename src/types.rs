use geo::Point;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown risk level: {0:?} (expected Alto, Medio or Bajo)")]
pub struct UnknownRiskLevel(pub String);

/// Risk classification for a surveyed zone. The labels are the Spanish
/// values used in the source CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Alto,
    Medio,
    Bajo,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Alto, RiskLevel::Medio, RiskLevel::Bajo];

    /// Fixed marker color for the level. Infallible once a label has been
    /// parsed into a `RiskLevel`.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Alto => "#FF0000",
            RiskLevel::Medio => "#FFA500",
            RiskLevel::Bajo => "#00FF00",
        }
    }

    /// Static prevalence annotation shown in the legend. Presentation text
    /// only, not computed from the data.
    pub fn prevalence_range(self) -> &'static str {
        match self {
            RiskLevel::Alto => "65-85%",
            RiskLevel::Medio => "35-60%",
            RiskLevel::Bajo => "10-30%",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Alto" => Ok(RiskLevel::Alto),
            "Medio" => Ok(RiskLevel::Medio),
            "Bajo" => Ok(RiskLevel::Bajo),
            other => Err(UnknownRiskLevel(other.to_string())),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Alto => "Alto",
            RiskLevel::Medio => "Medio",
            RiskLevel::Bajo => "Bajo",
        };
        f.write_str(label)
    }
}

/// One row of the risk table, geocoded at load time. The point is built
/// from (Longitud, Latitud) under WGS84 and never transformed.
#[derive(Debug, Clone)]
pub struct RiskObservation {
    pub asic: String,
    pub municipio: String,
    pub zona: String,
    pub riesgo: RiskLevel,
    pub notas: String,
    pub point: Point<f64>,
}
