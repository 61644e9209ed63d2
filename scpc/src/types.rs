//! Types de données pour le crate scpc

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Une commune (code INSEE et nom)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Commune {
    /// Code INSEE (ex: "38185", "97411")
    pub code: String,

    /// Nom officiel, accents compris
    #[serde(rename = "nom")]
    pub name: String,
}

/// Paramètres bruts fournis par l'appelant, avant validation
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchParams {
    pub commune: Option<String>,
    pub prefixe: Option<String>,
    pub section: Option<String>,
    pub parcelle: Option<String>,
    pub echelle: Option<String>,
    pub taille: Option<String>,
    pub orientation: Option<String>,
}

/// Format du papier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
}

impl PaperSize {
    /// Interprète la valeur fournie : tout ce qui n'est pas A3 donne A4
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("A3") => Self::A3,
            _ => Self::A4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A3 => "A3",
            Self::A4 => "A4",
        }
    }
}

/// Orientation de la page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Paysage,
}

impl Orientation {
    /// Interprète la valeur fournie : tout ce qui n'est pas "paysage" donne Portrait
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("paysage") => Self::Paysage,
            _ => Self::Portrait,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Paysage => "Paysage",
        }
    }
}

/// Requête validée, prête à être envoyée à SCPC
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub commune: Commune,
    pub prefixe: String,
    pub section: String,
    pub parcelle: String,
    /// Échelle (1000 = 1:1000)
    pub echelle: u32,
    pub taille: PaperSize,
    pub orientation: Orientation,
}

impl SearchRequest {
    /// Référence lisible de la parcelle (pour les logs)
    pub fn reference(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.commune.code, self.prefixe, self.section, self.parcelle
        )
    }
}

/// Identifiants extraits de la page de résultat de recherche
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIdentifiers {
    /// Identifiant de feuille (12 caractères)
    pub feuille_id: String,

    /// Identifiant de parcelle (14 caractères)
    pub parcelle_id: String,
}

/// Centre de la parcelle dans la projection du service distant
pub type ParcelCenter = Coord<f64>;

/// Emprise à imprimer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintBBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PrintBBox {
    /// Valeur du champ MAPBBOX : `xMin,yMin,xMax,yMax` à 3 décimales
    pub fn to_param(&self) -> String {
        [self.x_min, self.y_min, self.x_max, self.y_max]
            .iter()
            .map(|coord| format_coord(*coord))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formate une coordonnée à 3 décimales
pub fn format_coord(value: f64) -> String {
    format!("{:.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_size_from_param() {
        assert_eq!(PaperSize::from_param(Some("A3")), PaperSize::A3);
        assert_eq!(PaperSize::from_param(Some("a3")), PaperSize::A3);
        assert_eq!(PaperSize::from_param(Some("A4")), PaperSize::A4);
        assert_eq!(PaperSize::from_param(Some("A0")), PaperSize::A4);
        assert_eq!(PaperSize::from_param(None), PaperSize::A4);
    }

    #[test]
    fn test_orientation_from_param() {
        assert_eq!(
            Orientation::from_param(Some("paysage")),
            Orientation::Paysage
        );
        assert_eq!(
            Orientation::from_param(Some("Paysage")),
            Orientation::Paysage
        );
        assert_eq!(
            Orientation::from_param(Some("portrait")),
            Orientation::Portrait
        );
        assert_eq!(Orientation::from_param(None), Orientation::Portrait);
    }

    #[test]
    fn test_bbox_param_order() {
        let bbox = PrintBBox {
            x_min: 1.0,
            x_max: 3.0,
            y_min: 2.0,
            y_max: 4.12345,
        };
        assert_eq!(bbox.to_param(), "1.000,2.000,3.000,4.123");
    }

    #[test]
    fn test_commune_json_field() {
        let commune: Commune =
            serde_json::from_str(r#"{"code": "38185", "nom": "Grenoble"}"#).unwrap();
        assert_eq!(commune.name, "Grenoble");
    }
}
