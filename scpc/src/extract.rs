//! Extraction des données utiles dans les pages HTML de SCPC
//!
//! Le trait [`Extractor`] isole la stratégie d'extraction du reste du workflow :
//! l'implémentation par défaut repose sur des expressions régulières.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ScpcError, CENTER_NOT_FOUND, PARCEL_NOT_FOUND, SHEET_NOT_FOUND};
use crate::protocol::{pages, patterns};
use crate::types::{ExtractedIdentifiers, ParcelCenter};

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::TOKEN).expect("TOKEN pattern to compile"));
static SHEET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::SHEET_ID).expect("SHEET_ID pattern to compile"));
static PARCEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::PARCEL_ID).expect("PARCEL_ID pattern to compile"));
static CENTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(patterns::CENTER).expect("CENTER pattern to compile"));

/// Extraction des identifiants et du centre de parcelle
pub trait Extractor: Send + Sync {
    /// Identifiants de feuille et de parcelle depuis la page de résultat
    fn identifiers(&self, html: &str) -> Result<ExtractedIdentifiers, ScpcError>;

    /// Centre de la parcelle depuis la page carte
    fn center(&self, html: &str) -> Result<ParcelCenter, ScpcError>;
}

/// Extraction par expressions régulières
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl Extractor for RegexExtractor {
    fn identifiers(&self, html: &str) -> Result<ExtractedIdentifiers, ScpcError> {
        let feuille_id = first_capture(&SHEET_RE, html).ok_or(ScpcError::NotFound(SHEET_NOT_FOUND))?;
        let parcelle_id =
            first_capture(&PARCEL_RE, html).ok_or(ScpcError::NotFound(PARCEL_NOT_FOUND))?;

        Ok(ExtractedIdentifiers {
            feuille_id: feuille_id.to_string(),
            parcelle_id: parcelle_id.to_string(),
        })
    }

    fn center(&self, html: &str) -> Result<ParcelCenter, ScpcError> {
        let caps = CENTER_RE
            .captures(html)
            .ok_or(ScpcError::NotFound(CENTER_NOT_FOUND))?;

        let x = parse_number(&caps[1]).ok_or(ScpcError::NotFound(CENTER_NOT_FOUND))?;
        let y = parse_number(&caps[2]).ok_or(ScpcError::NotFound(CENTER_NOT_FOUND))?;

        Ok(ParcelCenter { x, y })
    }
}

/// Extrait le jeton anti-rejeu de la page de recherche
pub fn extract_token(html: &str) -> Result<String, ScpcError> {
    first_capture(&TOKEN_RE, html)
        .map(str::to_string)
        .ok_or_else(|| ScpcError::protocol(pages::SEARCH_BY_REFERENCE, "jeton CSRF absent"))
}

fn first_capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    fast_float::parse::<f64, _>(s).ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "A1B2-C3D4-E5F6-G7H8-I9J0-K1L2-M3N4-O5P6";

    #[test]
    fn test_extract_token() {
        let html = format!(
            r#"<form action="rechercherParReferenceCadastrale.do?CSRF_TOKEN={}" method="post">"#,
            TOKEN
        );
        assert_eq!(extract_token(&html).unwrap(), TOKEN);
    }

    #[test]
    fn test_extract_token_missing() {
        let err = extract_token("<html>Session expirée</html>").unwrap_err();
        assert!(matches!(err, ScpcError::Protocol { .. }));

        // 7 groupes seulement
        let err = extract_token("CSRF_TOKEN=A1B2-C3D4-E5F6-G7H8-I9J0-K1L2-M3N4").unwrap_err();
        assert!(matches!(err, ScpcError::Protocol { .. }));
    }

    #[test]
    fn test_identifiers() {
        let html = r#"<a href="afficherCarteParcelle.do?p=AB1234567890CD&f=ABCDEF012345">"#;
        let ids = RegexExtractor.identifiers(html).unwrap();
        assert_eq!(ids.feuille_id, "ABCDEF012345");
        assert_eq!(ids.parcelle_id, "AB1234567890CD");
    }

    #[test]
    fn test_sheet_missing_with_parcel_present() {
        let html = r#"<a href="afficherCarteParcelle.do?p=AB1234567890CD">"#;
        let err = RegexExtractor.identifiers(html).unwrap_err();
        assert!(matches!(err, ScpcError::NotFound(SHEET_NOT_FOUND)));
    }

    #[test]
    fn test_parcel_missing_with_sheet_present() {
        let html = r#"<a href="afficherCarteFeuille.do?f=ABCDEF012345">"#;
        let err = RegexExtractor.identifiers(html).unwrap_err();
        assert!(matches!(err, ScpcError::NotFound(PARCEL_NOT_FOUND)));
    }

    #[test]
    fn test_center() {
        let html = "var centre = new Point(650000.123,6860000.456);";
        let center = RegexExtractor.center(html).unwrap();
        assert_eq!(center.x, 650000.123);
        assert_eq!(center.y, 6860000.456);

        let spaced = RegexExtractor.center("new Point( 912.5 , -3 )").unwrap();
        assert_eq!(spaced.x, 912.5);
        assert_eq!(spaced.y, -3.0);
    }

    #[test]
    fn test_center_not_numeric() {
        for html in ["new Point(x,y)", "new Point(,12.5)", "no map here"] {
            let err = RegexExtractor.center(html).unwrap_err();
            assert!(matches!(err, ScpcError::NotFound(CENTER_NOT_FOUND)), "{html}");
        }
    }
}
