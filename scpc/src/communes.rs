//! Table des communes (code INSEE → nom)
//!
//! Chargée une seule fois au démarrage depuis un fichier JSON
//! `[{"code": "38185", "nom": "Grenoble"}, ...]`, puis consultée en lecture seule.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::Commune;

/// Erreur de chargement de la table des communes
#[derive(Debug, thiserror::Error)]
pub enum CommunesError {
    #[error("Impossible de lire {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Table des communes invalide: {0}")]
    Json(#[from] serde_json::Error),
}

/// Table immuable des communes indexée par code
#[derive(Debug, Default)]
pub struct Communes {
    by_code: HashMap<String, Commune>,
}

impl Communes {
    /// Construit la table depuis une liste d'enregistrements.
    /// En cas de doublon, le premier enregistrement est conservé.
    pub fn from_records(records: Vec<Commune>) -> Self {
        let mut by_code = HashMap::with_capacity(records.len());
        for commune in records {
            by_code.entry(commune.code.clone()).or_insert(commune);
        }
        Self { by_code }
    }

    /// Charge la table depuis un flux JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CommunesError> {
        let records: Vec<Commune> = serde_json::from_reader(reader)?;
        Ok(Self::from_records(records))
    }

    /// Charge la table depuis un fichier JSON
    pub fn from_path(path: &Path) -> Result<Self, CommunesError> {
        let file = File::open(path).map_err(|source| CommunesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Recherche une commune par son code INSEE
    pub fn resolve(&self, code: &str) -> Option<&Commune> {
        self.by_code.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Code département d'un code commune, complété à 3 caractères par des zéros.
/// DOM (préfixe "97") : 3 caractères, sinon 2 ("75056" → "075", "97411" → "974").
/// Aucune vérification du résultat.
pub fn department_code(code: &str) -> String {
    let len = if code.starts_with("97") { 3 } else { 2 };
    let prefix: String = code.chars().take(len).collect();
    format!("{:0>3}", prefix)
}

/// Nom de commune tel qu'attendu par le formulaire SCPC :
/// sans diacritiques et en majuscules ("Saint-Étienne" → "SAINT-ETIENNE")
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        // Lettres sans décomposition canonique
        match c {
            'æ' | 'Æ' => out.push_str("AE"),
            'œ' | 'Œ' => out.push_str("OE"),
            'ß' => out.push_str("SS"),
            'ø' | 'Ø' => out.push('O'),
            'đ' | 'Đ' => out.push('D'),
            'ł' | 'Ł' => out.push('L'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}
