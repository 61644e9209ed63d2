//! Types d'erreurs pour le crate scpc

use thiserror::Error;

/// Catégorie d'erreur, conservée de bout en bout pour permettre à l'appelant
/// de choisir la réponse protocolaire adaptée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Paramètres manquants, inconnus ou invalides
    Validation,
    /// Marqueur attendu absent d'une page distante (jeton, structure)
    Protocol,
    /// Le service distant ne trouve pas la feuille, la parcelle ou son centre
    NotFound,
    /// Réponse distante inexploitable (statut, type de document, transport)
    Upstream,
    /// Violation d'un invariant interne
    Internal,
}

/// Erreurs pouvant survenir lors de la récupération d'un extrait
#[derive(Debug, Error)]
pub enum ScpcError {
    /// Paramètre obligatoire absent
    #[error("Le paramètre '{0}' est obligatoire.")]
    MissingParameter(&'static str),

    /// Paramètre présent mais invalide
    #[error("Paramètre '{name}' invalide : {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Code commune absent de la table des communes
    #[error("Commune inconnue")]
    UnknownCommune(String),

    /// Marqueur attendu absent d'une page SCPC
    #[error("Réponse SCPC inattendue ({page}) : {reason}")]
    Protocol { page: &'static str, reason: String },

    /// Recherche aboutie mais sans résultat exploitable
    #[error("{0}")]
    NotFound(&'static str),

    /// Statut HTTP non 2xx renvoyé par SCPC
    #[error("SCPC a répondu {status} sur {page}")]
    Status { page: &'static str, status: u16 },

    /// Le document final n'est pas un PDF
    #[error("Impossible de récupérer le document")]
    NotAPdf { content_type: Option<String> },

    /// Erreur de transport HTTP
    #[error("Requête HTTP échouée : {0}")]
    Http(#[from] reqwest::Error),

    /// Invariant interne non respecté
    #[error("Erreur interne : {0}")]
    Internal(String),
}

/// Messages des erreurs `NotFound`
pub const SHEET_NOT_FOUND: &str = "Feuille non trouvée";
pub const PARCEL_NOT_FOUND: &str = "Parcelle non trouvée";
pub const CENTER_NOT_FOUND: &str = "Impossible de localiser le centre de la parcelle";

impl ScpcError {
    /// Crée une erreur de protocole avec contexte
    pub fn protocol(page: &'static str, reason: impl Into<String>) -> Self {
        Self::Protocol {
            page,
            reason: reason.into(),
        }
    }

    /// Crée une erreur de paramètre invalide
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter(_) | Self::InvalidParameter { .. } | Self::UnknownCommune(_) => {
                ErrorKind::Validation
            }
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Status { .. } | Self::NotAPdf { .. } | Self::Http(_) => ErrorKind::Upstream,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Statut HTTP à renvoyer au client du service
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter(_)
            | Self::InvalidParameter { .. }
            | Self::UnknownCommune(_)
            | Self::NotFound(_) => 400,
            Self::NotAPdf { .. } | Self::Internal(_) => 500,
            Self::Protocol { .. } | Self::Status { .. } | Self::Http(_) => 502,
        }
    }

    /// Identifiant stable de l'erreur
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "missing_parameter",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::UnknownCommune(_) => "unknown_commune",
            Self::Protocol { .. } => "protocol_error",
            Self::NotFound(SHEET_NOT_FOUND) => "sheet_not_found",
            Self::NotFound(PARCEL_NOT_FOUND) => "parcel_not_found",
            Self::NotFound(_) => "not_found",
            Self::Status { .. } => "upstream_status",
            Self::NotAPdf { .. } => "not_a_pdf",
            Self::Http(_) => "upstream_unreachable",
            Self::Internal(_) => "internal_error",
        }
    }
}
