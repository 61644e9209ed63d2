//! Table de configuration du protocole SCPC
//!
//! Regroupe tout ce qui dépend de l'application distante : chemins des pages,
//! noms des champs de formulaire, valeurs fixes et gabarits d'impression.
//! Une évolution du site SCPC ne devrait toucher que ce module.

/// URL de base du service SCPC
pub const DEFAULT_BASE_URL: &str = "https://www.cadastre.gouv.fr/scpc";

/// Nom du paramètre portant le jeton anti-rejeu
pub const TOKEN_PARAM: &str = "CSRF_TOKEN";

/// Pages et formulaires (suffixés par `.do` côté serveur)
pub mod pages {
    /// Page fournissant le jeton, et formulaire de recherche par référence
    pub const SEARCH_BY_REFERENCE: &str = "rechercherParReferenceCadastrale";
    /// Affichage du formulaire de recherche
    pub const SEARCH_FORM: &str = "afficherRechercherPlanCad";
    /// Affichage de la carte d'une parcelle
    pub const PARCEL_MAP: &str = "afficherCarteParcelle";
    /// Impression de l'extrait
    pub const PRINT_EXTRACT: &str = "imprimerExtraitCadastral";
}

/// Champs du formulaire de recherche par référence cadastrale
pub mod search {
    pub const CITY: &str = "ville";
    pub const DEPARTMENT_CODE: &str = "codeDepartement";
    pub const SEARCH_TYPE: &str = "rechercheType";
    pub const PARCEL_PREFIX: &str = "prefixeParcelle";
    pub const SECTION: &str = "sectionLibelle";
    pub const PARCEL_NUMBER: &str = "numeroParcelle";
    pub const SHEET_PREFIX: &str = "prefixeFeuille";

    /// Recherche par référence de parcelle
    pub const SEARCH_TYPE_PARCEL: &str = "1";
}

/// Paramètres de la page carte
pub mod map {
    pub const PARCEL_ID: &str = "p";
    pub const SHEET_ID: &str = "f";
    /// Drapeau sans valeur
    pub const DONT_SAVE_LAST_FORWARD: &str = "dontSaveLastForward";
    /// Paramètre transmis vide
    pub const KEEP_VOLATILE_SESSION: &str = "keepVolatileSession";
}

/// Champs du formulaire d'impression
pub mod print {
    pub const BBOX: &str = "MAPBBOX";
    pub const ROTATION: &str = "MAPROTATION";
    pub const PAGE_SIZE: &str = "TAILLEPAGE";
    pub const PAGE_ORIENTATION: &str = "ORIENTPAGE";
    pub const REFERENCE: &str = "RFV_REF";
    pub const CENTER_X: &str = "RFV_X";
    pub const CENTER_Y: &str = "RFV_Y";
    pub const SCALE: &str = "ECHELLE";
    pub const NATURE: &str = "NATURE";
    pub const RESOLUTION: &str = "RESOLUTION";
    pub const FLAG: &str = "DRAPEAU";

    pub const ROTATION_NONE: &str = "0";
    /// Extrait vectoriel
    pub const NATURE_VECTOR: &str = "V";
    pub const FLAG_OFF: &str = "false";
}

/// Motifs d'extraction dans les pages HTML
pub mod patterns {
    /// Jeton : 8 groupes de 4 caractères séparés par des tirets
    pub const TOKEN: &str = r"CSRF_TOKEN=((?:[\dA-Z]{4}-){7}[\dA-Z]{4})";
    /// Identifiant de feuille (12 caractères)
    pub const SHEET_ID: &str = r"f=([A-Z\d]{12})";
    /// Identifiant de parcelle (14 caractères)
    pub const PARCEL_ID: &str = r"p=([A-Z\d]{14})";
    /// Centre de la parcelle dans le script de la carte
    pub const CENTER: &str = r"new Point\(\s*([^,()]*?)\s*,\s*([^,()]*?)\s*\)";
}

/// Type MIME attendu pour le document final
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Échelle par défaut (1:1000)
pub const DEFAULT_SCALE: u32 = 1000;

/// Diviseur des gabarits d'impression (centièmes de millième d'unité carte)
pub const FOOTPRINT_DIVISOR: f64 = 100_000.0;

/// Emprise papier (largeur, hauteur) par taille et orientation
pub const PAGE_FOOTPRINTS: &[(&str, &str, u32, u32)] = &[
    ("A3", "Paysage", 31600, 28300),
    ("A3", "Portrait", 28150, 30100),
    ("A4", "Paysage", 21070, 19700),
    ("A4", "Portrait", 19550, 21100),
];
