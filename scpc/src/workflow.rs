//! Récupération d'un extrait de plan cadastral
//!
//! Enchaînement strictement séquentiel, sans reprise :
//! 1. validation des paramètres (aucun appel réseau avant)
//! 2. ouverture de session (jeton)
//! 3. affichage du formulaire de recherche
//! 4. soumission de la recherche, extraction feuille/parcelle
//! 5. affichage de la carte, extraction du centre
//! 6. impression du PDF sur l'emprise calculée

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, info_span, Instrument};

use crate::communes::{department_code, normalize_name, Communes};
use crate::config::ScpcConfig;
use crate::error::ScpcError;
use crate::extract::{Extractor, RegexExtractor};
use crate::geometry::compute_bbox;
use crate::protocol::{self, map, pages, print, search};
use crate::session::{self, Session};
use crate::types::{
    format_coord, ExtractedIdentifiers, Orientation, PaperSize, ParcelCenter, SearchParams,
    SearchRequest,
};
use crate::validate::ensure_pdf;

/// Client SCPC partagé entre les requêtes (table des communes en lecture seule)
pub struct Scpc {
    communes: Arc<Communes>,
    config: ScpcConfig,
    extractor: Box<dyn Extractor>,
}

impl Scpc {
    pub fn new(communes: Arc<Communes>, config: ScpcConfig) -> Self {
        Self {
            communes,
            config,
            extractor: Box::new(RegexExtractor),
        }
    }

    /// Remplace la stratégie d'extraction
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Valide les paramètres bruts
    pub fn validate(&self, params: &SearchParams) -> Result<SearchRequest, ScpcError> {
        let commune_code = required("commune", &params.commune)?;
        let prefixe = required("prefixe", &params.prefixe)?;
        let section = required("section", &params.section)?;
        let parcelle = required("parcelle", &params.parcelle)?;

        let commune = self
            .communes
            .resolve(commune_code)
            .ok_or_else(|| ScpcError::UnknownCommune(commune_code.to_string()))?
            .clone();

        let echelle = match params.echelle.as_deref().map(str::trim) {
            None | Some("") => protocol::DEFAULT_SCALE,
            Some(raw) => match raw.parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ScpcError::invalid_parameter(
                        "echelle",
                        format!("entier strictement positif attendu, reçu '{}'", raw),
                    ))
                }
            },
        };

        Ok(SearchRequest {
            commune,
            prefixe: prefixe.to_string(),
            section: section.to_string(),
            parcelle: parcelle.to_string(),
            echelle,
            taille: PaperSize::from_param(params.taille.as_deref()),
            orientation: Orientation::from_param(params.orientation.as_deref()),
        })
    }

    /// Récupère l'extrait PDF d'une parcelle
    pub async fn fetch_extrait(&self, params: &SearchParams) -> Result<Bytes, ScpcError> {
        let request = self.validate(params)?;

        let span = info_span!(
            "extrait",
            commune = %request.commune.code,
            reference = %request.reference()
        );
        self.fetch_validated(&request).instrument(span).await
    }

    /// Déroule le dialogue SCPC pour une requête déjà validée
    pub async fn fetch_validated(&self, request: &SearchRequest) -> Result<Bytes, ScpcError> {
        let session = Session::open(&self.config).await?;

        // Affichage du formulaire de recherche
        session.get(pages::SEARCH_FORM, &[], &[]).await?;

        let ids = self.search(&session, request).await?;
        debug!(feuille = %ids.feuille_id, parcelle = %ids.parcelle_id, "Parcelle trouvée");

        let center = self.display_map(&session, &ids).await?;
        debug!(x = center.x, y = center.y, "Centre de la parcelle");

        let pdf = self.print(&session, request, center).await?;
        info!(bytes = pdf.len(), "Extrait récupéré");

        Ok(pdf)
    }

    /// Soumission des critères de recherche et extraction des identifiants
    async fn search(
        &self,
        session: &Session,
        request: &SearchRequest,
    ) -> Result<ExtractedIdentifiers, ScpcError> {
        let ville = normalize_name(&request.commune.name);
        let departement = department_code(&request.commune.code);

        let response = session
            .post(
                pages::SEARCH_BY_REFERENCE,
                &[
                    (search::CITY, ville.as_str()),
                    (search::DEPARTMENT_CODE, departement.as_str()),
                    (search::SEARCH_TYPE, search::SEARCH_TYPE_PARCEL),
                    (search::PARCEL_PREFIX, request.prefixe.as_str()),
                    (search::SECTION, request.section.as_str()),
                    (search::PARCEL_NUMBER, request.parcelle.as_str()),
                    (search::SHEET_PREFIX, request.prefixe.as_str()),
                ],
            )
            .await?;
        let body = session::text(pages::SEARCH_BY_REFERENCE, response).await?;

        self.extractor.identifiers(&body)
    }

    /// Affichage de la carte et extraction du centre de la parcelle
    async fn display_map(
        &self,
        session: &Session,
        ids: &ExtractedIdentifiers,
    ) -> Result<ParcelCenter, ScpcError> {
        let body = session
            .get(
                pages::PARCEL_MAP,
                &[
                    (map::PARCEL_ID, ids.parcelle_id.as_str()),
                    (map::SHEET_ID, ids.feuille_id.as_str()),
                    (map::KEEP_VOLATILE_SESSION, ""),
                ],
                &[map::DONT_SAVE_LAST_FORWARD],
            )
            .await?;

        self.extractor.center(&body)
    }

    /// Impression de l'extrait sur l'emprise calculée
    async fn print(
        &self,
        session: &Session,
        request: &SearchRequest,
        center: ParcelCenter,
    ) -> Result<Bytes, ScpcError> {
        let bbox = compute_bbox(center, request.taille, request.orientation, request.echelle)?;
        let mapbbox = bbox.to_param();
        let x = format_coord(center.x);
        let y = format_coord(center.y);
        let echelle = request.echelle.to_string();

        debug!(bbox = %mapbbox, "Emprise d'impression");

        let response = session
            .post(
                pages::PRINT_EXTRACT,
                &[
                    (print::BBOX, mapbbox.as_str()),
                    (print::ROTATION, print::ROTATION_NONE),
                    (print::PAGE_SIZE, request.taille.as_str()),
                    (print::PAGE_ORIENTATION, request.orientation.as_str()),
                    (print::REFERENCE, ""),
                    (print::CENTER_X, x.as_str()),
                    (print::CENTER_Y, y.as_str()),
                    (print::SCALE, echelle.as_str()),
                    (print::NATURE, print::NATURE_VECTOR),
                    (print::RESOLUTION, ""),
                    (print::FLAG, print::FLAG_OFF),
                ],
            )
            .await?;

        let content_type = session::content_type(&response);
        let body = response.bytes().await?;

        ensure_pdf(content_type.as_deref(), body)
    }
}

fn required<'a>(name: &'static str, value: &'a Option<String>) -> Result<&'a str, ScpcError> {
    value
        .as_deref()
        .ok_or(ScpcError::MissingParameter(name))
}
