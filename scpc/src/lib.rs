//! # scpc
//!
//! Client pour le service SCPC du cadastre (https://www.cadastre.gouv.fr/scpc) :
//! récupération de l'extrait de plan cadastral d'une parcelle au format PDF.
//!
//! SCPC est une application web à état côté serveur. Le client la pilote comme
//! un navigateur : session à cookies, jeton anti-rejeu, enchaînement des
//! formulaires, puis extraction des identifiants et du centre de la parcelle
//! dans le HTML renvoyé.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scpc::{Communes, Scpc, ScpcConfig, SearchParams};
//!
//! let communes = Arc::new(Communes::from_path("communes.json".as_ref())?);
//! let scpc = Scpc::new(communes, ScpcConfig::default());
//!
//! let pdf = scpc
//!     .fetch_extrait(&SearchParams {
//!         commune: Some("38185".into()),
//!         prefixe: Some("000".into()),
//!         section: Some("AB".into()),
//!         parcelle: Some("0042".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod communes;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod protocol;
pub mod session;
pub mod types;
pub mod validate;
pub mod workflow;

pub use communes::{Communes, CommunesError};
pub use config::ScpcConfig;
pub use error::{ErrorKind, ScpcError};
pub use extract::{Extractor, RegexExtractor};
pub use types::{
    Commune, ExtractedIdentifiers, Orientation, PaperSize, ParcelCenter, PrintBBox, SearchParams,
    SearchRequest,
};
pub use workflow::Scpc;
