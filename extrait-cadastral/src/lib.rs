//! # extrait-cadastral
//!
//! Service HTTP et CLI autour du client [`scpc`] : récupération de l'extrait
//! de plan cadastral (PDF) d'une parcelle.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Service HTTP (port 5000 par défaut)
//! extrait-cadastral --communes ./communes.json
//! curl 'http://localhost:5000/?commune=38185&prefixe=000&section=AB&parcelle=0042' -o extrait.pdf
//!
//! # Extrait unique
//! extrait-cadastral fetch --commune 38185 --section AB --parcelle 0042 --taille A3
//! ```

pub mod cli;
pub mod config;
pub mod server;

pub use config::ServiceConfig;
pub use server::router;
