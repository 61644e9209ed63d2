//! Définition et implémentation des commandes CLI
//!
//! - `serve` (défaut) : service HTTP
//! - `fetch` : récupère un extrait et l'écrit sur disque

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use scpc::{Scpc, SearchParams};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{load_communes, ServiceConfig};
use crate::server;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP service (défaut : sans sous-commande)
    Serve(ServeArgs),

    /// Fetch one parcel map extract and write it to a PDF file
    Fetch {
        /// INSEE code of the commune (e.g. 38185)
        #[arg(long)]
        commune: String,

        /// Parcel prefix (usually 000)
        #[arg(long, default_value = "000")]
        prefixe: String,

        /// Cadastral section (e.g. AB)
        #[arg(long)]
        section: String,

        /// Parcel number (e.g. 0042)
        #[arg(long)]
        parcelle: String,

        /// Scale, 1000 = 1:1000 (défaut : 1000)
        #[arg(long)]
        echelle: Option<u32>,

        /// Paper size: A4 or A3 (défaut : A4)
        #[arg(long)]
        taille: Option<String>,

        /// Orientation: portrait or paysage (défaut : portrait)
        #[arg(long)]
        orientation: Option<String>,

        /// Output file (défaut : <commune>-<section>-<parcelle>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to the communes JSON table (défaut : env COMMUNES_PATH / communes.json)
        #[arg(long)]
        communes: Option<PathBuf>,
    },
}

/// Arguments du service HTTP
#[derive(Args, Default)]
pub struct ServeArgs {
    /// Listen address (défaut : env HOST / 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (défaut : env PORT / 5000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to the communes JSON table (défaut : env COMMUNES_PATH / communes.json)
    #[arg(long)]
    pub communes: Option<PathBuf>,
}

/// Exécute la commande serve
pub async fn cmd_serve(args: ServeArgs) -> Result<()> {
    let mut config = ServiceConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(communes) = args.communes {
        config.communes_path = communes;
    }

    let scpc = build_client(&config)?;
    let app = server::router(Arc::new(scpc), config.request_log);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!(addr = %addr, scpc = %config.scpc_url, "Start listening");

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

/// Exécute la commande fetch
#[allow(clippy::too_many_arguments)]
pub async fn cmd_fetch(
    commune: String,
    prefixe: String,
    section: String,
    parcelle: String,
    echelle: Option<u32>,
    taille: Option<String>,
    orientation: Option<String>,
    output: Option<PathBuf>,
    communes: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServiceConfig::from_env();
    if let Some(communes) = communes {
        config.communes_path = communes;
    }

    let output = output.unwrap_or_else(|| default_output(&commune, &section, &parcelle));
    let scpc = build_client(&config)?;

    let params = SearchParams {
        commune: Some(commune),
        prefixe: Some(prefixe),
        section: Some(section),
        parcelle: Some(parcelle),
        echelle: echelle.map(|e| e.to_string()),
        taille,
        orientation,
    };

    let pdf = scpc.fetch_extrait(&params).await?;

    tokio::fs::write(&output, &pdf)
        .await
        .context(format!("Failed to write {}", output.display()))?;

    println!("Extrait: {} ({} bytes)", output.display(), pdf.len());
    Ok(())
}

fn build_client(config: &ServiceConfig) -> Result<Scpc> {
    let communes = load_communes(&config.communes_path)?;
    info!(
        path = %config.communes_path.display(),
        count = communes.len(),
        "Communes loaded"
    );
    Ok(Scpc::new(Arc::new(communes), config.scpc_config()))
}

/// Nom de fichier par défaut pour un extrait
fn default_output(commune: &str, section: &str, parcelle: &str) -> PathBuf {
    Path::new(".").join(format!("{}-{}-{}.pdf", commune, section, parcelle))
}
