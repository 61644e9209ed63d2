//! Configuration du service

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use scpc::{protocol, Communes, ScpcConfig};

/// Configuration du service HTTP et du client SCPC
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,

    /// Fichier JSON de la table des communes
    pub communes_path: PathBuf,

    /// URL de base du service SCPC
    pub scpc_url: String,

    /// Délai maximal par requête SCPC
    pub scpc_timeout: Option<Duration>,

    /// Journalisation des requêtes entrantes (désactivée en production)
    pub request_log: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            communes_path: PathBuf::from("communes.json"),
            scpc_url: protocol::DEFAULT_BASE_URL.into(),
            scpc_timeout: None,
            request_log: true,
        }
    }
}

impl ServiceConfig {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Charge la configuration depuis une source de variables quelconque
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            communes_path: var("COMMUNES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.communes_path),
            scpc_url: var("SCPC_URL").unwrap_or(defaults.scpc_url),
            scpc_timeout: var("SCPC_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            request_log: var("APP_ENV").as_deref() != Some("production"),
        }
    }

    /// Configuration du client SCPC
    pub fn scpc_config(&self) -> ScpcConfig {
        ScpcConfig::with_base_url(self.scpc_url.clone()).timeout(self.scpc_timeout)
    }

    /// Adresse d'écoute
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Charge la table des communes
pub fn load_communes(path: &Path) -> Result<Communes> {
    let communes = Communes::from_path(path)
        .context(format!("Failed to load communes from {}", path.display()))?;

    if communes.is_empty() {
        anyhow::bail!("No commune found in {}", path.display());
    }

    Ok(communes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> ServiceConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.communes_path, PathBuf::from("communes.json"));
        assert_eq!(config.scpc_url, "https://www.cadastre.gouv.fr/scpc");
        assert!(config.scpc_timeout.is_none());
        assert!(config.request_log);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("SCPC_TIMEOUT_SECS", "45"),
            ("APP_ENV", "production"),
        ]);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.scpc_timeout, Some(Duration::from_secs(45)));
        assert!(!config.request_log);
        assert_eq!(
            config.scpc_config().timeout,
            Some(Duration::from_secs(45))
        );
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = from_map(&[("PORT", "http"), ("SCPC_TIMEOUT_SECS", "0")]);
        assert_eq!(config.port, 5000);
        assert!(config.scpc_timeout.is_none());
    }

    #[test]
    fn test_load_communes_missing_file() {
        let err = load_communes(Path::new("/nonexistent/communes.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to load communes"));
    }
}
