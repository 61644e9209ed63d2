//! Configuration du client SCPC

use std::time::Duration;

use crate::protocol::DEFAULT_BASE_URL;

/// User-Agent envoyé à SCPC
pub const DEFAULT_USER_AGENT: &str = concat!("extrait-cadastral/", env!("CARGO_PKG_VERSION"));

/// Paramètres de connexion au service distant
#[derive(Debug, Clone)]
pub struct ScpcConfig {
    /// URL de base (sans `/` final), ex: https://www.cadastre.gouv.fr/scpc
    pub base_url: String,

    pub user_agent: String,

    /// Délai maximal par requête (aucun par défaut)
    pub timeout: Option<Duration>,
}

impl Default for ScpcConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: None,
        }
    }
}

impl ScpcConfig {
    /// Configuration pointant vers une autre instance (tests, miroir)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
