//! Session HTTP avec SCPC
//!
//! Une session porte ses cookies et le jeton anti-rejeu obtenu à l'ouverture.
//! Elle sert pour un seul workflow puis est abandonnée : pas de nouvel essai,
//! pas de renouvellement du jeton.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::config::ScpcConfig;
use crate::error::ScpcError;
use crate::extract::extract_token;
use crate::protocol::{pages, TOKEN_PARAM};

/// Session SCPC (cookies + jeton)
pub struct Session {
    http: Client,
    base_url: Url,
    token: String,
}

impl Session {
    /// Ouvre une session : un GET sur la page de recherche fournit cookies et jeton
    pub async fn open(config: &ScpcConfig) -> Result<Self, ScpcError> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base)
            .map_err(|e| ScpcError::Internal(format!("URL SCPC invalide {}: {}", base, e)))?;

        let url = page_url(&base_url, pages::SEARCH_BY_REFERENCE)?;
        let response = http.get(url).send().await?;
        let body = text(pages::SEARCH_BY_REFERENCE, response).await?;
        let token = extract_token(&body)?;

        debug!(token = %token, "Session SCPC ouverte");

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// GET `{page}.do?CSRF_TOKEN=…&params…&flags…`, renvoie le corps texte.
    /// Les `flags` sont des paramètres sans valeur.
    pub async fn get(
        &self,
        page: &'static str,
        params: &[(&str, &str)],
        flags: &[&str],
    ) -> Result<String, ScpcError> {
        let mut url = self.url(page)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            for flag in flags {
                query.append_key_only(flag);
            }
        }

        debug!(page, url = %url, "GET");
        let response = self.http.get(url).send().await?;
        text(page, response).await
    }

    /// POST d'un formulaire : le jeton est passé dans l'URL et dans le corps
    pub async fn post(
        &self,
        form: &'static str,
        params: &[(&str, &str)],
    ) -> Result<Response, ScpcError> {
        let url = self.url(form)?;

        let mut body: Vec<(&str, &str)> = params.to_vec();
        body.push((TOKEN_PARAM, self.token.as_str()));

        debug!(form, fields = body.len(), "POST");
        let response = self.http.post(url).form(&body).send().await?;
        check_status(form, response)
    }

    /// URL d'une page avec le jeton en premier paramètre
    fn url(&self, page: &str) -> Result<Url, ScpcError> {
        let mut url = page_url(&self.base_url, page)?;
        url.query_pairs_mut().append_pair(TOKEN_PARAM, &self.token);
        Ok(url)
    }
}

/// Type de contenu déclaré par une réponse
pub fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Lit le corps texte d'une réponse après vérification du statut
pub async fn text(page: &'static str, response: Response) -> Result<String, ScpcError> {
    Ok(check_status(page, response)?.text().await?)
}

fn page_url(base_url: &Url, page: &str) -> Result<Url, ScpcError> {
    base_url
        .join(&format!("{}.do", page))
        .map_err(|e| ScpcError::Internal(format!("URL invalide pour {}: {}", page, e)))
}

fn check_status(page: &'static str, response: Response) -> Result<Response, ScpcError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ScpcError::Status {
            page,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_keeps_base_path() {
        let base = Url::parse("https://www.cadastre.gouv.fr/scpc/").unwrap();
        let url = page_url(&base, pages::PARCEL_MAP).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.cadastre.gouv.fr/scpc/afficherCarteParcelle.do"
        );
    }
}
