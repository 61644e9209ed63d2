//! Vérification du document renvoyé par l'impression

use bytes::Bytes;
use mime::Mime;

use crate::error::ScpcError;
use crate::protocol::PDF_CONTENT_TYPE;

/// Renvoie le corps inchangé si le type déclaré est `application/pdf`.
///
/// Seul l'en-tête compte : SCPC peut renvoyer une page d'erreur HTML avec un
/// statut 200, et le contenu n'est jamais inspecté.
pub fn ensure_pdf(content_type: Option<&str>, body: Bytes) -> Result<Bytes, ScpcError> {
    let is_pdf = content_type
        .and_then(|value| value.parse::<Mime>().ok())
        .is_some_and(|mime| mime.essence_str() == PDF_CONTENT_TYPE);

    if !is_pdf {
        return Err(ScpcError::NotAPdf {
            content_type: content_type.map(str::to_string),
        });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_accepted() {
        let body = Bytes::from_static(b"%PDF-1.4\n...");
        let out = ensure_pdf(Some("application/pdf"), body.clone()).unwrap();
        assert_eq!(out, body);

        assert!(ensure_pdf(Some("application/pdf; charset=binary"), body).is_ok());
    }

    #[test]
    fn test_html_rejected_even_with_pdf_magic() {
        let body = Bytes::from_static(b"%PDF-1.4 not really");
        let err = ensure_pdf(Some("text/html"), body).unwrap_err();
        assert!(matches!(err, ScpcError::NotAPdf { .. }));
    }

    #[test]
    fn test_missing_or_invalid_content_type() {
        assert!(ensure_pdf(None, Bytes::new()).is_err());
        assert!(ensure_pdf(Some("pdf"), Bytes::new()).is_err());
        assert!(ensure_pdf(Some("application/x-pdf"), Bytes::new()).is_err());
    }
}
