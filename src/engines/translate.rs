//! Machine translation over the `translation.js` endpoint.

use serde::Deserialize;
use tracing::debug;

use crate::{DdgClient, PaceStep, Result, SearchError, Translation};

/// Query text used to obtain the translation token.
const TOKEN_QUERY: &str = "translate";

#[derive(Debug, Deserialize)]
struct RawTranslation {
    translated: String,
    #[serde(default)]
    detected_language: Option<String>,
}

fn parse_translation(original: &str, body: &str) -> Result<Translation> {
    let raw: RawTranslation = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("translation: {}", e)))?;
    Ok(Translation {
        original: original.to_string(),
        translated: raw.translated,
        detected_language: raw.detected_language,
    })
}

impl DdgClient {
    /// Translates each string into `to`, one request per string.
    ///
    /// `from` is detected upstream when `None`. Output order matches input order.
    pub async fn translate<S: AsRef<str>>(
        &self,
        texts: &[S],
        from: Option<&str>,
        to: &str,
    ) -> Result<Vec<Translation>> {
        if texts.is_empty() {
            return Err(SearchError::InvalidQuery("Nothing to translate".into()));
        }
        let token = self.acquire_token(TOKEN_QUERY).await?;

        let mut params = vec![
            ("vqd", token.value()),
            ("query", TOKEN_QUERY),
            ("to", to),
        ];
        if let Some(from) = from {
            params.push(("from", from));
        }

        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let text = text.as_ref();
            let response = self
                .http()
                .post(&self.config().endpoints.translation)
                .query(&params)
                .body(text.to_string())
                .send()
                .await?;
            let body = response.text().await?;
            results.push(parse_translation(text, &body)?);
            debug!("Translated {} of {} strings", results.len(), texts.len());
            self.pace(PaceStep::Translation).await;
        }

        Ok(results)
    }
}
