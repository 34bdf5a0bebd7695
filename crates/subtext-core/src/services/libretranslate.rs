use serde_json::Value;

use crate::error::{Result, SubtextError};

/// Extract `translatedText` from a LibreTranslate reply, surfacing its
/// `error` field when present.
pub fn parse_translation_response(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(text) = value.get("translatedText").and_then(Value::as_str) {
        return Ok(text.to_string());
    }
    let reason = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("response has no translatedText");
    Err(SubtextError::Service(format!("Translation failed: {reason}")))
}

#[cfg(feature = "remote")]
pub use remote::LibreTranslate;

#[cfg(feature = "remote")]
mod remote {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use tracing::debug;

    use super::parse_translation_response;
    use crate::error::Result;
    use crate::services::Translator;

    /// Client for a LibreTranslate instance (`POST {endpoint}/translate`).
    pub struct LibreTranslate {
        endpoint: String,
        client: Client,
    }

    impl LibreTranslate {
        pub fn new(endpoint: &str) -> Result<Self> {
            let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
            Ok(Self {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                client,
            })
        }
    }

    impl Translator for LibreTranslate {
        fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
            debug!("Translate {} chars {} -> {}", text.len(), source, target);
            let body = self
                .client
                .post(format!("{}/translate", self.endpoint))
                .form(&[("q", text), ("source", source), ("target", target)])
                .send()?
                .error_for_status()?
                .text()?;
            parse_translation_response(&body)
        }
    }
}
