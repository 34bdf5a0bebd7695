use serde_json::Value;

use crate::error::{Result, SubtextError};

/// The `options` form field: `{"languages": ["eng"]}`.
pub fn ocr_options(language: &str) -> String {
    serde_json::json!({ "languages": [language] }).to_string()
}

/// Extract `data.stdout` from a tesseract-server reply.
pub fn parse_ocr_response(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    value
        .get("data")
        .and_then(|d| d.get("stdout"))
        .and_then(Value::as_str)
        .map(|s| s.trim_end().to_string())
        .ok_or_else(|| SubtextError::Service("OCR response has no data.stdout".into()))
}

#[cfg(feature = "remote")]
pub use remote::TesseractServer;

#[cfg(feature = "remote")]
mod remote {
    use std::io::Cursor;
    use std::time::Duration;

    use image::{DynamicImage, ImageFormat};
    use reqwest::blocking::{multipart, Client};
    use tracing::debug;

    use super::{ocr_options, parse_ocr_response};
    use crate::error::Result;
    use crate::services::OcrEngine;

    /// Client for a tesseract-server instance (`POST {endpoint}/tesseract`).
    pub struct TesseractServer {
        endpoint: String,
        client: Client,
    }

    impl TesseractServer {
        pub fn new(endpoint: &str) -> Result<Self> {
            let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
            Ok(Self {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                client,
            })
        }
    }

    impl OcrEngine for TesseractServer {
        fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String> {
            let mut png = Vec::new();
            image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
            debug!("OCR request: {} bytes, language {}", png.len(), language);

            let file = multipart::Part::bytes(png)
                .file_name("image.png")
                .mime_str("image/png")?;
            let form = multipart::Form::new()
                .part("file", file)
                .text("options", ocr_options(language));

            let body = self
                .client
                .post(format!("{}/tesseract", self.endpoint))
                .multipart(form)
                .send()?
                .error_for_status()?
                .text()?;
            parse_ocr_response(&body)
        }
    }
}
