use anyhow::{Context, Result};
use image::RgbaImage;
use tracing::warn;

use crate::config::{FailurePolicy, MathpixConfig};
use crate::types::{RecognitionRequest, RecognitionResponse, encode_png};

/// Mathpix recognition client.
///
/// One client is constructed at startup and shared with the capture
/// dispatcher; `reqwest::Client` handles connection reuse internally.
#[derive(Debug, Clone)]
pub struct MathpixClient {
    http: reqwest::Client,
    config: MathpixConfig,
}

impl MathpixClient {
    pub fn new(config: MathpixConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &MathpixConfig {
        &self.config
    }

    /// POST the PNG to the recognition endpoint and extract the simplified
    /// LaTeX. Transport and JSON-parse failures are returned as errors; a
    /// well-formed response without the field means "no formula found" and
    /// yields an empty string.
    pub async fn recognize_png(&self, png: &[u8]) -> Result<String> {
        let request = RecognitionRequest::from_png(png);

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("app_id", &self.config.app_id)
            .header("app_key", &self.config.app_key)
            .json(&request)
            .send()
            .await
            .context("recognition request failed")?;

        let response: RecognitionResponse = response
            .json()
            .await
            .context("recognition response was not valid JSON")?;

        Ok(response.into_latex())
    }

    /// Recognize a captured pixel region, applying the configured failure
    /// policy.
    ///
    /// A zero-area capture is legal input: it short-circuits to an empty
    /// result without touching the network.
    pub async fn recognize(&self, image: &RgbaImage) -> Result<String> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(String::new());
        }

        let result = match encode_png(image) {
            Ok(png) => self.recognize_png(&png).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(latex) => Ok(latex),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::EmptyResult => {
                    warn!("recognition failed, returning empty result: {e:#}");
                    Ok(String::new())
                }
                FailurePolicy::Propagate => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MathpixClient;
    use crate::config::{FailurePolicy, MathpixConfig};

    // Connection-refused endpoint; no listener is ever bound on port 1.
    const DEAD_ENDPOINT: &str = "http://127.0.0.1:1/v3/text";

    fn client(policy: FailurePolicy) -> MathpixClient {
        MathpixClient::new(
            MathpixConfig::new("test-id", "test-key")
                .with_endpoint(DEAD_ENDPOINT)
                .with_failure_policy(policy),
        )
    }

    #[tokio::test]
    async fn network_failure_downgrades_to_empty_result_by_default() {
        let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        let latex = client(FailurePolicy::EmptyResult)
            .recognize(&image)
            .await
            .unwrap();
        assert_eq!(latex, "");
    }

    #[tokio::test]
    async fn network_failure_propagates_when_configured() {
        let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        let result = client(FailurePolicy::Propagate).recognize(&image).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn zero_area_capture_skips_the_network_entirely() {
        // Even with Propagate and a dead endpoint this must succeed, because
        // no request is issued for an empty region.
        let image = image::RgbaImage::new(0, 0);
        let latex = client(FailurePolicy::Propagate)
            .recognize(&image)
            .await
            .unwrap();
        assert_eq!(latex, "");
    }
}
