//! Prediction service client
//!
//! Three single round trips with no built-in retry: health check, recognized
//! class list, image classification. Transport failures (connection errors,
//! non-success status, malformed payloads) always come back as `Err` so the
//! caller can tell them apart from a real answer.

use std::time::Duration;

use plantrecog_core::prelude::*;
use plantrecog_core::ImageRef;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::protocol::{self, ClassifyOutcome};

/// Default service location
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080";

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

/// Remote classification operations
///
/// Both the TUI and the headless runner talk to the service through this trait.
#[trait_variant::make(PredictionService: Send)]
pub trait LocalPredictionService {
    /// `Ok(false)` when the service answers with a non-success status
    async fn check_health(&self) -> Result<bool>;

    /// Class names the model can recognize, in service order
    async fn fetch_recognized_classes(&self) -> Result<Vec<String>>;

    /// Upload one image and return the ranked candidates
    async fn classify(&self, image: &ImageRef) -> Result<ClassifyOutcome>;
}

/// Where the service lives and how its endpoints are named
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub base_url: Url,
    pub health_path: String,
    pub classes_path: String,
    pub predict_path: String,
    /// Per-request timeout. `None` waits for as long as the service takes.
    pub timeout: Option<Duration>,
}

impl ServiceEndpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            health_path: "/health".to_string(),
            classes_path: "/recognized".to_string(),
            predict_path: "/predict".to_string(),
            timeout: None,
        })
    }

    pub fn health_url(&self) -> Result<Url> {
        join(&self.base_url, &self.health_path)
    }

    pub fn classes_url(&self) -> Result<Url> {
        join(&self.base_url, &self.classes_path)
    }

    pub fn predict_url(&self) -> Result<Url> {
        join(&self.base_url, &self.predict_path)
    }
}

/// Parse a base URL, making sure it ends with `/` so paths join beneath it
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&normalized).map_err(|e| Error::invalid_url(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(format!("{} cannot be a base URL", raw)));
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::invalid_url(format!("{}{}: {}", base, path, e)))
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_decode() {
        Error::malformed(e.to_string())
    } else {
        Error::http(e.to_string())
    }
}

/// HTTP implementation of [`PredictionService`]
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    endpoints: ServiceEndpoints,
}

impl HttpPredictionClient {
    pub fn new(endpoints: ServiceEndpoints) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = endpoints.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    async fn get_body(&self, url: Url) -> Result<String> {
        let endpoint = url.path().to_string();
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(Error::service_status(resp.status().as_u16(), endpoint));
        }

        resp.text().await.map_err(transport_error)
    }
}

impl PredictionService for HttpPredictionClient {
    async fn check_health(&self) -> Result<bool> {
        let url = self.endpoints.health_url()?;
        debug!("Checking service health at {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let up = resp.status().is_success();
        if !up {
            warn!("Health check answered {}", resp.status());
        }
        Ok(up)
    }

    async fn fetch_recognized_classes(&self) -> Result<Vec<String>> {
        let url = self.endpoints.classes_url()?;
        let body = self.get_body(url).await?;
        let classes = protocol::parse_class_list(&body)?;
        info!("Service recognizes {} classes", classes.len());
        Ok(classes)
    }

    async fn classify(&self, image: &ImageRef) -> Result<ClassifyOutcome> {
        let url = self.endpoints.predict_url()?;
        let endpoint = url.path().to_string();

        let bytes = tokio::fs::read(image.path()).await?;
        debug!("Uploading {} ({} bytes) to {}", image, bytes.len(), url);

        let part = Part::bytes(bytes)
            .file_name(image.file_name())
            .mime_str("image/jpeg")
            .map_err(transport_error)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let resp = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            debug!("Classification failed with {}: {}", status, body);
            return Err(Error::service_status(status.as_u16(), endpoint));
        }

        let body = resp.text().await.map_err(transport_error)?;
        protocol::parse_prediction_payload(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_under_base_path() {
        let endpoints = ServiceEndpoints::new("http://example.com/api/v1").unwrap();
        assert_eq!(
            endpoints.health_url().unwrap().as_str(),
            "http://example.com/api/v1/health"
        );
        assert_eq!(
            endpoints.predict_url().unwrap().as_str(),
            "http://example.com/api/v1/predict"
        );
        assert_eq!(
            endpoints.classes_url().unwrap().as_str(),
            "http://example.com/api/v1/recognized"
        );
    }

    #[test]
    fn test_endpoints_with_trailing_slash() {
        let endpoints = ServiceEndpoints::new("http://localhost:8080/").unwrap();
        assert_eq!(
            endpoints.health_url().unwrap().as_str(),
            "http://localhost:8080/health"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ServiceEndpoints::new("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_no_timeout_by_default() {
        let endpoints = ServiceEndpoints::new(DEFAULT_SERVICE_URL).unwrap();
        assert!(endpoints.timeout.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) is essentially never listening on localhost
        let endpoints = ServiceEndpoints::new("http://127.0.0.1:9").unwrap();
        let client = HttpPredictionClient::new(endpoints).unwrap();

        let err = PredictionService::check_health(&client).await.unwrap_err();
        assert!(matches!(err, Error::Http { .. }));
    }

    #[tokio::test]
    async fn test_classify_missing_file_is_io_error() {
        let endpoints = ServiceEndpoints::new("http://127.0.0.1:9").unwrap();
        let client = HttpPredictionClient::new(endpoints).unwrap();

        let image = ImageRef::new("/definitely/not/here.jpg");
        let err = PredictionService::classify(&client, &image)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
