//! HTTP client for the quote service.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::model::{ApiConfig, Envelope, MarkedBody, Quote, QuoteUpdate};

/// Error type for quote service calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}")]
    Status { status: StatusCode },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response carried no data")]
    MissingData,
}

impl ApiError {
    /// HTTP status for non-success responses
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Thin wrapper over `reqwest::Client` bound to one API root.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    base_url: Url,
}

impl QuoteClient {
    /// Build a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        let base_url = parse_base_url(&config.base_url)?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        QuoteClient { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/quotes/{segments..}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("quotes")
            .extend(segments);
        Ok(url)
    }

    /// `GET /quotes`: the full collection in server order.
    pub async fn list(&self) -> Result<Vec<Quote>, ApiError> {
        let url = self.endpoint(&[])?;
        log::debug!("GET {}", url);
        let response = check_status(self.http.get(url).send().await?)?;
        let envelope: Envelope<Vec<Quote>> = decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `PATCH /quotes/{id}/marked`
    pub async fn set_marked(&self, id: &str, marked: bool) -> Result<Quote, ApiError> {
        let url = self.endpoint(&[id, "marked"])?;
        log::debug!("PATCH {} marked={}", url, marked);
        let response = self
            .http
            .patch(url)
            .json(&MarkedBody { marked })
            .send()
            .await?;
        single(check_status(response)?).await
    }

    /// `PUT /quotes/{id}` with the five editable fields
    pub async fn update(&self, id: &str, update: &QuoteUpdate) -> Result<Quote, ApiError> {
        let url = self.endpoint(&[id])?;
        log::debug!("PUT {}", url);
        let response = self.http.put(url).json(update).send().await?;
        single(check_status(response)?).await
    }

    /// `DELETE /quotes/{id}`. Any 2xx is success; the body is ignored.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[id])?;
        log::debug!("DELETE {}", url);
        check_status(self.http.delete(url).send().await?)?;
        Ok(())
    }
}

/// Parse the configured API root.
pub fn parse_base_url(input: &str) -> Result<Url, ApiError> {
    let url: Url = input
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidBaseUrl(input.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(input.to_string()));
    }
    Ok(url)
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status { status })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn single(response: Response) -> Result<Quote, ApiError> {
    let envelope: Envelope<Quote> = decode(response).await?;
    envelope.data.ok_or(ApiError::MissingData)
}
