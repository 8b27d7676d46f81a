// Catalog endpoint HTTP client
//
// Wraps `reqwest::Client` with the catalog URL, the result-size limit and
// payload validation. Callers get either a non-empty list of records or a
// typed error describing which stage failed.

use std::time::Duration;

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ProductRecord;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for a JSON product catalog.
///
/// The endpoint is expected to answer `GET {endpoint}?limit={n}` with a
/// JSON array of product objects. No authentication is involved.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: Url,
    limit: Option<u32>,
    /// Request timeout, reported back in `Error::Timeout`.
    timeout: Option<Duration>,
}

impl CatalogClient {
    /// Create a new catalog client from a `TransportConfig`.
    pub fn new(endpoint: Url, limit: Option<u32>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint,
            limit,
            timeout: Some(transport.timeout),
        })
    }

    /// Create a catalog client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url, limit: Option<u32>) -> Self {
        Self {
            http,
            endpoint,
            limit,
            timeout: None,
        }
    }

    /// The configured catalog endpoint (without the limit parameter).
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The result-size limit sent with every request.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Full request URL, including the `limit` query parameter.
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }
        url
    }

    /// Fetch the product list.
    ///
    /// Fails on transport errors, non-2xx statuses, bodies that are not a
    /// JSON array of product records, and empty arrays.
    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, Error> {
        let url = self.request_url();
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_transport(e))?;
        trace!(status = status.as_u16(), bytes = body.len(), "catalog response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        parse_products(&body)
    }

    /// A timeout becomes `Error::Timeout` only when the limit is known;
    /// clients built with `with_client` keep the raw transport error.
    fn map_transport(&self, err: reqwest::Error) -> Error {
        match self.timeout {
            Some(timeout) if err.is_timeout() => Error::Timeout { timeout },
            _ => Error::Transport(err),
        }
    }
}

/// Validate and decode a catalog body.
///
/// Checks the array shape first so that an object or scalar body gets a
/// clearer message than a serde type mismatch deep in a record.
pub fn parse_products(body: &str) -> Result<Vec<ProductRecord>, Error> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| Error::Payload {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })?;

    if !value.is_array() {
        return Err(Error::Payload {
            message: "expected a JSON array of products".into(),
            body: body.to_owned(),
        });
    }

    let records: Vec<ProductRecord> =
        serde_json::from_value(value).map_err(|e| Error::Payload {
            message: e.to_string(),
            body: body.to_owned(),
        })?;

    if records.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    Ok(records)
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(limit: Option<u32>) -> CatalogClient {
        CatalogClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://catalog.example.com/products").unwrap(),
            limit,
        )
    }

    #[test]
    fn request_url_appends_limit() {
        let url = client(Some(5)).request_url();
        assert_eq!(url.as_str(), "https://catalog.example.com/products?limit=5");
    }

    #[test]
    fn request_url_without_limit() {
        let url = client(None).request_url();
        assert_eq!(url.as_str(), "https://catalog.example.com/products");
    }

    #[test]
    fn parse_rejects_object_body() {
        let err = parse_products(r#"{"products": []}"#).unwrap_err();
        assert!(matches!(err, Error::Payload { .. }), "got {err:?}");
    }

    #[test]
    fn parse_rejects_empty_array() {
        let err = parse_products("[]").unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog), "got {err:?}");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_products("<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::Payload { .. }), "got {err:?}");
    }

    #[test]
    fn parse_accepts_records() {
        let records =
            parse_products(r#"[{"id": 1, "title": "Backpack", "price": 109.95}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_CHARS);
    }
}
