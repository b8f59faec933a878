//! REST client for the `/api/v1` endpoints.
//!
//! List and aggregate responses arrive wrapped in `{ "data": ... }`; single
//! entity responses are bare objects. Failures carry `{ "error", "code" }`.

use reqwest::header::CONTENT_DISPOSITION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one API server.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    code: String,
}

/// A downloaded export attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: Option<String>,
    pub content: String,
}

impl ApiClient {
    /// Create a client from configuration, applying the request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// * `api_url` - Base URL, e.g. `http://localhost:3000`.
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.api_url, path)
    }

    /// `GET` a list or aggregate endpoint and unwrap its `data` envelope.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.get_data_with(path, &[]).await
    }

    /// [`get_data`](Self::get_data) with query parameters, e.g. list filters.
    pub async fn get_data_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let envelope: DataEnvelope<T> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// `GET` a single entity.
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    /// `POST` a JSON body and parse the created entity.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// `PUT` a JSON body and parse the updated entity.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// `DELETE` an entity. Succeeds on any 2xx status.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await
    }

    /// Download a dataset export (`format` defaults to CSV server-side).
    pub async fn export(
        &self,
        dataset: &str,
        format: Option<&str>,
    ) -> Result<ExportFile, ClientError> {
        let mut request = self.client.get(self.url(&format!("/exports/{dataset}")));
        if let Some(format) = format {
            request = request.query(&[("format", format)]);
        }
        let response = Self::ensure_success(request.send().await?).await?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename);
        let content = response.text().await?;
        tracing::debug!(dataset, filename = ?filename, bytes = content.len(), "Export downloaded");

        Ok(ExportFile { filename, content })
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an [`ClientError::Api`]
    /// built from the error envelope on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Build an API error from a failed response body.
///
/// Bodies that are not an error envelope (a proxy page, say) are kept
/// verbatim as the message with code `UNKNOWN`.
fn api_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ClientError::Api {
            status,
            code: envelope.code,
            message: envelope.error,
        },
        Err(_) => ClientError::Api {
            status,
            code: "UNKNOWN".to_string(),
            message: body.to_string(),
        },
    }
}

/// Extract `filename` from an `attachment; filename="..."` header value.
fn attachment_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
}
