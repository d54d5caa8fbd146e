//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{AppError, ErrorBody};

/// HTTP client for making network requests to the item store
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(self.client.get(self.url(path))).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(self.client.post(self.url(path)).json(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(self.client.put(self.url(path)).json(body)).await
    }

    /// Make a DELETE request; any success status with any body is accepted
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("Unexpected response body: {e}"))
        })
    }

    /// Turn a non-success status into an error, preferring the store's error body
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        if let Some(error) = parse_error_body(&text) {
            return Err(ClientError::Api {
                status: status.as_u16(),
                error,
            });
        }

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            _ => ClientError::Internal(format!("{status}: {text}")),
        })
    }
}

/// Decode the unified `{code, message, details}` error body
fn parse_error_body(text: &str) -> Option<AppError> {
    serde_json::from_str::<ErrorBody>(text).ok().map(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(client.url("/items"), "http://localhost:3000/items");
        assert_eq!(client.url("items/reorder"), "http://localhost:3000/items/reorder");
    }

    #[test]
    fn test_parse_error_body() {
        let error = parse_error_body(r#"{"code":1003,"message":"reorder is missing 1 item(s)","details":{"missing":[7]}}"#)
            .unwrap();
        assert_eq!(error.code, ErrorCode::ReorderIncomplete);
        assert_eq!(error.details.unwrap()["missing"], serde_json::json!([7]));

        let unknown = parse_error_body(r#"{"code":4242,"message":"??"}"#).unwrap();
        assert_eq!(unknown.code, ErrorCode::Unknown);

        assert!(parse_error_body("Internal Server Error").is_none());
    }
}
