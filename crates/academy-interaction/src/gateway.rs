//! The single HTTP client every API module goes through.
//!
//! Each request gets the `source` header, plus `authtoken` while a session is
//! authenticated. A 401 to a request that carried the token tears the session
//! down once, here, before the caller sees [`AcademyError::Unauthorized`].

use academy_core::auth::ACADEMY_ADMIN_SOURCE;
use academy_core::session::SessionStore;
use academy_core::{AcademyError, Result};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the bearer token.
pub const AUTH_TOKEN_HEADER: &str = "authtoken";
/// Header identifying the calling application.
pub const SOURCE_HEADER: &str = "source";

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub source: String,
    /// Whole-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            source: ACADEMY_ADMIN_SOURCE.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
    session: Arc<SessionStore>,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig, session: Arc<SessionStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AcademyError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        read_json(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        read_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        read_json(response).await
    }

    /// POST with a query string and no body.
    pub async fn post_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).query(query))
            .await?;
        read_json(response).await
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(Method::POST, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request).await?;
        Ok(())
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        read_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// GET returning the raw body, for file downloads.
    pub async fn get_bytes_with_query<Q>(&self, path: &str, query: &Q) -> Result<Vec<u8>>
    where
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        read_json(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self
            .client
            .request(method, url)
            .header(SOURCE_HEADER, &self.config.source);
        if let Some(token) = self.session.token() {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let authenticated = request.headers().contains_key(AUTH_TOKEN_HEADER);
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await.map_err(|err| {
            tracing::warn!(%method, %path, "Request failed: {}", err);
            AcademyError::Network(format!("{method} {path} failed: {err}"))
        })?;

        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "API response");
        if status.is_success() {
            return Ok(response);
        }

        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());

        if status == StatusCode::UNAUTHORIZED {
            let message = extract_message(&body_text)
                .unwrap_or_else(|| "Please log in again".to_string());
            // Only a request that carried a token has a session to lose.
            if authenticated {
                tracing::warn!(%method, %path, "Server rejected the session");
                self.session.expire();
            } else {
                tracing::debug!(%method, %path, "Unauthenticated request rejected");
            }
            return Err(AcademyError::Unauthorized(message));
        }

        Err(map_http_error(status, &body_text))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn map_http_error(status: StatusCode, body: &str) -> AcademyError {
    let message = extract_message(body)
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty() && !text.starts_with('<')).then(|| text.to_string())
        })
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string());
    AcademyError::api(status.as_u16(), message)
}

/// Picks the most specific human message out of a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let direct = ["message", "exception", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()));
    let nested = || {
        value
            .get("status")
            .and_then(|status| status.get("message"))
            .and_then(|v| v.as_str())
    };
    direct
        .or_else(nested)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_flat_body() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"status": 400, "error": "Bad Request", "message": "Title already exists"}"#,
        );
        assert_eq!(err, AcademyError::api(400, "Title already exists"));
    }

    #[test]
    fn test_message_from_envelope_status() {
        let err = map_http_error(
            StatusCode::CONFLICT,
            r#"{"status": {"code": 409, "message": "Track locked"}}"#,
        );
        assert_eq!(err.to_string(), "API error (409): Track locked");
    }

    #[test]
    fn test_plain_text_and_html_bodies() {
        assert_eq!(
            map_http_error(StatusCode::BAD_GATEWAY, "upstream down"),
            AcademyError::api(502, "upstream down")
        );
        assert_eq!(
            map_http_error(StatusCode::BAD_GATEWAY, "<html>502</html>"),
            AcademyError::api(502, "Bad Gateway")
        );
    }

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = GatewayConfig::new("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.source, "ACADEMY_ADMIN");
    }
}
