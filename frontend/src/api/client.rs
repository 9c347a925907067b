use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{header, multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{api::types::ApiError, config};

pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Per-call transport options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub bearer_token: Option<String>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            bearer_token: token,
            ..Self::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(config::normalize_base_url(&base_url.into())),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn build(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<RequestBuilder, ApiError> {
        let mut builder = self.client.request(method, url);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &options.headers {
            let name = header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::validation(format!("Invalid header name: {}", name)))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|_| ApiError::validation("Invalid header value"))?;
            builder = builder.header(name, value);
        }
        if let Some(token) = &options.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder)
    }

    /// Performs exactly one HTTP call and decodes the JSON payload.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url, path);
        log::debug!("{} {}", method, url);

        let builder = self.build(method, &url, body.as_ref(), options)?;
        send(builder, &url).await
    }

    /// POSTs a multipart form (file uploads) and decodes the JSON payload.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url, path);
        log::debug!("POST {} (multipart)", url);

        let builder = self.build(Method::POST, &url, None, options)?.multipart(form);
        send(builder, &url).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, options).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(json_body(body)?), options)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(json_body(body)?), options)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None, options).await
    }
}

pub fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::unknown(format!("Failed to encode request: {}", e)))
}

/// Percent-encodes an identifier for use as a single path segment.
pub fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder, url: &str) -> Result<T, ApiError> {
    let response = builder.send().await.map_err(|e| {
        log::warn!("request to {} failed: {}", url, e);
        ApiError::request_failed(failure_message(None, Some(&e.to_string())))
    })?;
    decode_response(response).await
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::request_failed(failure_message(None, Some(&e.to_string()))))?;

    if status.is_success() {
        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        return serde_json::from_str(payload)
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)));
    }

    let body = serde_json::from_str::<Value>(&text).ok();
    let mut error = ApiError::server(
        status.as_u16(),
        failure_message(body.as_ref(), Some(&status_message(status))),
    );
    error.details = body.as_ref().and_then(|b| b.get("details")).cloned();
    log::warn!("server responded {}: {}", status, error.error);
    Err(error)
}

fn status_message(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}

/// Picks the message shown for a failed call: a structured server field
/// (`msg`, then `error`), then the transport message, then a fixed fallback.
pub fn failure_message(body: Option<&Value>, transport: Option<&str>) -> String {
    let structured = body.and_then(|b| {
        ["msg", "error"]
            .iter()
            .filter_map(|key| b.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
    });
    structured
        .or_else(|| transport.map(str::trim).filter(|msg| !msg.is_empty()))
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_string()
}
