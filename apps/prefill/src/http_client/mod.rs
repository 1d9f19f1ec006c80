#![allow(dead_code)]
/// HTTP client: the single point of entry for every backend call made by the prefill client.
///
/// Every request goes through [`HttpClient::request`], which owns the timeout, credential,
/// body-encoding and error-normalization policy. Callers never see a raw `reqwest::Error`:
/// all failures arrive as an [`ApiError`].
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod error_body;

use error_body::ErrorBody;

/// Client-side timeout applied when a request does not set its own.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

const TIMEOUT_MESSAGE: &str = "Request timeout";
const NETWORK_MESSAGE: &str = "Network error";
const FALLBACK_STATUS_TEXT: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Cookie policy for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Always attach the session cookie jar.
    Include,
    /// Attach cookies only when the target shares the base URL's origin.
    #[default]
    SameOrigin,
}

pub enum RequestBody {
    Json(Value),
    /// Sent as-is; reqwest writes the multipart boundary header itself.
    Multipart(Form),
}

#[derive(Default)]
pub struct RequestOptions {
    pub params: Vec<(String, Option<String>)>,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
    pub credentials: Credentials,
    pub bearer_token: Option<String>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), Some(value.to_string())));
        self
    }

    /// Adds a query parameter that is skipped entirely when `value` is `None`.
    pub fn param_opt(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.params.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::new(
                ApiErrorKind::Serialization,
                0,
                format!("Failed to encode request body: {e}"),
            )
        })?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The server answered with a non-success status.
    Http,
    /// The client-side timeout fired before the response settled.
    Timeout,
    /// The request never produced a response.
    Network,
    /// A body could not be encoded or decoded.
    Serialization,
}

/// The one error shape every request failure is normalized into.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, or 0 when no response was received.
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            code: None,
            message: message.into(),
            details: None,
        }
    }

    pub fn timeout() -> Self {
        Self::new(ApiErrorKind::Timeout, 0, TIMEOUT_MESSAGE)
    }

    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            NETWORK_MESSAGE.to_string()
        } else {
            message
        };
        Self::new(ApiErrorKind::Network, 0, message)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ApiErrorKind::Timeout
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout()
        } else {
            Self::network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// 204, or a DELETE answered without a body.
    Empty,
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Shared HTTP client bound to one API base URL.
///
/// Holds two reqwest clients over the same connection settings: one backed by the session
/// cookie jar (used for credentialed requests) and one that never sends cookies.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    default_timeout: Duration,
    credentialed: Client,
    anonymous: Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            credentialed: Client::builder().cookie_provider(jar).build()?,
            anonymous: Client::builder().build()?,
        })
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request and settles it into an [`HttpResponse`] or a normalized [`ApiError`].
    ///
    /// The whole exchange (connect, send, body read) is raced against the timeout; when the
    /// timer wins the in-flight future is dropped, which aborts the request.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let url = self.build_url(path, &opts.params)?;

        let client = if self.sends_cookies(opts.credentials, &url) {
            &self.credentialed
        } else {
            &self.anonymous
        };

        let mut builder = client.request(method.into(), url.clone());

        let has_content_type = opts
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        for (key, value) in &opts.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        match opts.body {
            Some(RequestBody::Multipart(form)) => {
                builder = builder.multipart(form);
            }
            Some(RequestBody::Json(value)) if method != Method::Get => {
                if !has_content_type {
                    builder = builder.header(CONTENT_TYPE, "application/json");
                }
                let bytes = serde_json::to_vec(&value).map_err(|e| {
                    ApiError::new(
                        ApiErrorKind::Serialization,
                        0,
                        format!("Failed to encode request body: {e}"),
                    )
                })?;
                builder = builder.body(bytes);
            }
            _ => {}
        }

        if let Some(token) = opts.bearer_token.as_deref().filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }

        debug!("{:?} {} (timeout {}ms)", method, url, timeout.as_millis());

        match tokio::time::timeout(timeout, execute(method, builder)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("{:?} {} failed: status={} {}", method, url, e.status, e.message);
                }
                result
            }
            Err(_) => {
                warn!(
                    "{:?} {} timed out after {}ms",
                    method,
                    url,
                    timeout.as_millis()
                );
                Err(ApiError::timeout())
            }
        }
    }

    /// Issues a request and decodes its JSON body into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path, opts).await?;
        let value = match response.body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => serde_json::from_str(&text).map_err(|e| {
                ApiError::new(
                    ApiErrorKind::Serialization,
                    response.status,
                    format!("Response was not valid JSON: {e}"),
                )
            })?,
            ResponseBody::Empty => Value::Null,
        };
        serde_json::from_value(value).map_err(|e| {
            ApiError::new(
                ApiErrorKind::Serialization,
                response.status,
                format!("Unexpected response shape: {e}"),
            )
        })
    }

    pub async fn get(&self, path: &str, opts: RequestOptions) -> Result<HttpResponse, ApiError> {
        self.request(Method::Get, path, opts).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.request(Method::Post, path, opts.json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.request(Method::Put, path, opts.json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.request(Method::Patch, path, opts.json(body)?).await
    }

    pub async fn delete(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.request(Method::Delete, path, opts).await
    }

    /// Resolves `path` against the base URL and appends the defined query parameters.
    /// Absolute `http(s)://` paths are used as-is.
    fn build_url(&self, path: &str, params: &[(String, Option<String>)]) -> Result<Url, ApiError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::network(format!("Invalid request URL '{raw}': {e}")))?;

        let defined: Vec<_> = params
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
            .collect();
        if !defined.is_empty() {
            url.query_pairs_mut().extend_pairs(defined);
        }
        Ok(url)
    }

    fn sends_cookies(&self, credentials: Credentials, url: &Url) -> bool {
        match credentials {
            Credentials::Include => true,
            Credentials::SameOrigin => Url::parse(&self.base_url)
                .map(|base| same_origin(&base, url))
                .unwrap_or(false),
        }
    }
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

async fn execute(
    method: Method,
    builder: reqwest::RequestBuilder,
) -> Result<HttpResponse, ApiError> {
    let response = builder.send().await.map_err(ApiError::from_transport)?;
    let status = response.status();
    let json = is_json(response.headers());

    if !status.is_success() {
        return Err(error_from_response(response, status, json).await);
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(HttpResponse {
            status: status.as_u16(),
            body: ResponseBody::Empty,
        });
    }

    let text = response.text().await.map_err(ApiError::from_transport)?;

    let body = if method == Method::Delete && text.is_empty() {
        ResponseBody::Empty
    } else if json {
        let value = serde_json::from_str(&text).map_err(|e| {
            ApiError::new(
                ApiErrorKind::Serialization,
                status.as_u16(),
                format!("Response was not valid JSON: {e}"),
            )
        })?;
        ResponseBody::Json(value)
    } else {
        ResponseBody::Text(text)
    };

    Ok(HttpResponse {
        status: status.as_u16(),
        body,
    })
}

async fn error_from_response(
    response: reqwest::Response,
    status: StatusCode,
    json: bool,
) -> ApiError {
    let status_text = status
        .canonical_reason()
        .unwrap_or(FALLBACK_STATUS_TEXT)
        .to_string();
    let text = response.text().await.unwrap_or_default();

    if json {
        if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
            return body.into_api_error(status.as_u16(), status_text);
        }
        return ApiError::new(ApiErrorKind::Http, status.as_u16(), status_text);
    }

    let message = if text.trim().is_empty() {
        status_text
    } else {
        text
    };
    ApiError::new(ApiErrorKind::Http, status.as_u16(), message)
}
