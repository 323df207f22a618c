//! Request primitive shared by every endpoint

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::auth::AuthContext;
use super::error::{ClientError, ClientResult};

/// Path prefix of every REST endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Verb, body and extra headers for a single request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Applied after the defaults, so they win on conflict
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Podium REST API client
///
/// Cheap to clone; clones share the HTTP connection pool and the auth
/// context.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    /// Create a client for `base_url` (scheme and host, no `/api/v1`)
    pub fn new(base_url: impl Into<String>, auth: AuthContext) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_context(&self) -> &AuthContext {
        &self.auth
    }

    /// Absolute URL for an endpoint path such as `/api/v1/templates`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn default_headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.auth.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Issue one request and decode the JSON response into `T`.
    ///
    /// Single attempt. Any non-2xx status becomes [`ClientError::Status`];
    /// an empty 2xx body decodes as JSON `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "api_request",
            method = %options.method,
            path,
            %request_id
        );

        let result = self.send(path, options).instrument(span.clone()).await;
        if let Err(e) = &result {
            span.in_scope(|| tracing::error!(error = %e, "API request failed"));
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> ClientResult<T> {
        let mut headers = self.default_headers()?;
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self
            .http
            .request(options.method, self.url(path))
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body).map_err(ClientError::Encode)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Response received");

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(body).map_err(ClientError::Decode)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(path, RequestOptions::new(Method::GET)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::new(Method::POST).json(body)?)
            .await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::new(Method::PATCH).json(body)?)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(path, RequestOptions::new(Method::DELETE)).await
    }
}
