//! HTTP client performing exactly one round trip per call.

use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use super::error::SendError;

/// Password sent alongside a token used as the basic-auth username.
pub const OAUTH_BASIC_PASSWORD: &str = "x-oauth-basic";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// One outbound request: method, absolute URL, optional body, credential and
/// content type.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    method: Method,
    url: &'a str,
    body: Option<Vec<u8>>,
    credential: Option<&'a str>,
    content_type: Option<&'a str>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: Method, url: &'a str) -> Self {
        Self {
            method,
            url,
            body: None,
            credential: None,
            content_type: None,
        }
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Empty credentials are ignored, no Authorization header is sent.
    pub fn credential(mut self, credential: &'a str) -> Self {
        self.credential = Some(credential).filter(|c| !c.is_empty());
        self
    }

    /// Empty content types fall back to `application/json`.
    pub fn content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type).filter(|c| !c.is_empty());
        self
    }
}

/// A fully read response.
#[derive(Debug)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decodes the body into `T`. An empty body yields `None`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>, SendError> {
        if self.body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(|source| SendError::Decode {
                url: self.url.clone(),
                source,
            })
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Sends the request and reads the whole response body.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = request.url))]
    pub async fn send(&self, request: ApiRequest<'_>) -> Result<ApiResponse, SendError> {
        let ApiRequest {
            method,
            url,
            body,
            credential,
            content_type,
        } = request;

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, content_type.unwrap_or(DEFAULT_CONTENT_TYPE));

        if let Some(token) = credential {
            builder = builder.basic_auth(token, Some(OAUTH_BASIC_PASSWORD));
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let built = builder.build().map_err(|source| SendError::Build {
            method: method.clone(),
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .execute(built)
            .await
            .map_err(|source| SendError::Transport {
                method,
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| SendError::ReadBody {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        debug!("StatusCode: {}", status);
        debug!("Header: {:?}", headers);
        debug!("Body: {}", String::from_utf8_lossy(&body));

        Ok(ApiResponse {
            url: url.to_string(),
            status,
            headers,
            body,
        })
    }
}
