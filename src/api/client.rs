//! Request Core
//!
//! `ApiClient::request` is the only place that talks to the transport. The
//! resource methods in sibling modules only shape paths and bodies.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpTransport, Transport};
use crate::config::Config;

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query value or path segment
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Per-call options for `ApiClient::request`
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the default `Content-Type: application/json`
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::get()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::get()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Client for the DIYDash REST API
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone(), HttpTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, transport }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `options` to `base_url + path` and return the parsed JSON body
    ///
    /// The body is parsed whether or not the status is a success, so error
    /// responses can contribute their `message`/`error` field.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let result = self.send(path, options).await;
        if let Err(err) = &result {
            log::log!(
                err.log_level(),
                "API Error: {} (status: {:?}, detail: {})",
                err.message,
                err.status,
                err.detail.as_deref().unwrap_or("-")
            );
        }
        result
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        log::debug!("{} {}", options.method, url);
        let response = self
            .transport
            .send(HttpRequest {
                method: options.method,
                url,
                headers,
                body: options.body.map(|body| body.to_string()),
            })
            .await?;

        let body = parse_body(&response.body)
            .map_err(|e| ApiError::decode(Some(response.status), e))?;

        if !(200..300).contains(&response.status) {
            return Err(ApiError::from_status(response.status, body));
        }
        Ok(body)
    }
}

/// Empty bodies (204, bare DELETE replies) read as `null`
fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

/// Decode a successful body into a typed value
pub(crate) fn decode<D: DeserializeOwned>(value: Value) -> Result<D, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::decode(None, e))
}

/// `value` unless it is missing or empty
pub(crate) fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component_matches_uri_component() {
        assert_eq!(encode_component("In Progress"), "In%20Progress");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("it's-(ok)_~!*."), "it's-(ok)_~!*.");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body(" \n").unwrap(), Value::Null);
        assert!(parse_body("<html>").is_err());
    }

    #[test]
    fn test_text_or() {
        assert_eq!(text_or(&None, "x"), "x");
        assert_eq!(text_or(&Some(String::new()), "x"), "x");
        assert_eq!(text_or(&Some("y".to_string()), "x"), "y");
    }
}
