//! Per-request context.
//!
//! One `RequestContext` is created for every inbound request and dropped
//! with it. The router writes captured path parameters into it; handlers
//! read them along with headers, body and the request-scoped key store.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Captured path parameters, keyed by parameter name.
pub type PathParams = HashMap<String, String>;

/// State owned by a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub remote_addr: Option<SocketAddr>,
    pub request_id: Option<String>,
    pub body: Bytes,
    pub path_params: PathParams,
    keys: HashMap<String, Value>,
}

impl RequestContext {
    /// Context with no headers, body or captures yet.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// A captured path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// A header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Store a value for the rest of this request.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.keys.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Deserialize the buffered body as JSON.
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
