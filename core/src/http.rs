//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `ClientsApi` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network; whoever holds the HTTP stack (a test, a
//! CLI, another service) executes the round-trip in between.

/// HTTP method for a request. Only the methods the clients API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// An HTTP request described as plain data. `path` is the full URL,
/// query string included.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
