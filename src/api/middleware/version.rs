//! API version negotiation middleware.
//!
//! The requested version is resolved from the `x-version` header, falling
//! back to the `ver`/`version` query parameters, defaulting to 1.1 when
//! unspecified. The resolved version is stored in request extensions and
//! echoed back on every response:
//!
//! ```text
//! api-version: 1.1
//! api-supported-versions: 1.0, 1.1
//! ```

use std::fmt;
use std::str::FromStr;

use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::error::AppError;

pub const VERSION_HEADER: &str = "x-version";
pub const VERSION_QUERY_PARAMS: &[&str] = &["ver", "version"];

static API_VERSION: HeaderName = HeaderName::from_static("api-version");
static SUPPORTED_VERSIONS: HeaderName = HeaderName::from_static("api-supported-versions");

/// A supported API version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    V1_0,
    #[default]
    V1_1,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1_0 => "1.0",
            ApiVersion::V1_1 => "1.1",
        }
    }

    /// Comma-separated list of all supported versions.
    pub fn supported() -> &'static str {
        "1.0, 1.1"
    }
}

impl FromStr for ApiVersion {
    type Err = ();

    /// Accepts `major` or `major.minor` form; a bare major maps to `.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(ApiVersion::V1_0),
            "1.1" => Ok(ApiVersion::V1_1),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the API version for a request and reports it on the response.
///
/// # Errors
///
/// Returns `400 Bad Request` when the requested version is malformed or not
/// supported.
pub async fn layer(mut req: Request, next: Next) -> Result<Response, AppError> {
    let version = resolve(&req)?;
    req.extensions_mut().insert(version);

    let mut res = next.run(req).await;
    res.headers_mut()
        .insert(&API_VERSION, HeaderValue::from_static(version.as_str()));
    res.headers_mut().insert(
        &SUPPORTED_VERSIONS,
        HeaderValue::from_static(ApiVersion::supported()),
    );
    Ok(res)
}

fn resolve(req: &Request) -> Result<ApiVersion, AppError> {
    let requested = requested_version(req);

    match requested {
        None => Ok(ApiVersion::default()),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::bad_request(
                "Unsupported API version",
                json!({ "requested": raw, "supported": ApiVersion::supported() }),
            )
        }),
    }
}

/// The raw version string from the request, header first, then query.
fn requested_version(req: &Request) -> Option<String> {
    if let Some(value) = req.headers().get(VERSION_HEADER) {
        return Some(value.to_str().unwrap_or_default().to_string());
    }

    let query = req.uri().query()?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        VERSION_QUERY_PARAMS
            .contains(&key)
            .then(|| value.to_string())
    })
}
