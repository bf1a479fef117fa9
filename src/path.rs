use std::borrow::Cow;

use crate::config::RelayConfig;

/// How an incoming path (with the mount prefix already removed) refers to the upstream.
#[derive(Debug, PartialEq, Eq)]
pub enum PathShape<'a> {
    /// Already relative to the upstream root, e.g. `/open-apis/...`.
    UpstreamRelative,
    /// A full upstream URL appended to the mount path, cors-anywhere style.
    /// `rest` is everything after the upstream authority and any explicit port.
    EmbeddedAbsolute { rest: &'a str },
    /// Mentions the upstream authority but not as a URL we can cut a path out of.
    Unrecognized,
}

/// Removes `prefix` when the path starts with it, otherwise returns the path untouched.
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or(path)
}

pub fn classify<'a>(path: &'a str, authority: &str) -> PathShape<'a> {
    let Some((_, rest)) = path.split_once(authority) else {
        return PathShape::UpstreamRelative;
    };

    // The port is dropped; the configured origin decides where requests go.
    let rest = match rest.strip_prefix(':') {
        Some(port_and_rest) => {
            let digits = port_and_rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(port_and_rest.len());
            if digits == 0 {
                return PathShape::Unrecognized;
            }
            &port_and_rest[digits..]
        }
        None => rest,
    };

    if rest.is_empty() || rest.starts_with('/') {
        PathShape::EmbeddedAbsolute { rest }
    } else {
        PathShape::Unrecognized
    }
}

/// Resolves a prefix-stripped path to a path relative to the upstream root.
pub fn normalize_path<'a>(path: &'a str, authority: &str) -> &'a str {
    match classify(path, authority) {
        PathShape::UpstreamRelative => path,
        PathShape::EmbeddedAbsolute { rest } => rest,
        PathShape::Unrecognized => {
            tracing::debug!("path {path} mentions {authority} but has no usable tail, relaying as-is");
            path
        }
    }
}

/// Anchors a non-empty path at the upstream root so nothing can be appended to the origin's authority.
pub fn root_relative(path: &str) -> Cow<'_, str> {
    if path.is_empty() || path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Builds the full upstream URL for an incoming request path and raw query string.
pub fn upstream_url(config: &RelayConfig, path: &str, query: Option<&str>) -> String {
    let path = strip_mount_prefix(path, &config.mount_prefix);
    let path = root_relative(normalize_path(path, &config.upstream_authority));

    match query {
        Some(query) if !query.is_empty() => {
            format!("{}{path}?{query}", config.upstream_origin)
        }
        _ => format!("{}{path}", config.upstream_origin),
    }
}
