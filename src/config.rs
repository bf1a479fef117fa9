use url::Url;

use crate::error::RelayError;

/// Origin every relayed request is sent to.
pub const UPSTREAM_ORIGIN: &str = "https://open.feishu.cn";

/// Path the relay is mounted under, stripped before resolving the upstream path.
pub const MOUNT_PREFIX: &str = "/api/proxy";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Scheme and authority only, never a trailing `/`.
    pub upstream_origin: String,
    /// `host[:port]` of the upstream, used to spot absolute upstream URLs embedded in a path.
    pub upstream_authority: String,
    pub mount_prefix: String,
}

impl RelayConfig {
    pub fn new(upstream_origin: &str, mount_prefix: &str) -> Result<Self, RelayError> {
        let url = Url::parse(upstream_origin)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RelayError::InvalidOrigin(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }

        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(RelayError::InvalidOrigin(format!(
                "{upstream_origin} is not a bare origin"
            )));
        }

        let Some(host) = url.host_str() else {
            return Err(RelayError::InvalidOrigin(format!(
                "{upstream_origin} has no host"
            )));
        };

        let upstream_authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };

        Ok(Self {
            upstream_origin: upstream_origin.trim_end_matches('/').to_owned(),
            upstream_authority,
            mount_prefix: mount_prefix.to_owned(),
        })
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_origin: UPSTREAM_ORIGIN.to_owned(),
            upstream_authority: "open.feishu.cn".to_owned(),
            mount_prefix: MOUNT_PREFIX.to_owned(),
        }
    }
}
