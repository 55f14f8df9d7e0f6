use std::time::Duration;

use url::Url;

use crate::{FailureKind, ServiceError};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub service_base_address: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ServiceSettings {
    pub const DEFAULT_BASE_ADDRESS: &'static str = "http://127.0.0.1:8000";
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(service_base_address: Url) -> Self {
        Self {
            service_base_address,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Parses `address` and checks it can carry endpoint paths.
    pub fn parse(address: &str) -> Result<Self, ServiceError> {
        let url = Url::parse(address.trim())
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ServiceError::new(
                FailureKind::InvalidUrl,
                format!("{address} is not an http(s) base address"),
            ));
        }
        Ok(Self::new(url))
    }

    /// Appends percent-encoded path segments to the base address.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.service_base_address.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ServiceError::new(
                    FailureKind::InvalidUrl,
                    format!("{} cannot be a base address", self.service_base_address),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
