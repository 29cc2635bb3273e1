//! Location resolver: validate → request → read body → decode → format.

use super::config::ResolverConfig;
use super::transport::{Transport, UreqTransport};
use super::types::{GeoRecord, LocationError};
use log::{debug, warn};
use std::io::Read;
use std::net::IpAddr;

/// Resolves IP addresses to a "City, Country" line through one provider endpoint.
///
/// Holds no mutable state, so a shared reference can be used from several
/// threads when the transport allows it.
pub struct LocationResolver<T: Transport = UreqTransport> {
    config: ResolverConfig,
    transport: T,
}

impl LocationResolver<UreqTransport> {
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl Default for LocationResolver<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> LocationResolver<T> {
    /// Create a resolver with a specific transport (for testing).
    pub fn with_transport(config: ResolverConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Look up `ip` and return the decoded record.
    ///
    /// An empty city and country is reported as `NotGeolocatable`.
    pub fn lookup(&self, ip: &str) -> Result<GeoRecord, LocationError> {
        parse_ip(ip)?;
        let url = self.config.url_for(ip);
        debug!("GET {}", url);

        let raw = {
            let mut body = self.transport.get(&url, self.config.user_agent.as_deref())?;
            let mut raw = Vec::new();
            body.read_to_end(&mut raw)
                .map_err(|e| LocationError::MalformedResponse(format!("reading body: {}", e)))?;
            raw
        };

        let record: GeoRecord = serde_json::from_slice(&raw)
            .map_err(|e| LocationError::MalformedResponse(format!("decoding JSON: {}", e)))?;
        debug!("{} -> status={:?} city={:?} country={:?}", ip, record.status, record.city, record.country);

        if record.is_unlocated() {
            if !record.message.is_empty() {
                warn!("Provider could not locate {}: {}", ip, record.message);
            }
            let query = if record.query.is_empty() { ip.to_string() } else { record.query };
            return Err(LocationError::NotGeolocatable {
                query,
                status: record.status,
                message: record.message,
            });
        }

        Ok(record)
    }

    /// Resolve `ip` to `"<city>, <country>"`.
    ///
    /// Invalid input and unlocatable addresses come back as their sentinel
    /// strings; only transport and decode failures are errors.
    pub fn resolve(&self, ip: &str) -> Result<String, LocationError> {
        match self.lookup(ip) {
            Ok(record) => Ok(record.display_line()),
            Err(e) => match e.sentinel() {
                Some(sentinel) => Ok(sentinel.to_string()),
                None => Err(e),
            },
        }
    }
}

/// Dotted-quad or colon-hex, including IPv4-mapped IPv6.
/// Zone identifiers (`fe80::1%eth0`) are not accepted.
fn parse_ip(ip: &str) -> Result<IpAddr, LocationError> {
    ip.parse::<IpAddr>()
        .map_err(|_| LocationError::InvalidInput(ip.to_string()))
}
