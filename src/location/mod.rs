//! IP geolocation subsystem.
//!
//! Validates an address, queries the ip-api.com JSON endpoint with a single
//! blocking GET, and renders the result as "City, Country".

pub mod config;
pub mod resolver;
pub mod transport;
pub mod types;

pub use config::{ResolverConfig, DEFAULT_ENDPOINT};
pub use resolver::LocationResolver;
pub use transport::{Transport, UreqTransport};
pub use types::{GeoRecord, LocationError, INVALID_IP, UNKNOWN_IP};
