//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned by `resolve` when the input is not an IPv4/IPv6 address.
pub const INVALID_IP: &str = "Invalid IP Address";

/// Returned by `resolve` when the provider knows neither city nor country.
pub const UNKNOWN_IP: &str = "<unknown-IP>";

/// One decoded ip-api.com response.
///
/// Decoding is permissive: every field falls back to an empty string or
/// zero, and fields the provider adds later are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoRecord {
    /// Autonomous system, e.g. "AS15169 Google LLC"
    #[serde(rename = "as")]
    pub as_desc: String,
    pub city: String,
    pub country: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "US")
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub isp: String,
    pub lat: f64,
    pub lon: f64,
    pub org: String,
    /// The address the provider actually looked up.
    pub query: String,
    pub region: String,
    #[serde(rename = "regionName")]
    pub region_name: String,
    /// "success" or "fail"
    pub status: String,
    pub timezone: String,
    pub zip: String,
    /// Failure reason on `status == "fail"` (e.g. "private range")
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl GeoRecord {
    /// `"<city>, <country>"`, even if one side is empty.
    pub fn display_line(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    pub fn is_unlocated(&self) -> bool {
        self.city.is_empty() && self.country.is_empty()
    }
}

/// Lookup errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("'{0}' is not a valid IP address")]
    InvalidInput(String),
    #[error("Something wrong with contacting the API: {0}")]
    Unreachable(String),
    #[error("Something wrong with the API response: {0}")]
    MalformedResponse(String),
    #[error("No location known for {query} (status: {status}{})", fmt_message(.message))]
    NotGeolocatable {
        query: String,
        status: String,
        message: String,
    },
}

fn fmt_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(", {}", message)
    }
}

impl LocationError {
    /// The fixed string `resolve` answers with for the locally recovered kinds.
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput(_) => Some(INVALID_IP),
            Self::NotGeolocatable { .. } => Some(UNKNOWN_IP),
            Self::Unreachable(_) | Self::MalformedResponse(_) => None,
        }
    }
}
