pub mod location;

pub use location::{GeoRecord, LocationError, LocationResolver, ResolverConfig};
