use std::error;
use std::fmt;

use async_trait::async_trait;
use model::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::RoutingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub location: GeoPoint,
}

/// Resolves free-text addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// All candidates for `address`, best match first. An unknown address is an
    /// empty list, not an error.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, RoutingError>;
}

#[derive(Debug, Clone)]
pub enum GeocodingError {
    NotFound(String),
    LookupFailed(RoutingError),
}

impl error::Error for GeocodingError {}

impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeocodingError::NotFound(query) => write!(f, "Location not found: {}", query),
            GeocodingError::LookupFailed(e) => write!(f, "Geocoding failed: {}", e),
        }
    }
}

impl From<RoutingError> for GeocodingError {
    fn from(e: RoutingError) -> Self {
        GeocodingError::LookupFailed(e)
    }
}

/// Best candidate for `query`.
pub async fn locate<G: Geocoder + ?Sized>(
    geocoder: &G,
    query: &str,
) -> Result<GeocodeCandidate, GeocodingError> {
    geocoder
        .geocode(query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| GeocodingError::NotFound(query.to_owned()))
}
