//! Response bodies of the Maps web services. Only the fields the drawing tool
//! reads are modeled.

use model::GeoPoint;
use serde::Deserialize;

use crate::{geocoding::GeocodeCandidate, RoutingError};

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    pub distance: TextValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: f64,
}

impl DirectionsResponse {
    /// Distance of the first suggested route in meters.
    pub fn total_distance(self) -> Result<f64, RoutingError> {
        if self.status != STATUS_OK {
            return Err(RoutingError::InvalidStatus {
                status: self.status,
                message: self.error_message,
            });
        }
        let route = self.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;
        if route.legs.is_empty() {
            return Err(RoutingError::NoRoute);
        }
        Ok(route.legs.iter().map(|leg| leg.distance.value).sum())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: GeoPoint,
}

impl GeocodeResponse {
    /// All candidates, or an empty list when the address matched nothing.
    pub fn candidates(self) -> Result<Vec<GeocodeCandidate>, RoutingError> {
        match self.status.as_str() {
            STATUS_OK => Ok(self
                .results
                .into_iter()
                .map(|result| GeocodeCandidate {
                    formatted_address: result.formatted_address,
                    location: result.geometry.location,
                })
                .collect()),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            _ => Err(RoutingError::InvalidStatus {
                status: self.status,
                message: self.error_message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_distance_sums_the_legs() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "routes": [
                    { "legs": [
                        { "distance": { "text": "1.2 km", "value": 1203 } },
                        { "distance": { "text": "0.3 km", "value": 297 } }
                    ] },
                    { "legs": [ { "distance": { "text": "9 km", "value": 9000 } } ] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.total_distance().unwrap(), 1500.0);
    }

    #[test]
    fn directions_error_status_is_reported() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }"#,
        )
        .unwrap();
        match response.total_distance() {
            Err(RoutingError::InvalidStatus { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn directions_without_routes_have_no_route() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{ "status": "OK", "routes": [] }"#).unwrap();
        assert!(matches!(response.total_distance(), Err(RoutingError::NoRoute)));
    }

    #[test]
    fn geocode_candidates_keep_address_and_location() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [ {
                    "formatted_address": "Raisdorf, 24223 Schwentinental, Germany",
                    "geometry": { "location": { "lat": 54.2807, "lng": 10.2478 } }
                } ]
            }"#,
        )
        .unwrap();
        let candidates = response.candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].location, GeoPoint::new(54.2807, 10.2478));
    }

    #[test]
    fn geocode_zero_results_is_empty() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{ "status": "ZERO_RESULTS", "results": [] }"#).unwrap();
        assert!(response.candidates().unwrap().is_empty());
    }
}
