use async_trait::async_trait;
use chrono::Local;
use model::GeoPoint;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{
    credentials::MapsApiCredentials,
    geocoding::{GeocodeCandidate, Geocoder},
    response::{DirectionsResponse, GeocodeResponse},
    RoutingError, RoutingService, TravelMode,
};

pub const MAPS_API_URL: &str = "https://maps.googleapis.com/maps/api";

struct MapsClientState {
    pub available_requests: u64,
    pub last_refill: chrono::DateTime<Local>,
}

/// HTTP client for the Directions and Geocoding web services.
pub struct MapsClient {
    pub credentials: MapsApiCredentials,
    base_url: String,
    http: reqwest::Client,
    state: RwLock<MapsClientState>,
}

impl MapsClient {
    pub fn new(credentials: &MapsApiCredentials) -> Result<Self, RoutingError> {
        Self::with_base_url(credentials, MAPS_API_URL)
    }

    pub fn with_base_url<S: Into<String>>(
        credentials: &MapsApiCredentials,
        base_url: S,
    ) -> Result<Self, RoutingError> {
        /* build the http client with optional proxy */
        let mut builder = reqwest::Client::builder().timeout(credentials.timeout());
        if let Some(proxy_url) = &credentials.proxy {
            log::info!("Using proxy '{proxy_url}' for maps requests.");
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            credentials: credentials.clone(),
            base_url: base_url.into(),
            http: builder.build()?,
            state: RwLock::new(MapsClientState {
                available_requests: credentials.rate_limit_per_minute.unwrap_or(0),
                last_refill: chrono::offset::Local::now(),
            }),
        })
    }

    pub async fn available_requests(&self) -> u64 {
        self.state.read().await.available_requests
    }

    async fn try_decrement_available_requests(&self) -> Result<(), RoutingError> {
        if let Some(rate_limit_minutes) = self.credentials.rate_limit_per_minute {
            let mut state = self.state.write().await;

            let minutes_since_last_refill =
                (chrono::offset::Local::now() - state.last_refill).num_minutes();
            if minutes_since_last_refill >= 1 {
                state.available_requests = rate_limit_minutes;
                state.last_refill = chrono::offset::Local::now();
            }

            if state.available_requests != 0 {
                state.available_requests -= 1;
            } else {
                return Err(RoutingError::RateLimitReached);
            }
        }
        Ok(())
    }

    /// Fetch a JSON document from an endpoint using this client.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, RoutingError> {
        self.try_decrement_available_requests().await?;

        let url = format!("{}/{endpoint}/json", self.base_url);
        log::debug!("Requesting endpoint '{endpoint}'.");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.credentials.api_key.as_str())])
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(serde_json::from_str(&response.text().await?)?),
            other => Err(RoutingError::InvalidStatus {
                status: other.to_string(),
                message: response.text().await.ok(),
            }),
        }
    }
}

fn waypoint(point: &GeoPoint) -> String {
    format!("{},{}", point.lat, point.lng)
}

#[async_trait]
impl RoutingService for MapsClient {
    async fn route_distance(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        mode: TravelMode,
    ) -> Result<f64, RoutingError> {
        let response: DirectionsResponse = self
            .get(
                "directions",
                &[
                    ("origin", waypoint(&origin)),
                    ("destination", waypoint(&destination)),
                    ("mode", mode.text().to_owned()),
                ],
            )
            .await?;
        response.total_distance()
    }
}

#[async_trait]
impl Geocoder for MapsClient {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, RoutingError> {
        let response: GeocodeResponse = self
            .get("geocode", &[("address", address.to_owned())])
            .await?;
        response.candidates()
    }
}
