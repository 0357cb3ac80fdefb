use std::sync::Arc;
use std::time::Duration;

use model::{DistanceEstimate, GeoPoint};
use utility::geo;

use crate::{RoutingError, RoutingService, TravelMode};

pub const DEFAULT_SEGMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Estimates path lengths, preferring road network distances and falling back to
/// great-circle distances whenever the routing service can not help.
///
/// Estimates never fail: a broken routing service only degrades the provenance
/// of the result to [`model::Provenance::StraightLine`].
#[derive(Clone)]
pub struct RouteFinder {
    service: Option<Arc<dyn RoutingService>>,
    mode: TravelMode,
    segment_timeout: Duration,
}

impl RouteFinder {
    /// A finder that never contacts a routing service.
    pub fn straight_line() -> Self {
        Self {
            service: None,
            mode: TravelMode::Driving,
            segment_timeout: DEFAULT_SEGMENT_TIMEOUT,
        }
    }

    pub fn routed(service: Arc<dyn RoutingService>) -> Self {
        Self {
            service: Some(service),
            ..Self::straight_line()
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_segment_timeout(mut self, timeout: Duration) -> Self {
        self.segment_timeout = timeout;
        self
    }

    pub fn is_routed(&self) -> bool {
        self.service.is_some()
    }

    async fn lookup(
        &self,
        service: &dyn RoutingService,
        a: GeoPoint,
        b: GeoPoint,
    ) -> Result<f64, RoutingError> {
        tokio::time::timeout(self.segment_timeout, service.route_distance(a, b, self.mode))
            .await?
    }

    /// Distance between two consecutive vertices.
    pub async fn segment_distance(&self, a: GeoPoint, b: GeoPoint) -> DistanceEstimate {
        let Some(service) = &self.service else {
            return DistanceEstimate::straight_line(a.distance_to(&b));
        };
        match self.lookup(service.as_ref(), a, b).await {
            Ok(meters) => DistanceEstimate::routed(meters),
            Err(why) => {
                log::warn!("Route lookup failed, using straight line: {}", why);
                DistanceEstimate::straight_line(a.distance_to(&b))
            }
        }
    }

    /// Routed length of `points`, looked up one segment after another. The first
    /// failing segment aborts the whole lookup.
    pub async fn try_routed_distance(&self, points: &[GeoPoint]) -> Result<f64, RoutingError> {
        let Some(service) = &self.service else {
            return Err(RoutingError::NoRoute);
        };
        let mut total = 0.0;
        for segment in points.windows(2) {
            total += self.lookup(service.as_ref(), segment[0], segment[1]).await?;
        }
        Ok(total)
    }

    /// Length of `points`. Either every segment is routed, or the whole path is
    /// measured as straight lines.
    pub async fn path_distance(&self, points: &[GeoPoint]) -> DistanceEstimate {
        if points.len() < 2 {
            return DistanceEstimate::zero();
        }
        if !self.is_routed() {
            return DistanceEstimate::straight_line(geo::path_distance(points));
        }
        match self.try_routed_distance(points).await {
            Ok(meters) => DistanceEstimate::routed(meters),
            Err(why) => {
                log::warn!(
                    "Route calculation failed for {} points, using straight lines: {}",
                    points.len(),
                    why
                );
                DistanceEstimate::straight_line(geo::path_distance(points))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_relative_eq;
    use async_trait::async_trait;
    use model::Provenance;

    use super::*;

    /// Routes are 1.5 times the straight line, except when `fail_on` is hit.
    struct Detour {
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    impl Detour {
        fn new(fail_on: Option<usize>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_on,
            })
        }
    }

    #[async_trait]
    impl RoutingService for Detour {
        async fn route_distance(
            &self,
            origin: GeoPoint,
            destination: GeoPoint,
            mode: TravelMode,
        ) -> Result<f64, RoutingError> {
            assert_eq!(mode, TravelMode::Driving);
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if Some(call) == self.fail_on {
                return Err(RoutingError::InvalidStatus {
                    status: "OVER_QUERY_LIMIT".to_owned(),
                    message: None,
                });
            }
            Ok(origin.distance_to(&destination) * 1.5)
        }
    }

    struct Offline;

    #[async_trait]
    impl RoutingService for Offline {
        async fn route_distance(
            &self,
            _origin: GeoPoint,
            _destination: GeoPoint,
            _mode: TravelMode,
        ) -> Result<f64, RoutingError> {
            Err(RoutingError::Timeout)
        }
    }

    struct Stalled;

    #[async_trait]
    impl RoutingService for Stalled {
        async fn route_distance(
            &self,
            _origin: GeoPoint,
            _destination: GeoPoint,
            _mode: TravelMode,
        ) -> Result<f64, RoutingError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(0.0)
        }
    }

    fn zigzag() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(40.0, -74.0),
            GeoPoint::new(40.01, -74.0),
            GeoPoint::new(40.01, -73.99),
            GeoPoint::new(40.02, -73.99),
        ]
    }

    #[tokio::test]
    async fn routed_path_sums_all_segments() {
        let service = Detour::new(None);
        let finder = RouteFinder::routed(service.clone());
        let estimate = finder.path_distance(&zigzag()).await;

        assert_eq!(estimate.provenance(), Provenance::Routed);
        assert_relative_eq!(
            estimate.meters(),
            geo::path_distance(&zigzag()) * 1.5,
            max_relative = 1e-9
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn one_failing_segment_falls_back_for_the_whole_path() {
        let service = Detour::new(Some(1));
        let finder = RouteFinder::routed(service.clone());
        let estimate = finder.path_distance(&zigzag()).await;

        assert_eq!(estimate.provenance(), Provenance::StraightLine);
        assert_relative_eq!(estimate.meters(), geo::path_distance(&zigzag()));
        // the lookup stops at the failing segment
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_service_equals_pure_geometry() {
        let finder = RouteFinder::routed(Arc::new(Offline));
        let points = zigzag();
        for len in 0..=points.len() {
            let estimate = finder.path_distance(&points[..len]).await;
            assert_relative_eq!(estimate.meters(), geo::path_distance(&points[..len]));
        }
    }

    #[tokio::test]
    async fn failing_segment_uses_straight_line() {
        let finder = RouteFinder::routed(Arc::new(Offline));
        let (a, b) = (GeoPoint::new(40.0, -74.0), GeoPoint::new(40.01, -74.0));
        let estimate = finder.segment_distance(a, b).await;
        assert_eq!(estimate.provenance(), Provenance::StraightLine);
        assert_relative_eq!(estimate.meters(), 1111.95, epsilon = 0.01);
    }

    #[tokio::test]
    async fn short_paths_never_reach_the_service() {
        let service = Detour::new(None);
        let finder = RouteFinder::routed(service.clone());
        let estimate = finder.path_distance(&[GeoPoint::new(40.0, -74.0)]).await;
        assert_eq!(estimate.meters(), 0.0);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn straight_line_finder_ignores_routing() {
        let estimate = RouteFinder::straight_line().path_distance(&zigzag()).await;
        assert_eq!(estimate.provenance(), Provenance::StraightLine);
        assert_relative_eq!(estimate.meters(), geo::path_distance(&zigzag()));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_lookups_time_out() {
        let finder = RouteFinder::routed(Arc::new(Stalled))
            .with_segment_timeout(Duration::from_secs(5));
        let estimate = finder.path_distance(&zigzag()[..2]).await;
        assert_eq!(estimate.provenance(), Provenance::StraightLine);
    }
}
