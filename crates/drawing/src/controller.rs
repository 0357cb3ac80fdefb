use std::sync::Arc;

use chrono::NaiveDate;
use gtfs::{ExportDocument, ExportError, ExportFormat};
use model::{DistanceEstimate, GeoPoint, RouteRecord};
use routing::{
    client::MapsClient,
    credentials::{ConfigError, API_KEY_VAR},
    geocoding, GeocodeCandidate, Geocoder, GeocodingError, RouteFinder, RoutingService,
};
use tokio::sync::mpsc;

use crate::{
    collection::RouteCollection,
    config::{DrawingConfig, FinishTrigger},
    overlay::{OverlayHandle, OverlayKind, OverlayRegistry},
    session::{DistanceTicket, DrawingSession, Status},
    widget::{Key, MapWidget, PointerButton},
    DrawingError,
};

pub const NOT_FOUND_MESSAGE: &str = "Location not found. Please try again.";
pub const CALCULATING: &str = "Calculating...";

/// The external lookups the controller may use.
#[derive(Clone, Default)]
pub struct Services {
    pub routing: Option<Arc<dyn RoutingService>>,
    pub geocoder: Option<Arc<dyn Geocoder>>,
}

impl Services {
    pub fn none() -> Self {
        Self::default()
    }

    /// Routing and geocoding through one shared maps client.
    pub fn maps(client: MapsClient) -> Self {
        let client = Arc::new(client);
        Self {
            routing: Some(client.clone()),
            geocoder: Some(client),
        }
    }
}

/// What an input event did to the drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Ignored,
    Started,
    Extended(DistanceTicket),
    /// A route was committed at this 0-based position of the collection.
    Committed(usize),
    Discarded(DrawingError),
}

/// What the side panel shows about the current or last route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDetails {
    pub start_point: GeoPoint,
    /// `None` while the route is still being drawn.
    pub end_point: Option<GeoPoint>,
    pub distance: String,
}

#[derive(Debug)]
struct DistanceUpdate {
    ticket: DistanceTicket,
    estimate: DistanceEstimate,
}

/// Owns everything that belongs to one map view: the widget, the drawing in
/// progress, the committed routes and the overlays created for them.
///
/// Events must be delivered from within a tokio runtime; distance lookups for
/// the live path run as spawned tasks and report back over a channel.
pub struct MapController<W: MapWidget> {
    widget: W,
    config: DrawingConfig,
    session: DrawingSession,
    collection: RouteCollection,
    overlays: OverlayRegistry,
    live_polyline: OverlayHandle,
    finder: RouteFinder,
    geocoder: Option<Arc<dyn Geocoder>>,
    updates_tx: mpsc::UnboundedSender<DistanceUpdate>,
    updates_rx: mpsc::UnboundedReceiver<DistanceUpdate>,
    /// Lookups spawned but not yet received.
    pending: usize,
}

impl<W: MapWidget> MapController<W> {
    /// Initializes the map with a maps client built from the configured
    /// credentials.
    pub fn init(config: DrawingConfig, widget: W) -> Result<Self, ConfigError> {
        let Some(credentials) = &config.credentials else {
            log::error!("{} is missing, the map is not initialized.", API_KEY_VAR);
            return Err(ConfigError::ConfigurationMissing(API_KEY_VAR));
        };
        let client = MapsClient::new(credentials)
            .map_err(|why| ConfigError::ClientSetup(why.to_string()))?;
        Self::init_with(config, widget, Services::maps(client))
    }

    /// Initializes the map with the given lookups. Disabled features drop the
    /// corresponding service.
    pub fn init_with(
        config: DrawingConfig,
        mut widget: W,
        services: Services,
    ) -> Result<Self, ConfigError> {
        if config.credentials.is_none() {
            log::error!("{} is missing, the map is not initialized.", API_KEY_VAR);
            return Err(ConfigError::ConfigurationMissing(API_KEY_VAR));
        }

        let finder = match services.routing {
            Some(service) if config.features.routed_distance => RouteFinder::routed(service),
            _ => RouteFinder::straight_line(),
        };
        let geocoder = services.geocoder.filter(|_| config.features.geocoding);

        widget.set_viewport(config.viewport.center, config.viewport.zoom);
        let live_polyline = widget.create_polyline(&[], &config.polyline_style);
        let mut overlays = OverlayRegistry::new();
        overlays.register(live_polyline, OverlayKind::LivePolyline);

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        log::info!(
            "Map initialized (routed distance: {}, geocoding: {}, finish: {:?}).",
            finder.is_routed(),
            geocoder.is_some(),
            config.finish_trigger
        );

        Ok(Self {
            widget,
            config,
            session: DrawingSession::new(),
            collection: RouteCollection::new(),
            overlays,
            live_polyline,
            finder,
            geocoder,
            updates_tx,
            updates_rx,
            pending: 0,
        })
    }

    /// Removes every overlay the controller created and hands the widget back.
    pub fn teardown(mut self) -> W {
        self.widget.stop_listening_pointer_moves();
        for overlay in self.overlays.drain() {
            self.widget.remove_overlay(overlay);
        }
        log::info!("Map torn down with {} routes.", self.collection.len());
        self.widget
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.session.status()
    }

    pub fn routes(&self) -> &RouteCollection {
        &self.collection
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    /// Number of distance lookups whose result has not been received yet.
    pub fn pending_lookups(&self) -> usize {
        self.pending
    }

    pub async fn pointer_down(&mut self, button: PointerButton, point: GeoPoint) -> EventOutcome {
        if button != PointerButton::Primary {
            return EventOutcome::Ignored;
        }
        match self.session.status() {
            Status::Idle => self.start(point),
            Status::Active if self.config.finish_trigger == FinishTrigger::PointerDown => {
                self.finish_outcome().await
            }
            Status::Active => EventOutcome::Ignored,
        }
    }

    pub async fn key_press(&mut self, key: Key) -> EventOutcome {
        if key == Key::Enter
            && self.session.is_active()
            && self.config.finish_trigger == FinishTrigger::EnterKey
        {
            self.finish_outcome().await
        } else {
            EventOutcome::Ignored
        }
    }

    fn start(&mut self, point: GeoPoint) -> EventOutcome {
        if let Err(why) = self.session.start(point) {
            return EventOutcome::Discarded(why);
        }
        self.widget.set_polyline_path(self.live_polyline, &[point]);
        self.widget.listen_pointer_moves();
        EventOutcome::Started
    }

    /// Extends the live path. Distances that resolved since the last event are
    /// applied first; the overlay follows immediately and the new distance is
    /// computed in the background.
    pub fn pointer_move(&mut self, point: GeoPoint) -> EventOutcome {
        self.poll_distance_updates();
        let ticket = match self.session.push(point) {
            Ok(ticket) => ticket,
            Err(_) => return EventOutcome::Ignored,
        };
        let points = match self.session.path() {
            Some(path) => path.points().to_vec(),
            None => return EventOutcome::Ignored,
        };
        self.widget.set_polyline_path(self.live_polyline, &points);

        let finder = self.finder.clone();
        let updates = self.updates_tx.clone();
        tokio::spawn(async move {
            let estimate = finder.path_distance(&points).await;
            // the receiver lives as long as the controller
            let _ = updates.send(DistanceUpdate { ticket, estimate });
        });
        self.pending += 1;

        EventOutcome::Extended(ticket)
    }

    /// Applies every distance that has resolved so far and returns how many of
    /// them were still current.
    pub fn poll_distance_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates_rx.try_recv() {
            self.pending -= 1;
            if self.session.apply_distance(update.ticket, update.estimate) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next distance to resolve and applies it unless stale.
    /// Returns `false` right away when no lookup is pending.
    pub async fn next_distance_update(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        let Some(update) = self.updates_rx.recv().await else {
            return false;
        };
        self.pending -= 1;
        self.session.apply_distance(update.ticket, update.estimate)
    }

    async fn finish_outcome(&mut self) -> EventOutcome {
        let committed = self.finish().await.map(|_| ());
        match committed {
            Ok(()) => EventOutcome::Committed(self.collection.len() - 1),
            Err(why) => EventOutcome::Discarded(why),
        }
    }

    /// Ends the drawing. Paths with at least two points become a route with a
    /// permanent overlay; shorter ones are dropped.
    pub async fn finish(&mut self) -> Result<&RouteRecord, DrawingError> {
        self.widget.stop_listening_pointer_moves();
        let path = self.session.finish()?;
        self.widget.set_polyline_path(self.live_polyline, &[]);

        if path.len() < 2 {
            log::debug!("Discarded a route with {} points.", path.len());
            return Err(DrawingError::DegenerateRoute { points: path.len() });
        }

        let distance = self.finder.path_distance(path.points()).await;
        let record = RouteRecord::new(path, distance)
            .ok_or(DrawingError::DegenerateRoute { points: 0 })?;

        let overlay = self
            .widget
            .create_polyline(record.path().points(), &self.config.polyline_style);
        self.overlays.register(overlay, OverlayKind::Route);

        log::info!(
            "Committed route {} with {} points ({}).",
            self.collection.len() + 1,
            record.path().len(),
            record.distance()
        );
        self.collection.append(record);
        self.collection.last().ok_or(DrawingError::NotDrawing)
    }

    /// Drops the drawing in progress, all committed routes and every overlay
    /// created for them.
    pub fn clear(&mut self) {
        self.widget.stop_listening_pointer_moves();
        self.session.cancel();
        self.collection.clear();
        for overlay in self.overlays.drain_removable() {
            self.widget.remove_overlay(overlay);
        }
        self.widget.set_polyline_path(self.live_polyline, &[]);
        // results of lookups still in flight are stale by now
        while self.updates_rx.try_recv().is_ok() {
            self.pending -= 1;
        }
        log::info!("Map cleared.");
    }

    /// Centers the map on the best match for `query` and marks it. Blank queries
    /// and a disabled search do nothing.
    pub async fn search(&mut self, query: &str) -> Result<Option<GeocodeCandidate>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let Some(geocoder) = self.geocoder.clone() else {
            log::debug!("Search is disabled, ignoring '{}'.", query);
            return Ok(None);
        };

        match geocoding::locate(geocoder.as_ref(), query).await {
            Ok(candidate) => {
                self.widget
                    .set_viewport(candidate.location, self.config.search_zoom);
                let marker = self
                    .widget
                    .place_marker(candidate.location, &candidate.formatted_address);
                self.overlays.register(marker, OverlayKind::Marker);
                Ok(Some(candidate))
            }
            Err(why) => {
                log::warn!("Geocoding failed: {}", why);
                self.widget.notify(NOT_FOUND_MESSAGE);
                Err(why)
            }
        }
    }

    pub fn route_details(&self) -> Option<RouteDetails> {
        if let Some(start_point) = self.session.start_point() {
            let distance = if self.session.has_estimate() {
                self.session.live_distance().display()
            } else {
                CALCULATING.to_owned()
            };
            return Some(RouteDetails {
                start_point,
                end_point: None,
                distance,
            });
        }
        self.collection.last().map(|route| RouteDetails {
            start_point: route.start_point(),
            end_point: Some(route.end_point()),
            distance: route.distance().display(),
        })
    }

    fn effective_format(&self, format: ExportFormat) -> ExportFormat {
        if format == ExportFormat::Gtfs && !self.config.features.gtfs_export {
            log::debug!("GTFS export is disabled, exporting plain routes.");
            ExportFormat::Plain
        } else {
            format
        }
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportDocument, ExportError> {
        gtfs::serialize(self.collection.all(), self.effective_format(format))
    }

    pub fn export_on(
        &self,
        format: ExportFormat,
        date: NaiveDate,
    ) -> Result<ExportDocument, ExportError> {
        gtfs::serialize_on(self.collection.all(), self.effective_format(format), date)
    }
}
