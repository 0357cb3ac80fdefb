use std::process;

use drawing::{
    DrawingConfig, Key, MapController, MapWidget, OverlayHandle, PointerButton, PolylineStyle,
};
use gtfs::ExportFormat;
use model::{ExampleData, GeoPoint, Path};
use routing::credentials::ConfigError;

/// Map widget that only logs what it is asked to draw.
#[derive(Default)]
struct ConsoleWidget {
    overlays: u64,
}

impl ConsoleWidget {
    fn next_handle(&mut self) -> OverlayHandle {
        self.overlays += 1;
        OverlayHandle(self.overlays)
    }
}

impl MapWidget for ConsoleWidget {
    fn listen_pointer_moves(&mut self) {
        log::debug!("listening for pointer moves");
    }

    fn stop_listening_pointer_moves(&mut self) {
        log::debug!("stopped listening for pointer moves");
    }

    fn create_polyline(&mut self, points: &[GeoPoint], style: &PolylineStyle) -> OverlayHandle {
        let handle = self.next_handle();
        log::info!(
            "polyline {:?} with {} points in {}",
            handle,
            points.len(),
            style.stroke_color
        );
        handle
    }

    fn set_polyline_path(&mut self, overlay: OverlayHandle, points: &[GeoPoint]) {
        log::debug!("polyline {:?} now has {} points", overlay, points.len());
    }

    fn place_marker(&mut self, position: GeoPoint, title: &str) -> OverlayHandle {
        let handle = self.next_handle();
        log::info!("marker {:?} '{}' at {}", handle, title, position);
        handle
    }

    fn remove_overlay(&mut self, overlay: OverlayHandle) {
        log::info!("removed overlay {:?}", overlay);
    }

    fn set_viewport(&mut self, center: GeoPoint, zoom: u8) {
        log::info!("viewport {} at zoom {}", center, zoom);
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = DrawingConfig::from_env().expect("invalid configuration in env.");
    let mut map = match MapController::init(config, ConsoleWidget::default()) {
        Ok(map) => map,
        // already reported by the controller
        Err(ConfigError::ConfigurationMissing(_)) => process::exit(1),
        Err(why) => {
            log::error!("could not initialize the map: {}", why);
            process::exit(1);
        }
    };

    if let Err(why) = map.search("Raisdorf, Germany").await {
        log::warn!("{}", why);
    }

    let path = Path::example_data();
    let mut points = path.points().iter().copied();
    if let Some(start) = points.next() {
        map.pointer_down(PointerButton::Primary, start).await;
    }
    for point in points {
        map.pointer_move(point);
        map.next_distance_update().await;
        if let Some(details) = map.route_details() {
            println!("distance so far: {}", details.distance);
        }
    }
    map.key_press(Key::Enter).await;

    if let Some(details) = map.route_details() {
        println!(
            "route from {} to {}: {}",
            details.start_point,
            details
                .end_point
                .map(|point| point.to_string())
                .unwrap_or_default(),
            details.distance
        );
    }

    for format in [ExportFormat::Plain, ExportFormat::Gtfs] {
        let document = map.export(format).expect("could not serialize routes.");
        match document.write_to(".") {
            Ok(path) => println!("wrote {}", path.display()),
            Err(why) => log::error!("could not write {}: {}", document.filename, why),
        }
    }

    map.teardown();
}
