use indexmap::IndexMap;

/// Handle the map widget returns for an overlay it created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Follows the pointer while a route is drawn. Lives as long as the map.
    LivePolyline,
    /// Permanent polyline of a committed route.
    Route,
    /// Search result marker.
    Marker,
}

/// Every overlay the controller created, in creation order.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    overlays: IndexMap<OverlayHandle, OverlayKind>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: OverlayHandle, kind: OverlayKind) {
        if let Some(previous) = self.overlays.insert(handle, kind) {
            log::warn!("Overlay {:?} was registered twice ({:?}).", handle, previous);
        }
    }

    pub fn kind(&self, handle: OverlayHandle) -> Option<OverlayKind> {
        self.overlays.get(&handle).copied()
    }

    pub fn handles(&self, kind: OverlayKind) -> Vec<OverlayHandle> {
        self.overlays
            .iter()
            .filter(|(_, registered)| **registered == kind)
            .map(|(handle, _)| *handle)
            .collect()
    }

    pub fn count(&self, kind: OverlayKind) -> usize {
        self.overlays.values().filter(|registered| **registered == kind).count()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Unregisters all routes and markers and returns their handles, oldest first.
    /// The live polyline stays registered.
    pub fn drain_removable(&mut self) -> Vec<OverlayHandle> {
        let removable: Vec<OverlayHandle> = self
            .overlays
            .iter()
            .filter(|(_, kind)| **kind != OverlayKind::LivePolyline)
            .map(|(handle, _)| *handle)
            .collect();
        self.overlays
            .retain(|_, kind| *kind == OverlayKind::LivePolyline);
        removable
    }

    /// Unregisters everything and returns all handles, oldest first.
    pub fn drain(&mut self) -> Vec<OverlayHandle> {
        self.overlays.drain(..).map(|(handle, _)| handle).collect()
    }
}
