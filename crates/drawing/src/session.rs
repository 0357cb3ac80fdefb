use model::{DistanceEstimate, GeoPoint, Path};

use crate::DrawingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Active,
}

/// Identifies the path prefix a distance computation was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceTicket {
    generation: u64,
    path_len: usize,
}

impl DistanceTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path_len(&self) -> usize {
        self.path_len
    }
}

/// The route currently being drawn.
///
/// Points are appended synchronously in event order, while distances arrive
/// asynchronously and possibly out of order. Every estimate is therefore tagged
/// with a [`DistanceTicket`]; an estimate is only applied if it belongs to the
/// current drawing and covers at least as many points as the last applied one.
#[derive(Debug, Default)]
pub struct DrawingSession {
    status: Status,
    path: Option<Path>,
    start_point: Option<GeoPoint>,
    live_distance: DistanceEstimate,
    applied_len: usize,
    generation: u64,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn start_point(&self) -> Option<GeoPoint> {
        self.start_point
    }

    pub fn live_distance(&self) -> DistanceEstimate {
        self.live_distance
    }

    /// Whether an estimate has been applied for a path of two or more points.
    pub fn has_estimate(&self) -> bool {
        self.applied_len >= 2
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self, point: GeoPoint) -> Result<(), DrawingError> {
        if self.is_active() {
            return Err(DrawingError::AlreadyDrawing);
        }
        self.generation += 1;
        self.status = Status::Active;
        self.path = Some(Path::starting_at(point));
        self.start_point = Some(point);
        self.live_distance = DistanceEstimate::zero();
        self.applied_len = 1;
        log::debug!("Started drawing #{} at {}.", self.generation, point);
        Ok(())
    }

    /// Appends `point` and returns the ticket for the distance of the extended
    /// path.
    pub fn push(&mut self, point: GeoPoint) -> Result<DistanceTicket, DrawingError> {
        let path = match (&self.status, &mut self.path) {
            (Status::Active, Some(path)) => path,
            _ => return Err(DrawingError::NotDrawing),
        };
        path.push(point);
        Ok(DistanceTicket {
            generation: self.generation,
            path_len: path.len(),
        })
    }

    /// Applies a resolved estimate unless it is stale. Returns whether it was
    /// applied.
    pub fn apply_distance(&mut self, ticket: DistanceTicket, estimate: DistanceEstimate) -> bool {
        if !self.is_active() || ticket.generation != self.generation {
            log::trace!("Dropped distance of a finished drawing.");
            return false;
        }
        if ticket.path_len < self.applied_len {
            log::trace!(
                "Dropped distance for {} points, already showing {}.",
                ticket.path_len,
                self.applied_len
            );
            return false;
        }
        self.applied_len = ticket.path_len;
        self.live_distance = estimate;
        true
    }

    /// Ends the drawing and hands out its path.
    pub fn finish(&mut self) -> Result<Path, DrawingError> {
        if !self.is_active() {
            return Err(DrawingError::NotDrawing);
        }
        let path = self.path.take().unwrap_or_default();
        self.reset();
        log::debug!("Finished drawing #{} with {} points.", self.generation, path.len());
        Ok(path)
    }

    /// Drops the drawing in progress, if any.
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("Cancelled drawing #{}.", self.generation);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
        self.path = None;
        self.start_point = None;
        self.live_distance = DistanceEstimate::zero();
        self.applied_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing() -> DrawingSession {
        let mut session = DrawingSession::new();
        session.start(GeoPoint::new(40.0, -74.0)).unwrap();
        session
    }

    #[test]
    fn new_sessions_are_idle() {
        let session = DrawingSession::new();
        assert_eq!(session.status(), Status::Idle);
        assert!(session.path().is_none());
        assert!(session.start_point().is_none());
        assert_eq!(session.live_distance().meters(), 0.0);
    }

    #[test]
    fn start_uses_the_click_as_first_vertex() {
        let session = drawing();
        assert_eq!(session.status(), Status::Active);
        assert_eq!(session.start_point(), Some(GeoPoint::new(40.0, -74.0)));
        assert_eq!(session.path().unwrap().points(), &[GeoPoint::new(40.0, -74.0)]);
        assert!(!session.has_estimate());
    }

    #[test]
    fn starting_twice_is_rejected() {
        let mut session = drawing();
        assert_eq!(
            session.start(GeoPoint::new(1.0, 1.0)),
            Err(DrawingError::AlreadyDrawing)
        );
        assert_eq!(session.path().unwrap().len(), 1);
    }

    #[test]
    fn every_move_adds_a_vertex() {
        let mut session = drawing();
        let point = GeoPoint::new(40.01, -74.0);
        let first = session.push(point).unwrap();
        let second = session.push(point).unwrap();
        assert_eq!(first.path_len(), 2);
        assert_eq!(second.path_len(), 3);
        assert_eq!(session.path().unwrap().len(), 3);
    }

    #[test]
    fn moves_while_idle_are_rejected() {
        let mut session = DrawingSession::new();
        assert_eq!(
            session.push(GeoPoint::new(1.0, 1.0)),
            Err(DrawingError::NotDrawing)
        );
    }

    #[test]
    fn stale_distances_are_discarded() {
        let mut session = drawing();
        let short = session.push(GeoPoint::new(40.01, -74.0)).unwrap();
        let long = session.push(GeoPoint::new(40.02, -74.0)).unwrap();

        assert!(session.apply_distance(long, DistanceEstimate::routed(2500.0)));
        assert!(!session.apply_distance(short, DistanceEstimate::routed(1200.0)));
        assert_eq!(session.live_distance(), DistanceEstimate::routed(2500.0));
    }

    #[test]
    fn in_order_distances_are_all_applied() {
        let mut session = drawing();
        let short = session.push(GeoPoint::new(40.01, -74.0)).unwrap();
        let long = session.push(GeoPoint::new(40.02, -74.0)).unwrap();

        assert!(session.apply_distance(short, DistanceEstimate::routed(1200.0)));
        assert!(session.has_estimate());
        assert!(session.apply_distance(long, DistanceEstimate::routed(2500.0)));
        assert_eq!(session.live_distance().meters(), 2500.0);
    }

    #[test]
    fn distances_of_earlier_drawings_are_discarded() {
        let mut session = drawing();
        let old = session.push(GeoPoint::new(40.01, -74.0)).unwrap();
        session.finish().unwrap();
        session.start(GeoPoint::new(50.0, 8.0)).unwrap();
        session.push(GeoPoint::new(50.01, 8.0)).unwrap();

        assert!(!session.apply_distance(old, DistanceEstimate::routed(999.0)));
        assert_eq!(session.live_distance().meters(), 0.0);
    }

    #[test]
    fn finish_hands_out_the_path_and_resets() {
        let mut session = drawing();
        let ticket = session.push(GeoPoint::new(40.01, -74.0)).unwrap();
        session.apply_distance(ticket, DistanceEstimate::straight_line(1111.0));

        let path = session.finish().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(session.status(), Status::Idle);
        assert!(session.path().is_none());
        assert!(session.start_point().is_none());
        assert_eq!(session.live_distance().meters(), 0.0);
        assert!(!session.apply_distance(ticket, DistanceEstimate::routed(1.0)));
    }

    #[test]
    fn finish_while_idle_is_rejected() {
        let mut session = DrawingSession::new();
        assert_eq!(session.finish(), Err(DrawingError::NotDrawing));
    }

    #[test]
    fn cancel_works_in_any_state() {
        let mut session = DrawingSession::new();
        session.cancel();
        assert_eq!(session.status(), Status::Idle);

        let mut session = drawing();
        session.push(GeoPoint::new(40.01, -74.0)).unwrap();
        session.cancel();
        assert_eq!(session.status(), Status::Idle);
        assert!(session.path().is_none());
    }
}
