use model::RouteRecord;

/// Committed routes in commit order.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<RouteRecord>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: RouteRecord) {
        self.routes.push(record);
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }

    pub fn all(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn get(&self, index: usize) -> Option<&RouteRecord> {
        self.routes.get(index)
    }

    pub fn last(&self) -> Option<&RouteRecord> {
        self.routes.last()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
