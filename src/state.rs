use std::sync::Arc;

use crate::domain::repositories::CampRepositoryFactory;
use crate::utils::LinkGenerator;

/// Shared application state handed to every handler.
///
/// Holds no per-request data: the factory hands out a fresh repository
/// (unit of work) per request, and the link generator is immutable.
#[derive(Clone)]
pub struct AppState {
    pub repositories: Arc<dyn CampRepositoryFactory>,
    pub links: LinkGenerator,
}

impl AppState {
    pub fn new(repositories: Arc<dyn CampRepositoryFactory>, links: LinkGenerator) -> Self {
        Self {
            repositories,
            links,
        }
    }
}
