use std::sync::Arc;

use crate::store::ProjectStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
}
