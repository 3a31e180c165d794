use std::sync::Arc;

use axum::extract::FromRef;

use crate::ai::TutorService;
use crate::attempt::registry::SessionRegistry;
use crate::config::Config;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<SessionRegistry>,
    pub tutor: Arc<dyn TutorService>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<MemoryStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<SessionRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TutorService> {
    fn from_ref(state: &AppState) -> Self {
        state.tutor.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
