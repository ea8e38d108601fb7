// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    curriculum::Curriculum,
    identity::IdentityProvider,
    store::{HistoryStore, IdentityStore, Stores},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub curriculum: Arc<Curriculum>,
    pub history: Arc<dyn HistoryStore>,
    pub identities: Arc<dyn IdentityStore>,
    /// `None` disables login; anonymous use keeps working.
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores, identity_provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        Self {
            config,
            curriculum: Arc::new(Curriculum::new()),
            history: stores.history,
            identities: stores.identities,
            identity_provider,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<Curriculum> {
    fn from_ref(state: &AppState) -> Self {
        state.curriculum.clone()
    }
}

impl FromRef<AppState> for Arc<dyn HistoryStore> {
    fn from_ref(state: &AppState) -> Self {
        state.history.clone()
    }
}

impl FromRef<AppState> for Arc<dyn IdentityStore> {
    fn from_ref(state: &AppState) -> Self {
        state.identities.clone()
    }
}

impl FromRef<AppState> for Option<Arc<dyn IdentityProvider>> {
    fn from_ref(state: &AppState) -> Self {
        state.identity_provider.clone()
    }
}
