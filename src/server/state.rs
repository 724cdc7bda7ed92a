use axum::extract::FromRef;

use crate::label_store::LabelStore;
use crate::user::TokenAuthority;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedLabelStore = Arc<dyn LabelStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub label_store: GuardedLabelStore,
    pub token_authority: TokenAuthority,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        label_store: GuardedLabelStore,
        token_authority: TokenAuthority,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            label_store,
            token_authority,
        }
    }
}

impl FromRef<ServerState> for GuardedLabelStore {
    fn from_ref(input: &ServerState) -> Self {
        input.label_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for TokenAuthority {
    fn from_ref(input: &ServerState) -> Self {
        input.token_authority.clone()
    }
}
