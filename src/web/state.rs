use std::sync::Arc;

use crate::api::ConferenceApi;
use crate::gateway::IdentityGateway;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ConferenceApi>,
    pub gateway: Arc<dyn IdentityGateway>,
}

impl AppState {
    pub fn new(api: Arc<ConferenceApi>, gateway: Arc<dyn IdentityGateway>) -> Self {
        Self { api, gateway }
    }
}
