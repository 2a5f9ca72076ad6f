use std::sync::Arc;

use poem_openapi::OpenApi;

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::map_health,
    responses::HealthResponse,
};

#[derive(Clone)]
pub struct HealthEndpoints {
    state: Arc<ApiState>,
}

impl HealthEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl HealthEndpoints {
    /// Pings the store and the queue
    #[oai(path = "/health", method = "get", tag = EndpointsTags::Health)]
    pub async fn health(&self) -> HealthResponse {
        let report = self.state.check_health_usecase.execute().await;
        map_health(&report)
    }
}
