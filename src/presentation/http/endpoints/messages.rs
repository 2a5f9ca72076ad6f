use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    errors::map_domain_error,
    mappers::map_message,
    responses::RetryMessageResponse,
};

#[derive(Clone)]
pub struct MessagesEndpoints {
    state: Arc<ApiState>,
}

impl MessagesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl MessagesEndpoints {
    /// Queues another attempt for a failed message that still has retries left
    #[oai(path = "/messages/:id/retry", method = "post", tag = EndpointsTags::Messages)]
    pub async fn retry_message(&self, id: Path<Uuid>) -> PoemResult<RetryMessageResponse> {
        let message = self
            .state
            .retry_message_usecase
            .execute(id.0)
            .await
            .map_err(map_domain_error)?;

        Ok(RetryMessageResponse::Accepted(Json(map_message(&message))))
    }
}
