use std::sync::Arc;

use crate::domain::entities::OrderResponse;
use crate::domain::request::ApiRequest;
use crate::use_cases::session::{SessionGateway, decode_json};

// The tutor's own responses.
pub struct ResponsesUseCase {
    pub gateway: Arc<SessionGateway>,
}

impl ResponsesUseCase {
    #[tracing::instrument(name = "list_responses", skip_all)]
    pub async fn list(&self, platform_credential: &str) -> Vec<OrderResponse> {
        let request = ApiRequest::get("/responses/list");
        self.gateway
            .call(
                "list_responses",
                platform_credential,
                request,
                Vec::new(),
                // The backend sends null instead of an empty list.
                |body| decode_json::<Option<Vec<OrderResponse>>>(body).map(Option::unwrap_or_default),
            )
            .await
    }
}
