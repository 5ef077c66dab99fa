use std::sync::Arc;

use crate::use_cases::session::SessionGateway;

// Entry point used when no session token is stored yet.
pub struct LoginUseCase {
    pub gateway: Arc<SessionGateway>,
}

impl LoginUseCase {
    #[tracing::instrument(name = "authenticate", skip_all)]
    pub async fn authenticate(&self, platform_credential: &str) -> bool {
        match self.gateway.exchange(platform_credential).await {
            Ok(_) => {
                tracing::info!("tutor authenticated");
                true
            }
            Err(error) => {
                self.gateway.report("authenticate", &error);
                false
            }
        }
    }
}
