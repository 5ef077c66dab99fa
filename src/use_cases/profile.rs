use std::sync::Arc;

use crate::domain::entities::TutorProfile;
use crate::domain::errors::GatewayError;
use crate::domain::request::ApiRequest;
use crate::interface_adapters::protocol::{
    ActiveBody, BioBody, NameBody, ReviewActivationBody, TagsBody,
};
use crate::use_cases::session::{SessionGateway, decode_json};
use crate::use_cases::tags::{with_tag, without_tag};

// Editable profile fields, each updated through its own endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Bio,
    Tags,
    Active,
}

impl ProfileField {
    pub fn path_segment(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Bio => "bio",
            ProfileField::Tags => "tags",
            ProfileField::Active => "active",
        }
    }

    fn path(self) -> String {
        format!("/users/tutor/{}", self.path_segment())
    }
}

pub struct ProfileUseCase {
    pub gateway: Arc<SessionGateway>,
}

impl ProfileUseCase {
    #[tracing::instrument(name = "get_profile", skip_all)]
    pub async fn get(&self, platform_credential: &str) -> Option<TutorProfile> {
        self.gateway
            .call(
                "get_profile",
                platform_credential,
                ApiRequest::get("/users/tutor/profile"),
                None,
                |body| decode_json(body).map(Some),
            )
            .await
    }

    #[tracing::instrument(name = "set_name", skip_all)]
    pub async fn set_name(&self, platform_credential: &str, name: &str) -> bool {
        let name = name.trim();
        let request = if name.is_empty() {
            Err(GatewayError::InvalidInput("name must not be empty".to_string()))
        } else {
            ApiRequest::post(ProfileField::Name.path()).json(&NameBody { name })
        };
        self.update("set_name", platform_credential, request).await
    }

    #[tracing::instrument(name = "set_bio", skip_all)]
    pub async fn set_bio(&self, platform_credential: &str, bio: &str) -> bool {
        let request = ApiRequest::post(ProfileField::Bio.path()).json(&BioBody { bio });
        self.update("set_bio", platform_credential, request).await
    }

    #[tracing::instrument(name = "set_tags", skip_all, fields(count = tags.len()))]
    pub async fn set_tags(&self, platform_credential: &str, tags: &[String]) -> bool {
        let request = ApiRequest::post(ProfileField::Tags.path()).json(&TagsBody { tags });
        self.update("set_tags", platform_credential, request).await
    }

    /// Add one tag to the tags currently on the profile and save the result.
    #[tracing::instrument(name = "add_tag", skip_all, fields(tag = %tag))]
    pub async fn add_tag(&self, platform_credential: &str, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            self.gateway.report(
                "add_tag",
                &GatewayError::InvalidInput("empty tag".to_string()),
            );
            return false;
        }
        match self.get(platform_credential).await {
            Some(profile) => {
                self.set_tags(platform_credential, &with_tag(&profile.tags, tag))
                    .await
            }
            None => false,
        }
    }

    /// Drop one tag from the profile; the remaining tags are saved as a whole.
    #[tracing::instrument(name = "remove_tag", skip_all, fields(tag = %tag))]
    pub async fn remove_tag(&self, platform_credential: &str, tag: &str) -> bool {
        match self.get(platform_credential).await {
            Some(profile) => {
                self.set_tags(platform_credential, &without_tag(&profile.tags, tag))
                    .await
            }
            None => false,
        }
    }

    #[tracing::instrument(name = "set_active", skip_all, fields(is_active = is_active))]
    pub async fn set_active(&self, platform_credential: &str, is_active: bool) -> bool {
        let request = ApiRequest::post(ProfileField::Active.path()).json(&ActiveBody { is_active });
        self.update("set_active", platform_credential, request).await
    }

    #[tracing::instrument(name = "activate_review", skip_all, fields(review_id = %review_id))]
    pub async fn activate_review(&self, platform_credential: &str, review_id: &str) -> bool {
        let request = if review_id.trim().is_empty() {
            Err(GatewayError::InvalidInput("empty review id".to_string()))
        } else {
            ApiRequest::post("/users/review/activate").json(&ReviewActivationBody { review_id })
        };
        self.update("activate_review", platform_credential, request).await
    }

    // Updates succeed on any 2xx; the body is not inspected.
    async fn update(
        &self,
        operation: &'static str,
        platform_credential: &str,
        request: Result<ApiRequest, GatewayError>,
    ) -> bool {
        match request {
            Ok(request) => {
                self.gateway
                    .call(operation, platform_credential, request, false, |_| Ok(true))
                    .await
            }
            Err(error) => {
                self.gateway.report(operation, &error);
                false
            }
        }
    }
}
