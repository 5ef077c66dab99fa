pub mod login;
pub mod orders;
pub mod profile;
pub mod responses;
pub mod session;
pub mod tags;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use login::LoginUseCase;
pub use orders::OrdersUseCase;
pub use profile::{ProfileField, ProfileUseCase};
pub use responses::ResponsesUseCase;
pub use session::{SessionGateway, TUTOR_ROLE};
pub use tags::{filter_tags, parse_tag_catalog, with_tag, without_tag};
pub use token::{TokenState, is_expired, token_state};
