pub mod entities;
pub mod errors;
pub mod ports;
pub mod request;

// Re-export the domain boundary types and ports.
pub use entities::{Order, OrderDetails, OrderPage, OrderResponse, Review, Tutor, TutorProfile};
pub use errors::{ErrorKind, GatewayError};
pub use ports::{Backend, Clock, ErrorSink, TokenStore};
pub use request::{ApiRequest, InitDataRequest, Method, path_id};
