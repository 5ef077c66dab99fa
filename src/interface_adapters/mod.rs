pub mod clients;
pub mod presenter;
pub mod protocol;
pub mod state;

pub use clients::{BackendClient, ClientBuildError};
pub use state::{AppState, FileTokenStore, InMemoryTokenStore, SystemClock, TracingErrorSink};
