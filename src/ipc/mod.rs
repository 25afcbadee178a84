mod error;
mod handlers;
mod helpers;
mod notices;
mod router;
mod types;

pub use handlers::core::open_workspace;
pub use router::handle_request;
pub use types::{AppState, Request};
