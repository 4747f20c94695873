//! JSON-lines request handling for the sidecar: one `Request` in, one
//! envelope out. Every roster, attendance, stats and export method needs an
//! open workspace and a logged-in teacher.

mod error;
mod handlers;
mod helpers;
mod router;
mod types;

pub use error::HandlerErr;
pub use router::handle_request;
pub use types::{AppState, Request};
