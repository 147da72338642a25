//! HTTP API module

pub mod handlers;
pub mod respond;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use respond::{JsonOrForm, ResponseMode};
pub use server::ApiServer;
