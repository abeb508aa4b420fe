//! HTTP exposure of the quote access layer

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, ListQuotesResponse};
pub use router::build_quote_routes;
