//! Web layer.
//!
//! Serves the parsed ARSO records as JSON and XML, with a per-station
//! lookup route and static file serving as the fallback.

mod routes;
mod state;
mod xml;

pub use routes::create_router;
pub use state::AppState;
